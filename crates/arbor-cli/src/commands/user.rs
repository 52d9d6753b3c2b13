//! Users and teams.

use arbor_proto::{Request, User};
use arbor_validation::{validate_bool, validate_unsigned};

use crate::args::{exactly, sole, split_subject, Contract};
use crate::error::CliError;
use crate::lookup::Lookup;
use crate::request::{RenderMode, RequestDescriptor};

const USER: &str = "/user/";
const TEAM: &str = "/team/";

const USER_FIELDS: [&str; 5] = ["firstname", "lastname", "employeenr", "mailaddr", "team"];

/// `USERNAME firstname F lastname L employeenr N mailaddr M team T [deleted B]`
pub(crate) async fn add<L: Lookup>(
    args: &[String],
    lookup: &L,
) -> Result<RequestDescriptor, CliError> {
    let (user_name, tail) = split_subject(args)?;
    let kw = Contract::new()
        .unique(USER_FIELDS.iter().copied().chain(["deleted"]))
        .required(USER_FIELDS)
        .parse(tail)?;
    let employee_number = kw.required("employeenr")?;
    validate_unsigned("employeenr", employee_number)?;
    let deleted = match kw.one("deleted") {
        Some(value) => validate_bool("deleted", value)?,
        None => false,
    };
    let team_id = lookup.team_id(kw.required("team")?).await?;

    let user = User {
        id: None,
        user_name: Some(user_name.to_owned()),
        first_name: Some(kw.required("firstname")?.to_owned()),
        last_name: Some(kw.required("lastname")?.to_owned()),
        employee_number: Some(employee_number.to_owned()),
        mail_address: Some(kw.required("mailaddr")?.to_owned()),
        team_id: Some(team_id),
        is_deleted: Some(deleted),
    };
    Ok(RequestDescriptor::post(
        USER,
        Request {
            user: Some(user),
            ..Request::default()
        },
    ))
}

pub(crate) async fn remove<L: Lookup>(
    args: &[String],
    lookup: &L,
) -> Result<RequestDescriptor, CliError> {
    let id = lookup.user_id(sole(args)?).await?;
    Ok(RequestDescriptor::delete(format!("{USER}{id}")))
}

pub(crate) fn list_users(args: &[String]) -> Result<RequestDescriptor, CliError> {
    exactly(args, 0)?;
    Ok(RequestDescriptor::get(USER, RenderMode::List))
}

pub(crate) async fn show_user<L: Lookup>(
    args: &[String],
    lookup: &L,
) -> Result<RequestDescriptor, CliError> {
    let id = lookup.user_id(sole(args)?).await?;
    Ok(RequestDescriptor::get(format!("{USER}{id}"), RenderMode::Show))
}

pub(crate) fn list_teams(args: &[String]) -> Result<RequestDescriptor, CliError> {
    exactly(args, 0)?;
    Ok(RequestDescriptor::get(TEAM, RenderMode::List))
}

pub(crate) async fn show_team<L: Lookup>(
    args: &[String],
    lookup: &L,
) -> Result<RequestDescriptor, CliError> {
    let id = lookup.team_id(sole(args)?).await?;
    Ok(RequestDescriptor::get(format!("{TEAM}{id}"), RenderMode::Show))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::fake::FakeLookup;
    use serde_json::json;

    fn toks(s: &str) -> Vec<String> {
        s.split_whitespace().map(String::from).collect()
    }

    const ALICE: &str = "alice firstname Alice lastname Liddell employeenr 1042 \
                         mailaddr alice@example.org team ops";

    #[tokio::test]
    async fn add_user_resolves_team() {
        let lookup = FakeLookup::new().with("team", "ops", "", "T1");
        let d = add(&toks(ALICE), &lookup).await.unwrap();
        assert_eq!(d.path, "/user/");
        assert_eq!(
            serde_json::to_value(d.body.unwrap()).unwrap(),
            json!({"user": {
                "userName": "alice",
                "firstName": "Alice",
                "lastName": "Liddell",
                "employeeNumber": "1042",
                "mailAddress": "alice@example.org",
                "teamID": "T1",
                "isDeleted": false
            }})
        );
    }

    #[tokio::test]
    async fn add_user_checks_fields() {
        let lookup = FakeLookup::new().with("team", "ops", "", "T1");
        let err = add(&toks("alice firstname Alice"), &lookup).await.unwrap_err();
        assert!(err.to_string().starts_with("missing required keyword"));

        let bad = ALICE.replace("1042", "ten");
        assert!(matches!(
            add(&toks(&bad), &lookup).await,
            Err(CliError::Validation(_))
        ));

        let deleted = format!("{ALICE} deleted yes");
        let d = add(&toks(&deleted), &lookup).await.unwrap();
        assert_eq!(d.body.unwrap().user.unwrap().is_deleted, Some(true));
    }

    #[tokio::test]
    async fn show_paths() {
        let lookup = FakeLookup::new()
            .with("team", "ops", "", "T1")
            .with("user", "alice", "", "U1");
        assert_eq!(show_team(&toks("ops"), &lookup).await.unwrap().path, "/team/T1");
        assert_eq!(show_user(&toks("alice"), &lookup).await.unwrap().path, "/user/U1");
        assert_eq!(remove(&toks("alice"), &lookup).await.unwrap().path, "/user/U1");
        assert_eq!(list_teams(&[]).unwrap().path, "/team/");
    }
}
