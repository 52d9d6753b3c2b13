//! Oncall duties.

use arbor_proto::{Oncall, Request};
use arbor_validation::validate_unsigned;

use crate::args::{exactly, sole, split_subject, ArgumentError, Contract};
use crate::error::CliError;
use crate::lookup::Lookup;
use crate::request::{Method, RenderMode, RequestDescriptor};

const ONCALL: &str = "/oncall/";

fn check_number(number: &str) -> Result<(), CliError> {
    validate_unsigned("phone", number)?;
    Ok(())
}

fn request(oncall: Oncall) -> Request {
    Request {
        oncall: Some(oncall),
        ..Request::default()
    }
}

/// `NAME phone NUMBER`
pub(crate) fn add(args: &[String]) -> Result<RequestDescriptor, CliError> {
    let (name, tail) = split_subject(args)?;
    let kw = Contract::new()
        .unique(["phone"])
        .required(["phone"])
        .parse(tail)?;
    let number = kw.required("phone")?;
    check_number(number)?;
    Ok(RequestDescriptor::post(
        ONCALL,
        request(Oncall {
            id: None,
            name: Some(name.to_owned()),
            number: Some(number.to_owned()),
        }),
    ))
}

pub(crate) async fn remove<L: Lookup>(
    args: &[String],
    lookup: &L,
) -> Result<RequestDescriptor, CliError> {
    let id = lookup.oncall_id(sole(args)?).await?;
    Ok(RequestDescriptor::delete(format!("{ONCALL}{id}")))
}

/// `NAME to NEW`
pub(crate) async fn rename<L: Lookup>(
    args: &[String],
    lookup: &L,
) -> Result<RequestDescriptor, CliError> {
    let (name, tail) = split_subject(args)?;
    let kw = Contract::new().unique(["to"]).required(["to"]).parse(tail)?;
    let id = lookup.oncall_id(name).await?;
    Ok(RequestDescriptor::with_body(
        Method::PatchBody,
        format!("{ONCALL}{id}"),
        request(Oncall {
            id: Some(id),
            name: Some(kw.required("to")?.to_owned()),
            number: None,
        }),
    ))
}

/// `NAME [name NEW] [phone NUMBER]`, at least one of them.
pub(crate) async fn update<L: Lookup>(
    args: &[String],
    lookup: &L,
) -> Result<RequestDescriptor, CliError> {
    let (name, tail) = split_subject(args)?;
    let kw = Contract::new().unique(["name", "phone"]).parse(tail)?;
    if !kw.has("name") && !kw.has("phone") {
        return Err(ArgumentError::MissingRequired("name or phone".into()).into());
    }
    if let Some(number) = kw.one("phone") {
        check_number(number)?;
    }
    let id = lookup.oncall_id(name).await?;
    Ok(RequestDescriptor::with_body(
        Method::PatchBody,
        format!("{ONCALL}{id}"),
        request(Oncall {
            id: Some(id),
            name: kw.one("name").map(str::to_owned),
            number: kw.one("phone").map(str::to_owned),
        }),
    ))
}

pub(crate) fn list(args: &[String]) -> Result<RequestDescriptor, CliError> {
    exactly(args, 0)?;
    Ok(RequestDescriptor::get(ONCALL, RenderMode::List))
}

pub(crate) async fn show<L: Lookup>(
    args: &[String],
    lookup: &L,
) -> Result<RequestDescriptor, CliError> {
    let id = lookup.oncall_id(sole(args)?).await?;
    Ok(RequestDescriptor::get(format!("{ONCALL}{id}"), RenderMode::Show))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::fake::FakeLookup;
    use serde_json::json;

    fn toks(s: &str) -> Vec<String> {
        s.split_whitespace().map(String::from).collect()
    }

    fn body_json(descriptor: &RequestDescriptor) -> serde_json::Value {
        serde_json::to_value(descriptor.body.as_ref().unwrap()).unwrap()
    }

    #[test]
    fn add_requires_numeric_phone() {
        let d = add(&toks("db-duty phone 4711")).unwrap();
        assert_eq!(d.path, "/oncall/");
        assert_eq!(
            body_json(&d),
            json!({"oncall": {"name": "db-duty", "number": "4711"}})
        );
        assert!(matches!(
            add(&toks("db-duty phone call-me")),
            Err(CliError::Validation(_))
        ));
        assert!(add(&toks("db-duty")).is_err());
    }

    #[tokio::test]
    async fn update_sends_given_fields_only() {
        let lookup = FakeLookup::new().with_oncall("O1", "db-duty", "4711");
        let d = update(&toks("db-duty phone 4712"), &lookup).await.unwrap();
        assert_eq!(d.method, Method::PatchBody);
        assert_eq!(d.path, "/oncall/O1");
        assert_eq!(body_json(&d), json!({"oncall": {"id": "O1", "number": "4712"}}));

        let err = update(&toks("db-duty"), &lookup).await.unwrap_err();
        assert_eq!(err.to_string(), "missing required keyword: name or phone");
    }

    #[tokio::test]
    async fn rename_and_remove() {
        let lookup = FakeLookup::new().with_oncall("O1", "db-duty", "4711");
        let d = rename(&toks("db-duty to dba-duty"), &lookup).await.unwrap();
        assert_eq!(body_json(&d), json!({"oncall": {"id": "O1", "name": "dba-duty"}}));
        let d = remove(&toks("db-duty"), &lookup).await.unwrap();
        assert_eq!(d.method, Method::Delete);
        assert_eq!(d.path, "/oncall/O1");
    }
}
