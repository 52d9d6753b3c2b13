//! Categories, sections, actions and permissions.
//!
//! A section belongs to one category and an action to one section. A
//! permission can only be mapped to sections and actions of its own
//! category.

use arbor_proto::{Action, Flags, Permission, Request, Section};
use arbor_validation::{validate_category, validate_no_colon};
use tracing::debug;

use crate::args::{split_subject, ArgumentError, Contract};
use crate::error::CliError;
use crate::lookup::Lookup;
use crate::request::{escape, Method, RenderMode, RequestDescriptor};
use crate::resolve::{self, agree, ensure_category, require_qualified, split_qualified};

fn sections(category: &str) -> String {
    format!("/category/{}/section/", escape(category))
}

fn actions(category: &str, section_id: &str) -> String {
    format!("{}{section_id}/action/", sections(category))
}

fn permissions(category: &str) -> String {
    format!("/category/{}/permission/", escape(category))
}

/// `NAME to CATEGORY`
fn name_to_category(args: &[String]) -> Result<(&str, String), CliError> {
    let (name, tail) = split_subject(args)?;
    let kw = Contract::new().unique(["to"]).required(["to"]).parse(tail)?;
    let category = kw.required("to")?;
    validate_no_colon("name", name)?;
    validate_category(category)?;
    Ok((name, category.to_owned()))
}

pub(crate) fn add_section(args: &[String]) -> Result<RequestDescriptor, CliError> {
    let (name, category) = name_to_category(args)?;
    let body = Request {
        section: Some(Section {
            id: None,
            name: Some(name.to_owned()),
            category: Some(category.to_owned()),
        }),
        ..Request::default()
    };
    Ok(RequestDescriptor::post(sections(&category), body))
}

/// Path of `NAME [in CATEGORY]`.
async fn section_item<L: Lookup>(args: &[String], lookup: &L) -> Result<String, CliError> {
    let (name, tail) = split_subject(args)?;
    let kw = Contract::new().unique(["in"]).parse(tail)?;
    let section = resolve::section(lookup, name, kw.one("in")).await?;
    Ok(format!("{}{}", sections(&section.category), section.id))
}

pub(crate) async fn remove_section<L: Lookup>(
    args: &[String],
    lookup: &L,
) -> Result<RequestDescriptor, CliError> {
    Ok(RequestDescriptor::delete(section_item(args, lookup).await?))
}

pub(crate) async fn show_section<L: Lookup>(
    args: &[String],
    lookup: &L,
) -> Result<RequestDescriptor, CliError> {
    Ok(RequestDescriptor::get(
        section_item(args, lookup).await?,
        RenderMode::Show,
    ))
}

/// `in CATEGORY`
pub(crate) fn list_sections(args: &[String]) -> Result<RequestDescriptor, CliError> {
    let kw = Contract::new().unique(["in"]).required(["in"]).parse(args)?;
    let category = kw.required("in")?;
    validate_category(category)?;
    Ok(RequestDescriptor::get(sections(category), RenderMode::List))
}

/// `NAME to SECTION [in CATEGORY]`
pub(crate) async fn add_action<L: Lookup>(
    args: &[String],
    lookup: &L,
) -> Result<RequestDescriptor, CliError> {
    let (name, tail) = split_subject(args)?;
    let kw = Contract::new()
        .unique(["to", "in"])
        .required(["to"])
        .parse(tail)?;
    validate_no_colon("name", name)?;
    let section = resolve::section(lookup, kw.required("to")?, kw.one("in")).await?;
    let body = Request {
        action: Some(Action {
            id: None,
            name: Some(name.to_owned()),
            section_id: Some(section.id.clone()),
            category: Some(section.category.clone()),
        }),
        ..Request::default()
    };
    Ok(RequestDescriptor::post(
        actions(&section.category, &section.id),
        body,
    ))
}

/// Path of `NAME from SECTION [in CATEGORY]`.
async fn action_item<L: Lookup>(args: &[String], lookup: &L) -> Result<String, CliError> {
    let (name, tail) = split_subject(args)?;
    let kw = Contract::new()
        .unique(["from", "in"])
        .required(["from"])
        .parse(tail)?;
    let section = resolve::section(lookup, kw.required("from")?, kw.one("in")).await?;
    let id = lookup.action_id(name, &section.id).await?;
    Ok(format!("{}{id}", actions(&section.category, &section.id)))
}

pub(crate) async fn remove_action<L: Lookup>(
    args: &[String],
    lookup: &L,
) -> Result<RequestDescriptor, CliError> {
    Ok(RequestDescriptor::delete(action_item(args, lookup).await?))
}

pub(crate) async fn show_action<L: Lookup>(
    args: &[String],
    lookup: &L,
) -> Result<RequestDescriptor, CliError> {
    Ok(RequestDescriptor::get(
        action_item(args, lookup).await?,
        RenderMode::Show,
    ))
}

/// `from SECTION [in CATEGORY]`
pub(crate) async fn list_actions<L: Lookup>(
    args: &[String],
    lookup: &L,
) -> Result<RequestDescriptor, CliError> {
    let kw = Contract::new()
        .unique(["from", "in"])
        .required(["from"])
        .parse(args)?;
    let section = resolve::section(lookup, kw.required("from")?, kw.one("in")).await?;
    Ok(RequestDescriptor::get(
        actions(&section.category, &section.id),
        RenderMode::List,
    ))
}

pub(crate) fn add_permission(args: &[String]) -> Result<RequestDescriptor, CliError> {
    let (name, category) = name_to_category(args)?;
    let body = Request {
        permission: Some(Permission {
            name: Some(name.to_owned()),
            category: Some(category.to_owned()),
            ..Permission::default()
        }),
        ..Request::default()
    };
    Ok(RequestDescriptor::post(permissions(&category), body))
}

/// Path of `[CATEGORY::]NAME [from|in CATEGORY]`.
async fn permission_item<L: Lookup>(args: &[String], lookup: &L) -> Result<String, CliError> {
    let (subject, tail) = split_subject(args)?;
    let kw = Contract::new().unique(["from", "in"]).parse(tail)?;
    let (qualifier, name) = split_qualified(subject);
    let given = agree("category", kw.one("from"), kw.one("in"))?;
    let category = agree("category", qualifier, given)?.ok_or_else(|| {
        ArgumentError::unexpected(
            subject,
            "no category given: use category::permission or from <category>",
        )
    })?;
    validate_category(category)?;
    let id = lookup.permission_id(name, category).await?;
    Ok(format!("{}{}", permissions(category), escape(&id)))
}

pub(crate) async fn remove_permission<L: Lookup>(
    args: &[String],
    lookup: &L,
) -> Result<RequestDescriptor, CliError> {
    Ok(RequestDescriptor::delete(permission_item(args, lookup).await?))
}

pub(crate) async fn show_permission<L: Lookup>(
    args: &[String],
    lookup: &L,
) -> Result<RequestDescriptor, CliError> {
    Ok(RequestDescriptor::get(
        permission_item(args, lookup).await?,
        RenderMode::Show,
    ))
}

/// `in CATEGORY`
pub(crate) fn list_permissions(args: &[String]) -> Result<RequestDescriptor, CliError> {
    let kw = Contract::new().unique(["in"]).required(["in"]).parse(args)?;
    let category = kw.required("in")?;
    validate_category(category)?;
    Ok(RequestDescriptor::get(permissions(category), RenderMode::List))
}

/// `SECTION[::ACTION] to|from CATEGORY::PERMISSION`
///
/// Maps (`flags.add`) or unmaps (`flags.remove`) one section or action.
pub(crate) async fn map<L: Lookup>(
    args: &[String],
    flags: Flags,
    lookup: &L,
) -> Result<RequestDescriptor, CliError> {
    let link = if flags.remove { "from" } else { "to" };
    let (subject, tail) = split_subject(args)?;
    let kw = Contract::new().unique([link]).required([link]).parse(tail)?;
    let (category, permission) =
        require_qualified(kw.required(link)?, "category::permission")?;
    validate_category(category)?;

    let (section_name, action_name) = match subject.split_once(resolve::QUALIFIER) {
        Some((section, action)) => (section, Some(action)),
        None => (subject, None),
    };
    let section = resolve::section(lookup, section_name, None).await?;
    ensure_category(category, &section.category)?;

    let mut grant = Permission {
        name: Some(permission.to_owned()),
        category: Some(category.to_owned()),
        ..Permission::default()
    };
    match action_name {
        Some(action) => {
            let action_id = lookup.action_id(action, &section.id).await?;
            grant.actions = Some(vec![Action {
                id: Some(action_id),
                name: Some(action.to_owned()),
                section_id: Some(section.id.clone()),
                category: Some(category.to_owned()),
            }]);
        }
        None => {
            grant.sections = Some(vec![Section {
                id: Some(section.id.clone()),
                name: Some(section_name.to_owned()),
                category: Some(category.to_owned()),
            }]);
        }
    }
    let permission_id = lookup.permission_id(permission, category).await?;
    grant.id = Some(permission_id.clone());
    debug!(%category, permission, section = section_name, ?action_name, "Mapping permission");

    Ok(RequestDescriptor::with_body(
        Method::PatchBody,
        format!("{}{}", permissions(category), escape(&permission_id)),
        Request {
            flags: Some(flags),
            permission: Some(grant),
            ..Request::default()
        },
    ))
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

    fn lookup() -> FakeLookup {
        FakeLookup::new()
            .with("section", "auth", "", "S1")
            .with("category of section", "S1", "", "global")
            .with("action", "login", "S1", "A1")
            .with("permission", "administrate", "global", "P1")
    }

    #[tokio::test]
    async fn map_action_to_permission() {
        let d = map(
            &toks("auth::login to global::administrate"),
            Flags::add(),
            &lookup(),
        )
        .await
        .unwrap();
        assert_eq!(d.method, Method::PatchBody);
        assert_eq!(d.path, "/category/global/permission/P1");
        assert_eq!(
            body_json(&d),
            json!({
                "flags": {"add": true},
                "permission": {
                    "id": "P1",
                    "name": "administrate",
                    "category": "global",
                    "actions": [{
                        "id": "A1",
                        "name": "login",
                        "sectionID": "S1",
                        "category": "global"
                    }]
                }
            })
        );
    }

    #[tokio::test]
    async fn map_across_categories_fails() {
        let err = map(
            &toks("auth::login to system::administrate"),
            Flags::add(),
            &lookup(),
        )
        .await
        .unwrap_err();
        assert!(matches!(
            err,
            CliError::CategoryMismatch { ref expected, ref actual }
                if expected == "system" && actual == "global"
        ));
    }

    #[tokio::test]
    async fn unmap_section_uses_from() {
        let d = map(
            &toks("auth from global::administrate"),
            Flags::remove(),
            &lookup(),
        )
        .await
        .unwrap();
        assert_eq!(
            body_json(&d),
            json!({
                "flags": {"remove": true},
                "permission": {
                    "id": "P1",
                    "name": "administrate",
                    "category": "global",
                    "sections": [{"id": "S1", "name": "auth", "category": "global"}]
                }
            })
        );

        let err = map(
            &toks("auth to global::administrate"),
            Flags::remove(),
            &lookup(),
        )
        .await
        .unwrap_err();
        assert_eq!(err.to_string(), "unknown keyword: to");
    }

    #[tokio::test]
    async fn map_target_must_be_qualified() {
        let err = map(&toks("auth to administrate"), Flags::add(), &lookup())
            .await
            .unwrap_err();
        assert!(matches!(err, CliError::Argument(ArgumentError::Unexpected { .. })));
    }

    #[test]
    fn section_add_checks_name_and_category() {
        let d = add_section(&toks("auth to global")).unwrap();
        assert_eq!(d.path, "/category/global/section/");
        assert_eq!(
            body_json(&d),
            json!({"section": {"name": "auth", "category": "global"}})
        );
        assert!(add_section(&toks("au:th to global")).is_err());
        assert!(add_section(&toks("auth to nowhere")).is_err());
    }

    #[tokio::test]
    async fn action_add_resolves_section_category() {
        let d = add_action(&toks("logout to auth in global"), &lookup())
            .await
            .unwrap();
        assert_eq!(d.path, "/category/global/section/S1/action/");
        assert_eq!(
            body_json(&d),
            json!({"action": {"name": "logout", "sectionID": "S1", "category": "global"}})
        );

        let err = add_action(&toks("logout to auth in system"), &lookup())
            .await
            .unwrap_err();
        assert!(matches!(err, CliError::CategoryMismatch { .. }));
    }

    #[tokio::test]
    async fn permission_remove_takes_category_from_either_place() {
        let lookup = lookup();
        let d = remove_permission(&toks("global::administrate"), &lookup)
            .await
            .unwrap();
        assert_eq!(d.path, "/category/global/permission/P1");
        let d = remove_permission(&toks("administrate from global"), &lookup)
            .await
            .unwrap();
        assert_eq!(d.path, "/category/global/permission/P1");

        let err = remove_permission(&toks("global::administrate from system"), &lookup)
            .await
            .unwrap_err();
        assert!(matches!(err, CliError::Mismatch { .. }));

        let err = show_permission(&toks("administrate"), &lookup)
            .await
            .unwrap_err();
        assert!(matches!(err, CliError::Argument(_)));
    }

    #[tokio::test]
    async fn section_and_action_paths() {
        let lookup = lookup();
        let d = show_section(&toks("auth"), &lookup).await.unwrap();
        assert_eq!(d.path, "/category/global/section/S1");
        let d = remove_action(&toks("login from auth"), &lookup).await.unwrap();
        assert_eq!(d.path, "/category/global/section/S1/action/A1");
        let d = list_actions(&toks("from auth"), &lookup).await.unwrap();
        assert_eq!(d.render, RenderMode::List);
        let d = list_sections(&toks("in global:grant")).unwrap();
        assert_eq!(d.path, "/category/global%3Agrant/section/");
        let d = list_permissions(&toks("in self")).unwrap();
        assert_eq!(d.path, "/category/self/permission/");
    }
}
