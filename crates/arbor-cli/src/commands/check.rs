//! Check configurations.
//!
//! `check-config create` has its own grammar: besides single-use
//! keywords it takes `on TYPE OBJECT`, repeated `threshold` blocks of
//! three keyword pairs, and repeated `constraint` clauses whose arity
//! depends on their kind.

use arbor_proto::{
    CheckConfig, Constraint, CustomProperty, NativeProperty, ObjectKind, OncallProperty, Request,
    ServiceAttribute, ServiceProperty, SystemProperty, Threshold,
};
use arbor_validation::{validate_bool, validate_signed, validate_system_property, validate_unsigned};
use tracing::debug;

use crate::args::{split_subject, ArgumentError, Contract};
use crate::error::CliError;
use crate::lookup::Lookup;
use crate::request::{RenderMode, RequestDescriptor};
use crate::resolve;

const KEYWORDS: [&str; 6] = ["in", "with", "interval", "inheritance", "childrenonly", "extern"];

/// One `threshold predicate P level L value V` block, unvalidated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct ThresholdArgs {
    predicate: Option<String>,
    level: Option<String>,
    value: Option<String>,
}

impl ThresholdArgs {
    fn slot(&mut self, keyword: &str) -> Option<&mut Option<String>> {
        match keyword {
            "predicate" => Some(&mut self.predicate),
            "level" => Some(&mut self.level),
            "value" => Some(&mut self.value),
            _ => None,
        }
    }

    fn finish(self) -> Result<Threshold, CliError> {
        let missing = |keyword: &str| ArgumentError::MissingRequired(format!("threshold {keyword}"));
        let value = self.value.ok_or_else(|| missing("value"))?;
        Ok(Threshold {
            predicate: self.predicate.ok_or_else(|| missing("predicate"))?,
            level: self.level.ok_or_else(|| missing("level"))?,
            value: validate_signed("value", &value)?,
        })
    }
}

/// One constraint clause, unresolved.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ConstraintArgs {
    Service(String),
    Oncall(String),
    Attribute(String, String),
    System(String, String),
    Native(String, String),
    Custom(String, String),
}

/// Parsed `check-config create` arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct CheckArgs {
    /// Single-use keywords in input order.
    keywords: Vec<String>,
    target: Option<(ObjectKind, String)>,
    thresholds: Vec<Threshold>,
    constraints: Vec<ConstraintArgs>,
}

/// Cursor over the keyword tail.
struct Tokens<'a> {
    tokens: &'a [String],
    pos: usize,
}

impl<'a> Tokens<'a> {
    fn next(&mut self) -> Option<&'a str> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token.as_str())
    }

    fn peek(&self) -> Option<&'a str> {
        self.tokens.get(self.pos).map(String::as_str)
    }

    fn value(&mut self) -> Result<String, ArgumentError> {
        self.next()
            .map(str::to_owned)
            .ok_or(ArgumentError::MalformedTail)
    }
}

fn parse(tail: &[String]) -> Result<CheckArgs, CliError> {
    let mut tokens = Tokens { tokens: tail, pos: 0 };
    let mut args = CheckArgs::default();
    let mut pairs = Vec::new();

    while let Some(keyword) = tokens.next() {
        match keyword {
            "on" => {
                if args.target.is_some() {
                    return Err(ArgumentError::DuplicateUnique("on".into()).into());
                }
                let kind: ObjectKind = tokens.value()?.parse()?;
                args.target = Some((kind, tokens.value()?));
            }
            "threshold" => {
                let mut threshold = ThresholdArgs::default();
                while let Some(keyword) = tokens.peek() {
                    let Some(slot) = threshold.slot(keyword) else {
                        break;
                    };
                    if slot.is_some() {
                        break;
                    }
                    tokens.next();
                    *slot = Some(tokens.value()?);
                }
                args.thresholds.push(threshold.finish()?);
            }
            "constraint" => {
                let kind = tokens.value()?;
                let constraint = match kind.as_str() {
                    "service" => ConstraintArgs::Service(tokens.value()?),
                    "oncall" => ConstraintArgs::Oncall(tokens.value()?),
                    "attribute" => ConstraintArgs::Attribute(tokens.value()?, tokens.value()?),
                    "system" => ConstraintArgs::System(tokens.value()?, tokens.value()?),
                    "native" => ConstraintArgs::Native(tokens.value()?, tokens.value()?),
                    "custom" => ConstraintArgs::Custom(tokens.value()?, tokens.value()?),
                    _ => {
                        return Err(
                            ArgumentError::unexpected(kind.as_str(), "unknown constraint kind").into(),
                        );
                    }
                };
                args.constraints.push(constraint);
            }
            _ => {
                pairs.push(keyword.to_owned());
                pairs.push(tokens.value()?);
            }
        }
    }
    args.keywords = pairs;
    Ok(args)
}

/// Where the check attaches, and the repository that owns it.
#[derive(Debug)]
struct Placement {
    repository_id: String,
    bucket_id: Option<String>,
    kind: ObjectKind,
    object_id: String,
}

/// Resolve `in CONTAINER on TYPE OBJECT`.
///
/// For groups and clusters the container is their bucket, otherwise the
/// repository, which must own the object.
async fn place<L: Lookup>(
    container: &str,
    kind: ObjectKind,
    object: &str,
    lookup: &L,
) -> Result<Placement, CliError> {
    if kind.is_bucket_scoped() {
        let resolved = resolve::object(lookup, kind, object, Some(container)).await?;
        let repository_id = resolved.repository(lookup).await?;
        return Ok(Placement {
            repository_id,
            bucket_id: resolved.bucket_id,
            kind,
            object_id: resolved.id,
        });
    }
    let repository_id = lookup.repository_id(container).await?;
    let resolved = resolve::object(lookup, kind, object, None).await?;
    let owner = resolved.repository(lookup).await?;
    resolve::agree("repository", Some(&repository_id), Some(&owner))?;
    let bucket_id = (kind == ObjectKind::Bucket).then(|| resolved.id.clone());
    Ok(Placement {
        repository_id,
        bucket_id,
        kind,
        object_id: resolved.id,
    })
}

async fn constraint<L: Lookup>(
    args: ConstraintArgs,
    repository_id: &str,
    lookup: &L,
) -> Result<Constraint, CliError> {
    let mut constraint = Constraint::default();
    match args {
        ConstraintArgs::Service(name) => {
            let team_id = lookup.team_by_repository(repository_id).await?;
            lookup.service_property_id(&name, &team_id).await?;
            constraint.constraint_type = "service".into();
            constraint.service = Some(ServiceProperty {
                name,
                team_id: Some(team_id),
                attributes: Vec::new(),
            });
        }
        ConstraintArgs::Oncall(name) => {
            let id = lookup.oncall_id(&name).await?;
            let details = lookup.oncall_details(&id).await?;
            constraint.constraint_type = "oncall".into();
            constraint.oncall = Some(OncallProperty {
                id: Some(id),
                name: details.name.or(Some(name)),
                number: details.number,
            });
        }
        ConstraintArgs::Attribute(name, value) => {
            constraint.constraint_type = "attribute".into();
            constraint.attribute = Some(ServiceAttribute { name, value });
        }
        ConstraintArgs::System(name, value) => {
            validate_system_property(&name)?;
            constraint.constraint_type = "system".into();
            constraint.system = Some(SystemProperty { name, value });
        }
        ConstraintArgs::Native(name, value) => {
            constraint.constraint_type = "native".into();
            constraint.native = Some(NativeProperty { name, value });
        }
        ConstraintArgs::Custom(name, value) => {
            let id = lookup.custom_property_id(&name, repository_id).await?;
            constraint.constraint_type = "custom".into();
            constraint.custom = Some(CustomProperty {
                id: Some(id),
                repository_id: Some(repository_id.to_owned()),
                name,
                value,
            });
        }
    }
    Ok(constraint)
}

/// `NAME in CONTAINER on TYPE OBJECT with CAPABILITY interval SECONDS ...`
pub(crate) async fn create<L: Lookup>(
    args: &[String],
    lookup: &L,
) -> Result<RequestDescriptor, CliError> {
    let (name, tail) = split_subject(args)?;
    let parsed = parse(tail)?;
    let kw = Contract::new()
        .unique(KEYWORDS)
        .required(["in", "with", "interval"])
        .parse(&parsed.keywords)?;
    let (kind, object) = parsed
        .target
        .ok_or_else(|| ArgumentError::MissingRequired("on".into()))?;
    if parsed.thresholds.is_empty() {
        return Err(ArgumentError::MissingRequired("threshold".into()).into());
    }

    let interval = validate_unsigned("interval", kw.required("interval")?)?;
    let inheritance = match kw.one("inheritance") {
        Some(value) => validate_bool("inheritance", value)?,
        None => true,
    };
    let children_only = match kw.one("childrenonly") {
        Some(value) => validate_bool("childrenonly", value)?,
        None => false,
    };

    let placement = place(kw.required("in")?, kind, &object, lookup).await?;
    let capability_id = lookup.capability_id(kw.required("with")?).await?;
    let mut constraints = Vec::with_capacity(parsed.constraints.len());
    for args in parsed.constraints {
        constraints.push(constraint(args, &placement.repository_id, lookup).await?);
    }
    debug!(
        check = name,
        repository = %placement.repository_id,
        object = %placement.object_id,
        thresholds = parsed.thresholds.len(),
        constraints = constraints.len(),
        "Built check configuration"
    );

    let config = CheckConfig {
        id: None,
        name: Some(name.to_owned()),
        repository_id: Some(placement.repository_id.clone()),
        bucket_id: placement.bucket_id,
        object_id: Some(placement.object_id),
        object_type: Some(placement.kind),
        capability_id: Some(capability_id),
        interval: Some(interval),
        inheritance: Some(inheritance),
        children_only: Some(children_only),
        external_id: kw.one("extern").map(str::to_owned),
        thresholds: Some(parsed.thresholds),
        constraints: (!constraints.is_empty()).then_some(constraints),
    };
    Ok(RequestDescriptor::post(
        format!("/checks/{}/", placement.repository_id),
        Request {
            check_config: Some(config),
            ..Request::default()
        },
    ))
}

/// Path of `NAME in REPOSITORY`.
async fn item<L: Lookup>(args: &[String], lookup: &L) -> Result<String, CliError> {
    let (name, tail) = split_subject(args)?;
    let kw = Contract::new().unique(["in"]).required(["in"]).parse(tail)?;
    let repository_id = lookup.repository_id(kw.required("in")?).await?;
    let id = lookup.check_config_id(name, &repository_id).await?;
    Ok(format!("/checks/{repository_id}/{id}"))
}

pub(crate) async fn delete<L: Lookup>(
    args: &[String],
    lookup: &L,
) -> Result<RequestDescriptor, CliError> {
    Ok(RequestDescriptor::delete(item(args, lookup).await?))
}

pub(crate) async fn show<L: Lookup>(
    args: &[String],
    lookup: &L,
) -> Result<RequestDescriptor, CliError> {
    Ok(RequestDescriptor::get(item(args, lookup).await?, RenderMode::Show))
}

/// `NAME on TYPE OBJECT`: the repository is the one owning the object.
pub(crate) async fn locate<L: Lookup>(
    args: &[String],
    lookup: &L,
) -> Result<RequestDescriptor, CliError> {
    let (name, tail) = split_subject(args)?;
    let (kind, object) = match tail {
        [keyword, kind, object] if keyword == "on" => (kind, object),
        [keyword, ..] if keyword != "on" => {
            return Err(ArgumentError::unexpected(keyword.as_str(), "expected 'on'").into());
        }
        _ => {
            return Err(ArgumentError::Arity {
                expected: "3 after the name".into(),
                actual: tail.len(),
            }
            .into());
        }
    };
    let kind: ObjectKind = kind.parse()?;
    if kind.is_bucket_scoped() {
        return Err(CliError::Usage(format!(
            "{kind} names are only unique within a bucket, use 'check-config show' instead"
        )));
    }
    let resolved = resolve::object(lookup, kind, object, None).await?;
    let repository_id = resolved.repository(lookup).await?;
    let id = lookup.check_config_id(name, &repository_id).await?;
    debug!(check = name, %kind, object = %resolved.id, "Located check through its object");
    Ok(RequestDescriptor::get(
        format!("/checks/{repository_id}/{id}"),
        RenderMode::Show,
    ))
}

/// `in REPOSITORY`
pub(crate) async fn list<L: Lookup>(
    args: &[String],
    lookup: &L,
) -> Result<RequestDescriptor, CliError> {
    let kw = Contract::new().unique(["in"]).required(["in"]).parse(args)?;
    let repository_id = lookup.repository_id(kw.required("in")?).await?;
    Ok(RequestDescriptor::get(
        format!("/checks/{repository_id}/"),
        RenderMode::List,
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

    fn lookup() -> FakeLookup {
        FakeLookup::new()
            .with("bucket", "prodbucket", "", "B1")
            .with("group", "api", "B1", "G1")
            .with("repository", "infra", "", "R1")
            .with("repository of bucket", "B1", "", "R1")
            .with("team of repository", "R1", "", "T1")
            .with("node", "web01", "", "N1")
            .with_node_config("N1", "R1", "B1")
            .with("bucket", "stagebucket", "", "B2")
            .with("repository of bucket", "B2", "", "R2")
            .with("node", "db07", "", "N2")
            .with_node_config("N2", "R2", "B2")
            .with("capability", "icinga.http", "", "CAP1")
            .with("service property", "http", "T1", "SP1")
            .with("custom property", "owner", "R1", "CP1")
            .with("check", "http-up", "R1", "CC1")
            .with_oncall("O1", "db-duty", "4711")
    }

    #[test]
    fn parse_collects_blocks() {
        let parsed = parse(&toks(
            "in infra on node web01 threshold predicate >= level warning value 80 \
             with cap interval 60 constraint system fqdn web01 constraint oncall db-duty",
        ))
        .unwrap();
        assert_eq!(parsed.target, Some((ObjectKind::Node, "web01".to_owned())));
        assert_eq!(
            parsed.thresholds,
            vec![Threshold {
                predicate: ">=".into(),
                level: "warning".into(),
                value: 80
            }]
        );
        assert_eq!(parsed.keywords, toks("in infra with cap interval 60"));
        assert_eq!(parsed.constraints.len(), 2);
    }

    #[test]
    fn incomplete_threshold_names_missing_keyword() {
        let err = parse(&toks("threshold predicate >= value 80")).unwrap_err();
        assert_eq!(err.to_string(), "missing required keyword: threshold level");
    }

    #[test]
    fn threshold_block_ends_at_repeated_keyword() {
        let parsed = parse(&toks(
            "threshold predicate >= level warning value 80 \
             threshold predicate >= level critical value 95",
        ))
        .unwrap();
        assert_eq!(parsed.thresholds.len(), 2);
        assert_eq!(parsed.thresholds[1].value, 95);
    }

    #[test]
    fn truncated_constraint_is_malformed() {
        let err = parse(&toks("constraint system fqdn")).unwrap_err();
        assert!(matches!(err, CliError::Argument(ArgumentError::MalformedTail)));
        let err = parse(&toks("constraint colour red")).unwrap_err();
        assert!(matches!(err, CliError::Argument(ArgumentError::Unexpected { .. })));
    }

    #[tokio::test]
    async fn create_on_group_uses_bucket_container() {
        let d = create(
            &toks(
                "http-up in prodbucket on group api with icinga.http interval 60 \
                 threshold predicate >= level warning value 500 \
                 constraint service http constraint attribute port 443",
            ),
            &lookup(),
        )
        .await
        .unwrap();
        assert_eq!(d.path, "/checks/R1/");
        assert_eq!(
            serde_json::to_value(d.body.unwrap()).unwrap(),
            json!({"checkConfig": {
                "name": "http-up",
                "repositoryID": "R1",
                "bucketID": "B1",
                "objectID": "G1",
                "objectType": "group",
                "capabilityID": "CAP1",
                "interval": 60,
                "inheritance": true,
                "childrenOnly": false,
                "thresholds": [{"predicate": ">=", "level": "warning", "value": 500}],
                "constraints": [
                    {
                        "constraintType": "service",
                        "service": {"name": "http", "teamID": "T1", "attributes": []}
                    },
                    {
                        "constraintType": "attribute",
                        "attribute": {"name": "port", "value": "443"}
                    }
                ]
            }})
        );
    }

    #[tokio::test]
    async fn create_on_node_uses_repository_container() {
        let d = create(
            &toks(
                "disk in infra on node web01 with icinga.http interval 300 extern X-1 \
                 childrenonly yes threshold predicate > level critical value 90 \
                 constraint custom owner ops constraint oncall db-duty",
            ),
            &lookup(),
        )
        .await
        .unwrap();
        let config = d.body.unwrap().check_config.unwrap();
        assert_eq!(config.repository_id.as_deref(), Some("R1"));
        assert_eq!(config.bucket_id, None);
        assert_eq!(config.object_id.as_deref(), Some("N1"));
        assert_eq!(config.external_id.as_deref(), Some("X-1"));
        assert_eq!(config.children_only, Some(true));
        let constraints = config.constraints.unwrap();
        assert_eq!(
            constraints[0].custom.as_ref().and_then(|c| c.id.as_deref()),
            Some("CP1")
        );
        assert_eq!(
            constraints[1].oncall.as_ref().and_then(|o| o.number.as_deref()),
            Some("4711")
        );
    }

    #[tokio::test]
    async fn create_requires_target_and_threshold() {
        let err = create(&toks("c in infra with icinga.http interval 60"), &lookup())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "missing required keyword: on");

        let err = create(
            &toks("c in infra on node web01 with icinga.http interval 60"),
            &lookup(),
        )
        .await
        .unwrap_err();
        assert_eq!(err.to_string(), "missing required keyword: threshold");
    }

    #[tokio::test]
    async fn create_validates_interval_and_system_keys() {
        let err = create(
            &toks(
                "c in infra on node web01 with icinga.http interval soon \
                 threshold predicate > level warning value 1",
            ),
            &lookup(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, CliError::Validation(_)));

        let err = create(
            &toks(
                "c in infra on node web01 with icinga.http interval 60 \
                 threshold predicate > level warning value 1 constraint system colour red",
            ),
            &lookup(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, CliError::Validation(_)));
    }

    #[tokio::test]
    async fn create_on_bucket_checks_owning_repository() {
        let d = create(
            &toks(
                "c in infra on bucket prodbucket with icinga.http interval 60 \
                 threshold predicate > level warning value 1",
            ),
            &lookup(),
        )
        .await
        .unwrap();
        let config = d.body.unwrap().check_config.unwrap();
        assert_eq!(config.bucket_id.as_deref(), Some("B1"));

        let err = create(
            &toks(
                "c in infra on bucket stagebucket with icinga.http interval 60 \
                 threshold predicate > level warning value 1",
            ),
            &lookup(),
        )
        .await
        .unwrap_err();
        assert_eq!(err.to_string(), "conflicting repository: R1 vs R2");
    }

    #[tokio::test]
    async fn create_on_node_of_other_repository_fails() {
        let err = create(
            &toks(
                "c in infra on node db07 with icinga.http interval 60 \
                 threshold predicate > level warning value 1",
            ),
            &lookup(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, CliError::Mismatch { what: "repository", .. }));
    }

    #[tokio::test]
    async fn locate_derives_repository_from_object() {
        let d = locate(&toks("http-up on node web01"), &lookup()).await.unwrap();
        assert_eq!(d.path, "/checks/R1/CC1");
        assert_eq!(d.render, RenderMode::Show);

        let d = locate(&toks("http-up on bucket prodbucket"), &lookup())
            .await
            .unwrap();
        assert_eq!(d.path, "/checks/R1/CC1");
    }

    #[tokio::test]
    async fn locate_rejects_malformed_target() {
        let err = locate(&toks("http-up in infra web01"), &lookup())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "unexpected argument 'in': expected 'on'");

        let err = locate(&toks("http-up on node"), &lookup()).await.unwrap_err();
        assert!(matches!(err, CliError::Argument(ArgumentError::Arity { actual: 2, .. })));

        let err = locate(&toks("http-up on group api"), &lookup())
            .await
            .unwrap_err();
        assert!(matches!(err, CliError::Usage(_)));
    }

    #[tokio::test]
    async fn delete_and_list_paths() {
        let d = delete(&toks("http-up in infra"), &lookup()).await.unwrap();
        assert_eq!(d.path, "/checks/R1/CC1");
        let d = list(&toks("in infra"), &lookup()).await.unwrap();
        assert_eq!(d.path, "/checks/R1/");
        assert_eq!(d.render, RenderMode::List);
    }
}
