//! Attaching properties to tree objects and detaching them again.

use arbor_proto::{
    Bucket, Cluster, CustomProperty, Group, Node, ObjectKind, OncallProperty, Property,
    PropertyType, Repository, Request, ServiceProperty, SystemProperty,
};
use arbor_validation::{validate_bool, validate_system_property};
use tracing::debug;

use crate::args::{split_subject, ArgumentError, Contract, KeywordMap};
use crate::error::CliError;
use crate::lookup::Lookup;
use crate::request::{Method, RequestDescriptor};
use crate::resolve::{self, ResolvedObject};

/// View used when `view` is not given.
pub const DEFAULT_VIEW: &str = "any";

/// Request carrying `object` and, optionally, properties for it.
fn object_request(object: &ResolvedObject, properties: Option<Vec<Property>>) -> Request {
    let id = Some(object.id.clone());
    let bucket_id = object.bucket_id.clone();
    let mut request = Request::default();
    match object.kind {
        ObjectKind::Repository => {
            request.repository = Some(Repository {
                id,
                properties,
                ..Repository::default()
            });
        }
        ObjectKind::Bucket => {
            request.bucket = Some(Bucket {
                id,
                properties,
                ..Bucket::default()
            });
        }
        ObjectKind::Group => {
            request.group = Some(Group {
                id,
                bucket_id,
                properties,
                ..Group::default()
            });
        }
        ObjectKind::Cluster => {
            request.cluster = Some(Cluster {
                id,
                bucket_id,
                properties,
                ..Cluster::default()
            });
        }
        ObjectKind::Node => {
            request.node = Some(Node {
                id,
                properties,
                ..Node::default()
            });
        }
    }
    request
}

fn ensure_attachable(property_type: PropertyType) -> Result<(), CliError> {
    if property_type.is_attachable() {
        return Ok(());
    }
    Err(CliError::Usage(format!(
        "{property_type} properties cannot be attached to objects"
    )))
}

/// Parse the keyword tail and resolve the object it names with `link`.
async fn target<L: Lookup>(
    kind: ObjectKind,
    link: &'static str,
    unique: &[&'static str],
    mut required: Vec<&'static str>,
    tail: &[String],
    lookup: &L,
) -> Result<(KeywordMap, ResolvedObject), CliError> {
    if kind.is_bucket_scoped() {
        required.push("in");
    }
    let kw = Contract::new()
        .unique(unique.iter().copied().chain([link, "in"]))
        .required(required)
        .parse(tail)?;
    if !kind.is_bucket_scoped() && kw.has("in") {
        eprintln!("Deprecation hint: 'in' is ignored for {kind} properties and may be dropped");
    }
    let object = resolve::object(lookup, kind, kw.required(link)?, kw.one("in")).await?;
    Ok((kw, object))
}

fn flag(kw: &KeywordMap, keyword: &str, default: bool) -> Result<bool, CliError> {
    match kw.one(keyword) {
        Some(value) => Ok(validate_bool(keyword, value)?),
        None => Ok(default),
    }
}

/// `NAME to OBJECT [in BUCKET] [value V] [view V] [inheritance B] [childrenonly B]`
pub(crate) async fn add<L: Lookup>(
    kind: ObjectKind,
    property_type: PropertyType,
    args: &[String],
    lookup: &L,
) -> Result<RequestDescriptor, CliError> {
    ensure_attachable(property_type)?;
    let (name, tail) = split_subject(args)?;
    let valued = matches!(property_type, PropertyType::System | PropertyType::Custom);
    let (unique, required): (&[&str], Vec<&str>) = if valued {
        (&["view", "inheritance", "childrenonly", "value"], vec!["to", "value"])
    } else {
        (&["view", "inheritance", "childrenonly"], vec!["to"])
    };
    let (kw, object) = target(kind, "to", unique, required, tail, lookup).await?;

    let mut property = Property {
        property_type: Some(property_type),
        view: Some(kw.one("view").unwrap_or(DEFAULT_VIEW).to_owned()),
        inheritance: Some(flag(&kw, "inheritance", true)?),
        children_only: Some(flag(&kw, "childrenonly", false)?),
        ..Property::default()
    };

    match property_type {
        PropertyType::System => {
            validate_system_property(name)?;
            property.system = Some(SystemProperty {
                name: name.to_owned(),
                value: kw.required("value")?.to_owned(),
            });
        }
        PropertyType::Custom => {
            let repository_id = object.repository(lookup).await?;
            let id = lookup.custom_property_id(name, &repository_id).await?;
            property.custom = Some(CustomProperty {
                id: Some(id),
                repository_id: Some(repository_id),
                name: name.to_owned(),
                value: kw.required("value")?.to_owned(),
            });
        }
        PropertyType::Service => {
            let team_id = object.team(lookup).await?;
            lookup.service_property_id(name, &team_id).await?;
            property.service = Some(ServiceProperty {
                name: name.to_owned(),
                team_id: Some(team_id),
                attributes: Vec::new(),
            });
        }
        _ => {
            let id = lookup.oncall_id(name).await?;
            let details = lookup.oncall_details(&id).await?;
            property.oncall = Some(OncallProperty {
                id: Some(id),
                name: details.name,
                number: details.number,
            });
        }
    }

    debug!(object = %object.id, %property_type, property = name, "Attaching property");
    Ok(RequestDescriptor::post(
        format!(
            "/{}/{}/property/{property_type}/",
            kind.collection(),
            object.id
        ),
        object_request(&object, Some(vec![property])),
    ))
}

/// `NAME from OBJECT view V [in BUCKET]`
pub(crate) async fn delete<L: Lookup>(
    kind: ObjectKind,
    property_type: PropertyType,
    args: &[String],
    lookup: &L,
) -> Result<RequestDescriptor, CliError> {
    ensure_attachable(property_type)?;
    let (name, tail) = split_subject(args)?;
    let (kw, object) = target(kind, "from", &["view"], vec!["from", "view"], tail, lookup).await?;
    let view = kw
        .one("view")
        .ok_or_else(|| ArgumentError::MissingRequired("view".into()))?;
    let source = lookup
        .property_source(kind, &object.id, property_type, name, view)
        .await?;
    Ok(RequestDescriptor::with_body(
        Method::DeleteBody,
        format!(
            "/{}/{}/property/{property_type}/{source}",
            kind.collection(),
            object.id
        ),
        object_request(&object, None),
    ))
}
