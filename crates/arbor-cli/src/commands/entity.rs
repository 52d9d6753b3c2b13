//! Flat named entities: environments, views, modes, predicates,
//! providers, attributes and categories.

use arbor_proto::{self as proto, Request};
use arbor_validation::{validate_cardinality, validate_category};

use crate::args::{exactly, sole, split_subject, Contract};
use crate::error::CliError;
use crate::request::{escape, Method, RenderMode, RequestDescriptor};

/// A flat entity addressed by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    /// Deployment environment of buckets.
    Environment,
    /// Property view.
    View,
    /// Monitoring mode.
    Mode,
    /// Threshold predicate.
    Predicate,
    /// Monitoring provider.
    Provider,
    /// Service attribute.
    Attribute,
    /// Permission category.
    Category,
}

impl Entity {
    /// Collection path, with trailing slash.
    #[must_use]
    pub const fn collection(self) -> &'static str {
        match self {
            Self::Environment => "/environment/",
            Self::View => "/view/",
            Self::Mode => "/mode/",
            Self::Predicate => "/predicate/",
            Self::Provider => "/provider/",
            Self::Attribute => "/attributes/",
            Self::Category => "/category/",
        }
    }

    fn item(self, name: &str) -> String {
        match self {
            Self::View | Self::Category => format!("{}{}", self.collection(), escape(name)),
            _ => format!("{}{name}", self.collection()),
        }
    }

    fn body(self, name: &str) -> Request {
        let name = name.to_owned();
        let mut request = Request::default();
        match self {
            Self::Environment => request.environment = Some(proto::Environment { name }),
            Self::View => request.view = Some(proto::View { name }),
            Self::Mode => request.mode = Some(proto::Mode { mode: name }),
            Self::Predicate => request.predicate = Some(proto::Predicate { symbol: name }),
            Self::Provider => request.provider = Some(proto::Provider { name }),
            Self::Attribute => {
                request.attribute = Some(proto::Attribute {
                    name,
                    cardinality: None,
                });
            }
            Self::Category => request.category = Some(proto::Category { name }),
        }
        request
    }
}

pub(crate) fn add(entity: Entity, args: &[String]) -> Result<RequestDescriptor, CliError> {
    let name = sole(args)?;
    if entity == Entity::Category {
        validate_category(name)?;
    }
    Ok(RequestDescriptor::post(entity.collection(), entity.body(name)))
}

pub(crate) fn remove(entity: Entity, args: &[String]) -> Result<RequestDescriptor, CliError> {
    Ok(RequestDescriptor::delete(entity.item(sole(args)?)))
}

pub(crate) fn rename(entity: Entity, args: &[String]) -> Result<RequestDescriptor, CliError> {
    let (old, tail) = split_subject(args)?;
    let kw = Contract::new().unique(["to"]).required(["to"]).parse(tail)?;
    Ok(RequestDescriptor::with_body(
        Method::PutBody,
        entity.item(old),
        entity.body(kw.required("to")?),
    ))
}

pub(crate) fn list(entity: Entity, args: &[String]) -> Result<RequestDescriptor, CliError> {
    exactly(args, 0)?;
    Ok(RequestDescriptor::get(entity.collection(), RenderMode::List))
}

pub(crate) fn show(entity: Entity, args: &[String]) -> Result<RequestDescriptor, CliError> {
    Ok(RequestDescriptor::get(entity.item(sole(args)?), RenderMode::Show))
}

/// `attributes add NAME cardinality once|multi`
pub(crate) fn add_attribute(args: &[String]) -> Result<RequestDescriptor, CliError> {
    let (name, tail) = split_subject(args)?;
    let kw = Contract::new()
        .unique(["cardinality"])
        .required(["cardinality"])
        .parse(tail)?;
    let cardinality = kw.required("cardinality")?;
    validate_cardinality(cardinality)?;
    let body = Request {
        attribute: Some(proto::Attribute {
            name: name.to_owned(),
            cardinality: Some(cardinality.to_owned()),
        }),
        ..Request::default()
    };
    Ok(RequestDescriptor::post(Entity::Attribute.collection(), body))
}

pub(crate) fn list_instances(args: &[String]) -> Result<RequestDescriptor, CliError> {
    exactly(args, 0)?;
    Ok(RequestDescriptor::get("/instance/", RenderMode::List))
}
