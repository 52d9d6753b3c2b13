//! Property definitions: the global system, native and template
//! properties, and the repository-scoped custom and team-scoped service
//! properties.

use arbor_proto::{
    CustomProperty, NativeProperty, Property, PropertyType, Request, ServiceAttribute,
    ServiceProperty, SystemProperty,
};
use arbor_validation::{validate_rune_count, MAX_PROPERTY_RUNES};
use tracing::{debug, warn};

use crate::args::{exactly, sole, split_subject, Contract};
use crate::error::CliError;
use crate::lookup::Lookup;
use crate::request::{escape, RenderMode, RequestDescriptor};

/// Kind of property definition managed with `property ...`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Definition {
    /// Server-defined system property.
    System,
    /// Native property of the monitoring system.
    Native,
    /// Repository-scoped custom property.
    Custom,
    /// Team-scoped service.
    Service,
    /// Global service template.
    Template,
}

impl Definition {
    /// Wire property type.
    #[must_use]
    pub const fn property_type(self) -> PropertyType {
        match self {
            Self::System => PropertyType::System,
            Self::Native => PropertyType::Native,
            Self::Custom => PropertyType::Custom,
            Self::Service => PropertyType::Service,
            Self::Template => PropertyType::Template,
        }
    }
}

const SYSTEM: &str = "/property/system/";
const NATIVE: &str = "/property/native/";
const TEMPLATE: &str = "/property/service/global/";

fn custom_collection(repository_id: &str) -> String {
    format!("/property/custom/{repository_id}/")
}

fn service_collection(team_id: &str) -> String {
    format!("/property/service/team/{team_id}/")
}

fn check_name(name: &str) -> Result<(), CliError> {
    validate_rune_count("property", name, MAX_PROPERTY_RUNES)?;
    Ok(())
}

pub(crate) async fn create<L: Lookup>(
    definition: Definition,
    args: &[String],
    lookup: &L,
) -> Result<RequestDescriptor, CliError> {
    let mut property = Property {
        property_type: Some(definition.property_type()),
        ..Property::default()
    };

    let path = match definition {
        Definition::System | Definition::Native => {
            let name = sole(args)?;
            check_name(name)?;
            if definition == Definition::System {
                property.system = Some(SystemProperty {
                    name: name.to_owned(),
                    value: String::new(),
                });
                SYSTEM.to_owned()
            } else {
                property.native = Some(NativeProperty {
                    name: name.to_owned(),
                    value: String::new(),
                });
                NATIVE.to_owned()
            }
        }
        Definition::Custom => {
            let (name, tail) = split_subject(args)?;
            check_name(name)?;
            let kw = Contract::new().unique(["on"]).required(["on"]).parse(tail)?;
            let repository_id = lookup.repository_id(kw.required("on")?).await?;
            property.repository_id = Some(repository_id.clone());
            property.custom = Some(CustomProperty {
                id: None,
                repository_id: Some(repository_id.clone()),
                name: name.to_owned(),
                value: String::new(),
            });
            custom_collection(&repository_id)
        }
        Definition::Service | Definition::Template => {
            let (name, tail) = split_subject(args)?;
            check_name(name)?;
            let service = definition == Definition::Service;
            let (attributes, team) = service_attributes(tail, service, lookup).await?;
            let team_id = match team {
                Some(team) => Some(lookup.team_id(&team).await?),
                None => None,
            };
            let path = team_id
                .as_deref()
                .map_or_else(|| TEMPLATE.to_owned(), service_collection);
            property.service = Some(ServiceProperty {
                name: name.to_owned(),
                team_id,
                attributes,
            });
            path
        }
    };

    Ok(RequestDescriptor::post(
        path,
        Request {
            property: Some(property),
            ..Request::default()
        },
    ))
}

/// Parse `ATTRIBUTE VALUE` pairs against the server's attribute schema.
///
/// `once` attributes may be given at most once, `multi` attributes any
/// number of times. For services `team` is required and returned apart
/// from the attributes, and a schema attribute of that name is ignored.
async fn service_attributes<L: Lookup>(
    tail: &[String],
    service: bool,
    lookup: &L,
) -> Result<(Vec<ServiceAttribute>, Option<String>), CliError> {
    let schema = lookup.attributes().await?;
    let (multi, once): (Vec<_>, Vec<_>) = schema
        .iter()
        .filter(|attribute| {
            let reserved = service && attribute.name == "team";
            if reserved {
                warn!("Ignoring schema attribute 'team', the keyword names the owning team");
            }
            !reserved
        })
        .partition(|attribute| attribute.cardinality.as_deref() == Some("multi"));
    debug!(once = once.len(), multi = multi.len(), "Loaded attribute schema");

    let mut unique: Vec<&str> = once.iter().map(|a| a.name.as_str()).collect();
    let mut required = Vec::new();
    if service {
        unique.push("team");
        required.push("team");
    }
    let kw = Contract::new()
        .multiple(multi.iter().map(|a| a.name.as_str()))
        .unique(unique)
        .required(required)
        .parse(tail)?;

    let mut attributes = Vec::new();
    for keyword in kw.keywords().filter(|k| !(service && *k == "team")) {
        validate_rune_count("attribute", keyword, MAX_PROPERTY_RUNES)?;
        for value in kw.all(keyword) {
            validate_rune_count("value", value, MAX_PROPERTY_RUNES)?;
            attributes.push(ServiceAttribute {
                name: keyword.to_owned(),
                value: value.clone(),
            });
        }
    }
    let team = if service {
        Some(kw.required("team")?.to_owned())
    } else {
        None
    };
    Ok((attributes, team))
}

/// Path of one existing definition.
async fn locate<L: Lookup>(
    definition: Definition,
    args: &[String],
    lookup: &L,
) -> Result<String, CliError> {
    match definition {
        Definition::System => Ok(format!("{SYSTEM}{}", escape(sole(args)?))),
        Definition::Native => Ok(format!("{NATIVE}{}", escape(sole(args)?))),
        Definition::Template => {
            let id = lookup.template_property_id(sole(args)?).await?;
            Ok(format!("{TEMPLATE}{id}"))
        }
        Definition::Custom => {
            let (name, tail) = split_subject(args)?;
            let kw = Contract::new().unique(["on"]).required(["on"]).parse(tail)?;
            let repository_id = lookup.repository_id(kw.required("on")?).await?;
            let id = lookup.custom_property_id(name, &repository_id).await?;
            Ok(format!("{}{id}", custom_collection(&repository_id)))
        }
        Definition::Service => {
            let (name, tail) = split_subject(args)?;
            let kw = Contract::new().unique(["on"]).required(["on"]).parse(tail)?;
            let team_id = lookup.team_id(kw.required("on")?).await?;
            let id = lookup.service_property_id(name, &team_id).await?;
            Ok(format!("{}{id}", service_collection(&team_id)))
        }
    }
}

pub(crate) async fn delete<L: Lookup>(
    definition: Definition,
    args: &[String],
    lookup: &L,
) -> Result<RequestDescriptor, CliError> {
    Ok(RequestDescriptor::delete(locate(definition, args, lookup).await?))
}

pub(crate) async fn show<L: Lookup>(
    definition: Definition,
    args: &[String],
    lookup: &L,
) -> Result<RequestDescriptor, CliError> {
    Ok(RequestDescriptor::get(
        locate(definition, args, lookup).await?,
        RenderMode::Show,
    ))
}

/// List definitions; custom and service take their repository or team.
pub(crate) async fn list<L: Lookup>(
    definition: Definition,
    args: &[String],
    lookup: &L,
) -> Result<RequestDescriptor, CliError> {
    let path = match definition {
        Definition::System | Definition::Native | Definition::Template => {
            exactly(args, 0)?;
            match definition {
                Definition::System => SYSTEM,
                Definition::Native => NATIVE,
                _ => TEMPLATE,
            }
            .to_owned()
        }
        Definition::Custom => custom_collection(&lookup.repository_id(sole(args)?).await?),
        Definition::Service => service_collection(&lookup.team_id(sole(args)?).await?),
    };
    Ok(RequestDescriptor::get(path, RenderMode::List))
}
