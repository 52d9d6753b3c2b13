//! Property wire types.

use serde::{Deserialize, Serialize};

use crate::types::PropertyType;

/// A property, either as a definition or as an instance attached to an object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    /// Property type.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub property_type: Option<PropertyType>,
    /// Repository of the object the property is attached to.
    #[serde(rename = "repositoryID", skip_serializing_if = "Option::is_none")]
    pub repository_id: Option<String>,
    /// Bucket of the object the property is attached to.
    #[serde(rename = "bucketID", skip_serializing_if = "Option::is_none")]
    pub bucket_id: Option<String>,
    /// Identifier of this instance.
    #[serde(rename = "instanceID", skip_serializing_if = "Option::is_none")]
    pub instance_id: Option<String>,
    /// Identifier of the instance this one was inherited from.
    #[serde(rename = "sourceInstanceID", skip_serializing_if = "Option::is_none")]
    pub source_instance_id: Option<String>,
    /// Whether child objects inherit the property.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inheritance: Option<bool>,
    /// Whether only child objects receive the property.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children_only: Option<bool>,
    /// View the property is attached under.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<String>,
    /// System property payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<SystemProperty>,
    /// Custom property payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom: Option<CustomProperty>,
    /// Service property payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<ServiceProperty>,
    /// Native property payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub native: Option<NativeProperty>,
    /// Oncall property payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oncall: Option<OncallProperty>,
}

impl Property {
    /// Name of whichever payload is set.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        if let Some(p) = &self.system {
            return Some(&p.name);
        }
        if let Some(p) = &self.custom {
            return Some(&p.name);
        }
        if let Some(p) = &self.service {
            return Some(&p.name);
        }
        if let Some(p) = &self.native {
            return Some(&p.name);
        }
        self.oncall.as_ref().and_then(|p| p.name.as_deref())
    }

    /// Whether this instance is the source rather than an inherited copy.
    #[must_use]
    pub fn is_source(&self) -> bool {
        match (&self.instance_id, &self.source_instance_id) {
            (Some(instance), Some(source)) => instance == source,
            _ => false,
        }
    }
}

/// System property payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemProperty {
    /// System property name.
    pub name: String,
    /// Value.
    #[serde(default)]
    pub value: String,
}

/// Native property payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeProperty {
    /// Native property name.
    pub name: String,
    /// Value.
    #[serde(default)]
    pub value: String,
}

/// Custom property payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomProperty {
    /// Custom property definition identifier.
    #[serde(rename = "customID", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Repository the definition belongs to.
    #[serde(rename = "repositoryID", skip_serializing_if = "Option::is_none")]
    pub repository_id: Option<String>,
    /// Custom property name.
    pub name: String,
    /// Value.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub value: String,
}

/// Service property payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceProperty {
    /// Service name.
    pub name: String,
    /// Team the service definition belongs to.
    #[serde(rename = "teamID", skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    /// Service attributes.
    #[serde(default)]
    pub attributes: Vec<ServiceAttribute>,
}

/// One attribute value of a service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceAttribute {
    /// Attribute name.
    pub name: String,
    /// Attribute value.
    pub value: String,
}

/// Oncall property payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OncallProperty {
    /// Oncall duty identifier.
    #[serde(rename = "oncallID", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Oncall duty name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Phone extension.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
}
