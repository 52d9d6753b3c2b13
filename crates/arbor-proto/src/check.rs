//! Check configuration wire types.

use serde::{Deserialize, Serialize};

use crate::property::{
    CustomProperty, NativeProperty, OncallProperty, ServiceAttribute, ServiceProperty,
    SystemProperty,
};
use crate::types::ObjectKind;

/// Monitoring check bound to a tree object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckConfig {
    /// Server identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Check name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Repository the check lives in.
    #[serde(rename = "repositoryID", skip_serializing_if = "Option::is_none")]
    pub repository_id: Option<String>,
    /// Bucket the check lives in, for bucket-scoped targets.
    #[serde(rename = "bucketID", skip_serializing_if = "Option::is_none")]
    pub bucket_id: Option<String>,
    /// Target object.
    #[serde(rename = "objectID", skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,
    /// Target object kind.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_type: Option<ObjectKind>,
    /// Monitoring capability.
    #[serde(rename = "capabilityID", skip_serializing_if = "Option::is_none")]
    pub capability_id: Option<String>,
    /// Check interval in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<u64>,
    /// Whether child objects inherit the check.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inheritance: Option<bool>,
    /// Whether only child objects receive the check.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children_only: Option<bool>,
    /// Identifier in an external monitoring system.
    #[serde(rename = "externalID", skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    /// Alerting thresholds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thresholds: Option<Vec<Threshold>>,
    /// Constraints restricting where the check is instantiated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraints: Option<Vec<Constraint>>,
}

/// One alerting threshold.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Threshold {
    /// Comparison predicate symbol.
    pub predicate: String,
    /// Alert level name.
    pub level: String,
    /// Comparison value.
    pub value: i64,
}

/// A constraint restricting check instantiation to matching objects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Constraint {
    /// `service`, `oncall`, `attribute`, `system`, `native` or `custom`.
    pub constraint_type: String,
    /// Service constraint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<ServiceProperty>,
    /// Oncall constraint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oncall: Option<OncallProperty>,
    /// Service attribute constraint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute: Option<ServiceAttribute>,
    /// System property constraint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<SystemProperty>,
    /// Native property constraint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub native: Option<NativeProperty>,
    /// Custom property constraint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom: Option<CustomProperty>,
}
