//! Server result envelope.

use serde::{Deserialize, Serialize};

use crate::check::CheckConfig;
use crate::entities::{
    Action, Attribute, Bucket, Capability, Category, Cluster, Environment, Group, Mode, Node,
    Oncall, Permission, Predicate, Provider, Repository, Section, Team, User, View,
};
use crate::error::ProtoError;
use crate::property::Property;

/// Envelope every server response is decoded into.
///
/// Entity lists the server did not send decode as empty and are skipped
/// again when the result is re-serialized for JSON output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerResult {
    /// HTTP-like application status code.
    pub status_code: u16,
    /// Status text.
    pub status_text: String,
    /// Application errors.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    /// Environments.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub environments: Vec<Environment>,
    /// Views.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub views: Vec<View>,
    /// Modes.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub modes: Vec<Mode>,
    /// Predicates.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub predicates: Vec<Predicate>,
    /// Providers.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub providers: Vec<Provider>,
    /// Attributes.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Attribute>,
    /// Properties.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<Property>,
    /// Repositories.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub repositories: Vec<Repository>,
    /// Buckets.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub buckets: Vec<Bucket>,
    /// Groups.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<Group>,
    /// Clusters.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub clusters: Vec<Cluster>,
    /// Nodes.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<Node>,
    /// Categories.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<Category>,
    /// Sections.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<Section>,
    /// Actions.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<Action>,
    /// Permissions.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub permissions: Vec<Permission>,
    /// Oncall duties.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub oncalls: Vec<Oncall>,
    /// Teams.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub teams: Vec<Team>,
    /// Users.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub users: Vec<User>,
    /// Monitoring capabilities.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub capabilities: Vec<Capability>,
    /// Check configurations.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub check_configs: Vec<CheckConfig>,
    /// Server instances, passed through untyped.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub instances: Vec<serde_json::Value>,
    /// Object tree for `tree` requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree: Option<TreeNode>,
}

impl ServerResult {
    /// Decode a result from a response body.
    ///
    /// An empty body decodes to a default (status 0) result.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not a valid result document.
    pub fn from_slice(body: &[u8]) -> Result<Self, ProtoError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body).map_err(|e| ProtoError::Decoding(e.to_string()))
    }

    /// Whether the server reported an application error.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.status_code >= 400 || !self.errors.is_empty()
    }

    /// Human-readable error summary.
    #[must_use]
    pub fn error_message(&self) -> String {
        if self.errors.is_empty() {
            return self.status_text.clone();
        }
        self.errors.join("; ")
    }
}

/// Node of an object tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeNode {
    /// Object identifier.
    pub id: String,
    /// Object name.
    pub name: String,
    /// Object kind.
    #[serde(rename = "type")]
    pub kind: String,
    /// Child objects.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
}
