//! Request envelope sent to the server.

use serde::{Deserialize, Serialize};

use crate::check::CheckConfig;
use crate::entities::{
    Action, Attribute, Bucket, Category, Cluster, Environment, Group, Mode, Node, Oncall,
    Permission, Predicate, Provider, Repository, Section, Team, User, View,
};
use crate::property::Property;

/// Request body envelope.
///
/// Exactly the sub-objects an operation needs are set; everything else is
/// omitted from the serialized JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    /// Modifier flags for PATCH requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<Flags>,
    /// Search filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
    /// Environment payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<Environment>,
    /// View payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<View>,
    /// Mode payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<Mode>,
    /// Predicate payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predicate: Option<Predicate>,
    /// Provider payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<Provider>,
    /// Attribute payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute: Option<Attribute>,
    /// Property payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property: Option<Property>,
    /// Repository payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<Repository>,
    /// Bucket payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bucket: Option<Bucket>,
    /// Group payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<Group>,
    /// Cluster payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster: Option<Cluster>,
    /// Node payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node: Option<Node>,
    /// Category payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    /// Section payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<Section>,
    /// Action payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<Action>,
    /// Permission payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permission: Option<Permission>,
    /// Oncall payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oncall: Option<Oncall>,
    /// Team payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<Team>,
    /// User payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    /// Check configuration payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_config: Option<CheckConfig>,
}

/// PATCH modifier flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flags {
    /// Add the embedded links.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub add: bool,
    /// Remove the embedded links.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub remove: bool,
}

impl Flags {
    /// Flags requesting that links be added.
    #[must_use]
    pub const fn add() -> Self {
        Self {
            add: true,
            remove: false,
        }
    }

    /// Flags requesting that links be removed.
    #[must_use]
    pub const fn remove() -> Self {
        Self {
            add: false,
            remove: true,
        }
    }
}

/// Search filter for `/search/<kind>/` requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    /// Name to match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Identifier to match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Restrict to a bucket.
    #[serde(rename = "bucketID", skip_serializing_if = "Option::is_none")]
    pub bucket_id: Option<String>,
    /// Restrict to a repository.
    #[serde(rename = "repositoryID", skip_serializing_if = "Option::is_none")]
    pub repository_id: Option<String>,
    /// Restrict to a team.
    #[serde(rename = "teamID", skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    /// Restrict to a section.
    #[serde(rename = "sectionID", skip_serializing_if = "Option::is_none")]
    pub section_id: Option<String>,
    /// Restrict to a category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Filter {
    /// Filter matching a name.
    #[must_use]
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Whether the filter restricts matches to a parent object.
    #[must_use]
    pub const fn is_scoped(&self) -> bool {
        self.bucket_id.is_some()
            || self.repository_id.is_some()
            || self.team_id.is_some()
            || self.section_id.is_some()
            || self.category.is_some()
    }
}

impl Request {
    /// Request carrying only a search filter.
    #[must_use]
    pub fn search(filter: Filter) -> Self {
        Self {
            filter: Some(filter),
            ..Self::default()
        }
    }
}
