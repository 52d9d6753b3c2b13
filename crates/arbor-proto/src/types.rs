//! Small closed enumerations shared between request and result types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ProtoError;

/// Kind of tree object a property or check can attach to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    /// A repository, the root of a subtree.
    Repository,
    /// A bucket inside a repository.
    Bucket,
    /// A group inside a bucket.
    Group,
    /// A cluster inside a bucket.
    Cluster,
    /// A node assigned to a bucket.
    Node,
}

impl ObjectKind {
    /// All object kinds, in tree order.
    pub const ALL: [Self; 5] = [
        Self::Repository,
        Self::Bucket,
        Self::Group,
        Self::Cluster,
        Self::Node,
    ];

    /// Lowercase keyword for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Repository => "repository",
            Self::Bucket => "bucket",
            Self::Group => "group",
            Self::Cluster => "cluster",
            Self::Node => "node",
        }
    }

    /// Path segment of the per-object collection (`/groups/<id>/...`).
    #[must_use]
    pub const fn collection(self) -> &'static str {
        match self {
            Self::Repository => "repositories",
            Self::Bucket => "buckets",
            Self::Group => "groups",
            Self::Cluster => "clusters",
            Self::Node => "nodes",
        }
    }

    /// Whether objects of this kind are only unique within a bucket.
    #[must_use]
    pub const fn is_bucket_scoped(self) -> bool {
        matches!(self, Self::Group | Self::Cluster)
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ObjectKind {
    type Err = ProtoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ProtoError::UnknownObjectKind(s.to_string()))
    }
}

/// Type of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    /// Server-defined system property.
    System,
    /// Repository-scoped custom property.
    Custom,
    /// Team-scoped service property.
    Service,
    /// Oncall duty reference.
    Oncall,
    /// Global native property.
    Native,
    /// Global service template.
    Template,
}

impl PropertyType {
    /// All property types.
    pub const ALL: [Self; 6] = [
        Self::System,
        Self::Custom,
        Self::Service,
        Self::Oncall,
        Self::Native,
        Self::Template,
    ];

    /// Lowercase keyword for this type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::Custom => "custom",
            Self::Service => "service",
            Self::Oncall => "oncall",
            Self::Native => "native",
            Self::Template => "template",
        }
    }

    /// Whether instances of this type can be attached to tree objects.
    #[must_use]
    pub const fn is_attachable(self) -> bool {
        matches!(
            self,
            Self::System | Self::Custom | Self::Service | Self::Oncall
        )
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyType {
    type Err = ProtoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|pt| pt.as_str() == s)
            .ok_or_else(|| ProtoError::UnknownPropertyType(s.to_string()))
    }
}

/// How often a service attribute may appear on one service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cardinality {
    /// At most one value.
    Once,
    /// Any number of values.
    Multi,
}

impl Cardinality {
    /// Lowercase keyword for this cardinality.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Once => "once",
            Self::Multi => "multi",
        }
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Cardinality {
    type Err = ProtoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "once" => Ok(Self::Once),
            "multi" => Ok(Self::Multi),
            other => Err(ProtoError::UnknownCardinality(other.to_string())),
        }
    }
}
