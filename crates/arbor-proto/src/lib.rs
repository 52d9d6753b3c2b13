//! # arbor-proto
//!
//! Wire types for the arbor configuration-tree REST API: the request
//! envelope the client sends, the entity sub-objects it carries, and the
//! result envelope the server answers with.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod check;
pub mod entities;
pub mod error;
pub mod property;
pub mod request;
pub mod result;
pub mod types;

pub use check::{CheckConfig, Constraint, Threshold};
pub use entities::{
    Action, Attribute, Bucket, Capability, Category, Cluster, Environment, Group, Mode, Node,
    NodeConfig, Oncall, Permission, Predicate, Provider, Repository, Section, Team, User, View,
};
pub use error::ProtoError;
pub use property::{
    CustomProperty, NativeProperty, OncallProperty, Property, ServiceAttribute, ServiceProperty,
    SystemProperty,
};
pub use request::{Filter, Flags, Request};
pub use result::{ServerResult, TreeNode};
pub use types::{Cardinality, ObjectKind, PropertyType};
