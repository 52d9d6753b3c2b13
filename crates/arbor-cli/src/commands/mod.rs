//! Command actions.
//!
//! Each leaf of the verb registry names an [`Action`]. [`build`] turns
//! the action and the tokens after its verb path into a
//! [`RequestDescriptor`], running the keyword parser, validators and
//! resolver on the way. Nothing is sent from here.
//!
//! - [`entity`] - flat named entities and instances
//! - [`property`] - property definitions
//! - [`object`] - tree objects and membership
//! - [`attach`] - properties attached to tree objects
//! - [`permission`] - sections, actions and permissions
//! - [`oncall`] - oncall duties
//! - [`user`] - users and teams
//! - [`check`] - check configurations

pub mod attach;
pub mod check;
pub mod entity;
pub mod object;
pub mod oncall;
pub mod permission;
pub mod property;
pub mod user;

use arbor_proto::{Flags, ObjectKind, PropertyType};
use tracing::debug;

pub use entity::Entity;
pub use object::Container;
pub use property::Definition;

use crate::error::CliError;
use crate::lookup::Lookup;
use crate::request::RequestDescriptor;

/// What a leaf command does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Create a flat entity.
    EntityAdd(Entity),
    /// Delete a flat entity.
    EntityRemove(Entity),
    /// Rename a flat entity.
    EntityRename(Entity),
    /// List flat entities.
    EntityList(Entity),
    /// Show one flat entity.
    EntityShow(Entity),
    /// Create a service attribute with its cardinality.
    AttributeAdd,
    /// List monitoring instances.
    InstanceList,

    /// Create a property definition.
    PropertyCreate(Definition),
    /// Delete a property definition.
    PropertyDelete(Definition),
    /// List property definitions.
    PropertyList(Definition),
    /// Show a property definition.
    PropertyShow(Definition),

    /// Create a group or cluster.
    ObjectCreate(Container),
    /// Delete a group or cluster.
    ObjectDelete(Container),
    /// Rename a group or cluster.
    ObjectRename(Container),
    /// List objects of a kind.
    ObjectList(ObjectKind),
    /// Show one object.
    ObjectShow(ObjectKind),
    /// Show the subtree below an object.
    ObjectTree(ObjectKind),
    /// Add a member to a group or cluster.
    MemberAdd {
        /// Object receiving the member.
        target: Container,
        /// Kind of the member.
        member: ObjectKind,
    },
    /// Remove a member from a group or cluster.
    MemberDelete {
        /// Object losing the member.
        target: Container,
        /// Kind of the member.
        member: ObjectKind,
    },
    /// List members of a group or cluster.
    MemberList(Container),
    /// Show a node's repository and bucket assignment.
    NodeConfig,

    /// Attach a property to an object.
    PropertyAttach {
        /// Kind of the object.
        target: ObjectKind,
        /// Kind of the property.
        property: PropertyType,
    },
    /// Detach a property from an object.
    PropertyDetach {
        /// Kind of the object.
        target: ObjectKind,
        /// Kind of the property.
        property: PropertyType,
    },

    /// Create an oncall duty.
    OncallAdd,
    /// Delete an oncall duty.
    OncallRemove,
    /// Rename an oncall duty.
    OncallRename,
    /// Change name or number of an oncall duty.
    OncallUpdate,
    /// List oncall duties.
    OncallList,
    /// Show one oncall duty.
    OncallShow,

    /// List teams.
    TeamList,
    /// Show one team.
    TeamShow,
    /// Create a user.
    UserAdd,
    /// Delete a user.
    UserRemove,
    /// List users.
    UserList,
    /// Show one user.
    UserShow,

    /// Create a section in a category.
    SectionAdd,
    /// Delete a section.
    SectionRemove,
    /// List sections of a category.
    SectionList,
    /// Show one section.
    SectionShow,
    /// Create an action in a section.
    ActionAdd,
    /// Delete an action.
    ActionRemove,
    /// List actions of a section.
    ActionList,
    /// Show one action.
    ActionShow,
    /// Create a permission in a category.
    PermissionAdd,
    /// Delete a permission.
    PermissionRemove,
    /// List permissions of a category.
    PermissionList,
    /// Show one permission.
    PermissionShow,
    /// Grant a section or action through a permission.
    PermissionMap,
    /// Revoke a section or action from a permission.
    PermissionUnmap,

    /// Create a check configuration.
    CheckCreate,
    /// Delete a check configuration.
    CheckDelete,
    /// List check configurations of a repository.
    CheckList,
    /// Show a check configuration through the object it watches.
    CheckLocate,
    /// Show one check configuration.
    CheckShow,
}

/// Build the request for `action` from the tokens after its verb path.
///
/// # Errors
///
/// Returns argument, validation and lookup errors; the first one aborts.
pub async fn build<L: Lookup>(
    action: Action,
    args: &[String],
    lookup: &L,
) -> Result<RequestDescriptor, CliError> {
    debug!(?action, args = args.len(), "Building request");
    match action {
        Action::EntityAdd(e) => entity::add(e, args),
        Action::EntityRemove(e) => entity::remove(e, args),
        Action::EntityRename(e) => entity::rename(e, args),
        Action::EntityList(e) => entity::list(e, args),
        Action::EntityShow(e) => entity::show(e, args),
        Action::AttributeAdd => entity::add_attribute(args),
        Action::InstanceList => entity::list_instances(args),

        Action::PropertyCreate(d) => property::create(d, args, lookup).await,
        Action::PropertyDelete(d) => property::delete(d, args, lookup).await,
        Action::PropertyList(d) => property::list(d, args, lookup).await,
        Action::PropertyShow(d) => property::show(d, args, lookup).await,

        Action::ObjectCreate(c) => object::create(c, args, lookup).await,
        Action::ObjectDelete(c) => object::delete(c, args, lookup).await,
        Action::ObjectRename(c) => object::rename(c, args, lookup).await,
        Action::ObjectList(kind) => object::list(kind, args),
        Action::ObjectShow(kind) => object::show(kind, args, lookup).await,
        Action::ObjectTree(kind) => object::tree(kind, args, lookup).await,
        Action::MemberAdd { target, member } => {
            object::add_member(target, member, args, lookup).await
        }
        Action::MemberDelete { target, member } => {
            object::delete_member(target, member, args, lookup).await
        }
        Action::MemberList(c) => object::list_members(c, args, lookup).await,
        Action::NodeConfig => object::node_config(args, lookup).await,

        Action::PropertyAttach { target, property } => {
            attach::add(target, property, args, lookup).await
        }
        Action::PropertyDetach { target, property } => {
            attach::delete(target, property, args, lookup).await
        }

        Action::OncallAdd => oncall::add(args),
        Action::OncallRemove => oncall::remove(args, lookup).await,
        Action::OncallRename => oncall::rename(args, lookup).await,
        Action::OncallUpdate => oncall::update(args, lookup).await,
        Action::OncallList => oncall::list(args),
        Action::OncallShow => oncall::show(args, lookup).await,

        Action::TeamList => user::list_teams(args),
        Action::TeamShow => user::show_team(args, lookup).await,
        Action::UserAdd => user::add(args, lookup).await,
        Action::UserRemove => user::remove(args, lookup).await,
        Action::UserList => user::list_users(args),
        Action::UserShow => user::show_user(args, lookup).await,

        Action::SectionAdd => permission::add_section(args),
        Action::SectionRemove => permission::remove_section(args, lookup).await,
        Action::SectionList => permission::list_sections(args),
        Action::SectionShow => permission::show_section(args, lookup).await,
        Action::ActionAdd => permission::add_action(args, lookup).await,
        Action::ActionRemove => permission::remove_action(args, lookup).await,
        Action::ActionList => permission::list_actions(args, lookup).await,
        Action::ActionShow => permission::show_action(args, lookup).await,
        Action::PermissionAdd => permission::add_permission(args),
        Action::PermissionRemove => permission::remove_permission(args, lookup).await,
        Action::PermissionList => permission::list_permissions(args),
        Action::PermissionShow => permission::show_permission(args, lookup).await,
        Action::PermissionMap => permission::map(args, Flags::add(), lookup).await,
        Action::PermissionUnmap => permission::map(args, Flags::remove(), lookup).await,

        Action::CheckCreate => check::create(args, lookup).await,
        Action::CheckDelete => check::delete(args, lookup).await,
        Action::CheckList => check::list(args, lookup).await,
        Action::CheckLocate => check::locate(args, lookup).await,
        Action::CheckShow => check::show(args, lookup).await,
    }
}
