//! The verb tree.
//!
//! Every command is a path of fixed verbs from the root to a leaf, e.g.
//! `groups members add node`. Leaves carry the [`Action`] that builds the
//! request and the [`Completion`] used for the tokens after the path.
//! The tree is static; [`resolve`] walks it.

use arbor_proto::{ObjectKind, PropertyType};
use arbor_validation::{CATEGORIES, SYSTEM_PROPERTIES};

use crate::commands::{Action, Container, Definition, Entity};
use crate::completion::Completion;

/// One verb in the tree.
#[derive(Debug)]
pub struct Verb {
    /// Token that selects this verb.
    pub name: &'static str,
    /// One-line description.
    pub about: &'static str,
    /// Children or action.
    pub node: Node,
}

/// What follows a verb.
#[derive(Debug)]
pub enum Node {
    /// Further verbs.
    Branch(&'static [Verb]),
    /// A runnable command.
    Leaf {
        /// Request builder to run.
        action: Action,
        /// Completion for the arguments.
        completion: Completion,
    },
}

/// Outcome of walking the tree along some tokens.
#[derive(Debug)]
pub enum Resolution<'a> {
    /// The tokens reached a leaf.
    Leaf {
        /// Request builder to run.
        action: Action,
        /// Completion for the arguments.
        completion: Completion,
        /// Verb path taken.
        path: Vec<&'static str>,
        /// Tokens after the verb path.
        args: &'a [String],
    },
    /// The tokens stopped at, or strayed from, a branch.
    Partial {
        /// Verbs valid at the stopping point.
        children: &'static [Verb],
        /// Verb path taken.
        path: Vec<&'static str>,
        /// Tokens that matched no verb.
        rest: &'a [String],
    },
}

macro_rules! leaf {
    ($name:literal, $about:literal, $action:expr) => {
        leaf!($name, $about, $action, Completion::None)
    };
    ($name:literal, $about:literal, $action:expr, $completion:expr) => {
        Verb {
            name: $name,
            about: $about,
            node: Node::Leaf {
                action: $action,
                completion: $completion,
            },
        }
    };
}

macro_rules! branch {
    ($name:literal, $about:literal, [$($child:expr),* $(,)?]) => {
        Verb {
            name: $name,
            about: $about,
            node: Node::Branch(&[$($child),*]),
        }
    };
}

macro_rules! property_branch {
    ($kind:expr, valued: $valued:expr, plain: $plain:expr, detach: $detach:expr) => {
        branch!("property", "Attach and detach properties", [
            branch!("add", "Attach a property", [
                leaf!(
                    "system",
                    "Attach a system property",
                    Action::PropertyAttach { target: $kind, property: PropertyType::System },
                    Completion::DataFirst { data: SYSTEM_PROPERTIES, keywords: $valued }
                ),
                leaf!(
                    "custom",
                    "Attach a custom property",
                    Action::PropertyAttach { target: $kind, property: PropertyType::Custom },
                    Completion::Generic($valued)
                ),
                leaf!(
                    "service",
                    "Attach a service property",
                    Action::PropertyAttach { target: $kind, property: PropertyType::Service },
                    Completion::Generic($plain)
                ),
                leaf!(
                    "oncall",
                    "Attach an oncall duty",
                    Action::PropertyAttach { target: $kind, property: PropertyType::Oncall },
                    Completion::Generic($plain)
                ),
            ]),
            branch!("delete", "Detach a property", [
                leaf!(
                    "system",
                    "Detach a system property",
                    Action::PropertyDetach { target: $kind, property: PropertyType::System },
                    Completion::DataFirst { data: SYSTEM_PROPERTIES, keywords: $detach }
                ),
                leaf!(
                    "custom",
                    "Detach a custom property",
                    Action::PropertyDetach { target: $kind, property: PropertyType::Custom },
                    Completion::Generic($detach)
                ),
                leaf!(
                    "service",
                    "Detach a service property",
                    Action::PropertyDetach { target: $kind, property: PropertyType::Service },
                    Completion::Generic($detach)
                ),
                leaf!(
                    "oncall",
                    "Detach an oncall duty",
                    Action::PropertyDetach { target: $kind, property: PropertyType::Oncall },
                    Completion::Generic($detach)
                ),
            ]),
        ])
    };
}

macro_rules! entity_branch {
    ($name:literal, $about:literal, $entity:expr) => {
        branch!($name, $about, [
            leaf!("add", "Create", Action::EntityAdd($entity)),
            leaf!("remove", "Delete", Action::EntityRemove($entity)),
            leaf!("list", "List all", Action::EntityList($entity)),
            leaf!("show", "Show details", Action::EntityShow($entity)),
        ])
    };
    ($name:literal, $about:literal, $entity:expr, renamable) => {
        branch!($name, $about, [
            leaf!("add", "Create", Action::EntityAdd($entity)),
            leaf!("remove", "Delete", Action::EntityRemove($entity)),
            leaf!("rename", "Rename", Action::EntityRename($entity), Completion::Generic(RENAME)),
            leaf!("list", "List all", Action::EntityList($entity)),
            leaf!("show", "Show details", Action::EntityShow($entity)),
        ])
    };
}

const RENAME: &[&str] = &["to"];
const IN: &[&str] = &["in"];
const ON: &[&str] = &["on"];
const TO_IN: &[&str] = &["to", "in"];
const FROM_IN: &[&str] = &["from", "in"];

const SCOPED_VALUED: &[&str] = &["to", "in", "view", "value", "inheritance", "childrenonly"];
const SCOPED_PLAIN: &[&str] = &["to", "in", "view", "inheritance", "childrenonly"];
const SCOPED_DETACH: &[&str] = &["from", "view", "in"];
const VALUED: &[&str] = &["to", "view", "value", "inheritance", "childrenonly"];
const PLAIN: &[&str] = &["to", "view", "inheritance", "childrenonly"];
const DETACH: &[&str] = &["from", "view"];

/// Repeatable attributes of the stock schema. Completion runs offline, so
/// server-defined attributes are not offered.
const SERVICE_ATTRIBUTES: &[&str] = &["port", "transport_protocol"];

const USER_KEYWORDS: &[&str] = &[
    "firstname",
    "lastname",
    "employeenr",
    "mailaddr",
    "team",
    "deleted",
];

static ROOT: &[Verb] = &[
    entity_branch!("environments", "Bucket environments", Entity::Environment, renamable),
    entity_branch!("views", "Property views", Entity::View, renamable),
    entity_branch!("modes", "Monitoring modes", Entity::Mode),
    entity_branch!("predicates", "Threshold predicates", Entity::Predicate),
    entity_branch!("providers", "Monitoring providers", Entity::Provider),
    branch!("attributes", "Service attributes", [
        leaf!("add", "Create", Action::AttributeAdd, Completion::Generic(&["cardinality"])),
        leaf!("remove", "Delete", Action::EntityRemove(Entity::Attribute)),
        leaf!("list", "List all", Action::EntityList(Entity::Attribute)),
        leaf!("show", "Show details", Action::EntityShow(Entity::Attribute)),
    ]),
    branch!("property", "Property definitions", [
        branch!("create", "Define a property", [
            leaf!("system", "System property", Action::PropertyCreate(Definition::System)),
            leaf!("native", "Native property", Action::PropertyCreate(Definition::Native)),
            leaf!(
                "custom",
                "Custom property of a repository",
                Action::PropertyCreate(Definition::Custom),
                Completion::Generic(ON)
            ),
            leaf!(
                "service",
                "Service property of a team",
                Action::PropertyCreate(Definition::Service),
                Completion::Multi { single: &["team"], multi: SERVICE_ATTRIBUTES }
            ),
            leaf!(
                "template",
                "Global service template",
                Action::PropertyCreate(Definition::Template),
                Completion::Multi { single: &[], multi: SERVICE_ATTRIBUTES }
            ),
        ]),
        branch!("delete", "Delete a definition", [
            leaf!(
                "system",
                "System property",
                Action::PropertyDelete(Definition::System),
                Completion::DataOnly(SYSTEM_PROPERTIES)
            ),
            leaf!("native", "Native property", Action::PropertyDelete(Definition::Native)),
            leaf!("custom", "Custom property", Action::PropertyDelete(Definition::Custom), Completion::Generic(ON)),
            leaf!("service", "Service property", Action::PropertyDelete(Definition::Service), Completion::Generic(ON)),
            leaf!("template", "Service template", Action::PropertyDelete(Definition::Template)),
        ]),
        branch!("list", "List definitions", [
            leaf!("system", "System properties", Action::PropertyList(Definition::System)),
            leaf!("native", "Native properties", Action::PropertyList(Definition::Native)),
            leaf!("custom", "Custom properties of a repository", Action::PropertyList(Definition::Custom)),
            leaf!("service", "Service properties of a team", Action::PropertyList(Definition::Service)),
            leaf!("template", "Service templates", Action::PropertyList(Definition::Template)),
        ]),
        branch!("show", "Show a definition", [
            leaf!(
                "system",
                "System property",
                Action::PropertyShow(Definition::System),
                Completion::DataOnly(SYSTEM_PROPERTIES)
            ),
            leaf!("native", "Native property", Action::PropertyShow(Definition::Native)),
            leaf!("custom", "Custom property", Action::PropertyShow(Definition::Custom), Completion::Generic(ON)),
            leaf!("service", "Service property", Action::PropertyShow(Definition::Service), Completion::Generic(ON)),
            leaf!("template", "Service template", Action::PropertyShow(Definition::Template)),
        ]),
    ]),
    branch!("repositories", "Repositories", [
        leaf!("list", "List all", Action::ObjectList(ObjectKind::Repository)),
        leaf!("show", "Show details", Action::ObjectShow(ObjectKind::Repository)),
        leaf!("tree", "Show the subtree", Action::ObjectTree(ObjectKind::Repository)),
        property_branch!(ObjectKind::Repository, valued: VALUED, plain: PLAIN, detach: DETACH),
    ]),
    branch!("buckets", "Buckets", [
        leaf!("list", "List all", Action::ObjectList(ObjectKind::Bucket)),
        leaf!("show", "Show details", Action::ObjectShow(ObjectKind::Bucket)),
        leaf!("tree", "Show the subtree", Action::ObjectTree(ObjectKind::Bucket)),
        property_branch!(ObjectKind::Bucket, valued: VALUED, plain: PLAIN, detach: DETACH),
    ]),
    branch!("groups", "Groups", [
        leaf!("create", "Create in a bucket", Action::ObjectCreate(Container::Group), Completion::Generic(IN)),
        leaf!("delete", "Delete", Action::ObjectDelete(Container::Group), Completion::Generic(IN)),
        leaf!("rename", "Rename", Action::ObjectRename(Container::Group), Completion::Generic(TO_IN)),
        leaf!("list", "List all", Action::ObjectList(ObjectKind::Group)),
        leaf!("show", "Show details", Action::ObjectShow(ObjectKind::Group), Completion::Generic(IN)),
        leaf!("tree", "Show the subtree", Action::ObjectTree(ObjectKind::Group), Completion::Generic(IN)),
        branch!("members", "Group members", [
            branch!("add", "Add a member", [
                leaf!(
                    "group",
                    "Add a group",
                    Action::MemberAdd { target: Container::Group, member: ObjectKind::Group },
                    Completion::Generic(TO_IN)
                ),
                leaf!(
                    "cluster",
                    "Add a cluster",
                    Action::MemberAdd { target: Container::Group, member: ObjectKind::Cluster },
                    Completion::Generic(TO_IN)
                ),
                leaf!(
                    "node",
                    "Add a node",
                    Action::MemberAdd { target: Container::Group, member: ObjectKind::Node },
                    Completion::Generic(TO_IN)
                ),
            ]),
            branch!("delete", "Remove a member", [
                leaf!(
                    "group",
                    "Remove a group",
                    Action::MemberDelete { target: Container::Group, member: ObjectKind::Group },
                    Completion::Generic(FROM_IN)
                ),
                leaf!(
                    "cluster",
                    "Remove a cluster",
                    Action::MemberDelete { target: Container::Group, member: ObjectKind::Cluster },
                    Completion::Generic(FROM_IN)
                ),
                leaf!(
                    "node",
                    "Remove a node",
                    Action::MemberDelete { target: Container::Group, member: ObjectKind::Node },
                    Completion::Generic(FROM_IN)
                ),
            ]),
            leaf!("list", "List members", Action::MemberList(Container::Group), Completion::Generic(IN)),
        ]),
        property_branch!(ObjectKind::Group, valued: SCOPED_VALUED, plain: SCOPED_PLAIN, detach: SCOPED_DETACH),
    ]),
    branch!("clusters", "Clusters", [
        leaf!("create", "Create in a bucket", Action::ObjectCreate(Container::Cluster), Completion::Generic(IN)),
        leaf!("delete", "Delete", Action::ObjectDelete(Container::Cluster), Completion::Generic(IN)),
        leaf!("rename", "Rename", Action::ObjectRename(Container::Cluster), Completion::Generic(TO_IN)),
        leaf!("list", "List all", Action::ObjectList(ObjectKind::Cluster)),
        leaf!("show", "Show details", Action::ObjectShow(ObjectKind::Cluster), Completion::Generic(IN)),
        leaf!("tree", "Show the subtree", Action::ObjectTree(ObjectKind::Cluster), Completion::Generic(IN)),
        branch!("members", "Cluster members", [
            branch!("add", "Add a member", [
                leaf!(
                    "node",
                    "Add a node",
                    Action::MemberAdd { target: Container::Cluster, member: ObjectKind::Node },
                    Completion::Generic(TO_IN)
                ),
            ]),
            branch!("delete", "Remove a member", [
                leaf!(
                    "node",
                    "Remove a node",
                    Action::MemberDelete { target: Container::Cluster, member: ObjectKind::Node },
                    Completion::Generic(FROM_IN)
                ),
            ]),
            leaf!("list", "List members", Action::MemberList(Container::Cluster), Completion::Generic(IN)),
        ]),
        property_branch!(ObjectKind::Cluster, valued: SCOPED_VALUED, plain: SCOPED_PLAIN, detach: SCOPED_DETACH),
    ]),
    branch!("nodes", "Nodes", [
        leaf!("list", "List all", Action::ObjectList(ObjectKind::Node)),
        leaf!("show", "Show details", Action::ObjectShow(ObjectKind::Node)),
        leaf!("config", "Show repository and bucket", Action::NodeConfig),
        property_branch!(ObjectKind::Node, valued: VALUED, plain: PLAIN, detach: DETACH),
    ]),
    branch!("oncall", "Oncall duties", [
        leaf!("add", "Create", Action::OncallAdd, Completion::Generic(&["phone"])),
        leaf!("remove", "Delete", Action::OncallRemove),
        leaf!("rename", "Rename", Action::OncallRename, Completion::Generic(RENAME)),
        leaf!("update", "Change name or number", Action::OncallUpdate, Completion::Generic(&["name", "phone"])),
        leaf!("list", "List all", Action::OncallList),
        leaf!("show", "Show details", Action::OncallShow),
    ]),
    branch!("teams", "Teams", [
        leaf!("list", "List all", Action::TeamList),
        leaf!("show", "Show details", Action::TeamShow),
    ]),
    branch!("users", "Users", [
        leaf!("add", "Create", Action::UserAdd, Completion::Generic(USER_KEYWORDS)),
        leaf!("remove", "Delete", Action::UserRemove),
        leaf!("list", "List all", Action::UserList),
        leaf!("show", "Show details", Action::UserShow),
    ]),
    branch!("category", "Permission categories", [
        leaf!("add", "Create", Action::EntityAdd(Entity::Category), Completion::DataOnly(CATEGORIES)),
        leaf!("remove", "Delete", Action::EntityRemove(Entity::Category), Completion::DataOnly(CATEGORIES)),
        leaf!("list", "List all", Action::EntityList(Entity::Category)),
        leaf!("show", "Show details", Action::EntityShow(Entity::Category), Completion::DataOnly(CATEGORIES)),
    ]),
    branch!("section", "Permission sections", [
        leaf!("add", "Create in a category", Action::SectionAdd, Completion::Generic(RENAME)),
        leaf!("remove", "Delete", Action::SectionRemove, Completion::Generic(IN)),
        leaf!("list", "List a category's sections", Action::SectionList, Completion::Direct(IN)),
        leaf!("show", "Show details", Action::SectionShow, Completion::Generic(IN)),
    ]),
    branch!("action", "Section actions", [
        leaf!("add", "Create in a section", Action::ActionAdd, Completion::Generic(TO_IN)),
        leaf!("remove", "Delete", Action::ActionRemove, Completion::Generic(FROM_IN)),
        leaf!("list", "List a section's actions", Action::ActionList, Completion::Direct(FROM_IN)),
        leaf!("show", "Show details", Action::ActionShow, Completion::Generic(FROM_IN)),
    ]),
    branch!("permission", "Permissions", [
        leaf!("add", "Create in a category", Action::PermissionAdd, Completion::Generic(RENAME)),
        leaf!("remove", "Delete", Action::PermissionRemove, Completion::Generic(FROM_IN)),
        leaf!("list", "List a category's permissions", Action::PermissionList, Completion::Direct(IN)),
        leaf!("show", "Show details", Action::PermissionShow, Completion::Generic(FROM_IN)),
        leaf!("map", "Grant a section or action", Action::PermissionMap, Completion::Generic(RENAME)),
        leaf!("unmap", "Revoke a section or action", Action::PermissionUnmap, Completion::Generic(&["from"])),
    ]),
    branch!("check-config", "Check configurations", [
        leaf!("create", "Create", Action::CheckCreate, Completion::CheckConfig),
        leaf!("delete", "Delete", Action::CheckDelete, Completion::Generic(IN)),
        leaf!("list", "List a repository's checks", Action::CheckList, Completion::Direct(IN)),
        leaf!("locate", "Show a check by the object it watches", Action::CheckLocate, Completion::Triple(ON)),
        leaf!("show", "Show details", Action::CheckShow, Completion::Generic(IN)),
    ]),
    branch!("instance", "Check instances", [
        leaf!("list", "List all", Action::InstanceList),
    ]),
];

/// Top-level verbs.
#[must_use]
pub fn root() -> &'static [Verb] {
    ROOT
}

/// Walk the tree along `tokens` as far as they match.
#[must_use]
pub fn resolve(tokens: &[String]) -> Resolution<'_> {
    let mut children = ROOT;
    let mut path = Vec::new();
    for (index, token) in tokens.iter().enumerate() {
        let Some(verb) = children.iter().find(|verb| verb.name == token.as_str()) else {
            return Resolution::Partial {
                children,
                path,
                rest: &tokens[index..],
            };
        };
        path.push(verb.name);
        match verb.node {
            Node::Branch(next) => children = next,
            Node::Leaf { action, completion } => {
                return Resolution::Leaf {
                    action,
                    completion,
                    path,
                    args: &tokens[index + 1..],
                };
            }
        }
    }
    Resolution::Partial {
        children,
        path,
        rest: &[],
    }
}

/// Completion candidates for `tokens`.
///
/// Below a leaf the leaf's [`Completion`] answers; at a branch its verb
/// names are offered; after an unknown verb nothing is.
#[must_use]
pub fn candidates(tokens: &[String]) -> Vec<&'static str> {
    match resolve(tokens) {
        Resolution::Leaf {
            completion, args, ..
        } => completion.candidates(args),
        Resolution::Partial { children, rest, .. } if rest.is_empty() => {
            children.iter().map(|verb| verb.name).collect()
        }
        Resolution::Partial { .. } => Vec::new(),
    }
}

/// Usage text for a command that did not reach a leaf.
#[must_use]
pub fn usage(path: &[&str], children: &[Verb], rest: &[String]) -> String {
    let prefix = if path.is_empty() {
        "arboradm".to_owned()
    } else {
        format!("arboradm {}", path.join(" "))
    };
    let mut text = match rest.first() {
        Some(token) => format!("unknown command '{token}' for '{prefix}'"),
        None => format!("'{prefix}' needs a subcommand"),
    };
    text.push_str("\n\nAvailable commands:");
    for verb in children {
        text.push_str(&format!("\n  {:<14} {}", verb.name, verb.about));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use test_case::test_case;

    fn toks(s: &str) -> Vec<String> {
        s.split_whitespace().map(String::from).collect()
    }

    #[test_case("views rename old to new", Action::EntityRename(Entity::View); "view rename")]
    #[test_case("attributes add x cardinality once", Action::AttributeAdd; "attribute add")]
    #[test_case("property create template t", Action::PropertyCreate(Definition::Template); "template")]
    #[test_case("buckets tree b", Action::ObjectTree(ObjectKind::Bucket); "bucket tree")]
    #[test_case("nodes config web01", Action::NodeConfig; "node config")]
    #[test_case("permission unmap a from b::c", Action::PermissionUnmap; "unmap")]
    #[test_case("check-config list in repo", Action::CheckList; "check list")]
    #[test_case("check-config locate c on node n", Action::CheckLocate; "check locate")]
    #[test_case("instance list", Action::InstanceList; "instances")]
    fn verb_path_selects_action(line: &str, expected: Action) {
        let tokens = toks(line);
        let Resolution::Leaf { action, .. } = resolve(&tokens) else {
            panic!("{line} did not reach a leaf");
        };
        assert_eq!(action, expected);
    }

    #[test]
    fn node_property_detach() {
        let tokens = toks("nodes property delete oncall duty from web01 view any");
        let Resolution::Leaf { action, args, .. } = resolve(&tokens) else {
            panic!("expected leaf");
        };
        assert_eq!(
            action,
            Action::PropertyDetach {
                target: ObjectKind::Node,
                property: PropertyType::Oncall
            }
        );
        assert_eq!(args.len(), 5);
    }

    fn walk(verbs: &'static [Verb], leaves: &mut usize) {
        let mut names = HashSet::new();
        for verb in verbs {
            assert!(names.insert(verb.name), "duplicate verb {}", verb.name);
            match verb.node {
                Node::Branch(children) => {
                    assert!(!children.is_empty(), "empty branch {}", verb.name);
                    walk(children, leaves);
                }
                Node::Leaf { .. } => *leaves += 1,
            }
        }
    }

    #[test]
    fn verb_names_are_unique_per_branch() {
        let mut leaves = 0;
        walk(root(), &mut leaves);
        assert!(leaves > 100);
    }

    #[test]
    fn resolves_nested_leaf() {
        let tokens = toks("groups members add node web01 to api in prodbucket");
        match resolve(&tokens) {
            Resolution::Leaf { action, path, args, .. } => {
                assert_eq!(
                    action,
                    Action::MemberAdd {
                        target: Container::Group,
                        member: ObjectKind::Node
                    }
                );
                assert_eq!(path, ["groups", "members", "add", "node"]);
                assert_eq!(args, toks("web01 to api in prodbucket").as_slice());
            }
            other => panic!("expected leaf, got {other:?}"),
        }
    }

    #[test]
    fn unknown_verb_stops_at_branch() {
        let tokens = toks("groups explode api");
        match resolve(&tokens) {
            Resolution::Partial { path, rest, .. } => {
                assert_eq!(path, ["groups"]);
                assert_eq!(rest, toks("explode api").as_slice());
            }
            other => panic!("expected partial, got {other:?}"),
        }
    }

    #[test]
    fn branch_completion_lists_children() {
        let top = candidates(&[]);
        assert!(top.contains(&"groups"));
        assert!(top.contains(&"check-config"));

        assert_eq!(
            candidates(&toks("clusters members")),
            ["add", "delete", "list"]
        );
        assert!(candidates(&toks("nonsense")).is_empty());
    }

    #[test]
    fn leaf_completion_follows_grammar() {
        assert_eq!(candidates(&toks("groups create frontend")), ["in"]);
        assert!(candidates(&toks("groups create frontend in")).is_empty());
        assert_eq!(
            candidates(&toks("check-config create foo in X threshold predicate")),
            ["level", "value"]
        );
        assert_eq!(candidates(&toks("category add")), CATEGORIES);
    }

    #[test]
    fn locate_skips_both_target_tokens() {
        assert!(candidates(&toks("check-config locate")).is_empty());
        assert_eq!(candidates(&toks("check-config locate http-up")), ["on"]);
        assert!(candidates(&toks("check-config locate http-up on")).is_empty());
        assert!(candidates(&toks("check-config locate http-up on node")).is_empty());
        assert!(candidates(&toks("check-config locate http-up on node web01")).is_empty());
    }

    #[test]
    fn service_definition_repeats_attributes_but_not_team() {
        assert_eq!(
            candidates(&toks("property create service http")),
            ["team", "port", "transport_protocol"]
        );
        assert_eq!(
            candidates(&toks("property create service http team ops port 80")),
            ["port", "transport_protocol"]
        );
        assert!(candidates(&toks("property create service http port")).is_empty());
        assert_eq!(
            candidates(&toks("property create template web port 80")),
            ["port", "transport_protocol"]
        );
    }

    #[test]
    fn scoped_attach_offers_in() {
        let scoped = candidates(&toks("groups property add custom owner"));
        assert!(scoped.contains(&"in"));
        let unscoped = candidates(&toks("nodes property add custom owner"));
        assert!(!unscoped.contains(&"in"));
        assert!(unscoped.contains(&"value"));
    }

    #[test]
    fn usage_names_unknown_token_and_choices() {
        let tokens = toks("groups explode");
        let Resolution::Partial { children, path, rest } = resolve(&tokens) else {
            panic!("expected partial");
        };
        let text = usage(&path, children, rest);
        assert!(text.starts_with("unknown command 'explode' for 'arboradm groups'"));
        assert!(text.contains("members"));
    }
}
