//! Tree objects and group/cluster membership.

use arbor_proto::{Cluster, Group, Node, ObjectKind, Request};
use arbor_validation::{validate_rune_count_range, MAX_OBJECT_NAME_RUNES, MIN_OBJECT_NAME_RUNES};

use crate::args::{exactly, sole, split_subject, Contract};
use crate::error::CliError;
use crate::lookup::Lookup;
use crate::request::{Method, RenderMode, RequestDescriptor};
use crate::resolve::{self, ResolvedObject};

/// Object that lives in a bucket and can hold members.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    /// Group of groups, clusters and nodes.
    Group,
    /// Cluster of nodes.
    Cluster,
}

impl Container {
    /// The object kind.
    #[must_use]
    pub const fn kind(self) -> ObjectKind {
        match self {
            Self::Group => ObjectKind::Group,
            Self::Cluster => ObjectKind::Cluster,
        }
    }
}

/// Request carrying one group or cluster.
fn container_request(
    container: Container,
    id: Option<String>,
    name: Option<String>,
    bucket_id: String,
) -> Request {
    match container {
        Container::Group => Request {
            group: Some(Group {
                id,
                name,
                bucket_id: Some(bucket_id),
                ..Group::default()
            }),
            ..Request::default()
        },
        Container::Cluster => Request {
            cluster: Some(Cluster {
                id,
                name,
                bucket_id: Some(bucket_id),
                ..Cluster::default()
            }),
            ..Request::default()
        },
    }
}

fn check_name(container: Container, name: &str) -> Result<(), CliError> {
    validate_rune_count_range(
        container.kind().as_str(),
        name,
        MIN_OBJECT_NAME_RUNES,
        MAX_OBJECT_NAME_RUNES,
    )?;
    Ok(())
}

/// `NAME in BUCKET` for groups and clusters, `NAME` otherwise.
async fn locate<L: Lookup>(
    kind: ObjectKind,
    args: &[String],
    lookup: &L,
) -> Result<ResolvedObject, CliError> {
    if kind.is_bucket_scoped() {
        let (name, tail) = split_subject(args)?;
        let kw = Contract::new().unique(["in"]).required(["in"]).parse(tail)?;
        resolve::object(lookup, kind, name, Some(kw.required("in")?)).await
    } else {
        resolve::object(lookup, kind, sole(args)?, None).await
    }
}

fn item(object: &ResolvedObject) -> String {
    format!("/{}/{}", object.kind, object.id)
}

pub(crate) async fn create<L: Lookup>(
    container: Container,
    args: &[String],
    lookup: &L,
) -> Result<RequestDescriptor, CliError> {
    let (name, tail) = split_subject(args)?;
    let kw = Contract::new().unique(["in"]).required(["in"]).parse(tail)?;
    check_name(container, name)?;
    let bucket_id = lookup.bucket_id(kw.required("in")?).await?;
    Ok(RequestDescriptor::post(
        format!("/{}/", container.kind()),
        container_request(container, None, Some(name.to_owned()), bucket_id),
    ))
}

pub(crate) async fn delete<L: Lookup>(
    container: Container,
    args: &[String],
    lookup: &L,
) -> Result<RequestDescriptor, CliError> {
    let object = locate(container.kind(), args, lookup).await?;
    Ok(RequestDescriptor::delete(item(&object)))
}

/// `NAME to NEW in BUCKET`
pub(crate) async fn rename<L: Lookup>(
    container: Container,
    args: &[String],
    lookup: &L,
) -> Result<RequestDescriptor, CliError> {
    let (name, tail) = split_subject(args)?;
    let kw = Contract::new()
        .unique(["to", "in"])
        .required(["to", "in"])
        .parse(tail)?;
    let new_name = kw.required("to")?;
    check_name(container, new_name)?;
    let object = resolve::object(lookup, container.kind(), name, kw.one("in")).await?;
    let bucket_id = object.bucket_id.clone().unwrap_or_default();
    Ok(RequestDescriptor::with_body(
        Method::PutBody,
        item(&object),
        container_request(
            container,
            Some(object.id.clone()),
            Some(new_name.to_owned()),
            bucket_id,
        ),
    ))
}

pub(crate) fn list(kind: ObjectKind, args: &[String]) -> Result<RequestDescriptor, CliError> {
    exactly(args, 0)?;
    Ok(RequestDescriptor::get(format!("/{kind}/"), RenderMode::List))
}

pub(crate) async fn show<L: Lookup>(
    kind: ObjectKind,
    args: &[String],
    lookup: &L,
) -> Result<RequestDescriptor, CliError> {
    let object = locate(kind, args, lookup).await?;
    Ok(RequestDescriptor::get(item(&object), RenderMode::Show))
}

pub(crate) async fn tree<L: Lookup>(
    kind: ObjectKind,
    args: &[String],
    lookup: &L,
) -> Result<RequestDescriptor, CliError> {
    let object = locate(kind, args, lookup).await?;
    Ok(RequestDescriptor::get(
        format!("{}/tree", item(&object)),
        RenderMode::Tree,
    ))
}

/// Identifier of a prospective member inside `bucket_id`.
async fn member_id<L: Lookup>(
    member: ObjectKind,
    name: &str,
    bucket_id: &str,
    lookup: &L,
) -> Result<String, CliError> {
    match member {
        ObjectKind::Group => lookup.group_id(name, bucket_id).await,
        ObjectKind::Cluster => lookup.cluster_id(name, bucket_id).await,
        _ => lookup.node_id(name).await,
    }
}

/// Resolve `MEMBER <link> TARGET in BUCKET` to member and target.
async fn membership<L: Lookup>(
    container: Container,
    member: ObjectKind,
    link: &str,
    args: &[String],
    lookup: &L,
) -> Result<(String, ResolvedObject), CliError> {
    if container == Container::Cluster && member != ObjectKind::Node {
        return Err(CliError::Usage(format!(
            "clusters only hold nodes, not {member}s"
        )));
    }
    let (name, tail) = split_subject(args)?;
    let kw = Contract::new()
        .unique([link, "in"])
        .required([link, "in"])
        .parse(tail)?;
    let target = resolve::object(lookup, container.kind(), kw.required(link)?, kw.one("in")).await?;
    let bucket_id = target.bucket_id.as_deref().unwrap_or_default();
    let member_id = member_id(member, name, bucket_id, lookup).await?;
    Ok((member_id, target))
}

/// `MEMBER to TARGET in BUCKET`
pub(crate) async fn add_member<L: Lookup>(
    container: Container,
    member: ObjectKind,
    args: &[String],
    lookup: &L,
) -> Result<RequestDescriptor, CliError> {
    let (member_id, target) = membership(container, member, "to", args, lookup).await?;
    let path = format!("/{}/{}/members/", container.kind().collection(), target.id);

    let body = match container {
        Container::Group => {
            let mut group = Group {
                id: Some(target.id),
                bucket_id: target.bucket_id,
                ..Group::default()
            };
            match member {
                ObjectKind::Group => group
                    .member_groups
                    .get_or_insert_with(Vec::new)
                    .push(Group::reference(member_id)),
                ObjectKind::Cluster => group
                    .member_clusters
                    .get_or_insert_with(Vec::new)
                    .push(Cluster::reference(member_id)),
                _ => group
                    .member_nodes
                    .get_or_insert_with(Vec::new)
                    .push(Node::reference(member_id)),
            }
            Request {
                group: Some(group),
                ..Request::default()
            }
        }
        Container::Cluster => {
            let mut cluster = Cluster {
                id: Some(target.id),
                bucket_id: target.bucket_id,
                ..Cluster::default()
            };
            cluster
                .members
                .get_or_insert_with(Vec::new)
                .push(Node::reference(member_id));
            Request {
                cluster: Some(cluster),
                ..Request::default()
            }
        }
    };
    Ok(RequestDescriptor::post(path, body))
}

/// `MEMBER from TARGET in BUCKET`
pub(crate) async fn delete_member<L: Lookup>(
    container: Container,
    member: ObjectKind,
    args: &[String],
    lookup: &L,
) -> Result<RequestDescriptor, CliError> {
    let (member_id, target) = membership(container, member, "from", args, lookup).await?;
    Ok(RequestDescriptor::delete(format!(
        "/{}/{}/members/{member_id}",
        container.kind().collection(),
        target.id
    )))
}

pub(crate) async fn list_members<L: Lookup>(
    container: Container,
    args: &[String],
    lookup: &L,
) -> Result<RequestDescriptor, CliError> {
    let target = locate(container.kind(), args, lookup).await?;
    Ok(RequestDescriptor::get(
        format!("/{}/{}/members/", container.kind().collection(), target.id),
        RenderMode::List,
    ))
}

pub(crate) async fn node_config<L: Lookup>(
    args: &[String],
    lookup: &L,
) -> Result<RequestDescriptor, CliError> {
    let id = lookup.node_id(sole(args)?).await?;
    Ok(RequestDescriptor::get(
        format!("/nodes/{id}/config"),
        RenderMode::Show,
    ))
}
