//! Name-to-identifier lookups.
//!
//! Every symbolic reference in a command is turned into an opaque server
//! identifier through the [`Lookup`] capability. [`HttpLookup`] answers by
//! querying the server; tests use an in-memory fake.

use std::future::Future;

use arbor_proto::{
    Attribute, Filter, NodeConfig, ObjectKind, Oncall, Property, PropertyType, Request,
    ServerResult,
};
use arbor_validation::is_uuid;
use tracing::debug;

use crate::client::Transport;
use crate::error::CliError;

/// Resolves names to identifiers, one method per entity kind.
///
/// Scoped lookups take the identifier of their scope, which the caller
/// resolves first.
pub trait Lookup {
    /// Bucket by name.
    fn bucket_id(&self, name: &str) -> impl Future<Output = Result<String, CliError>>;
    /// Group by name within a bucket.
    fn group_id(&self, name: &str, bucket_id: &str)
    -> impl Future<Output = Result<String, CliError>>;
    /// Cluster by name within a bucket.
    fn cluster_id(
        &self,
        name: &str,
        bucket_id: &str,
    ) -> impl Future<Output = Result<String, CliError>>;
    /// Node by name.
    fn node_id(&self, name: &str) -> impl Future<Output = Result<String, CliError>>;
    /// Repository by name.
    fn repository_id(&self, name: &str) -> impl Future<Output = Result<String, CliError>>;
    /// Repository owning a bucket.
    fn repository_by_bucket(
        &self,
        bucket_id: &str,
    ) -> impl Future<Output = Result<String, CliError>>;
    /// Team by name.
    fn team_id(&self, name: &str) -> impl Future<Output = Result<String, CliError>>;
    /// Team owning a bucket.
    fn team_by_bucket(&self, bucket_id: &str) -> impl Future<Output = Result<String, CliError>>;
    /// Team owning a repository.
    fn team_by_repository(
        &self,
        repository_id: &str,
    ) -> impl Future<Output = Result<String, CliError>>;
    /// Section by name.
    fn section_id(&self, name: &str) -> impl Future<Output = Result<String, CliError>>;
    /// Action by name within a section.
    fn action_id(
        &self,
        name: &str,
        section_id: &str,
    ) -> impl Future<Output = Result<String, CliError>>;
    /// Category a section belongs to.
    fn category_by_section(
        &self,
        section_id: &str,
    ) -> impl Future<Output = Result<String, CliError>>;
    /// Permission by name within a category.
    fn permission_id(
        &self,
        name: &str,
        category: &str,
    ) -> impl Future<Output = Result<String, CliError>>;
    /// Custom property definition by name within a repository.
    fn custom_property_id(
        &self,
        name: &str,
        repository_id: &str,
    ) -> impl Future<Output = Result<String, CliError>>;
    /// Service property definition by name within a team.
    fn service_property_id(
        &self,
        name: &str,
        team_id: &str,
    ) -> impl Future<Output = Result<String, CliError>>;
    /// Global service template by name.
    fn template_property_id(&self, name: &str) -> impl Future<Output = Result<String, CliError>>;
    /// Repository and bucket assignment of a node.
    fn node_config(&self, node_id: &str) -> impl Future<Output = Result<NodeConfig, CliError>>;
    /// Oncall duty by name.
    fn oncall_id(&self, name: &str) -> impl Future<Output = Result<String, CliError>>;
    /// Full oncall record.
    fn oncall_details(&self, oncall_id: &str) -> impl Future<Output = Result<Oncall, CliError>>;
    /// Source instance of a property attached to an object.
    fn property_source(
        &self,
        kind: ObjectKind,
        object_id: &str,
        property_type: PropertyType,
        name: &str,
        view: &str,
    ) -> impl Future<Output = Result<String, CliError>>;
    /// User by user name.
    fn user_id(&self, name: &str) -> impl Future<Output = Result<String, CliError>>;
    /// Monitoring capability by name.
    fn capability_id(&self, name: &str) -> impl Future<Output = Result<String, CliError>>;
    /// Check configuration by name within a repository.
    fn check_config_id(
        &self,
        name: &str,
        repository_id: &str,
    ) -> impl Future<Output = Result<String, CliError>>;
    /// Service attribute schema.
    fn attributes(&self) -> impl Future<Output = Result<Vec<Attribute>, CliError>>;
}

/// [`Lookup`] backed by the server's search and detail endpoints.
///
/// A name that already parses as a UUID is taken as the identifier without
/// a round-trip, unless the lookup is scoped. Scoped identifiers are searched
/// by `id` so an object outside the scope is reported as not found.
#[derive(Debug)]
pub struct HttpLookup<'a, T> {
    transport: &'a T,
}

impl<'a, T: Transport> HttpLookup<'a, T> {
    /// Wrap a transport.
    #[must_use]
    pub const fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    async fn search<F>(
        &self,
        kind: &'static str,
        mut filter: Filter,
        pick: F,
    ) -> Result<String, CliError>
    where
        F: FnOnce(ServerResult) -> Option<String>,
    {
        let name = filter.name.clone().unwrap_or_default();
        let by_id = is_uuid(&name);
        if by_id {
            if !filter.is_scoped() {
                return Ok(name);
            }
            // A scoped identifier must still be found within its scope.
            filter.name = None;
            filter.id = Some(name.clone());
        }
        debug!(kind, name = %name, by_id, "Looking up identifier");
        let result = self
            .transport
            .post(&format!("/search/{kind}/"), &Request::search(filter))
            .await?;
        pick(result)
            .filter(|id| !by_id || *id == name)
            .ok_or_else(|| CliError::not_found(kind, name))
    }

    async fn object_properties(
        &self,
        kind: ObjectKind,
        object_id: &str,
    ) -> Result<Vec<Property>, CliError> {
        let result = self
            .transport
            .get(&format!("/{}/{object_id}", kind.as_str()))
            .await?;
        let properties = match kind {
            ObjectKind::Repository => result.repositories.into_iter().next().and_then(|o| o.properties),
            ObjectKind::Bucket => result.buckets.into_iter().next().and_then(|o| o.properties),
            ObjectKind::Group => result.groups.into_iter().next().and_then(|o| o.properties),
            ObjectKind::Cluster => result.clusters.into_iter().next().and_then(|o| o.properties),
            ObjectKind::Node => result.nodes.into_iter().next().and_then(|o| o.properties),
        };
        Ok(properties.unwrap_or_default())
    }
}

fn first<I>(ids: I) -> Option<String>
where
    I: IntoIterator<Item = Option<String>>,
{
    ids.into_iter().flatten().next()
}

fn scoped(name: &str, scope: impl FnOnce(&mut Filter)) -> Filter {
    let mut filter = Filter::by_name(name);
    scope(&mut filter);
    filter
}

impl<T: Transport> Lookup for HttpLookup<'_, T> {
    async fn bucket_id(&self, name: &str) -> Result<String, CliError> {
        self.search("bucket", Filter::by_name(name), |r| {
            first(r.buckets.into_iter().map(|o| o.id))
        })
        .await
    }

    async fn group_id(&self, name: &str, bucket_id: &str) -> Result<String, CliError> {
        let filter = scoped(name, |f| f.bucket_id = Some(bucket_id.to_owned()));
        self.search("group", filter, |r| first(r.groups.into_iter().map(|o| o.id)))
            .await
    }

    async fn cluster_id(&self, name: &str, bucket_id: &str) -> Result<String, CliError> {
        let filter = scoped(name, |f| f.bucket_id = Some(bucket_id.to_owned()));
        self.search("cluster", filter, |r| {
            first(r.clusters.into_iter().map(|o| o.id))
        })
        .await
    }

    async fn node_id(&self, name: &str) -> Result<String, CliError> {
        self.search("node", Filter::by_name(name), |r| {
            first(r.nodes.into_iter().map(|o| o.id))
        })
        .await
    }

    async fn repository_id(&self, name: &str) -> Result<String, CliError> {
        self.search("repository", Filter::by_name(name), |r| {
            first(r.repositories.into_iter().map(|o| o.id))
        })
        .await
    }

    async fn repository_by_bucket(&self, bucket_id: &str) -> Result<String, CliError> {
        let result = self.transport.get(&format!("/bucket/{bucket_id}")).await?;
        first(result.buckets.into_iter().map(|o| o.repository_id))
            .ok_or_else(|| CliError::not_found("repository of bucket", bucket_id))
    }

    async fn team_id(&self, name: &str) -> Result<String, CliError> {
        self.search("team", Filter::by_name(name), |r| {
            first(r.teams.into_iter().map(|o| o.id))
        })
        .await
    }

    async fn team_by_bucket(&self, bucket_id: &str) -> Result<String, CliError> {
        let result = self.transport.get(&format!("/bucket/{bucket_id}")).await?;
        let bucket = result
            .buckets
            .into_iter()
            .next()
            .ok_or_else(|| CliError::not_found("bucket", bucket_id))?;
        if let Some(team) = bucket.team_id {
            return Ok(team);
        }
        match bucket.repository_id {
            Some(repository) => self.team_by_repository(&repository).await,
            None => Err(CliError::not_found("team of bucket", bucket_id)),
        }
    }

    async fn team_by_repository(&self, repository_id: &str) -> Result<String, CliError> {
        let result = self
            .transport
            .get(&format!("/repository/{repository_id}"))
            .await?;
        first(result.repositories.into_iter().map(|o| o.team_id))
            .ok_or_else(|| CliError::not_found("team of repository", repository_id))
    }

    async fn section_id(&self, name: &str) -> Result<String, CliError> {
        self.search("section", Filter::by_name(name), |r| {
            first(r.sections.into_iter().map(|o| o.id))
        })
        .await
    }

    async fn action_id(&self, name: &str, section_id: &str) -> Result<String, CliError> {
        let filter = scoped(name, |f| f.section_id = Some(section_id.to_owned()));
        self.search("action", filter, |r| first(r.actions.into_iter().map(|o| o.id)))
            .await
    }

    async fn category_by_section(&self, section_id: &str) -> Result<String, CliError> {
        let result = self.transport.get(&format!("/section/{section_id}")).await?;
        first(result.sections.into_iter().map(|o| o.category))
            .ok_or_else(|| CliError::not_found("category of section", section_id))
    }

    async fn permission_id(&self, name: &str, category: &str) -> Result<String, CliError> {
        let filter = scoped(name, |f| f.category = Some(category.to_owned()));
        self.search("permission", filter, |r| {
            first(r.permissions.into_iter().map(|o| o.id))
        })
        .await
    }

    async fn custom_property_id(&self, name: &str, repository_id: &str) -> Result<String, CliError> {
        let filter = scoped(name, |f| f.repository_id = Some(repository_id.to_owned()));
        self.search("property/custom", filter, |r| {
            first(
                r.properties
                    .into_iter()
                    .filter_map(|p| p.custom)
                    .map(|c| c.id),
            )
        })
        .await
    }

    async fn service_property_id(&self, name: &str, team_id: &str) -> Result<String, CliError> {
        let filter = scoped(name, |f| f.team_id = Some(team_id.to_owned()));
        self.search("property/service", filter, |r| {
            first(r.properties.into_iter().map(|p| p.instance_id))
        })
        .await
    }

    async fn template_property_id(&self, name: &str) -> Result<String, CliError> {
        self.search("property/template", Filter::by_name(name), |r| {
            first(r.properties.into_iter().map(|p| p.instance_id))
        })
        .await
    }

    async fn node_config(&self, node_id: &str) -> Result<NodeConfig, CliError> {
        let result = self.transport.get(&format!("/nodes/{node_id}/config")).await?;
        result
            .nodes
            .into_iter()
            .find_map(|n| n.config)
            .ok_or_else(|| CliError::not_found("node config", node_id))
    }

    async fn oncall_id(&self, name: &str) -> Result<String, CliError> {
        self.search("oncall", Filter::by_name(name), |r| {
            first(r.oncalls.into_iter().map(|o| o.id))
        })
        .await
    }

    async fn oncall_details(&self, oncall_id: &str) -> Result<Oncall, CliError> {
        let result = self.transport.get(&format!("/oncall/{oncall_id}")).await?;
        result
            .oncalls
            .into_iter()
            .next()
            .ok_or_else(|| CliError::not_found("oncall", oncall_id))
    }

    async fn property_source(
        &self,
        kind: ObjectKind,
        object_id: &str,
        property_type: PropertyType,
        name: &str,
        view: &str,
    ) -> Result<String, CliError> {
        let properties = self.object_properties(kind, object_id).await?;
        properties
            .into_iter()
            .find(|p| {
                p.property_type == Some(property_type)
                    && p.view.as_deref() == Some(view)
                    && p.name() == Some(name)
                    && p.is_source()
            })
            .and_then(|p| p.source_instance_id)
            .ok_or_else(|| CliError::not_found("property", format!("{property_type} {name} ({view})")))
    }

    async fn user_id(&self, name: &str) -> Result<String, CliError> {
        self.search("user", Filter::by_name(name), |r| {
            first(r.users.into_iter().map(|o| o.id))
        })
        .await
    }

    async fn capability_id(&self, name: &str) -> Result<String, CliError> {
        self.search("capability", Filter::by_name(name), |r| {
            first(r.capabilities.into_iter().map(|o| o.id))
        })
        .await
    }

    async fn check_config_id(&self, name: &str, repository_id: &str) -> Result<String, CliError> {
        let filter = scoped(name, |f| f.repository_id = Some(repository_id.to_owned()));
        self.search("checks", filter, |r| {
            first(r.check_configs.into_iter().map(|o| o.id))
        })
        .await
    }

    async fn attributes(&self) -> Result<Vec<Attribute>, CliError> {
        Ok(self.transport.get("/attributes/").await?.attributes)
    }
}
