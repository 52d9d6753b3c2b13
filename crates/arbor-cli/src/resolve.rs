//! Chained resolution and cross-object checks on top of [`Lookup`].

use arbor_proto::ObjectKind;
use tracing::debug;

use crate::args::ArgumentError;
use crate::error::CliError;
use crate::lookup::Lookup;

/// Separator of qualified names such as `auth::login` or `global::admin`.
pub const QUALIFIER: &str = "::";

/// Split `qualifier::name`; plain names have no qualifier.
#[must_use]
pub fn split_qualified(token: &str) -> (Option<&str>, &str) {
    match token.split_once(QUALIFIER) {
        Some((qualifier, name)) => (Some(qualifier), name),
        None => (None, token),
    }
}

/// Parse a token that must be qualified, e.g. `category::permission`.
///
/// # Errors
///
/// Returns an argument error if the qualifier or the name is missing.
pub fn require_qualified<'a>(
    token: &'a str,
    what: &str,
) -> Result<(&'a str, &'a str), ArgumentError> {
    match split_qualified(token) {
        (Some(qualifier), name) if !qualifier.is_empty() && !name.is_empty() => {
            Ok((qualifier, name))
        }
        _ => Err(ArgumentError::unexpected(
            token,
            format!("expected {what}"),
        )),
    }
}

/// Fail with [`CliError::CategoryMismatch`] unless the categories agree.
///
/// # Errors
///
/// Returns `CategoryMismatch` when `actual != expected`.
pub fn ensure_category(expected: &str, actual: &str) -> Result<(), CliError> {
    if expected == actual {
        return Ok(());
    }
    Err(CliError::CategoryMismatch {
        expected: expected.to_owned(),
        actual: actual.to_owned(),
    })
}

/// Merge two optional spellings of the same value.
///
/// # Errors
///
/// Returns `Mismatch` if both are given and differ.
pub fn agree<'a>(
    what: &'static str,
    first: Option<&'a str>,
    second: Option<&'a str>,
) -> Result<Option<&'a str>, CliError> {
    match (first, second) {
        (Some(a), Some(b)) if a != b => Err(CliError::Mismatch {
            what,
            first: a.to_owned(),
            second: b.to_owned(),
        }),
        (a, b) => Ok(a.or(b)),
    }
}

/// A section together with the category it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSection {
    /// Section identifier.
    pub id: String,
    /// Owning category.
    pub category: String,
}

/// Resolve a section and its category.
///
/// If `expected` is given, the section's category must equal it.
///
/// # Errors
///
/// Fails if the section is unknown or the categories differ.
pub async fn section<L: Lookup>(
    lookup: &L,
    name: &str,
    expected: Option<&str>,
) -> Result<ResolvedSection, CliError> {
    let id = lookup.section_id(name).await?;
    let category = lookup.category_by_section(&id).await?;
    if let Some(expected) = expected {
        ensure_category(expected, &category)?;
    }
    debug!(section = name, id = %id, category = %category, "Resolved section");
    Ok(ResolvedSection { id, category })
}

/// A tree object and, for bucket-scoped kinds, its bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedObject {
    /// Object kind.
    pub kind: ObjectKind,
    /// Object identifier.
    pub id: String,
    /// Bucket of a group or cluster.
    pub bucket_id: Option<String>,
}

/// Resolve a tree object by name.
///
/// Groups and clusters are only unique within a bucket, so `bucket` is
/// resolved first and required for them; other kinds ignore it.
///
/// # Errors
///
/// Fails if a lookup fails or a bucket-scoped kind has no bucket.
pub async fn object<L: Lookup>(
    lookup: &L,
    kind: ObjectKind,
    name: &str,
    bucket: Option<&str>,
) -> Result<ResolvedObject, CliError> {
    if !kind.is_bucket_scoped() {
        let id = match kind {
            ObjectKind::Repository => lookup.repository_id(name).await?,
            ObjectKind::Bucket => lookup.bucket_id(name).await?,
            _ => lookup.node_id(name).await?,
        };
        return Ok(ResolvedObject {
            kind,
            id,
            bucket_id: None,
        });
    }

    let bucket = bucket.ok_or_else(|| ArgumentError::MissingRequired("in".into()))?;
    let bucket_id = lookup.bucket_id(bucket).await?;
    let id = match kind {
        ObjectKind::Cluster => lookup.cluster_id(name, &bucket_id).await?,
        _ => lookup.group_id(name, &bucket_id).await?,
    };
    Ok(ResolvedObject {
        kind,
        id,
        bucket_id: Some(bucket_id),
    })
}

impl ResolvedObject {
    /// Repository the object lives in.
    ///
    /// # Errors
    ///
    /// Fails if the owning repository cannot be determined.
    pub async fn repository<L: Lookup>(&self, lookup: &L) -> Result<String, CliError> {
        match self.kind {
            ObjectKind::Repository => Ok(self.id.clone()),
            ObjectKind::Bucket => lookup.repository_by_bucket(&self.id).await,
            ObjectKind::Node => lookup
                .node_config(&self.id)
                .await?
                .repository_id
                .ok_or_else(|| CliError::not_found("repository of node", self.id.clone())),
            ObjectKind::Group | ObjectKind::Cluster => {
                lookup.repository_by_bucket(self.bucket()?).await
            }
        }
    }

    /// Team owning the object, derived from its bucket or repository.
    ///
    /// # Errors
    ///
    /// Fails if the owning team cannot be determined.
    pub async fn team<L: Lookup>(&self, lookup: &L) -> Result<String, CliError> {
        match self.kind {
            ObjectKind::Repository => lookup.team_by_repository(&self.id).await,
            ObjectKind::Bucket => lookup.team_by_bucket(&self.id).await,
            ObjectKind::Node => {
                let config = lookup.node_config(&self.id).await?;
                match (config.bucket_id, config.repository_id) {
                    (Some(bucket), _) => lookup.team_by_bucket(&bucket).await,
                    (None, Some(repository)) => lookup.team_by_repository(&repository).await,
                    (None, None) => Err(CliError::not_found("team of node", self.id.clone())),
                }
            }
            ObjectKind::Group | ObjectKind::Cluster => lookup.team_by_bucket(self.bucket()?).await,
        }
    }

    fn bucket(&self) -> Result<&str, CliError> {
        self.bucket_id
            .as_deref()
            .ok_or_else(|| CliError::not_found("bucket of", self.id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::fake::FakeLookup;

    #[test]
    fn qualified_names_split_once() {
        assert_eq!(split_qualified("auth::login"), (Some("auth"), "login"));
        assert_eq!(split_qualified("auth"), (None, "auth"));
        assert_eq!(split_qualified("a::b::c"), (Some("a"), "b::c"));
    }

    #[test]
    fn require_qualified_rejects_plain_and_empty() {
        assert!(require_qualified("global::admin", "category::permission").is_ok());
        assert!(require_qualified("admin", "category::permission").is_err());
        assert!(require_qualified("::admin", "category::permission").is_err());
        assert!(require_qualified("global::", "category::permission").is_err());
    }

    #[test]
    fn agree_merges_or_conflicts() {
        assert_eq!(agree("category", Some("a"), None).unwrap(), Some("a"));
        assert_eq!(agree("category", None, Some("b")).unwrap(), Some("b"));
        assert_eq!(agree("category", Some("a"), Some("a")).unwrap(), Some("a"));
        assert!(agree("category", Some("a"), Some("b")).is_err());
    }

    #[tokio::test]
    async fn section_category_must_match() {
        let lookup = FakeLookup::new()
            .with("section", "auth", "", "S1")
            .with("category of section", "S1", "", "global");
        let resolved = section(&lookup, "auth", Some("global")).await.unwrap();
        assert_eq!(resolved.id, "S1");

        let err = section(&lookup, "auth", Some("system")).await.unwrap_err();
        assert!(matches!(err, CliError::CategoryMismatch { .. }));
    }

    #[tokio::test]
    async fn group_resolves_bucket_first() {
        let lookup = FakeLookup::new()
            .with("bucket", "prodbucket", "", "B1")
            .with("group", "api", "B1", "G1");
        let group = object(&lookup, ObjectKind::Group, "api", Some("prodbucket"))
            .await
            .unwrap();
        assert_eq!(group.id, "G1");
        assert_eq!(group.bucket_id.as_deref(), Some("B1"));

        let err = object(&lookup, ObjectKind::Group, "api", None)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "missing required keyword: in");
    }

    #[tokio::test]
    async fn node_team_follows_its_bucket() {
        let lookup = FakeLookup::new()
            .with("node", "web01", "", "N1")
            .with_node_config("N1", "R1", "B1")
            .with("team of bucket", "B1", "", "T1");
        let node = object(&lookup, ObjectKind::Node, "web01", Some("ignored"))
            .await
            .unwrap();
        assert_eq!(node.team(&lookup).await.unwrap(), "T1");
        assert_eq!(node.repository(&lookup).await.unwrap(), "R1");
    }
}
