//! Resource identity and the capability model attached to it.
//!
//! A [`ResourceIdentity`] describes how a native type appears on the wire:
//! its API group/version/kind, its path names, whether it is namespaced,
//! and which subresource facets (status, scale) the server exposes for it.
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    hash::{Hash, Hasher},
};

/// Whether a resource lives inside a namespace or at cluster level.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub enum Scope {
    /// Cluster-wide resources; paths carry no namespace segment.
    Cluster,
    /// Namespace-scoped resources.
    Namespaced,
}

/// JSON pointers into spec/status that back the scale subresource.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScalePaths {
    /// Path to the desired replica count inside `spec`.
    pub spec_replicas_path: String,
    /// Path to the observed replica count inside `status`.
    pub status_replicas_path: String,
}

/// Optional subresource facets enabled for a resource type.
///
/// Operations on a facet are only defined when the facet is declared here;
/// the operation layer refuses them otherwise without touching the network.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Subresources {
    /// The status facet is writable through the `/status` sub-path.
    pub status: bool,
    /// The scale facet is served through the `/scale` sub-path.
    pub scale: Option<ScalePaths>,
}

/// Wire-level identity of a resource type.
///
/// Constructed once per type, then registered (see [`crate::registry`]) or
/// handed to API constructors directly. Equality and hashing consider only
/// the (group, version, kind) triple; names and capabilities are cosmetic
/// for identity purposes.
#[derive(Clone, Debug, Eq)]
pub struct ResourceIdentity {
    /// API group, empty for the core group.
    pub group: String,
    /// API version within the group.
    pub version: String,
    /// Singular PascalCase kind.
    pub kind: String,
    /// Plural path segment.
    pub plural: String,
    /// Singular lowercase name.
    pub singular: String,
    /// Short name aliases, in declaration order.
    pub short_names: Vec<String>,
    /// Cluster or namespace scope.
    pub scope: Scope,
    /// Enabled subresource facets, if any.
    pub subresources: Option<Subresources>,
}

impl ResourceIdentity {
    /// Declare an identity in an explicit API group.
    ///
    /// Defaults: namespaced scope, singular name derived by lowercasing the
    /// kind, no short names, no subresources.
    ///
    /// # Panics
    ///
    /// An empty `kind` or `plural` is a programming error and panics.
    pub fn new(group: &str, version: &str, kind: &str, plural: &str) -> Self {
        assert!(!kind.is_empty(), "resource kind must not be empty");
        assert!(!plural.is_empty(), "resource plural name must not be empty");
        Self {
            group: group.to_string(),
            version: version.to_string(),
            kind: kind.to_string(),
            plural: plural.to_string(),
            singular: kind.to_ascii_lowercase(),
            short_names: Vec::new(),
            scope: Scope::Namespaced,
            subresources: None,
        }
    }

    /// Declare an identity in the core (empty) API group.
    pub fn core(version: &str, kind: &str, plural: &str) -> Self {
        Self::new("", version, kind, plural)
    }

    /// Override the singular name.
    #[must_use]
    pub fn singular(mut self, singular: &str) -> Self {
        self.singular = singular.to_string();
        self
    }

    /// Attach short name aliases.
    #[must_use]
    pub fn short_names(mut self, names: &[&str]) -> Self {
        self.short_names = names.iter().map(|n| n.to_string()).collect();
        self
    }

    /// Mark the resource as cluster-scoped.
    #[must_use]
    pub fn cluster_scoped(mut self) -> Self {
        self.scope = Scope::Cluster;
        self
    }

    /// Enable the status subresource facet.
    #[must_use]
    pub fn with_status(mut self) -> Self {
        self.subresources.get_or_insert_with(Default::default).status = true;
        self
    }

    /// Enable the scale subresource facet with its replica paths.
    ///
    /// # Panics
    ///
    /// Empty paths are a programming error and panic.
    #[must_use]
    pub fn with_scale(mut self, spec_replicas_path: &str, status_replicas_path: &str) -> Self {
        assert!(
            !spec_replicas_path.is_empty() && !status_replicas_path.is_empty(),
            "scale subresource requires non-empty replica paths"
        );
        self.subresources.get_or_insert_with(Default::default).scale = Some(ScalePaths {
            spec_replicas_path: spec_replicas_path.to_string(),
            status_replicas_path: status_replicas_path.to_string(),
        });
        self
    }

    /// The `apiVersion` string used in serialized objects.
    pub fn api_version(&self) -> String {
        if self.group.is_empty() {
            self.version.clone()
        } else {
            format!("{}/{}", self.group, self.version)
        }
    }

    /// Whether the status facet is enabled.
    pub fn has_status(&self) -> bool {
        self.subresources.as_ref().is_some_and(|s| s.status)
    }

    /// The scale replica paths, when the scale facet is enabled.
    pub fn scale_paths(&self) -> Option<&ScalePaths> {
        self.subresources.as_ref().and_then(|s| s.scale.as_ref())
    }

    /// Derive the collection url path for this resource.
    ///
    /// Core-group resources live under `/api`, everything else under
    /// `/apis/{group}`. The namespace segment is inserted when given and is
    /// simply omitted for cluster-scoped access.
    pub fn url_path(&self, namespace: Option<&str>) -> String {
        let ns = match namespace {
            Some(ns) => format!("namespaces/{ns}/"),
            None => String::new(),
        };
        let prefix = if self.group.is_empty() { "api" } else { "apis" };
        format!(
            "/{prefix}/{api_version}/{ns}{plural}",
            api_version = self.api_version(),
            plural = self.plural
        )
    }
}

impl PartialEq for ResourceIdentity {
    fn eq(&self, other: &Self) -> bool {
        self.group == other.group && self.version == other.version && self.kind == other.kind
    }
}

impl Hash for ResourceIdentity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.group.hash(state);
        self.version.hash(state);
        self.kind.hash(state);
    }
}

impl fmt::Display for ResourceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.group.is_empty() {
            write!(f, "{}/{}", self.kind, self.version)
        } else {
            write!(f, "{}.{}/{}", self.kind, self.group, self.version)
        }
    }
}
