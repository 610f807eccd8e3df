//! Typed operations for resource types with a bound identity.

mod core_methods;
mod subresource;
mod watch;
pub use watch::{WatchCanceller, WatchStream};

// Re-exports from rudder-core
pub use rudder_core::{
    identity::{ResourceIdentity, ScalePaths, Scope, Subresources},
    metadata::{ListMeta, ObjectMeta, TypeMeta},
    object::{Envelope, NotUsed, ObjectList, ResourceObject, ResourceObjectExt},
    params::{ListParams, WatchParams},
    request::Request,
    selector::{Expression, Selector},
    subresource::{Scale, ScaleSpec, ScaleStatus},
    watch::WatchEvent,
};

use crate::{Client, Error, Result};

/// The generic Api abstraction.
///
/// Binds a type `K`, its [`ResourceIdentity`] and an optional namespace to
/// a [`Client`], so the operations get automatic url derivation and
/// serialization. Identities come from the process-wide registry
/// ([`all`](Api::all)/[`namespaced`](Api::namespaced)) or are passed
/// explicitly ([`all_with`](Api::all_with)/
/// [`namespaced_with`](Api::namespaced_with)).
#[derive(Clone)]
pub struct Api<K> {
    request: Request,
    client: Client,
    identity: ResourceIdentity,
    namespace: Option<String>,
    // `iter::Empty` over `PhantomData`: we never hold any `K` objects, and
    // `Empty<K>` stays `Send` even when `K` is not.
    _phantom: std::iter::Empty<K>,
}

impl<K> std::fmt::Debug for Api<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Api")
            .field("identity", &self.identity)
            .field("namespace", &self.namespace)
            .finish_non_exhaustive()
    }
}

/// Constructors resolving the identity from the registry.
impl<K: 'static> Api<K> {
    /// Cluster-level access, or a namespaced resource across all namespaces.
    ///
    /// Fails fast with [`Error::MissingBinding`] when `K` was never
    /// registered.
    pub fn all(client: Client) -> Result<Self> {
        let identity = rudder_core::registry::resolve::<K>()?;
        Ok(Self::all_with(client, &identity))
    }

    /// Access to a namespaced resource within `ns`.
    ///
    /// Fails fast when `K` was never registered or is cluster-scoped.
    pub fn namespaced(client: Client, ns: &str) -> Result<Self> {
        let identity = rudder_core::registry::resolve::<K>()?;
        Self::namespaced_with(client, ns, &identity)
    }
}

/// Constructors taking an explicit identity.
impl<K> Api<K> {
    /// Cluster-level access with an explicit identity.
    pub fn all_with(client: Client, identity: &ResourceIdentity) -> Self {
        Self {
            request: Request::new(identity.url_path(None)),
            client,
            identity: identity.clone(),
            namespace: None,
            _phantom: std::iter::empty(),
        }
    }

    /// Namespaced access with an explicit identity.
    pub fn namespaced_with(client: Client, ns: &str, identity: &ResourceIdentity) -> Result<Self> {
        if identity.scope == Scope::Cluster {
            return Err(Error::BuildRequest(rudder_core::Error::Validation(format!(
                "cluster-scoped resource {identity} cannot be accessed within namespace {ns}"
            ))));
        }
        Ok(Self {
            request: Request::new(identity.url_path(Some(ns))),
            client,
            identity: identity.clone(),
            namespace: Some(ns.to_string()),
            _phantom: std::iter::empty(),
        })
    }

    /// The identity this handle operates with.
    pub fn identity(&self) -> &ResourceIdentity {
        &self.identity
    }

    /// The namespace this handle is bound to, if any.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// The current resource collection url path.
    pub fn resource_url(&self) -> &str {
        &self.request.url_path
    }
}
