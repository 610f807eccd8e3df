//! Process-wide association from native types to their wire identities.
//!
//! The registry is append-only: a type is bound at most once for the
//! lifetime of the process. Re-registering an equal identity is a no-op so
//! that registration can live in library constructors that run more than
//! once; binding a *different* identity to the same type is a logic error
//! and is reported as an explicit [`BindingConflict`].
use crate::identity::ResourceIdentity;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::{
    any::{type_name, TypeId},
    collections::HashMap,
};
use thiserror::Error;

static BINDINGS: Lazy<RwLock<HashMap<TypeId, ResourceIdentity>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// A type was used with the typed operation layer without being registered.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("no resource identity registered for {type_name}")]
pub struct MissingBinding {
    /// Rust type name of the unbound type.
    pub type_name: &'static str,
}

/// A type was registered twice with disagreeing identities.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{type_name} is already bound to {existing}, refusing rebind to {rejected}")]
pub struct BindingConflict {
    /// Rust type name of the doubly-registered type.
    pub type_name: &'static str,
    /// The identity already on record.
    pub existing: ResourceIdentity,
    /// The identity that was refused.
    pub rejected: ResourceIdentity,
}

/// Bind `K` to its wire identity.
///
/// Idempotent when called again with an equal identity (same
/// group/version/kind); fails fast with [`BindingConflict`] otherwise.
pub fn register<K: 'static>(identity: ResourceIdentity) -> Result<(), BindingConflict> {
    let mut bindings = BINDINGS.write();
    match bindings.get(&TypeId::of::<K>()) {
        Some(existing) if *existing == identity => Ok(()),
        Some(existing) => Err(BindingConflict {
            type_name: type_name::<K>(),
            existing: existing.clone(),
            rejected: identity,
        }),
        None => {
            bindings.insert(TypeId::of::<K>(), identity);
            Ok(())
        }
    }
}

/// Look up the identity previously bound to `K`.
pub fn resolve<K: 'static>() -> Result<ResourceIdentity, MissingBinding> {
    BINDINGS
        .read()
        .get(&TypeId::of::<K>())
        .cloned()
        .ok_or(MissingBinding {
            type_name: type_name::<K>(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Registered;
    struct Rebindable;
    struct NeverRegistered;

    #[test]
    fn resolve_after_register() {
        register::<Registered>(ResourceIdentity::new("examples.dev", "v1", "Reg", "regs")).unwrap();
        let id = resolve::<Registered>().unwrap();
        assert_eq!(id.plural, "regs");
    }

    #[test]
    fn unregistered_type_is_a_missing_binding() {
        let err = resolve::<NeverRegistered>().unwrap_err();
        assert!(err.type_name.contains("NeverRegistered"));
    }

    #[test]
    fn rebind_same_identity_is_idempotent_but_divergence_fails() {
        let id = ResourceIdentity::new("examples.dev", "v1", "Thing", "things");
        register::<Rebindable>(id.clone()).unwrap();
        // gvk-equal identity: fine
        register::<Rebindable>(id.clone().short_names(&["th"])).unwrap();
        // different version: conflict
        let err =
            register::<Rebindable>(ResourceIdentity::new("examples.dev", "v2", "Thing", "things"))
                .unwrap_err();
        assert_eq!(err.existing.version, "v1");
        assert_eq!(err.rejected.version, "v2");
    }
}
