//! Core types and client-less behavior for the rudder typed resource
//! protocol.
//!
//! This crate carries everything that does not need a transport: resource
//! identities and their registry, the object envelope and metadata types,
//! the label selector builder, the request (path + query) builder, watch
//! event and status payload types, scale types, and the custom resource
//! definition synthesizer. The transport-facing half lives in
//! `rudder-client`.

pub mod codec;

pub mod crd;

mod error;
pub use error::Error;

pub mod identity;
pub use identity::{ResourceIdentity, ScalePaths, Scope, Subresources};

pub mod metadata;
pub use metadata::{ListMeta, ObjectMeta, OwnerReference, TypeMeta};

pub mod object;
pub use object::{Envelope, NotUsed, ObjectList, ResourceObject, ResourceObjectExt};

pub mod params;
pub use params::{ListParams, WatchParams};

pub mod registry;
pub use registry::{register, resolve, BindingConflict, MissingBinding};

pub mod request;
pub use request::Request;

pub mod response;
pub use response::Status;

pub mod selector;
pub use selector::{Expression, Selector};

pub mod subresource;
pub use subresource::{Scale, ScaleSpec, ScaleStatus};

pub mod watch;
pub use watch::WatchEvent;

/// Convenient alias for `Result` with the crate error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;
