//! Typed CRUD and watch operations against a resource-oriented API server.
//!
//! The transport is injected as a `tower::Service`; everything above it —
//! url derivation, JSON envelope marshalling, subresource gating, watch
//! streaming and error classification — lives here and in [`rudder_core`]
//! (re-exported as [`core`]).

pub mod api;
pub use api::Api;

pub mod client;
pub use client::{Body, Client};

mod error;
pub use error::{ApiError, Error};

pub use rudder_core as core;


/// Convenient alias for `Result` with the crate error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;
