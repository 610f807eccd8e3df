//! Types for the scale subresource.
use crate::metadata::{ObjectMeta, TypeMeta};
use serde::{Deserialize, Serialize};

/// Desired scale of a resource.
#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq)]
pub struct ScaleSpec {
    /// Desired replica count; `None` leaves the current count untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i32>,
}

/// Observed scale of a resource.
#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq)]
pub struct ScaleStatus {
    /// Observed replica count.
    #[serde(default)]
    pub replicas: i32,
}

/// The scale subresource representation.
///
/// Read and written through the `/scale` sub-path, only for types whose
/// identity enables the scale facet.
#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq)]
pub struct Scale {
    /// The type fields, not always present.
    #[serde(flatten, default)]
    pub types: Option<TypeMeta>,

    /// Metadata; carries the `resourceVersion` needed for replace calls.
    #[serde(default)]
    pub metadata: ObjectMeta,

    /// Desired scale.
    #[serde(default)]
    pub spec: ScaleSpec,

    /// Observed scale, absent until the server has reported one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ScaleStatus>,
}

impl Scale {
    /// A scale document requesting `replicas`.
    pub fn replicas(replicas: i32) -> Self {
        Scale {
            spec: ScaleSpec {
                replicas: Some(replicas),
            },
            ..Default::default()
        }
    }
}
