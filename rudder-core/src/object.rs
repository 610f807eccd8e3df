//! Generic object envelope and list wrappers.
use crate::{
    identity::ResourceIdentity,
    metadata::{ListMeta, ObjectMeta, TypeMeta},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Accessor trait for anything carrying [`ObjectMeta`].
///
/// The operation layer uses this to read names and change cursors off
/// arbitrary payload types without knowing their shape.
pub trait ResourceObject {
    /// Metadata that all persisted objects have.
    fn metadata(&self) -> &ObjectMeta;
    /// Mutable metadata access.
    fn metadata_mut(&mut self) -> &mut ObjectMeta;
}

/// Convenience accessors for [`ResourceObject`] implementors.
pub trait ResourceObjectExt: ResourceObject {
    /// The object name, or an empty string when unset locally.
    fn name_any(&self) -> String;
    /// The namespace the object is in.
    fn namespace(&self) -> Option<String>;
    /// The opaque change cursor.
    fn resource_version(&self) -> Option<String>;
    /// Server-assigned unique id.
    fn uid(&self) -> Option<String>;
    /// Server-assigned creation time.
    fn creation_timestamp(&self) -> Option<DateTime<Utc>>;
    /// Object labels.
    fn labels(&self) -> &BTreeMap<String, String>;
    /// Mutable label access.
    fn labels_mut(&mut self) -> &mut BTreeMap<String, String>;
    /// Object annotations.
    fn annotations(&self) -> &BTreeMap<String, String>;
    /// Mutable annotation access.
    fn annotations_mut(&mut self) -> &mut BTreeMap<String, String>;
}

impl<K: ResourceObject> ResourceObjectExt for K {
    fn name_any(&self) -> String {
        self.metadata().name.clone().unwrap_or_default()
    }

    fn namespace(&self) -> Option<String> {
        self.metadata().namespace.clone()
    }

    fn resource_version(&self) -> Option<String> {
        self.metadata().resource_version.clone()
    }

    fn uid(&self) -> Option<String> {
        self.metadata().uid.clone()
    }

    fn creation_timestamp(&self) -> Option<DateTime<Utc>> {
        self.metadata().creation_timestamp
    }

    fn labels(&self) -> &BTreeMap<String, String> {
        &self.metadata().labels
    }

    fn labels_mut(&mut self) -> &mut BTreeMap<String, String> {
        &mut self.metadata_mut().labels
    }

    fn annotations(&self) -> &BTreeMap<String, String> {
        &self.metadata().annotations
    }

    fn annotations_mut(&mut self) -> &mut BTreeMap<String, String> {
        &mut self.metadata_mut().annotations
    }
}

/// A standard object envelope with `.spec` and optional `.status`.
///
/// Merges the fixed envelope fields (type meta, metadata) with a
/// caller-supplied payload: the spec nests under `spec`, the status under
/// `status`. A document without `spec` fails to decode; a document without
/// `status` decodes to `None` (the facet has never been written). Unknown
/// top-level fields are ignored.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Envelope<S, T> {
    /// The type fields, not always present on server responses.
    #[serde(flatten, default)]
    pub types: Option<TypeMeta>,

    /// Object metadata.
    #[serde(default)]
    pub metadata: ObjectMeta,

    /// Desired state as written by the client.
    pub spec: S,

    /// Observed state as published by the server, present only once the
    /// status facet has been written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<T>,
}

impl<S, T> Envelope<S, T> {
    /// Construct a named envelope for `identity` around a spec.
    ///
    /// Server-owned metadata (uid, resourceVersion, creationTimestamp) is
    /// left unset; the server fills it on the first create.
    pub fn new(name: &str, identity: &ResourceIdentity, spec: S) -> Self {
        Self {
            types: Some(TypeMeta::from(identity)),
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                ..Default::default()
            },
            spec,
            status: None,
        }
    }

    /// Attach a namespace.
    #[must_use]
    pub fn within(mut self, ns: &str) -> Self {
        self.metadata.namespace = Some(ns.to_string());
        self
    }
}

impl<S, T> ResourceObject for Envelope<S, T> {
    fn metadata(&self) -> &ObjectMeta {
        &self.metadata
    }

    fn metadata_mut(&mut self) -> &mut ObjectMeta {
        &mut self.metadata
    }
}

/// Empty struct for when a status payload is not used.
///
/// Not `()` because serde's unit deserialization is too strict for an
/// omitted-or-empty JSON object.
#[derive(Clone, Deserialize, Serialize, Default, Debug, PartialEq, Eq)]
pub struct NotUsed {}

/// A generic object list as returned by list calls.
///
/// The list-level `metadata.resourceVersion` is the cursor corresponding to
/// "all changes after this snapshot" and is the natural starting point for
/// a watch.
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct ObjectList<T> {
    /// The type fields of the list itself.
    #[serde(flatten, default)]
    pub types: Option<TypeMeta>,

    /// List metadata, mainly its `resourceVersion`.
    #[serde(default)]
    pub metadata: ListMeta,

    /// The decoded items.
    #[serde(bound(deserialize = "Vec<T>: Deserialize<'de>"))]
    pub items: Vec<T>,
}

impl<T> ObjectList<T> {
    /// Iterate over the items.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    /// Iterate mutably over the items.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.items.iter_mut()
    }
}

impl<T> IntoIterator for ObjectList<T> {
    type IntoIter = std::vec::IntoIter<Self::Item>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a ObjectList<T> {
    type IntoIter = std::slice::Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
