//! Body encoding helpers for the generic write operations.
//!
//! Generic create/update calls must never carry a `status` key: the status
//! facet is only writable through its own `/status` sub-path. The helpers
//! here centralize that rule so every write path shares it.
use crate::error::Error;
use serde::Serialize;

/// Encode a full JSON document, status included.
///
/// Used by the dedicated status and scale writes.
pub fn to_json_body<K: Serialize>(obj: &K) -> Result<Vec<u8>, Error> {
    crate::error::to_vec(obj)
}

/// Encode a JSON document with any top-level `status` key removed.
///
/// Used by create and update so a generic write can never touch status,
/// regardless of what the in-memory object carries.
pub fn to_json_body_without_status<K: Serialize>(obj: &K) -> Result<Vec<u8>, Error> {
    let mut doc = serde_json::to_value(obj).map_err(Error::Serialize)?;
    if let Some(map) = doc.as_object_mut() {
        map.remove("status");
    }
    crate::error::to_vec(&doc)
}
