//! Types for the watch api.
use crate::response::Status;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// A raw event returned from a watch query.
///
/// A watch response body is a stream of these, one JSON document per frame.
#[derive(Deserialize, Serialize, Clone, PartialEq)]
#[serde(tag = "type", content = "object", rename_all = "UPPERCASE")]
pub enum WatchEvent<K> {
    /// An object was added.
    Added(K),
    /// An object was modified.
    Modified(K),
    /// An object was deleted.
    Deleted(K),
    /// The server reported a problem with the watch itself, e.g. an expired
    /// cursor. The stream may end after this.
    Error(Status),
}

impl<K> Debug for WatchEvent<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            WatchEvent::Added(_) => write!(f, "Added event"),
            WatchEvent::Modified(_) => write!(f, "Modified event"),
            WatchEvent::Deleted(_) => write!(f, "Deleted event"),
            WatchEvent::Error(e) => write!(f, "Error event: {e:?}"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{identity::ResourceIdentity, object::Envelope};
    use serde::Deserialize;

    #[derive(Deserialize, serde::Serialize, Clone, Debug, PartialEq)]
    struct GadgetSpec {
        speed: i32,
    }
    type Gadget = Envelope<GadgetSpec, crate::object::NotUsed>;

    #[test]
    fn added_frame_decodes() {
        let id = ResourceIdentity::new("examples.dev", "v1", "Gadget", "gadgets");
        let frame = serde_json::json!({
            "type": "ADDED",
            "object": serde_json::to_value(Gadget::new("g1", &id, GadgetSpec { speed: 3 })).unwrap(),
        });
        let event: WatchEvent<Gadget> = serde_json::from_value(frame).unwrap();
        match event {
            WatchEvent::Added(g) => assert_eq!(g.spec.speed, 3),
            other => panic!("wrong event: {other:?}"),
        }
    }

    #[test]
    fn error_frame_carries_status() {
        let frame = r#"{"type":"ERROR","object":{"message":"too old resource version","reason":"Expired","code":410}}"#;
        let event: WatchEvent<Gadget> = serde_json::from_str(frame).unwrap();
        match event {
            WatchEvent::Error(status) => {
                assert_eq!(status.code, Some(410));
                assert_eq!(status.reason, "Expired");
            }
            other => panic!("wrong event: {other:?}"),
        }
    }

    #[test]
    fn unknown_tag_is_a_decode_error() {
        let frame = r#"{"type":"BOOKMARK","object":{}}"#;
        assert!(serde_json::from_str::<WatchEvent<Gadget>>(frame).is_err());
    }
}
