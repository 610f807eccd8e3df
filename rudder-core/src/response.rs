//! Server status payloads attached to failed (and some successful) calls.
use serde::{Deserialize, Serialize};

/// A status object as reported by the server.
///
/// Carried inside typed errors and watch `ERROR` events so callers can
/// branch on `reason`/`code` instead of matching message strings. All
/// fields are optional on the wire; absent fields decode to their empty
/// values.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct Status {
    /// A human-readable description of the outcome.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,

    /// A machine-readable reason clarifying the HTTP code.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub reason: String,

    /// Suggested HTTP return code, when the server supplied one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,

    /// Extended data associated with the reason.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<StatusDetails>,
}

impl Status {
    /// Construct a failure status from a message and reason.
    pub fn failure(message: &str, reason: &str) -> Self {
        Status {
            message: message.to_string(),
            reason: reason.to_string(),
            code: None,
            details: None,
        }
    }

    /// Attach an explicit HTTP status code.
    #[must_use]
    pub fn with_code(mut self, code: u16) -> Self {
        self.code = Some(code);
        self
    }
}

/// Additional properties a status may carry; which are set depends on the
/// reason.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StatusDetails {
    /// Name of the resource the status describes, when there is one.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Group of the resource the status describes.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub group: String,

    /// Kind of the resource the status describes.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kind: String,

    /// Individual causes of the failure, e.g. per-field validation errors.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub causes: Vec<StatusCause>,

    /// Seconds to wait before retrying, when the server suggests one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_after_seconds: Option<u32>,
}

/// One cause within [`StatusDetails`].
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct StatusCause {
    /// Machine-readable cause description.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub reason: String,

    /// Human-readable cause description.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,

    /// The field that caused the error, in JSON serialization naming.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub field: String,
}
