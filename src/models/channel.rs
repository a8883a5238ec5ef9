use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Recommendation;

/// Inbound `type` tag that replaces a session's preferences
pub const UPDATE_PREFERENCES: &str = "updatePreferences";

/// A decoded client frame on the preference channel
#[derive(Debug, Clone, PartialEq)]
pub enum InboundMessage {
    /// Replace the session's preferences wholesale
    UpdatePreferences(Vec<String>),
    /// Any other `type` tag, or none at all
    Unrecognized(Option<String>),
}

#[derive(Debug, Deserialize)]
struct PreferenceUpdate {
    #[serde(default)]
    preferences: Option<Vec<String>>,
}

impl InboundMessage {
    /// Decodes a JSON frame
    ///
    /// Fails only when the frame is not JSON or an `updatePreferences` frame
    /// carries something other than a list of strings. A missing or null
    /// preference list decodes as empty.
    pub fn parse(payload: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(payload)?;

        match value.get("type").and_then(Value::as_str) {
            Some(UPDATE_PREFERENCES) => {
                let update: PreferenceUpdate = serde_json::from_value(value)?;
                Ok(Self::UpdatePreferences(update.preferences.unwrap_or_default()))
            }
            other => Ok(Self::Unrecognized(other.map(str::to_string))),
        }
    }
}

/// A server push on the preference channel
///
/// Serialized as `{"type": "...", "data": ...}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum OutboundMessage {
    Recommendations(Vec<Recommendation>),
}
