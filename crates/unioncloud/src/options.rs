//! Client options.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Options that change how responses are returned.
///
/// Unknown keys are kept in `extra` and passed through untouched, so an
/// options file written for another client of the service still loads.
///
/// # Example
///
/// ```
/// use unioncloud::ClientOptions;
///
/// let options: ClientOptions =
///     serde_json::from_str(r#"{"include_debug_info": true, "locale": "en"}"#).unwrap();
/// assert!(options.debug_enabled());
/// assert_eq!(options.extra["locale"], "en");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientOptions {
    /// Attach a request trace to every response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_debug_info: Option<bool>,

    /// Pass-through options.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ClientOptions {
    /// Options with debug info enabled.
    pub fn debug() -> Self {
        Self {
            include_debug_info: Some(true),
            ..Self::default()
        }
    }

    /// Returns true if request traces should be attached.
    pub fn debug_enabled(&self) -> bool {
        self.include_debug_info.unwrap_or(false)
    }

    /// Merge `other` into these options; keys set in `other` win.
    pub fn merge(&mut self, other: ClientOptions) {
        if other.include_debug_info.is_some() {
            self.include_debug_info = other.include_debug_info;
        }
        self.extra.extend(other.extra);
    }
}
