//! Key/value payload restored into components at the create boundary.

use rustc_hash::FxHashMap;

/// Opaque state payload a host hands back to its components when it
/// recreates them.
///
/// Delivered to every [`Component::on_create`] by
/// [`dispatch_create`]. The coordinator never reads or writes the payload;
/// what goes in it is a private contract between the host and its
/// components.
///
/// With the `persistence` cargo feature enabled the payload round-trips
/// through JSON, so hosts can stash it wherever they keep instance state.
///
/// [`Component::on_create`]: crate::Component::on_create
/// [`dispatch_create`]: crate::LifecycleCoordinator::dispatch_create
#[derive(Clone, Debug, Default)]
#[cfg_attr(
    feature = "persistence",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct SavedState {
    values: FxHashMap<String, String>,
}

impl SavedState {
    /// Creates an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Returns the value stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Whether the payload holds no entries.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of entries in the payload.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Serializes the payload to a JSON string.
    #[cfg(feature = "persistence")]
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Deserializes a payload previously produced by [`SavedState::to_json`].
    #[cfg(feature = "persistence")]
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
