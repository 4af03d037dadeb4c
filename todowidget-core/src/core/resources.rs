//! Static registry of visual resources addressed by small integer ids.
//!
//! Preferences store only the integer id of a background or icon set. The
//! embedding application supplies the mapping from those ids to its own asset
//! handles through [`StoreConfig`](crate::StoreConfig).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Top padding used when a background does not declare one.
pub const DEFAULT_TOP_PADDING: u32 = 1;

/// An opaque reference to an application asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceHandle {
    /// Application-defined asset name or path.
    pub name: String,
    /// Extra top padding the list needs when drawn over this asset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_padding: Option<u32>,
}

impl ResourceHandle {
    /// A handle to `name` with no top padding.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            top_padding: None,
        }
    }

    #[must_use]
    pub fn with_top_padding(mut self, padding: u32) -> Self {
        self.top_padding = Some(padding);
        self
    }
}

/// Backgrounds and paired active/finished icons, keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResourceRegistry {
    backgrounds: BTreeMap<i64, ResourceHandle>,
    active_icons: BTreeMap<i64, ResourceHandle>,
    finished_icons: BTreeMap<i64, ResourceHandle>,
}

impl ResourceRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the background asset shown for `id`.
    pub fn register_background(&mut self, id: i64, handle: ResourceHandle) -> &mut Self {
        self.backgrounds.insert(id, handle);
        self
    }

    /// Registers the icon pair shown for active and finished notes under `id`.
    pub fn register_icons(
        &mut self,
        id: i64,
        active: ResourceHandle,
        finished: ResourceHandle,
    ) -> &mut Self {
        self.active_icons.insert(id, active);
        self.finished_icons.insert(id, finished);
        self
    }

    /// Background asset for `id`.
    pub fn background(&self, id: i64) -> Option<&ResourceHandle> {
        self.backgrounds.get(&id)
    }

    pub fn active_icon(&self, id: i64) -> Option<&ResourceHandle> {
        self.active_icons.get(&id)
    }

    pub fn finished_icon(&self, id: i64) -> Option<&ResourceHandle> {
        self.finished_icons.get(&id)
    }

    /// Registered background ids, ascending.
    pub fn background_ids(&self) -> Vec<i64> {
        self.backgrounds.keys().copied().collect()
    }

    /// Registered icon set ids, ascending.
    pub fn icon_ids(&self) -> Vec<i64> {
        self.active_icons.keys().copied().collect()
    }

    /// Top padding for background `id`, or [`DEFAULT_TOP_PADDING`].
    pub fn top_padding(&self, id: i64) -> u32 {
        self.background(id)
            .and_then(|handle| handle.top_padding)
            .unwrap_or(DEFAULT_TOP_PADDING)
    }
}
