//! Named user preferences stored as variables.

use crate::core::variables::UNSET;
use crate::{ResourceHandle, ResourceRegistry, Result, VariableStore};
use serde::{Deserialize, Serialize};

pub const PREF_BACKGROUND: &str = "pref_background";
pub const PREF_ICONS: &str = "pref_icons";
pub const PREF_SIZE: &str = "pref_size";
pub const PREF_COLOR_ACTIVE: &str = "pref_color_active";
pub const PREF_COLOR_FINISHED: &str = "pref_color_finished";
pub const PREF_SCROLLBUTTONS: &str = "pref_scroll_buttons";

/// Background and icon set used before the user picks one.
pub const DEFAULT_RESOURCE_ID: i64 = 1;

impl VariableStore<'_> {
    pub fn pref_background(&self) -> Result<i64> {
        self.get_int(PREF_BACKGROUND)
    }

    pub fn set_pref_background(&self, id: i64) -> Result<()> {
        self.set_int(PREF_BACKGROUND, id)
    }

    pub fn pref_icons(&self) -> Result<i64> {
        self.get_int(PREF_ICONS)
    }

    pub fn set_pref_icons(&self, id: i64) -> Result<()> {
        self.set_int(PREF_ICONS, id)
    }

    /// Font size, or [`UNSET`].
    pub fn pref_size(&self) -> Result<i64> {
        self.get_int(PREF_SIZE)
    }

    pub fn set_pref_size(&self, size: i64) -> Result<()> {
        self.set_int(PREF_SIZE, size)
    }

    /// Packed color for active notes; 0 when unset.
    ///
    /// Colors do not use the [`UNSET`] sentinel: -1 is opaque white.
    pub fn pref_color_active(&self) -> Result<i64> {
        self.color(PREF_COLOR_ACTIVE)
    }

    pub fn set_pref_color_active(&self, color: i64) -> Result<()> {
        self.set_int(PREF_COLOR_ACTIVE, color)
    }

    /// Packed color for finished notes; 0 when unset.
    pub fn pref_color_finished(&self) -> Result<i64> {
        self.color(PREF_COLOR_FINISHED)
    }

    pub fn set_pref_color_finished(&self, color: i64) -> Result<()> {
        self.set_int(PREF_COLOR_FINISHED, color)
    }

    /// Whether scroll buttons are shown. Enabled when unset.
    ///
    /// A stored value decodes like [`get_bool`](Self::get_bool): only the
    /// literal `"false"` turns the buttons off.
    pub fn pref_scroll_buttons(&self) -> Result<bool> {
        match self.get(PREF_SCROLLBUTTONS)? {
            None => Ok(true),
            Some(_) => self.get_bool(PREF_SCROLLBUTTONS),
        }
    }

    pub fn set_pref_scroll_buttons(&self, enabled: bool) -> Result<()> {
        self.set_bool(PREF_SCROLLBUTTONS, enabled)
    }

    fn color(&self, name: &str) -> Result<i64> {
        match self.get(name)? {
            None => Ok(0),
            Some(_) => self.get_int(name),
        }
    }
}

/// A snapshot of every user preference, loaded and saved together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub background: i64,
    pub icons: i64,
    /// Font size; `None` lets the caller use its platform default.
    pub size: Option<i64>,
    /// Packed color; 0 means "use the default color".
    pub color_active: i64,
    pub color_finished: i64,
    pub scroll_buttons: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            background: DEFAULT_RESOURCE_ID,
            icons: DEFAULT_RESOURCE_ID,
            size: None,
            color_active: 0,
            color_finished: 0,
            scroll_buttons: true,
        }
    }
}

impl Preferences {
    /// Reads every preference; negative resource ids fall back to [`DEFAULT_RESOURCE_ID`].
    pub fn load(vars: &VariableStore<'_>) -> Result<Self> {
        let size = vars.pref_size()?;
        Ok(Self {
            background: resource_id(vars.pref_background()?),
            icons: resource_id(vars.pref_icons()?),
            size: (size != UNSET).then_some(size),
            color_active: vars.pref_color_active()?,
            color_finished: vars.pref_color_finished()?,
            scroll_buttons: vars.pref_scroll_buttons()?,
        })
    }

    /// Writes every preference in one atomic batch.
    pub fn save(&self, vars: &VariableStore<'_>) -> Result<()> {
        log::debug!(
            "Saving preferences: bg:{} icon:{} active:{} finished:{} size:{:?}",
            self.background,
            self.icons,
            self.color_active,
            self.color_finished,
            self.size
        );
        vars.set_many(&[
            (PREF_BACKGROUND, self.background.to_string()),
            (PREF_ICONS, self.icons.to_string()),
            (PREF_SIZE, self.size.unwrap_or(UNSET).to_string()),
            (PREF_COLOR_ACTIVE, self.color_active.to_string()),
            (PREF_COLOR_FINISHED, self.color_finished.to_string()),
            (PREF_SCROLLBUTTONS, self.scroll_buttons.to_string()),
        ])
    }

    /// Title text is drawn two points larger than note text.
    pub fn title_size(&self) -> Option<i64> {
        self.size.map(|size| size + 2)
    }

    /// The asset for the chosen background, if registered.
    pub fn background_handle<'r>(&self, registry: &'r ResourceRegistry) -> Option<&'r ResourceHandle> {
        registry.background(self.background)
    }

    /// The `(active, finished)` icon pair for the chosen icon set.
    pub fn icon_handles<'r>(
        &self,
        registry: &'r ResourceRegistry,
    ) -> Option<(&'r ResourceHandle, &'r ResourceHandle)> {
        Some((
            registry.active_icon(self.icons)?,
            registry.finished_icon(self.icons)?,
        ))
    }

    pub fn top_padding(&self, registry: &ResourceRegistry) -> u32 {
        registry.top_padding(self.background)
    }
}

fn resource_id(stored: i64) -> i64 {
    if stored < 0 {
        DEFAULT_RESOURCE_ID
    } else {
        stored
    }
}
