use crate::assembly::materials::PcfOverlayMode;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssemblyViewSettings {
    pub auto_rotate: bool,
    /// Explode slider position in `[0, 1]`.
    pub explode: f32,
    pub debug_materials: bool,
    pub pcf_overlay_mode: PcfOverlayMode,
}

impl Default for AssemblyViewSettings {
    fn default() -> Self {
        Self {
            auto_rotate: true,
            explode: 0.0,
            debug_materials: false,
            pcf_overlay_mode: PcfOverlayMode::None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct AssemblyViewUpdate {
    pub auto_rotate: Option<bool>,
    pub explode: Option<f32>,
    pub debug_materials: Option<bool>,
    pub pcf_overlay_mode: Option<PcfOverlayMode>,
}

/// View state of the motor assembly explorer.
#[derive(Clone, Debug, Default)]
pub struct AssemblyStore {
    view: AssemblyViewSettings,
    revision: u64,
}

impl AssemblyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> &AssemblyViewSettings {
        &self.view
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Merges the provided fields. Explode values are clamped into `[0, 1]`;
    /// a NaN explode is ignored.
    pub fn update_view(&mut self, update: AssemblyViewUpdate) {
        let mut next = self.view;
        if let Some(auto_rotate) = update.auto_rotate {
            next.auto_rotate = auto_rotate;
        }
        if let Some(explode) = update.explode.filter(|value| !value.is_nan()) {
            next.explode = explode.clamp(0.0, 1.0);
        }
        if let Some(debug_materials) = update.debug_materials {
            next.debug_materials = debug_materials;
        }
        if let Some(mode) = update.pcf_overlay_mode {
            next.pcf_overlay_mode = mode;
        }
        if next != self.view {
            self.view = next;
            self.revision += 1;
        }
    }

    pub fn reset(&mut self) {
        self.view = AssemblyViewSettings::default();
        self.revision += 1;
    }
}
