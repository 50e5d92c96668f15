use crate::atom::model::{ModelVariant, VariantConfig, ViewToggle};
use crate::physics::elements::Element;
use log::debug;
use serde::{Deserialize, Serialize};

pub mod assembly;

pub use assembly::{AssemblyStore, AssemblyViewSettings, AssemblyViewUpdate};

/// View flags read by the renderer every frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewSettings {
    pub auto_rotate: bool,
    pub rotate_atom: bool,
    pub freeze_motion: bool,
    pub tilted_orbits: bool,
    pub show_electron_trails: bool,
    pub show_positive_sphere: bool,
    pub cutaway_sphere: bool,
}

impl ViewSettings {
    pub fn get(&self, toggle: ViewToggle) -> bool {
        match toggle {
            ViewToggle::AutoRotate => self.auto_rotate,
            ViewToggle::RotateAtom => self.rotate_atom,
            ViewToggle::FreezeMotion => self.freeze_motion,
            ViewToggle::TiltedOrbits => self.tilted_orbits,
            ViewToggle::ShowElectronTrails => self.show_electron_trails,
            ViewToggle::ShowPositiveSphere => self.show_positive_sphere,
            ViewToggle::CutawaySphere => self.cutaway_sphere,
        }
    }

    fn slot(&mut self, toggle: ViewToggle) -> &mut bool {
        match toggle {
            ViewToggle::AutoRotate => &mut self.auto_rotate,
            ViewToggle::RotateAtom => &mut self.rotate_atom,
            ViewToggle::FreezeMotion => &mut self.freeze_motion,
            ViewToggle::TiltedOrbits => &mut self.tilted_orbits,
            ViewToggle::ShowElectronTrails => &mut self.show_electron_trails,
            ViewToggle::ShowPositiveSphere => &mut self.show_positive_sphere,
            ViewToggle::CutawaySphere => &mut self.cutaway_sphere,
        }
    }
}

/// Partial view change. `None` leaves the current value alone.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ViewUpdate {
    pub auto_rotate: Option<bool>,
    pub rotate_atom: Option<bool>,
    pub freeze_motion: Option<bool>,
    pub tilted_orbits: Option<bool>,
    pub show_electron_trails: Option<bool>,
    pub show_positive_sphere: Option<bool>,
    pub cutaway_sphere: Option<bool>,
}

impl ViewUpdate {
    pub fn set(toggle: ViewToggle, value: bool) -> Self {
        let mut update = Self::default();
        *update.slot(toggle) = Some(value);
        update
    }

    pub fn entries(&self) -> impl Iterator<Item = (ViewToggle, bool)> + '_ {
        [
            (ViewToggle::AutoRotate, self.auto_rotate),
            (ViewToggle::RotateAtom, self.rotate_atom),
            (ViewToggle::FreezeMotion, self.freeze_motion),
            (ViewToggle::TiltedOrbits, self.tilted_orbits),
            (ViewToggle::ShowElectronTrails, self.show_electron_trails),
            (ViewToggle::ShowPositiveSphere, self.show_positive_sphere),
            (ViewToggle::CutawaySphere, self.cutaway_sphere),
        ]
        .into_iter()
        .filter_map(|(toggle, value)| value.map(|value| (toggle, value)))
    }

    fn slot(&mut self, toggle: ViewToggle) -> &mut Option<bool> {
        match toggle {
            ViewToggle::AutoRotate => &mut self.auto_rotate,
            ViewToggle::RotateAtom => &mut self.rotate_atom,
            ViewToggle::FreezeMotion => &mut self.freeze_motion,
            ViewToggle::TiltedOrbits => &mut self.tilted_orbits,
            ViewToggle::ShowElectronTrails => &mut self.show_electron_trails,
            ViewToggle::ShowPositiveSphere => &mut self.show_positive_sphere,
            ViewToggle::CutawaySphere => &mut self.cutaway_sphere,
        }
    }
}

/// Selection and view state of one atom visualizer.
///
/// `revision` bumps only when something actually changed, so callers can
/// skip re-deriving layouts on no-op updates.
#[derive(Clone, Debug)]
pub struct AtomStore {
    config: &'static VariantConfig,
    selected_symbol: &'static str,
    view: ViewSettings,
    revision: u64,
}

impl AtomStore {
    pub fn new(variant: ModelVariant) -> Self {
        let config = variant.config();
        Self {
            config,
            selected_symbol: Element::default_element().symbol,
            view: config.default_view,
            revision: 0,
        }
    }

    pub fn variant(&self) -> ModelVariant {
        self.config.variant
    }

    pub fn config(&self) -> &'static VariantConfig {
        self.config
    }

    pub fn selected_symbol(&self) -> &'static str {
        self.selected_symbol
    }

    pub fn selected_element(&self) -> &'static Element {
        Element::by_symbol(self.selected_symbol).unwrap_or_else(Element::default_element)
    }

    pub fn view(&self) -> &ViewSettings {
        &self.view
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Unknown symbols and re-selecting the current element are no-ops.
    pub fn select_element(&mut self, symbol: &str) {
        let Some(element) = Element::by_symbol(symbol) else {
            debug!("{}: ignoring unknown element '{}'", self.config.variant.name(), symbol);
            return;
        };
        if element.symbol == self.selected_symbol {
            return;
        }
        self.selected_symbol = element.symbol;
        self.revision += 1;
    }

    /// Merges the provided fields; everything else keeps its value.
    pub fn update_view(&mut self, update: ViewUpdate) {
        let mut changed = false;
        for (toggle, value) in update.entries() {
            if !self.config.supports(toggle) {
                debug!(
                    "{}: view has no {:?} toggle, ignoring",
                    self.config.variant.name(),
                    toggle
                );
                continue;
            }
            let slot = self.view.slot(toggle);
            if *slot != value {
                *slot = value;
                changed = true;
            }
        }
        if changed {
            self.revision += 1;
        }
    }

    pub fn reset(&mut self) {
        self.selected_symbol = Element::default_element().symbol;
        self.view = self.config.default_view;
        self.revision += 1;
    }
}
