use crate::assembly::catalog::PartsCatalog;
use crate::assembly::scene::{NodeSpec, SceneGraph};
use crate::assembly::{AssemblyScene, AssemblySummary};
use crate::atom::model::ModelVariant;
use crate::physics::elements::Element;
use crate::renderer::{AtomFrame, Palette};
use crate::simulation::atom::Atom;
use crate::simulation::motion::AtomMotion;
use crate::ui::{AssemblyStore, AssemblyViewUpdate, AtomStore, ViewSettings, ViewUpdate};
use glam::Vec3;
use log::debug;
use serde::Serialize;

pub type AppError = Box<dyn std::error::Error + Send + Sync>;
pub type AppResult<T> = Result<T, AppError>;

/// Store, derived layout and motion of one atom visualizer.
struct AtomSlot {
    store: AtomStore,
    atom: Atom,
    built_revision: u64,
    motion: AtomMotion,
}

impl AtomSlot {
    fn new(variant: ModelVariant) -> Self {
        let store = AtomStore::new(variant);
        let atom = Atom::new(store.selected_element(), variant, store.view().tilted_orbits);
        Self {
            built_revision: store.revision(),
            store,
            atom,
            motion: AtomMotion::default(),
        }
    }

    /// Re-derives the layout only when the store changed since the last build.
    fn sync(&mut self) {
        if self.store.revision() == self.built_revision {
            return;
        }
        let element = self.store.selected_element();
        let tilted = self.store.view().tilted_orbits;
        if element.atomic_number != self.atom.element().atomic_number {
            debug!("{}: rebuilding layout for {}", self.store.variant().name(), element.symbol);
            self.atom = Atom::new(element, self.store.variant(), tilted);
        } else {
            self.atom.set_tilted_orbits(tilted);
        }
        self.built_revision = self.store.revision();
    }
}

/// JSON-friendly snapshot of one visualizer at its current time.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AtomReport<'a> {
    pub model: ModelVariant,
    pub view: &'a ViewSettings,
    pub time: f32,
    pub periodic_position: Vec3,
    pub atom: &'a Atom,
    pub electron_positions: Vec<Vec3>,
}

/// Composition root: owns every store and everything derived from them.
pub struct App {
    slots: Vec<AtomSlot>,
    assembly_store: AssemblyStore,
    assembly: Option<AssemblyScene>,
    assembly_revision: u64,
    palette: Palette,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            slots: ModelVariant::ALL.into_iter().map(AtomSlot::new).collect(),
            assembly_store: AssemblyStore::new(),
            assembly: None,
            assembly_revision: 0,
            palette: Palette::default(),
        }
    }

    fn slot(&self, variant: ModelVariant) -> &AtomSlot {
        &self.slots[Self::slot_index(variant)]
    }

    fn slot_mut(&mut self, variant: ModelVariant) -> &mut AtomSlot {
        &mut self.slots[Self::slot_index(variant)]
    }

    fn slot_index(variant: ModelVariant) -> usize {
        ModelVariant::ALL
            .iter()
            .position(|candidate| *candidate == variant)
            .unwrap_or_default()
    }

    pub fn store(&self, variant: ModelVariant) -> &AtomStore {
        &self.slot(variant).store
    }

    pub fn atom(&self, variant: ModelVariant) -> &Atom {
        &self.slot(variant).atom
    }

    pub fn motion(&self, variant: ModelVariant) -> &AtomMotion {
        &self.slot(variant).motion
    }

    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    pub fn select_element(&mut self, variant: ModelVariant, symbol: &str) {
        let slot = self.slot_mut(variant);
        slot.store.select_element(symbol);
        slot.sync();
    }

    pub fn update_view(&mut self, variant: ModelVariant, update: ViewUpdate) {
        let slot = self.slot_mut(variant);
        slot.store.update_view(update);
        slot.sync();
    }

    /// Back to Hydrogen and the variant's default view; motion restarts.
    pub fn reset(&mut self, variant: ModelVariant) {
        let slot = self.slot_mut(variant);
        slot.store.reset();
        slot.motion.reset();
        slot.sync();
    }

    /// Advances every visualizer by `delta` seconds.
    pub fn tick(&mut self, delta: f32) {
        for slot in &mut self.slots {
            let spin = slot.store.config().spin;
            slot.motion.advance(delta, slot.store.view(), spin);
        }
    }

    pub fn frame(&self, variant: ModelVariant) -> AtomFrame {
        let slot = self.slot(variant);
        AtomFrame::build(&slot.atom, slot.store.view(), &slot.motion, &self.palette)
    }

    pub fn report(&self, variant: ModelVariant) -> AtomReport<'_> {
        let slot = self.slot(variant);
        AtomReport {
            model: variant,
            view: slot.store.view(),
            time: slot.motion.time(),
            periodic_position: slot.atom.element().periodic_position(),
            atom: &slot.atom,
            electron_positions: slot.atom.electron_positions(slot.motion.time()),
        }
    }

    pub fn elements(&self) -> &'static [Element] {
        Element::all()
    }

    pub fn assembly_store(&self) -> &AssemblyStore {
        &self.assembly_store
    }

    pub fn assembly(&self) -> Option<&AssemblyScene> {
        self.assembly.as_ref()
    }

    pub fn load_assembly(&mut self, graph: &SceneGraph, catalog: PartsCatalog) -> AssemblySummary {
        let scene = AssemblyScene::new(graph, catalog, self.assembly_store.view());
        let summary = scene.summary();
        self.assembly = Some(scene);
        self.assembly_revision = self.assembly_store.revision();
        summary
    }

    pub fn load_assembly_json(&mut self, scene_json: &str, catalog_json: &str) -> AppResult<AssemblySummary> {
        let spec: NodeSpec = serde_json::from_str(scene_json)?;
        let catalog = PartsCatalog::from_json(catalog_json)?;
        Ok(self.load_assembly(&SceneGraph::from_spec(&spec), catalog))
    }

    pub fn update_assembly_view(&mut self, update: AssemblyViewUpdate) {
        self.assembly_store.update_view(update);
        self.sync_assembly();
    }

    pub fn reset_assembly(&mut self) {
        self.assembly_store.reset();
        self.sync_assembly();
    }

    fn sync_assembly(&mut self) {
        if self.assembly_store.revision() == self.assembly_revision {
            return;
        }
        if let Some(scene) = self.assembly.as_mut() {
            scene.apply_view(self.assembly_store.view());
        }
        self.assembly_revision = self.assembly_store.revision();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembly::materials::{MaterialChoice, PcfOverlayMode};
    use crate::atom::model::ViewToggle;

    const SCENE: &str = r#"{
        "name": "Motor",
        "kind": "scene",
        "children": [
            {"name": "Lamp", "kind": "light"},
            {"name": "Frame", "children": [
                {"name": "Stator", "kind": "mesh", "translation": [-3, 0, 0],
                 "bounds": {"min": [-1, -1, -1], "max": [1, 1, 1]}},
                {"name": "Rotor_2", "kind": "mesh", "translation": [3, 0, 0],
                 "bounds": {"min": [-1, -1, -1], "max": [1, 1, 1]}}
            ]}
        ]
    }"#;

    const CATALOG: &str = r##"{
        "materials": {"copper": {"color": "#b87333", "metalness": 1.0, "roughness": 0.3}},
        "parts": [
            {"key": "stator", "name": "Stator", "material_guess": "copper",
             "pcf": {"kgco2e_est": 9.0, "breakdown": {"material": 6.0, "manufacturing": 2.0, "transport": 1.0}}},
            {"key": "rotor", "name": "Rotor", "material_guess": "steel_fastener_12_9"}
        ]
    }"##;

    #[test]
    fn stores_are_independent_per_variant() {
        let mut app = App::new();
        app.select_element(ModelVariant::Bohr, "Na");
        assert_eq!(app.store(ModelVariant::Bohr).selected_symbol(), "Na");
        assert_eq!(app.atom(ModelVariant::Bohr).element().symbol, "Na");
        assert_eq!(app.store(ModelVariant::Rutherford).selected_symbol(), "H");
        assert_eq!(app.atom(ModelVariant::Rutherford).electron_count(), 1);
    }

    #[test]
    fn tilt_toggle_reorients_without_rebuilding() {
        let mut app = App::new();
        app.select_element(ModelVariant::Bohr, "C");
        let flat = app.atom(ModelVariant::Bohr).electron_positions(2.0);
        let tilted = !app.store(ModelVariant::Bohr).view().tilted_orbits;
        app.update_view(ModelVariant::Bohr, ViewUpdate::set(ViewToggle::TiltedOrbits, tilted));
        assert_eq!(app.atom(ModelVariant::Bohr).tilted_orbits(), tilted);
        assert_ne!(app.atom(ModelVariant::Bohr).electron_positions(2.0), flat);
    }

    #[test]
    fn freeze_stops_the_clock_and_reset_restarts_it() {
        let mut app = App::new();
        app.update_view(ModelVariant::Rutherford, ViewUpdate::set(ViewToggle::FreezeMotion, false));
        app.tick(0.5);
        let time = app.motion(ModelVariant::Rutherford).time();
        assert_eq!(time, 0.5);

        app.update_view(ModelVariant::Rutherford, ViewUpdate::set(ViewToggle::FreezeMotion, true));
        app.tick(1.0);
        assert_eq!(app.motion(ModelVariant::Rutherford).time(), time);

        app.reset(ModelVariant::Rutherford);
        assert_eq!(app.motion(ModelVariant::Rutherford).time(), 0.0);
    }

    #[test]
    fn report_serializes() {
        let mut app = App::new();
        app.select_element(ModelVariant::Thomson, "O");
        let json = serde_json::to_value(app.report(ModelVariant::Thomson)).unwrap();
        assert_eq!(json["model"], "thomson");
        assert_eq!(json["electronPositions"].as_array().unwrap().len(), 8);
        assert_eq!(json["atom"]["electrons"]["kind"], "embedded");
    }

    #[test]
    fn assembly_loads_and_follows_view() {
        let mut app = App::new();
        assert!(app.assembly().is_none());
        let summary = app.load_assembly_json(SCENE, CATALOG).unwrap();
        assert_eq!(summary.mesh_count, 2);
        assert!(summary.unmatched.is_empty());
        assert!(summary.hierarchy.iter().all(|item| item.name != "Lamp"));

        app.update_assembly_view(AssemblyViewUpdate {
            debug_materials: Some(true),
            ..Default::default()
        });
        let choices = &app.assembly().unwrap().materials().choices;
        assert_eq!(choices[0].1, MaterialChoice::Named("copper".into()));
        assert_eq!(choices[1].1, MaterialChoice::Debug);

        app.update_assembly_view(AssemblyViewUpdate {
            debug_materials: Some(false),
            pcf_overlay_mode: Some(PcfOverlayMode::Total),
            ..Default::default()
        });
        let choices = &app.assembly().unwrap().materials().choices;
        assert!(matches!(choices[0].1, MaterialChoice::Heatmap(_)));
        assert_eq!(choices[1].1, MaterialChoice::Default);

        app.reset_assembly();
        assert_eq!(app.assembly_store().view().pcf_overlay_mode, PcfOverlayMode::None);
    }

    #[test]
    fn bad_assembly_input_is_an_error() {
        let mut app = App::new();
        assert!(app.load_assembly_json("not json", "{}").is_err());
        assert!(app.load_assembly_json(SCENE, "{\"parts\": {}}").is_err());
        assert!(app.assembly().is_none());
    }
}
