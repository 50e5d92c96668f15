pub mod catalog;
pub mod explode;
pub mod grouping;
pub mod materials;
pub mod naming;
pub mod scene;

use catalog::PartsCatalog;
use explode::{ExplodePart, apply_explode, build_explode_parts};
use glam::Quat;
use grouping::{
    AssemblyGroup, HierarchyItem, PartGroup, collect_assembly_groups, collect_hierarchy,
    collect_part_groups,
};
use log::{info, warn};
use materials::{
    MaterialAssignment, MaterialLibrary, MaterialOptions, PcfMaxima, assign_materials,
};
use scene::SceneGraph;
use serde::Serialize;

use crate::ui::AssemblyViewSettings;

/// Strips lights, moves the model so its bounds are centred on the origin and
/// turns it upright about that centre.
pub fn prepare_for_display(graph: &SceneGraph, rotation: Quat) -> SceneGraph {
    let mut prepared = graph.filtered(|node| !node.kind.is_light());
    let center = prepared.world_bounds().center();
    let root = prepared.root();
    let transform = &mut prepared.node_mut(root).transform;
    transform.translation = rotation * (transform.translation - center);
    transform.rotation = rotation * transform.rotation;
    prepared
}

/// Summaries derived once per loaded model.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssemblySummary {
    pub hierarchy: Vec<HierarchyItem>,
    pub assembly_groups: Vec<AssemblyGroup>,
    pub part_groups: Vec<PartGroup>,
    pub mesh_count: usize,
    pub unmatched: Vec<String>,
}

/// A loaded motor model with its catalog, ready to be posed by the view.
#[derive(Clone, Debug)]
pub struct AssemblyScene {
    graph: SceneGraph,
    catalog: PartsCatalog,
    library: MaterialLibrary,
    maxima: PcfMaxima,
    parts: Vec<ExplodePart>,
    hierarchy: Vec<HierarchyItem>,
    assembly_groups: Vec<AssemblyGroup>,
    part_groups: Vec<PartGroup>,
    materials: MaterialAssignment,
    unmatched_reported: bool,
}

impl AssemblyScene {
    pub fn new(graph: &SceneGraph, catalog: PartsCatalog, view: &AssemblyViewSettings) -> Self {
        let graph = prepare_for_display(graph, Quat::from_rotation_z(std::f32::consts::FRAC_PI_2));
        let library = MaterialLibrary::from_catalog(&catalog);
        let maxima = PcfMaxima::from_parts(catalog.parts());
        let parts = build_explode_parts(&graph);
        let hierarchy = collect_hierarchy(&graph);
        let assembly_groups = collect_assembly_groups(&graph);
        let part_groups = collect_part_groups(&graph);
        info!(
            "loaded assembly '{}': {} meshes, {} part groups",
            hierarchy.first().map(|item| item.name.as_str()).unwrap_or_default(),
            parts.len(),
            part_groups.len()
        );

        let mut scene = Self {
            graph,
            catalog,
            library,
            maxima,
            parts,
            hierarchy,
            assembly_groups,
            part_groups,
            materials: MaterialAssignment::default(),
            unmatched_reported: false,
        };
        scene.apply_view(view);
        scene
    }

    /// Re-poses parts and re-resolves materials for a new view state.
    pub fn apply_view(&mut self, view: &AssemblyViewSettings) {
        apply_explode(
            &mut self.graph,
            &self.parts,
            view.explode * crate::constants::EXPLODE_TRAVEL,
        );
        let options = MaterialOptions {
            debug: view.debug_materials,
            overlay: view.pcf_overlay_mode,
            ..MaterialOptions::new(&self.maxima)
        };
        self.materials = assign_materials(&self.graph, &self.catalog, &self.library, &options);
        self.report_unmatched();
    }

    /// Warns about mesh names missing from the catalog, at most once per scene.
    fn report_unmatched(&mut self) -> bool {
        let unmatched = &self.materials.unmatched;
        if self.unmatched_reported || unmatched.is_empty() {
            return false;
        }
        warn!(
            "{} mesh names have no catalog entry: {}",
            unmatched.len(),
            unmatched.iter().cloned().collect::<Vec<_>>().join(", ")
        );
        self.unmatched_reported = true;
        true
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn catalog(&self) -> &PartsCatalog {
        &self.catalog
    }

    pub fn library(&self) -> &MaterialLibrary {
        &self.library
    }

    pub fn explode_parts(&self) -> &[ExplodePart] {
        &self.parts
    }

    pub fn materials(&self) -> &MaterialAssignment {
        &self.materials
    }

    pub fn summary(&self) -> AssemblySummary {
        AssemblySummary {
            hierarchy: self.hierarchy.clone(),
            assembly_groups: self.assembly_groups.clone(),
            part_groups: self.part_groups.clone(),
            mesh_count: self.parts.len(),
            unmatched: self.materials.unmatched.iter().cloned().collect(),
        }
    }
}
