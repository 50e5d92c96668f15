use super::catalog::{PartMaterialMeta, PartsCatalog};
use super::scene::{NodeId, SceneGraph};
use crate::constants::{DEBUG_MATERIAL_GUESS, DEFAULT_MATERIAL_KEY, PCF_HEATMAP_STOPS};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Which carbon-footprint figure, if any, tints the parts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PcfOverlayMode {
    #[default]
    None,
    Total,
    Material,
    Manufacturing,
    Transport,
}

impl PcfOverlayMode {
    pub const ACTIVE: [PcfOverlayMode; 4] = [
        PcfOverlayMode::Total,
        PcfOverlayMode::Material,
        PcfOverlayMode::Manufacturing,
        PcfOverlayMode::Transport,
    ];

    /// Figure for this mode. Missing breakdown entries count as zero.
    pub fn value(self, meta: &PartMaterialMeta) -> Option<f32> {
        let pcf = meta.pcf.as_ref()?;
        let breakdown = pcf.breakdown.as_ref();
        match self {
            PcfOverlayMode::None => None,
            PcfOverlayMode::Total => pcf.total(),
            PcfOverlayMode::Material => Some(breakdown?.material.unwrap_or(0.0)),
            PcfOverlayMode::Manufacturing => Some(breakdown?.manufacturing.unwrap_or(0.0)),
            PcfOverlayMode::Transport => Some(breakdown?.transport.unwrap_or(0.0)),
        }
    }
}

/// Linear RGB triple in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Rgb(pub [f32; 3]);

impl Rgb {
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Rgb {
        Rgb([r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0])
    }

    /// Parses `#rrggbb` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Option<Rgb> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .ok()
                .map(|value| value as f32 / 255.0)
        };
        Some(Rgb([channel(0..2)?, channel(2..4)?, channel(4..6)?]))
    }

    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        let [r, g, b] = self.0;
        let [r2, g2, b2] = other.0;
        Rgb([r + (r2 - r) * t, g + (g2 - g) * t, b + (b2 - b) * t])
    }

    pub fn to_hex(self) -> String {
        let [r, g, b] = self.0.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

/// Heatmap colour for a value in `[0, 1]`; out-of-range values are clamped.
pub fn heatmap_color(t: f32) -> Rgb {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let stops = PCF_HEATMAP_STOPS.map(|(at, hex)| (at, Rgb::from_hex(hex).unwrap_or(Rgb([0.0; 3]))));
    for pair in stops.windows(2) {
        let (start, from) = pair[0];
        let (end, to) = pair[1];
        if t <= end {
            let span = end - start;
            let local = if span > 0.0 { (t - start) / span } else { 0.0 };
            return from.lerp(to, local);
        }
    }
    stops[stops.len() - 1].1
}

/// Largest figure per overlay mode across a catalog.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PcfMaxima(HashMap<PcfOverlayMode, f32>);

impl PcfMaxima {
    pub fn from_parts(parts: &[PartMaterialMeta]) -> Self {
        let mut maxima = HashMap::new();
        for mode in PcfOverlayMode::ACTIVE {
            let max = parts
                .iter()
                .filter_map(|meta| mode.value(meta))
                .fold(0.0_f32, f32::max);
            maxima.insert(mode, max);
        }
        Self(maxima)
    }

    pub fn get(&self, mode: PcfOverlayMode) -> f32 {
        self.0.get(&mode).copied().unwrap_or(0.0)
    }

    /// `value / max` clamped to `[0, 1]`; zero when the max is not positive.
    pub fn normalize(&self, mode: PcfOverlayMode, value: f32) -> f32 {
        let max = self.get(mode);
        if max > 0.0 { (value / max).clamp(0.0, 1.0) } else { 0.0 }
    }
}

/// Surface parameters handed to the renderer.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialSpec {
    pub color: Rgb,
    pub metalness: f32,
    pub roughness: f32,
    pub env_map_intensity: f32,
    pub emissive: Option<Rgb>,
    pub emissive_intensity: f32,
}

impl MaterialSpec {
    fn plain(color: Rgb, metalness: f32, roughness: f32) -> Self {
        Self {
            color,
            metalness,
            roughness,
            env_map_intensity: 1.0,
            emissive: None,
            emissive_intensity: 0.0,
        }
    }

    pub fn steel_default() -> Self {
        Self::plain(Rgb::from_rgb8(0x65, 0x6d, 0x76), 0.75, 0.5)
    }

    pub fn debug_highlight() -> Self {
        let red = Rgb::from_rgb8(0xff, 0x2b, 0x2b);
        Self {
            emissive: Some(red),
            emissive_intensity: 1.1,
            ..Self::plain(red, 0.15, 0.35)
        }
    }

    pub fn heatmap(color: Rgb) -> Self {
        Self {
            emissive: Some(color),
            emissive_intensity: 0.25,
            ..Self::plain(color, 0.1, 0.6)
        }
    }
}

/// Named materials from a catalog, plus the built-in default.
#[derive(Clone, Debug)]
pub struct MaterialLibrary {
    materials: HashMap<String, MaterialSpec>,
}

impl Default for MaterialLibrary {
    fn default() -> Self {
        let mut materials = HashMap::new();
        materials.insert(DEFAULT_MATERIAL_KEY.to_string(), MaterialSpec::steel_default());
        Self { materials }
    }
}

impl MaterialLibrary {
    /// Catalog definitions with unparseable colours are skipped.
    pub fn from_catalog(catalog: &PartsCatalog) -> Self {
        let mut library = Self::default();
        for (name, definition) in catalog.materials() {
            let Some(color) = Rgb::from_hex(&definition.color) else {
                warn!("material '{}' has invalid colour '{}', skipping", name, definition.color);
                continue;
            };
            library.materials.insert(
                name.clone(),
                MaterialSpec {
                    env_map_intensity: definition.env_map_intensity,
                    ..MaterialSpec::plain(color, definition.metalness, definition.roughness)
                },
            );
        }
        library
    }

    pub fn get(&self, name: &str) -> Option<&MaterialSpec> {
        self.materials.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.materials.contains_key(name)
    }

    pub fn spec(&self, choice: &MaterialChoice) -> MaterialSpec {
        match choice {
            MaterialChoice::Debug => MaterialSpec::debug_highlight(),
            MaterialChoice::Heatmap(color) => MaterialSpec::heatmap(*color),
            MaterialChoice::Named(name) => self
                .get(name)
                .cloned()
                .unwrap_or_else(MaterialSpec::steel_default),
            MaterialChoice::Default => MaterialSpec::steel_default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum MaterialChoice {
    Debug,
    Heatmap(Rgb),
    Named(String),
    Default,
}

/// Inputs to material resolution besides the part itself.
#[derive(Clone, Debug)]
pub struct MaterialOptions<'a> {
    pub debug: bool,
    /// Only parts with this `material_guess` get the debug highlight; `None`
    /// highlights everything.
    pub debug_target: Option<&'a str>,
    pub overlay: PcfOverlayMode,
    pub maxima: &'a PcfMaxima,
}

impl<'a> MaterialOptions<'a> {
    pub fn new(maxima: &'a PcfMaxima) -> Self {
        Self {
            debug: false,
            debug_target: Some(DEBUG_MATERIAL_GUESS),
            overlay: PcfOverlayMode::None,
            maxima,
        }
    }
}

/// Picks a material: debug highlight, then PCF heatmap, then the catalog
/// material named by the part's guess, then the default.
pub fn resolve_material(
    library: &MaterialLibrary,
    meta: Option<&PartMaterialMeta>,
    options: &MaterialOptions<'_>,
) -> MaterialChoice {
    let guess = meta.and_then(|meta| meta.material_guess.as_deref());

    if options.debug {
        let targeted = match options.debug_target {
            None => true,
            Some(target) => guess == Some(target),
        };
        if targeted {
            return MaterialChoice::Debug;
        }
    }

    if options.overlay != PcfOverlayMode::None {
        let has_breakdown = meta
            .and_then(|meta| meta.pcf.as_ref())
            .is_some_and(|pcf| pcf.breakdown.is_some());
        if let (true, Some(value)) = (has_breakdown, meta.and_then(|m| options.overlay.value(m))) {
            let t = options.maxima.normalize(options.overlay, value);
            return MaterialChoice::Heatmap(heatmap_color(t));
        }
    }

    match guess {
        Some(name) if library.contains(name) => MaterialChoice::Named(name.to_string()),
        _ => MaterialChoice::Default,
    }
}

/// Material choice for every mesh in a scene.
#[derive(Clone, Debug, Default)]
pub struct MaterialAssignment {
    pub choices: Vec<(NodeId, MaterialChoice)>,
    /// Mesh names that matched no catalog entry.
    pub unmatched: BTreeSet<String>,
}

pub fn assign_materials(
    graph: &SceneGraph,
    catalog: &PartsCatalog,
    library: &MaterialLibrary,
    options: &MaterialOptions<'_>,
) -> MaterialAssignment {
    let mut assignment = MaterialAssignment::default();
    for id in graph.meshes() {
        let name = graph.node(id).trimmed_name();
        let meta = catalog.lookup(name);
        if meta.is_none() && !name.is_empty() {
            assignment.unmatched.insert(name.to_string());
        }
        assignment
            .choices
            .push((id, resolve_material(library, meta, options)));
    }
    assignment
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembly::catalog::{Pcf, PcfBreakdown};
    use crate::assembly::scene::{NodeKind, Transform};

    fn bolt() -> PartMaterialMeta {
        PartMaterialMeta {
            key: "bolt".into(),
            name: "Bolt".into(),
            material_guess: Some(DEBUG_MATERIAL_GUESS.into()),
            pcf: Some(Pcf {
                kgco2e_est: None,
                breakdown: Some(PcfBreakdown {
                    material: Some(2.0),
                    manufacturing: Some(1.0),
                    transport: None,
                }),
            }),
            ..Default::default()
        }
    }

    fn housing() -> PartMaterialMeta {
        PartMaterialMeta {
            key: "housing".into(),
            name: "Housing".into(),
            material_guess: Some("aluminium".into()),
            pcf: Some(Pcf {
                kgco2e_est: Some(12.0),
                breakdown: Some(PcfBreakdown {
                    material: Some(8.0),
                    manufacturing: Some(3.0),
                    transport: Some(1.0),
                }),
            }),
            ..Default::default()
        }
    }

    fn library() -> MaterialLibrary {
        let json = r##"{"materials": {
            "aluminium": {"color": "#b8bcc2", "metalness": 0.6, "roughness": 0.55},
            "broken": {"color": "chartreuse", "metalness": 0.1, "roughness": 0.9}
        }}"##;
        MaterialLibrary::from_catalog(&PartsCatalog::from_json(json).unwrap())
    }

    #[test]
    fn parses_hex_colours() {
        assert_eq!(Rgb::from_hex("#ff0000"), Some(Rgb([1.0, 0.0, 0.0])));
        assert_eq!(Rgb::from_hex("00ff00"), Some(Rgb([0.0, 1.0, 0.0])));
        assert_eq!(Rgb::from_hex("#ff00"), None);
        assert_eq!(Rgb::from_hex("#gg0000"), None);
        assert_eq!(Rgb::from_hex("#656d76").unwrap().to_hex(), "#656d76");
    }

    #[test]
    fn heatmap_hits_end_stops() {
        assert_eq!(heatmap_color(0.0).to_hex(), "#2563eb");
        assert_eq!(heatmap_color(0.45).to_hex(), "#22c55e");
        assert_eq!(heatmap_color(1.0).to_hex(), "#ef4444");
        assert_eq!(heatmap_color(5.0).to_hex(), "#ef4444");
        assert_eq!(heatmap_color(-1.0).to_hex(), "#2563eb");
    }

    #[test]
    fn maxima_cover_every_mode() {
        let maxima = PcfMaxima::from_parts(&[bolt(), housing()]);
        assert_eq!(maxima.get(PcfOverlayMode::Total), 12.0);
        assert_eq!(maxima.get(PcfOverlayMode::Material), 8.0);
        assert_eq!(maxima.get(PcfOverlayMode::Transport), 1.0);
        assert_eq!(maxima.normalize(PcfOverlayMode::Material, 2.0), 0.25);
        assert_eq!(PcfMaxima::default().normalize(PcfOverlayMode::Total, 3.0), 0.0);
    }

    #[test]
    fn debug_highlight_glows_red() {
        let spec = MaterialSpec::debug_highlight();
        assert_eq!(spec.color.to_hex(), "#ff2b2b");
        assert_eq!(spec.emissive, Some(spec.color));
        assert_eq!(spec.emissive_intensity, 1.1);
    }

    #[test]
    fn library_skips_bad_colours() {
        let library = library();
        assert!(library.contains("aluminium"));
        assert!(library.contains(DEFAULT_MATERIAL_KEY));
        assert!(!library.contains("broken"));
    }

    #[test]
    fn resolution_priority() {
        let library = library();
        let parts = [bolt(), housing()];
        let maxima = PcfMaxima::from_parts(&parts);
        let mut options = MaterialOptions::new(&maxima);

        assert_eq!(
            resolve_material(&library, Some(&parts[1]), &options),
            MaterialChoice::Named("aluminium".into())
        );
        // Guess names a material the library lacks.
        assert_eq!(
            resolve_material(&library, Some(&parts[0]), &options),
            MaterialChoice::Default
        );
        assert_eq!(resolve_material(&library, None, &options), MaterialChoice::Default);

        options.overlay = PcfOverlayMode::Total;
        assert_eq!(
            resolve_material(&library, Some(&parts[1]), &options),
            MaterialChoice::Heatmap(heatmap_color(1.0))
        );

        options.debug = true;
        assert_eq!(
            resolve_material(&library, Some(&parts[0]), &options),
            MaterialChoice::Debug
        );
        assert_eq!(
            resolve_material(&library, Some(&parts[1]), &options),
            MaterialChoice::Heatmap(heatmap_color(1.0))
        );

        options.debug_target = None;
        assert_eq!(
            resolve_material(&library, Some(&parts[1]), &options),
            MaterialChoice::Debug
        );
    }

    #[test]
    fn overlay_needs_a_breakdown() {
        let library = library();
        let mut estimate_only = housing();
        estimate_only.pcf = Some(Pcf {
            kgco2e_est: Some(5.0),
            breakdown: None,
        });
        let maxima = PcfMaxima::from_parts(std::slice::from_ref(&estimate_only));
        let options = MaterialOptions {
            overlay: PcfOverlayMode::Total,
            ..MaterialOptions::new(&maxima)
        };
        assert_eq!(
            resolve_material(&library, Some(&estimate_only), &options),
            MaterialChoice::Named("aluminium".into())
        );
    }

    #[test]
    fn assignment_collects_unmatched_names() {
        let catalog = PartsCatalog::new(Default::default(), vec![housing()]);
        let library = MaterialLibrary::from_catalog(&catalog);
        let maxima = PcfMaxima::from_parts(catalog.parts());
        let options = MaterialOptions::new(&maxima);

        let mut graph = SceneGraph::new("Motor", NodeKind::Scene);
        let root = graph.root();
        graph.add(root, "Housing", NodeKind::Mesh { bounds: None }, Transform::IDENTITY);
        graph.add(root, "Mystery_2", NodeKind::Mesh { bounds: None }, Transform::IDENTITY);
        graph.add(root, "Mystery_1", NodeKind::Mesh { bounds: None }, Transform::IDENTITY);

        let assignment = assign_materials(&graph, &catalog, &library, &options);
        assert_eq!(assignment.choices.len(), 3);
        assert_eq!(
            assignment.unmatched.into_iter().collect::<Vec<_>>(),
            ["Mystery_1", "Mystery_2"]
        );
    }
}
