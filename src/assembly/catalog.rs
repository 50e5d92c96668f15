use super::naming::{normalize_match_key, normalize_match_key_loose, normalize_part_name};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid catalog json: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PcfBreakdown {
    pub material: Option<f32>,
    pub manufacturing: Option<f32>,
    pub transport: Option<f32>,
}

impl PcfBreakdown {
    pub fn sum(&self) -> f32 {
        self.material.unwrap_or(0.0)
            + self.manufacturing.unwrap_or(0.0)
            + self.transport.unwrap_or(0.0)
    }
}

/// Product carbon footprint estimate, kg CO2e.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Pcf {
    pub kgco2e_est: Option<f32>,
    pub breakdown: Option<PcfBreakdown>,
}

impl Pcf {
    /// The stated estimate, or the sum of the breakdown when none is given.
    pub fn total(&self) -> Option<f32> {
        self.kgco2e_est
            .or_else(|| self.breakdown.as_ref().map(PcfBreakdown::sum))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PartMaterialMeta {
    pub id: Option<String>,
    pub key: String,
    pub name: String,
    pub material_guess: Option<String>,
    pub pcf: Option<Pcf>,
}

fn default_env_map_intensity() -> f32 {
    1.0
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialDefinition {
    pub color: String,
    pub metalness: f32,
    pub roughness: f32,
    #[serde(default = "default_env_map_intensity")]
    pub env_map_intensity: f32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CatalogFile {
    materials: BTreeMap<String, MaterialDefinition>,
    parts: Vec<PartMaterialMeta>,
}

/// Part metadata plus the lookup index over its names.
#[derive(Clone, Debug, Default)]
pub struct PartsCatalog {
    materials: BTreeMap<String, MaterialDefinition>,
    parts: Vec<PartMaterialMeta>,
    /// Raw, normalized, strict and loose forms, in that order. A looser form
    /// never shadows a stricter one.
    index: [HashMap<String, usize>; 4],
}

fn name_forms(source: &str) -> [String; 4] {
    [
        source.to_lowercase(),
        normalize_part_name(source).to_lowercase(),
        normalize_match_key(source),
        normalize_match_key_loose(source),
    ]
}

impl PartsCatalog {
    pub fn new(
        materials: BTreeMap<String, MaterialDefinition>,
        parts: Vec<PartMaterialMeta>,
    ) -> Self {
        let mut index: [HashMap<String, usize>; 4] = Default::default();
        for (position, part) in parts.iter().enumerate() {
            for source in [&part.key, &part.name] {
                for (tier, form) in index.iter_mut().zip(name_forms(source)) {
                    if !form.is_empty() {
                        tier.insert(form, position);
                    }
                }
            }
        }
        Self {
            materials,
            parts,
            index,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Ok(Self::new(file.materials, file.parts))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn materials(&self) -> &BTreeMap<String, MaterialDefinition> {
        &self.materials
    }

    pub fn parts(&self) -> &[PartMaterialMeta] {
        &self.parts
    }

    /// Finds the metadata for a mesh name, trying progressively looser forms:
    /// normalized name, raw name, strict key, loose key. Each form is checked
    /// against the index tiers from strictest to loosest.
    pub fn lookup(&self, raw_name: &str) -> Option<&PartMaterialMeta> {
        let normalized = normalize_part_name(raw_name);
        [
            normalized.to_lowercase(),
            raw_name.to_lowercase(),
            normalize_match_key(raw_name),
            normalize_match_key_loose(raw_name),
        ]
        .iter()
        .filter(|candidate| !candidate.is_empty())
        .find_map(|candidate| self.index.iter().find_map(|tier| tier.get(candidate)))
        .map(|&position| &self.parts[position])
    }
}
