use crate::ui::ViewSettings;
use serde::{Deserialize, Serialize};

/// Historical atom model shown by a visualizer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelVariant {
    Bohr,
    Dalton,
    Thomson,
    Rutherford,
}

impl ModelVariant {
    pub const ALL: [ModelVariant; 4] = [
        ModelVariant::Bohr,
        ModelVariant::Dalton,
        ModelVariant::Thomson,
        ModelVariant::Rutherford,
    ];

    pub fn config(self) -> &'static VariantConfig {
        match self {
            ModelVariant::Bohr => &BOHR,
            ModelVariant::Dalton => &DALTON,
            ModelVariant::Thomson => &THOMSON,
            ModelVariant::Rutherford => &RUTHERFORD,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ModelVariant::Bohr => "bohr",
            ModelVariant::Dalton => "dalton",
            ModelVariant::Thomson => "thomson",
            ModelVariant::Rutherford => "rutherford",
        }
    }
}

impl std::str::FromStr for ModelVariant {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        ModelVariant::ALL
            .into_iter()
            .find(|variant| variant.name().eq_ignore_ascii_case(value))
            .ok_or_else(|| format!("unknown atom model '{value}'"))
    }
}

/// How the electrons of a variant are laid out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElectronLayout {
    /// Evenly phased electrons on shell rings.
    Shells,
    /// One seeded, randomly tilted orbit per electron.
    Orbits,
    /// Static electrons embedded in a positive sphere.
    Embedded,
    /// A solid ball, no electrons at all.
    Solid,
}

/// Boolean view flag a variant may expose.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ViewToggle {
    AutoRotate,
    RotateAtom,
    FreezeMotion,
    TiltedOrbits,
    ShowElectronTrails,
    ShowPositiveSphere,
    CutawaySphere,
}

/// Per-frame rotation of the whole atom group, radians per second.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpinRates {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug)]
pub struct VariantConfig {
    pub variant: ModelVariant,
    pub layout: ElectronLayout,
    pub toggles: &'static [ViewToggle],
    pub default_view: ViewSettings,
    pub spin: SpinRates,
}

impl VariantConfig {
    pub fn supports(&self, toggle: ViewToggle) -> bool {
        self.toggles.contains(&toggle)
    }
}

const fn view(
    auto_rotate: bool,
    show_electron_trails: bool,
    show_positive_sphere: bool,
    cutaway_sphere: bool,
) -> ViewSettings {
    ViewSettings {
        auto_rotate,
        rotate_atom: false,
        freeze_motion: false,
        tilted_orbits: false,
        show_electron_trails,
        show_positive_sphere,
        cutaway_sphere,
    }
}

static BOHR: VariantConfig = VariantConfig {
    variant: ModelVariant::Bohr,
    layout: ElectronLayout::Shells,
    toggles: &[
        ViewToggle::AutoRotate,
        ViewToggle::RotateAtom,
        ViewToggle::FreezeMotion,
        ViewToggle::TiltedOrbits,
        ViewToggle::ShowElectronTrails,
    ],
    default_view: view(true, true, false, false),
    spin: SpinRates { x: 0.0, y: 0.25 },
};

static DALTON: VariantConfig = VariantConfig {
    variant: ModelVariant::Dalton,
    layout: ElectronLayout::Solid,
    toggles: &[
        ViewToggle::AutoRotate,
        ViewToggle::RotateAtom,
        ViewToggle::FreezeMotion,
    ],
    default_view: view(true, false, false, false),
    spin: SpinRates { x: 0.08, y: 0.2 },
};

static THOMSON: VariantConfig = VariantConfig {
    variant: ModelVariant::Thomson,
    layout: ElectronLayout::Embedded,
    toggles: &[
        ViewToggle::AutoRotate,
        ViewToggle::RotateAtom,
        ViewToggle::FreezeMotion,
        ViewToggle::ShowPositiveSphere,
        ViewToggle::CutawaySphere,
    ],
    default_view: view(true, false, true, true),
    spin: SpinRates { x: 0.08, y: 0.2 },
};

static RUTHERFORD: VariantConfig = VariantConfig {
    variant: ModelVariant::Rutherford,
    layout: ElectronLayout::Orbits,
    toggles: &[
        ViewToggle::AutoRotate,
        ViewToggle::RotateAtom,
        ViewToggle::FreezeMotion,
        ViewToggle::ShowElectronTrails,
    ],
    default_view: view(true, true, false, false),
    spin: SpinRates { x: 0.0, y: 0.15 },
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variants_parse_case_insensitively() {
        assert_eq!("Bohr".parse::<ModelVariant>(), Ok(ModelVariant::Bohr));
        assert_eq!("RUTHERFORD".parse::<ModelVariant>(), Ok(ModelVariant::Rutherford));
        assert!("quantum".parse::<ModelVariant>().is_err());
    }

    #[test]
    fn configs_point_back_to_their_variant() {
        for variant in ModelVariant::ALL {
            assert_eq!(variant.config().variant, variant);
            assert!(variant.config().supports(ViewToggle::FreezeMotion));
        }
    }

    #[test]
    fn default_views_keep_variant_shapes() {
        let bohr = ModelVariant::Bohr.config();
        assert!(bohr.default_view.show_electron_trails);
        assert!(!bohr.default_view.tilted_orbits);
        assert!(!bohr.supports(ViewToggle::CutawaySphere));

        let thomson = ModelVariant::Thomson.config();
        assert!(thomson.default_view.show_positive_sphere);
        assert!(thomson.default_view.cutaway_sphere);
        assert!(!thomson.supports(ViewToggle::ShowElectronTrails));

        let dalton = ModelVariant::Dalton.config();
        assert_eq!(dalton.toggles.len(), 3);
        assert_eq!(dalton.layout, ElectronLayout::Solid);
    }
}
