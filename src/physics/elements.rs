use crate::constants::{
    NUCLEUS_MIN_RADIUS, NUCLEUS_RADIUS_PER_CBRT, PERIODIC_CENTER_GROUP, PERIODIC_CENTER_PERIOD,
    PERIODIC_SPACING,
};
use glam::Vec3;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    #[serde(rename = "Alkali metal")]
    AlkaliMetal,
    #[serde(rename = "Alkaline earth metal")]
    AlkalineEarthMetal,
    #[serde(rename = "Lanthanide")]
    Lanthanide,
    #[serde(rename = "Actinide")]
    Actinide,
    #[serde(rename = "Transition metal")]
    TransitionMetal,
    #[serde(rename = "Post-transition metal")]
    PostTransitionMetal,
    #[serde(rename = "Metalloid")]
    Metalloid,
    #[serde(rename = "Nonmetal")]
    Nonmetal,
    #[serde(rename = "Noble gas")]
    NobleGas,
    #[serde(rename = "Halogen")]
    Halogen,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::AlkaliMetal => "Alkali metal",
            Category::AlkalineEarthMetal => "Alkaline earth metal",
            Category::Lanthanide => "Lanthanide",
            Category::Actinide => "Actinide",
            Category::TransitionMetal => "Transition metal",
            Category::PostTransitionMetal => "Post-transition metal",
            Category::Metalloid => "Metalloid",
            Category::Nonmetal => "Nonmetal",
            Category::NobleGas => "Noble gas",
            Category::Halogen => "Halogen",
        }
    }

    /// Tile color used by the periodic table view.
    pub fn color_hex(self) -> &'static str {
        match self {
            Category::AlkaliMetal => "#f4a6a3",
            Category::AlkalineEarthMetal => "#f7d488",
            Category::Lanthanide => "#f4b77d",
            Category::Actinide => "#f09f9c",
            Category::TransitionMetal => "#c8c58c",
            Category::PostTransitionMetal => "#a8c9e2",
            Category::Metalloid => "#d6d3c4",
            Category::Nonmetal => "#9ed7a7",
            Category::NobleGas => "#b6a0c7",
            Category::Halogen => "#f6b1c3",
        }
    }
}

/// Standard state at room temperature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Solid,
    Liquid,
    Gas,
}

/// Basic metadata describing a chemical element.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub atomic_number: u8,
    pub symbol: &'static str,
    pub name: &'static str,
    pub atomic_mass: f32,
    pub category: Category,
    pub phase: Phase,
    /// 0 for stable elements.
    pub radioactivity: u8,
    pub period: u8,
    pub group: u8,
}

const ELEMENTS: [Element; 20] = [
    Element::new(1, "H", "Hydrogen", 1.008, Category::Nonmetal, Phase::Gas, 1, 1),
    Element::new(2, "He", "Helium", 4.0026, Category::NobleGas, Phase::Gas, 1, 18),
    Element::new(3, "Li", "Lithium", 6.94, Category::AlkaliMetal, Phase::Solid, 2, 1),
    Element::new(4, "Be", "Beryllium", 9.0122, Category::AlkalineEarthMetal, Phase::Solid, 2, 2),
    Element::new(5, "B", "Boron", 10.81, Category::Metalloid, Phase::Solid, 2, 13),
    Element::new(6, "C", "Carbon", 12.011, Category::Nonmetal, Phase::Solid, 2, 14),
    Element::new(7, "N", "Nitrogen", 14.007, Category::Nonmetal, Phase::Gas, 2, 15),
    Element::new(8, "O", "Oxygen", 15.999, Category::Nonmetal, Phase::Gas, 2, 16),
    Element::new(9, "F", "Fluorine", 18.998, Category::Halogen, Phase::Gas, 2, 17),
    Element::new(10, "Ne", "Neon", 20.18, Category::NobleGas, Phase::Gas, 2, 18),
    Element::new(11, "Na", "Sodium", 22.99, Category::AlkaliMetal, Phase::Solid, 3, 1),
    Element::new(12, "Mg", "Magnesium", 24.305, Category::AlkalineEarthMetal, Phase::Solid, 3, 2),
    Element::new(13, "Al", "Aluminium", 26.982, Category::PostTransitionMetal, Phase::Solid, 3, 13),
    Element::new(14, "Si", "Silicon", 28.085, Category::Metalloid, Phase::Solid, 3, 14),
    Element::new(15, "P", "Phosphorus", 30.974, Category::Nonmetal, Phase::Solid, 3, 15),
    Element::new(16, "S", "Sulfur", 32.06, Category::Nonmetal, Phase::Solid, 3, 16),
    Element::new(17, "Cl", "Chlorine", 35.45, Category::Halogen, Phase::Gas, 3, 17),
    Element::new(18, "Ar", "Argon", 39.948, Category::NobleGas, Phase::Gas, 3, 18),
    Element::new(19, "K", "Potassium", 39.098, Category::AlkaliMetal, Phase::Solid, 4, 1),
    Element::new(20, "Ca", "Calcium", 40.078, Category::AlkalineEarthMetal, Phase::Solid, 4, 2),
];

impl Element {
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        atomic_number: u8,
        symbol: &'static str,
        name: &'static str,
        atomic_mass: f32,
        category: Category,
        phase: Phase,
        period: u8,
        group: u8,
    ) -> Self {
        Self {
            atomic_number,
            symbol,
            name,
            atomic_mass,
            category,
            phase,
            radioactivity: 0,
            period,
            group,
        }
    }

    pub fn hydrogen() -> &'static Element {
        &ELEMENTS[0]
    }

    /// Element shown before the user picks anything.
    pub fn default_element() -> &'static Element {
        Self::hydrogen()
    }

    pub fn by_symbol(symbol: &str) -> Option<&'static Element> {
        ELEMENTS.iter().find(|element| element.symbol == symbol)
    }

    pub fn by_atomic_number(z: u8) -> Option<&'static Element> {
        ELEMENTS.iter().find(|element| element.atomic_number == z)
    }

    pub fn all() -> &'static [Element] {
        &ELEMENTS
    }

    pub fn protons(&self) -> u32 {
        u32::from(self.atomic_number)
    }

    pub fn electrons(&self) -> u32 {
        u32::from(self.atomic_number)
    }

    /// Mass number minus protons. Ignores isotope conventions on purpose.
    pub fn neutrons(&self) -> u32 {
        let mass_number = self.atomic_mass.round() as i64;
        (mass_number - i64::from(self.atomic_number)).max(0) as u32
    }

    pub fn nucleons(&self) -> u32 {
        self.protons() + self.neutrons()
    }

    pub fn is_radioactive(&self) -> bool {
        self.radioactivity > 0
    }

    /// Tile position in the 3D periodic table, centred on the table.
    pub fn periodic_position(&self) -> Vec3 {
        let x = (f32::from(self.group) - PERIODIC_CENTER_GROUP) * PERIODIC_SPACING;
        let z = (f32::from(self.period) - PERIODIC_CENTER_PERIOD) * PERIODIC_SPACING;
        Vec3::new(x, 0.0, z)
    }
}

/// Baseline radius the Bohr shells are stacked on.
pub fn estimate_nucleus_radius(element: &Element) -> f32 {
    let nucleons = element.nucleons().max(1) as f32;
    NUCLEUS_MIN_RADIUS.max(nucleons.cbrt() * NUCLEUS_RADIUS_PER_CBRT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_are_unique_and_ordered() {
        for (index, element) in Element::all().iter().enumerate() {
            assert_eq!(usize::from(element.atomic_number), index + 1);
            let matches = Element::all()
                .iter()
                .filter(|other| other.symbol == element.symbol)
                .count();
            assert_eq!(matches, 1, "duplicate symbol {}", element.symbol);
        }
    }

    #[test]
    fn hydrogen_is_default() {
        let hydrogen = Element::default_element();
        assert_eq!(hydrogen.symbol, "H");
        assert_eq!(hydrogen.protons(), 1);
        assert_eq!(hydrogen.neutrons(), 0);
        assert_eq!(hydrogen.electrons(), 1);
    }

    #[test]
    fn derived_counts_follow_rounded_mass() {
        let carbon = Element::by_symbol("C").unwrap();
        assert_eq!(carbon.neutrons(), 6);
        let chlorine = Element::by_symbol("Cl").unwrap();
        assert_eq!(chlorine.neutrons(), 18);
        let argon = Element::by_atomic_number(18).unwrap();
        assert_eq!(argon.neutrons(), 22);
        let potassium = Element::by_symbol("K").unwrap();
        assert_eq!(potassium.neutrons(), 20);
    }

    #[test]
    fn unknown_lookups_return_none() {
        assert!(Element::by_symbol("Unobtanium").is_none());
        assert!(Element::by_symbol("c").is_none());
        assert!(Element::by_atomic_number(0).is_none());
        assert!(Element::by_atomic_number(21).is_none());
    }

    #[test]
    fn none_of_the_catalog_is_radioactive() {
        assert!(Element::all().iter().all(|element| !element.is_radioactive()));
        assert_eq!(Element::by_symbol("Ne").unwrap().phase, Phase::Gas);
        assert_eq!(Element::by_symbol("Na").unwrap().phase, Phase::Solid);
    }

    #[test]
    fn nucleus_radius_has_floor() {
        let hydrogen = Element::hydrogen();
        assert!((estimate_nucleus_radius(hydrogen) - 0.6).abs() < 1e-6);
        let calcium = Element::by_symbol("Ca").unwrap();
        let expected = 40f32.cbrt() * 0.34;
        assert!((estimate_nucleus_radius(calcium) - expected).abs() < 1e-5);
    }

    #[test]
    fn periodic_position_is_centred() {
        let helium = Element::by_symbol("He").unwrap();
        let position = helium.periodic_position();
        assert!((position.x - 8.5 * 1.85).abs() < 1e-4);
        assert!((position.z + 3.0 * 1.85).abs() < 1e-4);
        assert_eq!(position.y, 0.0);
        assert_eq!(helium.category.label(), "Noble gas");
        assert_eq!(helium.category.color_hex(), "#b6a0c7");
    }
}
