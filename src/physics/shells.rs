use crate::constants::{SHELL_BASE_GAP, SHELL_CAPACITIES, SHELL_OCCUPANCY_SPREAD, SHELL_SPACING};
use serde::Serialize;

/// One electron energy level, derived from an electron count.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectronShell {
    pub index: usize,
    pub capacity: u32,
    pub electrons: u32,
    pub occupancy_ratio: f32,
    pub radius: f32,
}

/// Capacity of shell `index`; the last tabulated value repeats.
pub fn shell_capacity(index: usize) -> u32 {
    SHELL_CAPACITIES
        .get(index)
        .copied()
        .unwrap_or(SHELL_CAPACITIES[SHELL_CAPACITIES.len() - 1])
}

/// Fills shells lowest index first. Electrons beyond the total table
/// capacity are dropped.
pub fn distribute_electrons(total: u32) -> Vec<u32> {
    let mut remaining = total;
    SHELL_CAPACITIES
        .iter()
        .map(|&capacity| {
            let count = remaining.min(capacity);
            remaining -= count;
            count
        })
        .collect()
}

pub fn build_electron_shells(total: u32, nucleus_radius: f32) -> Vec<ElectronShell> {
    distribute_electrons(total)
        .into_iter()
        .enumerate()
        .map(|(index, electrons)| {
            let capacity = shell_capacity(index);
            let occupancy_ratio = if capacity > 0 {
                electrons as f32 / capacity as f32
            } else {
                0.0
            };
            let radius = nucleus_radius
                + SHELL_BASE_GAP
                + index as f32 * SHELL_SPACING
                + occupancy_ratio * SHELL_OCCUPANCY_SPREAD;

            ElectronShell {
                index,
                capacity,
                electrons,
                occupancy_ratio,
                radius,
            }
        })
        .collect()
}

pub fn total_electrons(shells: &[ElectronShell]) -> u32 {
    shells.iter().map(|shell| shell.electrons).sum()
}

/// Shells that hold at least one electron.
pub fn occupied(shells: &[ElectronShell]) -> impl Iterator<Item = &ElectronShell> {
    shells.iter().filter(|shell| shell.electrons > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::elements::{Element, estimate_nucleus_radius};

    #[test]
    fn every_element_is_fully_distributed() {
        for element in Element::all() {
            let distribution = distribute_electrons(element.electrons());
            assert_eq!(distribution.iter().sum::<u32>(), element.electrons());
            for (index, count) in distribution.iter().enumerate() {
                assert!(*count <= shell_capacity(index));
            }
        }
    }

    #[test]
    fn fills_lowest_shells_first() {
        assert_eq!(distribute_electrons(11), vec![2, 8, 1, 0, 0, 0, 0]);
        assert_eq!(distribute_electrons(20), vec![2, 8, 10, 0, 0, 0, 0]);
    }

    #[test]
    fn excess_electrons_are_dropped() {
        let capacity: u32 = SHELL_CAPACITIES.iter().sum();
        let distribution = distribute_electrons(capacity + 5);
        assert_eq!(distribution.to_vec(), SHELL_CAPACITIES.to_vec());
    }

    #[test]
    fn capacity_repeats_last_value() {
        assert_eq!(shell_capacity(0), 2);
        assert_eq!(shell_capacity(6), 8);
        assert_eq!(shell_capacity(42), 8);
    }

    #[test]
    fn empty_atom_has_zero_occupancy() {
        let shells = build_electron_shells(0, 0.6);
        assert_eq!(shells.len(), SHELL_CAPACITIES.len());
        for shell in &shells {
            assert_eq!(shell.electrons, 0);
            assert_eq!(shell.occupancy_ratio, 0.0);
            assert!(shell.radius.is_finite());
        }
        assert_eq!(occupied(&shells).count(), 0);
    }

    #[test]
    fn radius_grows_with_index_and_occupancy() {
        let shells = build_electron_shells(10, 1.0);
        assert!((shells[0].radius - (1.0 + 1.4 + 0.35)).abs() < 1e-5);
        assert!((shells[1].radius - (1.0 + 1.4 + 1.05 + 0.35)).abs() < 1e-5);
        assert!((shells[2].radius - (1.0 + 1.4 + 2.1)).abs() < 1e-5);
    }

    #[test]
    fn hydrogen_has_one_half_full_shell() {
        let hydrogen = Element::default_element();
        let shells = build_electron_shells(hydrogen.electrons(), estimate_nucleus_radius(hydrogen));
        let filled: Vec<_> = occupied(&shells).collect();
        assert_eq!(filled.len(), 1);
        assert_eq!(filled[0].electrons, 1);
        assert_eq!(filled[0].capacity, 2);
        assert!((filled[0].occupancy_ratio - 0.5).abs() < 1e-6);
    }

    #[test]
    fn carbon_shells_hold_six_electrons() {
        let carbon = Element::by_symbol("C").unwrap();
        let shells = build_electron_shells(carbon.electrons(), estimate_nucleus_radius(carbon));
        assert_eq!(total_electrons(&shells), 6);
        assert_eq!(shells[0].electrons, 2);
        assert_eq!(shells[1].electrons, 4);
    }
}
