use crate::constants::{
    MAX_ORBIT_RADIUS, MIN_ORBIT_RADIUS, ORBIT_BASE_SPEED, ORBIT_RADIUS_EXPONENT,
    ORBIT_SPEED_FALLOFF, SHELL_BASE_SPEED, SHELL_SPEED_STEP, SHELL_TILT_BASE, SHELL_TILT_STEP,
    SHELL_TWIST_STEP, SHELL_VERTICAL_AMPLITUDE,
};
use crate::physics::shells::ElectronShell;
use crate::simulation::rng::Mulberry32;
use glam::{EulerRot, Quat, Vec3};
use serde::Serialize;
use std::f32::consts::TAU;

/// Angular slot of one electron inside its shell.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectronPhase {
    pub shell_index: usize,
    pub electron_index: u32,
    pub phase: f32,
}

/// Spreads each shell's electrons evenly around the ring.
pub fn create_electron_phases(shell_sizes: &[u32]) -> Vec<ElectronPhase> {
    shell_sizes
        .iter()
        .enumerate()
        .flat_map(|(shell_index, &count)| {
            (0..count).map(move |electron_index| ElectronPhase {
                shell_index,
                electron_index,
                phase: electron_index as f32 / count.max(1) as f32 * TAU,
            })
        })
        .collect()
}

/// Runtime parameters of a Bohr-model electron.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShellOrbit {
    pub shell_index: usize,
    pub radius: f32,
    pub speed: f32,
    pub vertical_amplitude: f32,
    pub phase: f32,
    pub orientation: Quat,
}

impl ShellOrbit {
    pub fn position_at(&self, time: f32) -> Vec3 {
        let angle = time * self.speed + self.phase;
        let local = Vec3::new(
            angle.cos() * self.radius,
            (angle * 0.65 + self.phase * 0.45).sin() * self.vertical_amplitude,
            angle.sin() * self.radius,
        );
        self.orientation * local
    }
}

/// Plane orientation of a shell ring. Flat when tilting is off.
pub fn shell_orientation(shell_index: usize, tilted: bool) -> Quat {
    if !tilted {
        return Quat::IDENTITY;
    }
    let base_tilt = SHELL_TILT_BASE + shell_index as f32 * SHELL_TILT_STEP;
    let tilt_x = if shell_index % 2 == 0 {
        base_tilt
    } else {
        -base_tilt
    };
    let tilt_y = shell_index as f32 * SHELL_TWIST_STEP;
    Quat::from_euler(EulerRot::XYZ, tilt_x, tilt_y, 0.0)
}

pub fn build_shell_orbits(
    shells: &[ElectronShell],
    phases: &[ElectronPhase],
    tilted: bool,
) -> Vec<ShellOrbit> {
    shells
        .iter()
        .flat_map(move |shell| {
            let orientation = shell_orientation(shell.index, tilted);
            let speed = SHELL_BASE_SPEED + shell.index as f32 * SHELL_SPEED_STEP;
            let vertical_amplitude = shell.radius * SHELL_VERTICAL_AMPLITUDE;
            phases
                .iter()
                .filter(move |electron| electron.shell_index == shell.index)
                .map(move |electron| ShellOrbit {
                    shell_index: shell.index,
                    radius: shell.radius,
                    speed,
                    vertical_amplitude,
                    phase: electron.phase,
                    orientation,
                })
        })
        .collect()
}

/// A single tilted circular orbit in the planetary model.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OrbitConfig {
    pub radius: f32,
    pub speed: f32,
    pub phase: f32,
    pub orientation: Quat,
}

impl OrbitConfig {
    pub fn position_at(&self, time: f32) -> Vec3 {
        let angle = time * self.speed + self.phase;
        self.orientation * Vec3::new(angle.cos() * self.radius, 0.0, angle.sin() * self.radius)
    }
}

/// One orbit per electron, at least one. Radii widen outwards with a
/// 0.75 exponent and outer orbits run slower.
pub fn generate_orbit_configs(electrons: u32, atomic_number: u8) -> Vec<OrbitConfig> {
    let count = electrons.max(1);
    let mut rng = Mulberry32::for_atomic_number(atomic_number);

    (0..count)
        .map(|i| {
            let t = if count == 1 {
                0.0
            } else {
                i as f32 / (count - 1) as f32
            };
            let radius = MIN_ORBIT_RADIUS
                + t.powf(ORBIT_RADIUS_EXPONENT) * (MAX_ORBIT_RADIUS - MIN_ORBIT_RADIUS);
            let speed = ORBIT_BASE_SPEED / (1.0 + t * ORBIT_SPEED_FALLOFF);
            let phase = (rng.next_unit() * std::f64::consts::TAU) as f32;
            let normal = rng.unit_vector();
            let orientation = Quat::from_rotation_arc(Vec3::Y, normal);

            OrbitConfig {
                radius,
                speed,
                phase,
                orientation,
            }
        })
        .collect()
}

/// Electrons scattered through the positive sphere of the plum-pudding model.
pub fn generate_embedded_electrons(electrons: u32, radius: f32, atomic_number: u8) -> Vec<Vec3> {
    let mut rng = Mulberry32::for_atomic_number(atomic_number);
    (0..electrons).map(|_| rng.point_in_ball(radius)).collect()
}

/// Closed ring of `segments + 1` points, rotated into the orbit plane.
pub fn orbit_trail(radius: f32, orientation: Quat, segments: usize) -> Vec<Vec3> {
    let segments = segments.max(1);
    (0..=segments)
        .map(|i| {
            let theta = i as f32 / segments as f32 * TAU;
            orientation * Vec3::new(theta.cos() * radius, 0.0, theta.sin() * radius)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::shells::build_electron_shells;

    #[test]
    fn phases_are_evenly_spaced() {
        let phases = create_electron_phases(&[2, 4, 0]);
        assert_eq!(phases.len(), 6);
        assert_eq!(phases[0].phase, 0.0);
        assert!((phases[1].phase - std::f32::consts::PI).abs() < 1e-6);
        let second_shell: Vec<_> = phases.iter().filter(|p| p.shell_index == 1).collect();
        assert_eq!(second_shell.len(), 4);
        assert!((second_shell[1].phase - TAU / 4.0).abs() < 1e-6);
        assert_eq!(second_shell[3].electron_index, 3);
    }

    #[test]
    fn empty_shells_produce_no_phases() {
        assert!(create_electron_phases(&[0, 0]).is_empty());
        assert!(create_electron_phases(&[]).is_empty());
    }

    #[test]
    fn flat_shells_are_untilted() {
        assert_eq!(shell_orientation(3, false), Quat::IDENTITY);
        let tilted = shell_orientation(1, true);
        assert!(tilted.angle_between(Quat::IDENTITY) > 0.1);
    }

    #[test]
    fn shell_orbits_follow_shells() {
        let shells = build_electron_shells(10, 0.6);
        let phases = create_electron_phases(&[2, 8]);
        let orbits = build_shell_orbits(&shells, &phases, true);
        assert_eq!(orbits.len(), 10);
        assert!((orbits[0].speed - 0.55).abs() < 1e-6);
        assert!((orbits[2].speed - 0.77).abs() < 1e-6);
        assert!((orbits[2].vertical_amplitude - shells[1].radius * 0.075).abs() < 1e-6);
        let start = orbits[0].position_at(0.0);
        assert!(start.length() >= shells[0].radius - 1e-4);
    }

    #[test]
    fn orbit_configs_are_reproducible() {
        let first = generate_orbit_configs(11, 11);
        let second = generate_orbit_configs(11, 11);
        assert_eq!(first.len(), 11);
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.radius.to_bits(), b.radius.to_bits());
            assert_eq!(a.speed.to_bits(), b.speed.to_bits());
            assert_eq!(a.phase.to_bits(), b.phase.to_bits());
            assert_eq!(
                a.orientation.to_array().map(f32::to_bits),
                b.orientation.to_array().map(f32::to_bits)
            );
        }
        assert_ne!(generate_orbit_configs(11, 12)[0].phase, first[0].phase);
    }

    #[test]
    fn orbit_radii_span_min_to_max() {
        let configs = generate_orbit_configs(5, 5);
        assert!((configs[0].radius - MIN_ORBIT_RADIUS).abs() < 1e-6);
        assert!((configs[4].radius - MAX_ORBIT_RADIUS).abs() < 1e-5);
        assert!((configs[0].speed - 0.7).abs() < 1e-6);
        assert!((configs[4].speed - 0.7 / 2.6).abs() < 1e-6);
        assert!(configs.windows(2).all(|pair| pair[0].radius < pair[1].radius));
    }

    #[test]
    fn single_or_missing_electron_uses_inner_orbit() {
        let configs = generate_orbit_configs(0, 0);
        assert_eq!(configs.len(), 1);
        assert_eq!(configs[0].radius, MIN_ORBIT_RADIUS);
        let expected_phase = (0.627_073_940_588_161_3 * std::f64::consts::TAU) as f32;
        assert_eq!(configs[0].phase, expected_phase);
    }

    #[test]
    fn orbit_positions_keep_radius() {
        for config in generate_orbit_configs(8, 8) {
            for time in [0.0, 0.7, 12.5] {
                assert!((config.position_at(time).length() - config.radius).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn embedded_electrons_stay_inside() {
        let positions = generate_embedded_electrons(6, 1.5, 6);
        assert_eq!(positions.len(), 6);
        assert!(positions.iter().all(|p| p.length() <= 1.5 + 1e-5));
        assert_eq!(positions, generate_embedded_electrons(6, 1.5, 6));
    }

    #[test]
    fn trails_are_closed() {
        let points = orbit_trail(2.0, Quat::IDENTITY, 72);
        assert_eq!(points.len(), 73);
        assert!((points[0] - points[72]).length() < 1e-4);
    }
}
