use crate::atom::model::{ElectronLayout, ModelVariant};
use crate::constants::{
    MAX_ATOMIC_MASS, ORBIT_TRAIL_SEGMENTS, RUTHERFORD_NUCLEUS_MIN_RADIUS,
    RUTHERFORD_NUCLEUS_PER_CBRT, SHELL_TRAIL_SEGMENTS, SPHERE_MAX_RADIUS, SPHERE_MIN_RADIUS,
    THOMSON_ELECTRON_FILL,
};
use crate::physics::electron::{
    ElectronPhase, OrbitConfig, ShellOrbit, build_shell_orbits, create_electron_phases,
    generate_embedded_electrons, generate_orbit_configs, orbit_trail, shell_orientation,
};
use crate::physics::elements::{Element, estimate_nucleus_radius};
use crate::physics::nucleus::{Nucleus, generate_nucleus_layout};
use crate::physics::shells::{ElectronShell, build_electron_shells};
use glam::Vec3;
use serde::Serialize;

/// Electron arrangement for each atom model.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Electrons {
    Shells {
        phases: Vec<ElectronPhase>,
        orbits: Vec<ShellOrbit>,
    },
    Orbits {
        orbits: Vec<OrbitConfig>,
    },
    Embedded {
        positions: Vec<Vec3>,
    },
    None,
}

/// Orbit polyline handed to the renderer.
#[derive(Clone, Debug, Serialize)]
pub struct Trail {
    pub points: Vec<Vec3>,
    pub opacity: f32,
}

/// Everything a renderer needs to draw one element in one model.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Atom {
    element: &'static Element,
    variant: ModelVariant,
    nucleus: Nucleus,
    nucleus_radius: f32,
    /// Positive sphere (Thomson) or solid ball (Dalton).
    sphere_radius: Option<f32>,
    shells: Vec<ElectronShell>,
    electrons: Electrons,
    tilted_orbits: bool,
}

impl Atom {
    pub fn new(element: &'static Element, variant: ModelVariant, tilted_orbits: bool) -> Self {
        let shells = build_electron_shells(element.electrons(), estimate_nucleus_radius(element));

        let (nucleus, nucleus_radius, sphere_radius, electrons) = match variant.config().layout {
            ElectronLayout::Shells => {
                let nucleus = generate_nucleus_layout(element.protons(), element.neutrons());
                let radius = nucleus.core_radius();
                let sizes: Vec<u32> = shells.iter().map(|shell| shell.electrons).collect();
                let phases = create_electron_phases(&sizes);
                let orbits = build_shell_orbits(&shells, &phases, tilted_orbits);
                (nucleus, radius, None, Electrons::Shells { phases, orbits })
            }
            ElectronLayout::Orbits => {
                let orbits = generate_orbit_configs(element.electrons(), element.atomic_number);
                (
                    Nucleus::default(),
                    rutherford_nucleus_radius(element.atomic_mass),
                    None,
                    Electrons::Orbits { orbits },
                )
            }
            ElectronLayout::Embedded => {
                let radius = sphere_radius(element.atomic_mass);
                let positions = generate_embedded_electrons(
                    element.electrons(),
                    radius * THOMSON_ELECTRON_FILL,
                    element.atomic_number,
                );
                (
                    Nucleus::default(),
                    0.0,
                    Some(radius),
                    Electrons::Embedded { positions },
                )
            }
            ElectronLayout::Solid => (
                Nucleus::default(),
                0.0,
                Some(sphere_radius(element.atomic_mass)),
                Electrons::None,
            ),
        };

        Self {
            element,
            variant,
            nucleus,
            nucleus_radius,
            sphere_radius,
            shells,
            electrons,
            tilted_orbits,
        }
    }

    pub fn element(&self) -> &'static Element {
        self.element
    }

    pub fn variant(&self) -> ModelVariant {
        self.variant
    }

    pub fn nucleus(&self) -> &Nucleus {
        &self.nucleus
    }

    pub fn nucleus_radius(&self) -> f32 {
        self.nucleus_radius
    }

    pub fn sphere_radius(&self) -> Option<f32> {
        self.sphere_radius
    }

    pub fn shells(&self) -> &[ElectronShell] {
        &self.shells
    }

    pub fn electrons(&self) -> &Electrons {
        &self.electrons
    }

    pub fn tilted_orbits(&self) -> bool {
        self.tilted_orbits
    }

    /// Re-orients the shell rings. Only the Bohr model has tilt.
    pub fn set_tilted_orbits(&mut self, tilted: bool) {
        if self.tilted_orbits == tilted {
            return;
        }
        self.tilted_orbits = tilted;
        if let Electrons::Shells { orbits, .. } = &mut self.electrons {
            for orbit in orbits.iter_mut() {
                orbit.orientation = shell_orientation(orbit.shell_index, tilted);
            }
        }
    }

    pub fn electron_count(&self) -> usize {
        match &self.electrons {
            Electrons::Shells { orbits, .. } => orbits.len(),
            Electrons::Orbits { orbits } => orbits.len(),
            Electrons::Embedded { positions } => positions.len(),
            Electrons::None => 0,
        }
    }

    /// Electron positions at animation time `time` (seconds of unfrozen motion).
    pub fn electron_positions(&self, time: f32) -> Vec<Vec3> {
        match &self.electrons {
            Electrons::Shells { orbits, .. } => {
                orbits.iter().map(|orbit| orbit.position_at(time)).collect()
            }
            Electrons::Orbits { orbits } => {
                orbits.iter().map(|orbit| orbit.position_at(time)).collect()
            }
            Electrons::Embedded { positions } => positions.clone(),
            Electrons::None => Vec::new(),
        }
    }

    pub fn trails(&self) -> Vec<Trail> {
        match &self.electrons {
            Electrons::Shells { .. } => self
                .shells
                .iter()
                .filter(|shell| shell.electrons > 0)
                .map(|shell| Trail {
                    points: orbit_trail(
                        shell.radius,
                        shell_orientation(shell.index, self.tilted_orbits),
                        SHELL_TRAIL_SEGMENTS,
                    ),
                    opacity: 0.22 + shell.occupancy_ratio * 0.35,
                })
                .collect(),
            Electrons::Orbits { orbits } => orbits
                .iter()
                .map(|orbit| Trail {
                    points: orbit_trail(orbit.radius, orbit.orientation, ORBIT_TRAIL_SEGMENTS),
                    opacity: 0.2,
                })
                .collect(),
            Electrons::Embedded { .. } | Electrons::None => Vec::new(),
        }
    }
}

fn clamped_mass(atomic_mass: f32) -> f32 {
    atomic_mass.clamp(1.0, MAX_ATOMIC_MASS)
}

/// Single-sphere nucleus of the planetary model.
pub fn rutherford_nucleus_radius(atomic_mass: f32) -> f32 {
    RUTHERFORD_NUCLEUS_MIN_RADIUS.max(clamped_mass(atomic_mass).cbrt() * RUTHERFORD_NUCLEUS_PER_CBRT)
}

/// Radius of the Dalton ball and the Thomson positive sphere.
pub fn sphere_radius(atomic_mass: f32) -> f32 {
    let normalized = clamped_mass(atomic_mass).cbrt() / MAX_ATOMIC_MASS.cbrt();
    SPHERE_MIN_RADIUS + normalized * (SPHERE_MAX_RADIUS - SPHERE_MIN_RADIUS)
}
