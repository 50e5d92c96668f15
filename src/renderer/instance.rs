use super::palette::Palette;
use crate::assembly::materials::Rgb;
use crate::constants::{
    BOHR_ELECTRON_RADIUS, NUCLEON_RADIUS, NUCLEUS_GLOW_OPACITY, NUCLEUS_GLOW_SCALE,
    POSITIVE_SPHERE_OPACITY, RUTHERFORD_ELECTRON_RADIUS, THOMSON_ELECTRON_MIN_RADIUS,
    THOMSON_ELECTRON_SCALE,
};
use crate::physics::nucleus::NucleonKind;
use crate::simulation::atom::{Atom, Electrons};
use crate::simulation::motion::AtomMotion;
use crate::ui::ViewSettings;
use glam::{EulerRot, Quat, Vec3};

/// One sphere for the instanced particle pass.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ParticleInstance {
    pub position: [f32; 3],
    pub radius: f32,
    pub color: [f32; 4],
}

impl ParticleInstance {
    pub fn new(position: Vec3, radius: f32, color: Rgb, alpha: f32) -> Self {
        let [r, g, b] = color.0;
        Self {
            position: position.to_array(),
            radius,
            color: [r, g, b, alpha],
        }
    }
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TrailVertex {
    pub position: [f32; 3],
    pub opacity: f32,
}

impl TrailVertex {
    pub fn new(position: Vec3, opacity: f32) -> Self {
        Self {
            position: position.to_array(),
            opacity,
        }
    }
}

/// Range of `trail_vertices` forming one line strip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrailStrip {
    pub first: u32,
    pub count: u32,
}

/// Everything the particle and trail passes draw for one frame. Positions are
/// in atom space; `group_rotation` orients the whole atom.
#[derive(Clone, Debug, Default)]
pub struct AtomFrame {
    pub group_rotation: Quat,
    pub particles: Vec<ParticleInstance>,
    pub trail_vertices: Vec<TrailVertex>,
    pub trail_strips: Vec<TrailStrip>,
    /// Clip the positive sphere to `x <= 0`.
    pub cutaway: bool,
}

impl AtomFrame {
    pub fn build(atom: &Atom, view: &ViewSettings, motion: &AtomMotion, palette: &Palette) -> Self {
        let mut frame = AtomFrame {
            group_rotation: Quat::from_euler(EulerRot::XYZ, motion.rotation_x, motion.rotation_y, 0.0),
            ..Default::default()
        };

        let electron_radius = match atom.electrons() {
            Electrons::Shells { .. } => {
                for particle in &atom.nucleus().particles {
                    let color = match particle.kind {
                        NucleonKind::Proton => palette.proton,
                        NucleonKind::Neutron => palette.neutron,
                    };
                    frame.particles.push(ParticleInstance::new(
                        particle.position,
                        NUCLEON_RADIUS * particle.scale,
                        color,
                        1.0,
                    ));
                }
                frame.particles.push(ParticleInstance::new(
                    Vec3::ZERO,
                    atom.nucleus_radius() * NUCLEUS_GLOW_SCALE,
                    palette.nucleus_glow,
                    NUCLEUS_GLOW_OPACITY,
                ));
                BOHR_ELECTRON_RADIUS
            }
            Electrons::Orbits { .. } => {
                frame.particles.push(ParticleInstance::new(
                    Vec3::ZERO,
                    atom.nucleus_radius(),
                    palette.proton,
                    1.0,
                ));
                RUTHERFORD_ELECTRON_RADIUS
            }
            Electrons::Embedded { .. } => {
                let radius = atom.sphere_radius().unwrap_or_default();
                if view.show_positive_sphere {
                    frame.particles.push(ParticleInstance::new(
                        Vec3::ZERO,
                        radius,
                        palette.proton,
                        POSITIVE_SPHERE_OPACITY,
                    ));
                    frame.cutaway = view.cutaway_sphere;
                }
                THOMSON_ELECTRON_MIN_RADIUS.max(radius * THOMSON_ELECTRON_SCALE)
            }
            Electrons::None => {
                frame.particles.push(ParticleInstance::new(
                    Vec3::ZERO,
                    atom.sphere_radius().unwrap_or_default(),
                    palette.neutron,
                    1.0,
                ));
                0.0
            }
        };

        for position in atom.electron_positions(motion.time()) {
            frame.particles.push(ParticleInstance::new(position, electron_radius, palette.electron, 1.0));
        }

        if view.show_electron_trails {
            for trail in atom.trails() {
                let first = frame.trail_vertices.len() as u32;
                frame.trail_vertices.extend(
                    trail.points.iter().map(|point| TrailVertex::new(*point, trail.opacity)),
                );
                frame.trail_strips.push(TrailStrip {
                    first,
                    count: trail.points.len() as u32,
                });
            }
        }

        frame
    }
}
