use crate::constants::{
    NUCLEUS_CORE_MIN_RADIUS, NUCLEUS_LAYOUT_PER_CBRT, NUCLEUS_LAYOUT_SHRINK, NUCLEUS_MIN_RADIUS,
    NUCLEUS_RADIUS_PER_CBRT,
};
use glam::Vec3;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NucleonKind {
    Proton,
    Neutron,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NucleusParticle {
    pub index: usize,
    pub kind: NucleonKind,
    pub position: Vec3,
    pub scale: f32,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct Nucleus {
    pub particles: Vec<NucleusParticle>,
}

impl Nucleus {
    pub fn proton_count(&self) -> usize {
        self.count(NucleonKind::Proton)
    }

    pub fn neutron_count(&self) -> usize {
        self.count(NucleonKind::Neutron)
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Radius of the glow sphere drawn behind the particles.
    pub fn core_radius(&self) -> f32 {
        let count = self.particles.len().max(1) as f32;
        NUCLEUS_CORE_MIN_RADIUS.max(count.cbrt() * NUCLEUS_RADIUS_PER_CBRT)
    }

    fn count(&self, kind: NucleonKind) -> usize {
        self.particles
            .iter()
            .filter(|particle| particle.kind == kind)
            .count()
    }
}

pub struct NucleusBuilder {
    proton_count: usize,
    neutron_count: usize,
}

impl NucleusBuilder {
    pub fn new(proton_count: usize, neutron_count: usize) -> Self {
        Self {
            proton_count,
            neutron_count,
        }
    }

    /// Protons take the first slots of the spiral, neutrons the rest.
    pub fn build(&self) -> Nucleus {
        let total = self.proton_count + self.neutron_count;
        let positions = fibonacci_sphere(total.max(1), layout_radius(total));

        let kinds = std::iter::repeat(NucleonKind::Proton)
            .take(self.proton_count)
            .chain(std::iter::repeat(NucleonKind::Neutron).take(self.neutron_count));

        let particles = kinds
            .enumerate()
            .map(|(index, kind)| NucleusParticle {
                index,
                kind,
                position: positions.get(index).copied().unwrap_or(Vec3::ZERO),
                scale: 1.0,
            })
            .collect();

        Nucleus { particles }
    }
}

pub fn generate_nucleus_layout(protons: u32, neutrons: u32) -> Nucleus {
    NucleusBuilder::new(protons as usize, neutrons as usize).build()
}

fn layout_radius(total: usize) -> f32 {
    let total = total.max(1) as f32;
    NUCLEUS_MIN_RADIUS.max(total.cbrt() * NUCLEUS_LAYOUT_PER_CBRT) * NUCLEUS_LAYOUT_SHRINK
}

/// Golden-angle spiral; a single point collapses to the origin.
pub fn fibonacci_sphere(count: usize, radius: f32) -> Vec<Vec3> {
    if count <= 1 {
        return vec![Vec3::ZERO];
    }

    let offset = 2.0 / count as f32;
    let golden_angle = std::f32::consts::PI * (3.0 - 5.0_f32.sqrt());

    (0..count)
        .map(|i| {
            let y = (i as f32 * offset - 1.0) + offset / 2.0;
            let radius_xz = (1.0 - y * y).max(0.0).sqrt();
            let theta = golden_angle * i as f32;
            Vec3::new(theta.cos() * radius_xz, y, theta.sin() * radius_xz) * radius
        })
        .collect()
}
