pub mod instance;
pub mod palette;

pub use instance::{AtomFrame, ParticleInstance, TrailStrip, TrailVertex};
pub use palette::Palette;
