pub mod atom;
pub mod motion;
pub mod rng;
