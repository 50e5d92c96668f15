pub mod electron;
pub mod elements;
pub mod nucleus;
pub mod shells;
