pub mod engines;
pub mod factory;
pub mod transformers;

pub use factory::{Function, TransformFactory};
