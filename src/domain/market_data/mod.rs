//! Instruments and the synthetic series they produce.

pub mod catalog;
pub mod entities;
pub mod simulator;
pub mod value_objects;

pub use catalog::*;
pub use entities::*;
pub use simulator::*;
pub use value_objects::*;
