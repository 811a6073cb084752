//! Chart projection: derived readouts, sparkline scaling and the scene track.

pub mod services;
pub mod track;
pub mod value_objects;

pub use services::*;
pub use track::*;
pub use value_objects::*;
