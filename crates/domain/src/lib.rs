//! Domain layer for cambai
//!
//! Value objects and entities describing tasks, runs and their result
//! artifacts. This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
