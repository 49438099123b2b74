//! Arena-based topology for swept bodies.
//!
//! Vertices, edges and faces are stored in a central `BRepBody` and referenced
//! via typed index handles. Loops refer to shared edges through oriented uses.

mod mass;
pub mod store;
pub mod types;
pub mod validate;

pub use store::BRepBody;
pub use types::*;
pub use validate::{validate_body, ValidationResult};
