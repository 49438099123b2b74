//! Boundary-representation kernel for linear sweeps.
//!
//! A closed planar [`sketch::Sketch`] is extruded by [`ops::LinearSweepFeature`]
//! into a [`topo::BRepBody`]: vertices, edges carrying curves, and faces carrying
//! surfaces and edge loops. The body is validated against Euler's formula before
//! it is handed back, and then answers mass-property queries.
//!
//! ```rust
//! use brep_sweep::ops::LinearSweepFeature;
//! use brep_sweep::sketch::Sketch;
//!
//! let sketch = Sketch::rectangle(0.0, 0.0, 1.0, 1.0);
//! let body = LinearSweepFeature::builder()
//!     .sketch(sketch)
//!     .distance(2.0)
//!     .build()
//!     .generate()
//!     .unwrap();
//! assert_eq!(body.faces().len(), 6);
//! assert!((body.volume() - 2.0).abs() < 1e-9);
//! ```

pub mod curve;
pub mod error;
pub mod math;
pub mod nurbs;
pub mod ops;
pub mod profile;
pub mod settings;
pub mod sketch;
pub mod surface;
pub mod topo;

pub use error::{ErrorKind, TopologyError};
