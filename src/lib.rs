//! Quasiperiodic rhombic tilings of the plane by the cut-and-project
//! method.
//!
//! A 2-plane is placed in an integer lattice of dimension 3 to 8. The
//! lattice points inside the cylinder swept by moving the unit
//! hypercube along the plane project onto the plane as the vertices of
//! a tiling whose edges are the projected lattice directions.
//!
//! [`tiling::Tiling`] holds the geometry, [`drawing::Drawing`] collects
//! the vertices of a window and groups them into tiles, and
//! [`session::Session`] runs the whole job on a worker thread that can
//! be stopped.

#[macro_use]
extern crate error_chain;

pub mod errors;
pub mod geometry;
pub mod report;
pub mod tiling;
pub mod drawing;
pub mod palette;
pub mod session;

#[cfg(feature = "render")]
pub mod render;

pub use crate::drawing::{Drawing, TileSet};
pub use crate::geometry::{LatticePoint, PlanePoint, Window};
pub use crate::report::{Interruptor, Outcome, PointReporter, Uninterrupted};
pub use crate::session::{GenerationRequest, Poll, Session};
pub use crate::tiling::{PlaneGenerators, Tiling};
