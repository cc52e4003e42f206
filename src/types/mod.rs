//! Shared data model for the digitization → measurement → classification →
//! visualization pipeline. Every stage communicates exclusively through these
//! types; none of them carry behavior beyond constructors and serde.

mod archetype;
mod bitmap;
mod contract;
mod grid;
mod lead;
mod measurement;

pub use archetype::*;
pub use bitmap::*;
pub use contract::*;
pub use grid::*;
pub use lead::*;
pub use measurement::*;
