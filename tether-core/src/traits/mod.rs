//! Hardware abstraction traits
//!
//! These traits define the interface between the connector logic and
//! board-specific implementations. Serial and pin traits live in
//! `tether-hal`; only connector-level seams are defined here.

pub mod indicator;

pub use indicator::{Indicator, NoIndicator};
