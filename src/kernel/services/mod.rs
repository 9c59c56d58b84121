//! Services layer (ports + adapters).
//!
//! - `ports`: settings types shared by the kernel and adapters.
//! - `adapters`: filesystem specific implementations.

pub mod adapters;
pub mod ports;
