//! Static game data: piece shapes and the color palette.
//!
//! ## Key Types
//!
//! - `ShapeKind`: the twelve catalog shapes, in seeded-generation order
//! - `Color`: the six palette colors, in seeded-generation order
//! - `ShapeCatalog`: validated, process-wide shape registry

pub mod color;
pub mod registry;
pub mod shape;

pub use color::Color;
pub use registry::{bounding_box, shapes, Offsets, ShapeCatalog, ShapeDef};
pub use shape::ShapeKind;
