//! Process-wide shape registry.
//!
//! Built once on first use from the static shape table and validated at
//! that moment. A validation failure is a defect in the table itself, so it
//! panics instead of surfacing as a runtime error.

use std::sync::OnceLock;

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use super::shape::ShapeKind;
use crate::core::{CatalogError, Position};

/// Offsets of a single shape. Nine cells covers the 3×3 square.
pub type Offsets = SmallVec<[Position; 9]>;

/// A validated shape with its bounding box.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShapeDef {
    pub kind: ShapeKind,
    pub offsets: Offsets,
    pub width: i32,
    pub height: i32,
}

impl ShapeDef {
    fn build(kind: ShapeKind) -> Self {
        let offsets: Offsets = kind
            .cells()
            .iter()
            .map(|&(row, col)| Position::new(row, col))
            .collect();
        let (width, height) = bounding_box(&offsets);
        let def = Self {
            kind,
            offsets,
            width,
            height,
        };
        def.check();
        def
    }

    fn check(&self) {
        assert!(!self.offsets.is_empty(), "shape {} has no cells", self.kind);

        let min_row = self.offsets.iter().map(|p| p.row).min().unwrap_or(0);
        let min_col = self.offsets.iter().map(|p| p.col).min().unwrap_or(0);
        assert!(
            min_row == 0 && min_col == 0,
            "shape {} is not anchored at the origin",
            self.kind
        );

        let unique: FxHashSet<Position> = self.offsets.iter().copied().collect();
        assert_eq!(
            unique.len(),
            self.offsets.len(),
            "shape {} repeats a cell",
            self.kind
        );
    }

    /// Number of cells in the shape.
    #[must_use]
    pub fn size(&self) -> usize {
        self.offsets.len()
    }
}

/// Width and height of the smallest box holding every offset.
#[must_use]
pub fn bounding_box(offsets: &[Position]) -> (i32, i32) {
    let max_row = offsets.iter().map(|p| p.row).max().unwrap_or(-1);
    let max_col = offsets.iter().map(|p| p.col).max().unwrap_or(-1);
    (max_col + 1, max_row + 1)
}

/// All shapes, keyed by kind and by stored name.
#[derive(Debug)]
pub struct ShapeCatalog {
    shapes: FxHashMap<ShapeKind, ShapeDef>,
    by_name: FxHashMap<&'static str, ShapeKind>,
}

impl ShapeCatalog {
    fn build() -> Self {
        let mut shapes = FxHashMap::default();
        let mut by_name = FxHashMap::default();
        for kind in ShapeKind::ALL {
            if by_name.insert(kind.name(), kind).is_some() {
                panic!("Shape name {} already registered", kind.name());
            }
            shapes.insert(kind, ShapeDef::build(kind));
        }
        Self { shapes, by_name }
    }

    /// Definition of a shape. Every kind is registered, so this cannot miss.
    #[must_use]
    pub fn get(&self, kind: ShapeKind) -> &ShapeDef {
        self.shapes
            .get(&kind)
            .expect("every ShapeKind is registered at build time")
    }

    /// Resolve a stored shape name.
    pub fn lookup(&self, name: &str) -> Result<ShapeKind, CatalogError> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| CatalogError::UnknownShape(name.to_string()))
    }

    /// Resolve a stored shape name, panicking on an unknown one.
    ///
    /// Use for names that come from the engine's own data.
    #[must_use]
    pub fn lookup_unchecked(&self, name: &str) -> &ShapeDef {
        match self.lookup(name) {
            Ok(kind) => self.get(kind),
            Err(err) => panic!("{err}"),
        }
    }

    /// Number of registered shapes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Always false once built.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Shapes in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &ShapeDef> {
        ShapeKind::ALL.iter().map(move |k| self.get(*k))
    }
}

static SHAPES: OnceLock<ShapeCatalog> = OnceLock::new();

/// The shared shape catalog.
pub fn shapes() -> &'static ShapeCatalog {
    SHAPES.get_or_init(ShapeCatalog::build)
}
