#[allow(unused_imports)]
use log::{debug, info, warn, error};

use crate::invariant::{require, InvariantViolation};

/// Descriptor for a named drawing surface wired up by the host before the
/// carousel is constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceSpec {
    pub name: String,
    pub width: f32,
    pub height: f32,
}

impl SurfaceSpec {
    /// The drawable region of this surface, if it has one. A zero-sized
    /// surface exposes no paint area.
    pub fn paint_area(&self) -> Option<PaintArea> {
        if self.width > 0.0 && self.height > 0.0 {
            Some(PaintArea {
                width: self.width,
                height: self.height,
            })
        } else {
            None
        }
    }
}

/// Validated drawable dimensions of a resolved surface. The carousel fixes
/// its slot width to `width` at construction and never recomputes it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaintArea {
    pub width: f32,
    pub height: f32,
}

/// Named surfaces known to the host, looked up once at construction time.
#[derive(Debug, Default)]
pub struct SurfaceRegistry {
    specs: Vec<SurfaceSpec>,
}

impl SurfaceRegistry {
    pub fn new() -> Self {
        Self { specs: Vec::new() }
    }

    /// Registers a surface, replacing any earlier spec with the same name.
    pub fn register(&mut self, spec: SurfaceSpec) {
        if let Some(existing) = self.specs.iter_mut().find(|s| s.name == spec.name) {
            *existing = spec;
        } else {
            self.specs.push(spec);
        }
    }

    pub fn find(&self, name: &str) -> Option<&SurfaceSpec> {
        self.specs.iter().find(|s| s.name == name)
    }

    /// Resolves a surface to its paint area. Both failure shapes abort
    /// construction: an unregistered name, and a registered surface without
    /// a drawable area.
    pub fn resolve(&self, name: &str) -> Result<PaintArea, InvariantViolation> {
        let spec = require(
            self.find(name),
            &format!("drawing surface '{}' not found", name),
        )?;
        require(
            spec.paint_area(),
            &format!("drawing surface '{}' has no drawable area", name),
        )
    }
}
