use glam::Vec3;
use std::f32::consts::TAU;

use crate::VizError;

/// Static (x, z) arrangement of the particles, chosen at construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Layout {
    /// Square lattice centered on the origin, `extent` world units wide.
    ///
    /// Cells are taken in mirrored pairs from both ends of the lattice, so
    /// a non-square count leaves the gap in the middle rows and the field
    /// stays point-symmetric. An odd count puts its middle particle at the
    /// origin.
    Grid { extent: f32 },
    /// Spiral winding `loops` times from `max_radius` in to the center.
    Spiral { loops: f32, max_radius: f32 },
}

impl Layout {
    pub fn validate(&self) -> Result<(), VizError> {
        match *self {
            Layout::Grid { extent } if !(extent.is_finite() && extent > 0.0) => Err(
                VizError::InvalidConfig(format!("grid extent must be positive, got {extent}")),
            ),
            Layout::Spiral { loops, .. } if !(loops.is_finite() && loops > 0.0) => Err(
                VizError::InvalidConfig(format!("spiral loops must be positive, got {loops}")),
            ),
            Layout::Spiral { max_radius, .. } if !(max_radius.is_finite() && max_radius > 0.0) => {
                Err(VizError::InvalidConfig(format!(
                    "spiral radius must be positive, got {max_radius}"
                )))
            }
            _ => Ok(()),
        }
    }

    /// Position of particle `index` out of `count`, with y = 0.
    pub fn position(&self, index: usize, count: usize) -> Vec3 {
        match *self {
            Layout::Grid { extent } => {
                let side = grid_side(count);
                let half = count / 2;
                let cell = if index < half {
                    index
                } else if index >= count - half {
                    side * side - (count - index)
                } else {
                    return Vec3::ZERO;
                };
                let spacing = extent / side as f32;
                let center = (side as f32 - 1.0) / 2.0;
                let col = (cell % side) as f32;
                let row = (cell / side) as f32;
                Vec3::new((col - center) * spacing, 0.0, (row - center) * spacing)
            }
            Layout::Spiral { loops, max_radius } => {
                let t = (index as f32 / count as f32) * TAU * loops;
                let radius = max_radius * (loops - t / TAU) / loops;
                Vec3::new(t.cos() * radius, 0.0, t.sin() * radius)
            }
        }
    }
}

/// Side length of the smallest square lattice holding `count` particles.
#[inline]
pub fn grid_side(count: usize) -> usize {
    ((count as f64).sqrt().ceil() as usize).max(1)
}

/// Fixed set of particles; only `y` changes after construction.
#[derive(Clone, Debug)]
pub struct ParticleField {
    positions: Vec<Vec3>,
}

impl ParticleField {
    pub fn initialize(count: usize, layout: &Layout) -> Result<Self, VizError> {
        if count == 0 {
            return Err(VizError::InvalidConfig("particle count must be > 0".into()));
        }
        layout.validate()?;
        let positions = (0..count).map(|i| layout.position(i, count)).collect();
        Ok(Self { positions })
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Rewrite every particle's height from its (x, z).
    pub fn apply_heights(&mut self, mut height: impl FnMut(f32, f32) -> f32) {
        for p in &mut self.positions {
            p.y = height(p.x, p.z);
        }
    }

    pub(crate) fn release(&mut self) {
        self.positions = Vec::new();
    }
}
