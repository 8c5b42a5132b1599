//! Obstacles that agents must navigate around.
//!
//! Obstacles are polymorphic over the [`Obstacle`] trait so additional shapes
//! can be added without touching sensor or agent logic. Only circles exist so
//! far, optionally oscillating vertically between two bounds.

use ndarray::Array1;

use super::geometry;

/// Capability shared by every obstacle shape.
///
/// Sensors query `intersect` against their current segment, agents query
/// `collides` against their body, and the arena calls `advance` once per tick
/// before any agent updates.
pub trait Obstacle: Send + Sync {
    /// Stable unique identity; never changes after construction.
    fn id(&self) -> usize;

    /// Entry point of the segment into this obstacle, if any.
    fn intersect(&self, start: &Array1<f32>, end: &Array1<f32>) -> Option<Array1<f32>>;

    /// Whether a body at `center` with the given radius touches this obstacle.
    fn collides(&self, center: &Array1<f32>, radius: f32) -> bool;

    /// Moves the obstacle by one tick. Static obstacles do nothing.
    fn advance(&mut self, dt: f32);

    /// Current position, for the rendering layer.
    fn position(&self) -> Array1<f32>;
}

/// Vertical oscillation bounds for a moving obstacle.
#[derive(Debug, Clone)]
pub struct Oscillation {
    /// Upper travel bound (smaller y).
    pub min_y: f32,
    /// Lower travel bound (larger y).
    pub max_y: f32,
    /// Travel speed in units per second.
    pub speed: f32,
}

/// A circular obstacle, the only concrete shape so far.
#[derive(Debug, Clone)]
pub struct Circle {
    /// Unique obstacle id.
    pub id: usize,
    /// Center position.
    pub pos: Array1<f32>,
    /// Circle radius.
    pub radius: f32,
    oscillation: Option<Oscillation>,
    direction: f32,
}

impl Circle {
    /// Creates a static circle.
    pub fn new(id: usize, x: f32, y: f32, radius: f32) -> Self {
        Self {
            id,
            pos: Array1::from_vec(vec![x, y]),
            radius,
            oscillation: None,
            direction: 1.0,
        }
    }

    /// Creates a circle that oscillates vertically between the given bounds.
    pub fn oscillating(id: usize, x: f32, y: f32, radius: f32, oscillation: Oscillation) -> Self {
        Self {
            id,
            pos: Array1::from_vec(vec![x, y]),
            radius,
            oscillation: Some(oscillation),
            direction: 1.0,
        }
    }
}

impl Obstacle for Circle {
    fn id(&self) -> usize {
        self.id
    }

    fn intersect(&self, start: &Array1<f32>, end: &Array1<f32>) -> Option<Array1<f32>> {
        geometry::segment_circle_intersection(start, end, &self.pos, self.radius)
    }

    fn collides(&self, center: &Array1<f32>, radius: f32) -> bool {
        geometry::distance(&self.pos, center) < self.radius + radius
    }

    fn advance(&mut self, dt: f32) {
        if let Some(oscillation) = &self.oscillation {
            if self.pos[1] >= oscillation.max_y {
                self.direction = -1.0;
            } else if self.pos[1] <= oscillation.min_y {
                self.direction = 1.0;
            }
            self.pos[1] += oscillation.speed * self.direction * dt;
        }
    }

    fn position(&self) -> Array1<f32> {
        self.pos.clone()
    }
}
