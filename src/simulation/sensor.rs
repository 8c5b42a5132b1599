//! Ray sensors that agents use to measure distance to nearby obstacles.
//!
//! A sensor is a line segment attached to the agent's body. Each tick it is
//! repositioned from the agent's pose, tested against every obstacle, and
//! left holding a single scalar reading: the distance to the nearest
//! intersecting obstacle, or `max_range` when nothing is in the way. Those
//! readings, normalized, are the inputs of the agent's brain.

use std::collections::HashSet;

use ndarray::Array1;

use super::geometry;
use super::obstacle::Obstacle;

/// A single ray sensor with nearest-obstacle arbitration.
///
/// When several obstacles cross the ray at once the sensor reports the
/// nearest of them. When that obstacle leaves range the sensor falls back to
/// the nearest of the remaining ones instead of jumping straight to
/// `max_range`.
#[derive(Debug, Clone)]
pub struct Sensor {
    /// Angular offset from the agent's heading, radians.
    offset: f32,
    /// Maximum sensing distance.
    max_range: f32,
    /// Current reading, always within `[0, max_range]`.
    reading: f32,
    /// Segment origin, at the edge of the agent's body.
    origin: Array1<f32>,
    /// Segment end, `max_range` beyond the origin.
    end: Array1<f32>,
    /// Id of the obstacle currently deciding the reading.
    engaged: Option<usize>,
    /// Ids of every obstacle intersecting the ray this tick.
    in_range: HashSet<usize>,
}

impl Sensor {
    /// Creates a sensor at the given angular offset from the agent heading.
    pub fn new(offset: f32, max_range: f32) -> Self {
        Self {
            offset,
            max_range,
            reading: max_range,
            origin: Array1::zeros(2),
            end: Array1::zeros(2),
            engaged: None,
            in_range: HashSet::new(),
        }
    }

    /// Recomputes the segment endpoints from the owning agent's pose, so the
    /// sensor stays attached to the body edge.
    pub fn reposition(&mut self, agent_pos: &Array1<f32>, heading: f32, body_size: f32) {
        let angle = self.offset + heading;
        let (sin, cos) = angle.sin_cos();
        self.origin = Array1::from_vec(vec![
            agent_pos[0] + body_size * cos,
            agent_pos[1] + body_size * sin,
        ]);
        self.end = Array1::from_vec(vec![
            agent_pos[0] + (body_size + self.max_range) * cos,
            agent_pos[1] + (body_size + self.max_range) * sin,
        ]);
    }

    /// Tests one obstacle against the current segment and keeps the in-range
    /// set up to date.
    ///
    /// # Returns
    ///
    /// The entry point when the obstacle crosses the ray, `None` otherwise.
    /// On a hit, follow up with [`Sensor::resolve`]; on a miss, with
    /// [`Sensor::disengage`].
    pub fn test_obstacle(&mut self, obstacle: &dyn Obstacle) -> Option<Array1<f32>> {
        let hit = obstacle.intersect(&self.origin, &self.end);
        if hit.is_some() {
            self.in_range.insert(obstacle.id());
        } else {
            self.in_range.remove(&obstacle.id());
        }
        hit
    }

    /// Arbitrates between the hit obstacle and the currently engaged one.
    ///
    /// If no obstacle is engaged, or the same obstacle hit again, it becomes
    /// the engaged obstacle and the reading is refreshed. A different
    /// obstacle takes over only when it is strictly closer; ties keep the
    /// incumbent so the engagement cannot oscillate. Called once per
    /// intersecting obstacle per tick, this is a streaming minimum over the
    /// tick's candidates.
    pub fn resolve(&mut self, obstacle_id: usize, point: &Array1<f32>) {
        debug_assert!(
            self.in_range.contains(&obstacle_id),
            "resolved obstacle {obstacle_id} is not in range"
        );
        let distance = geometry::distance(&self.origin, point);
        match self.engaged {
            Some(current) if current != obstacle_id => {
                if distance < self.reading {
                    self.engaged = Some(obstacle_id);
                    self.reading = distance;
                }
            }
            _ => {
                self.engaged = Some(obstacle_id);
                self.reading = distance;
            }
        }
    }

    /// Handles an obstacle that no longer crosses the ray.
    ///
    /// If the leaving obstacle was not the engaged one nothing happens (the
    /// in-range set was already updated by [`Sensor::test_obstacle`]). If it
    /// was, the reading is recomputed as the true minimum intersection
    /// distance over the obstacles still in range, or reset to `max_range`
    /// when none remain.
    pub fn disengage(&mut self, obstacle_id: usize, obstacles: &[Box<dyn Obstacle>]) {
        if self.engaged != Some(obstacle_id) {
            return;
        }
        self.engaged = None;
        self.reading = self.max_range;
        for obstacle in obstacles {
            if !self.in_range.contains(&obstacle.id()) {
                continue;
            }
            if let Some(point) = obstacle.intersect(&self.origin, &self.end) {
                let distance = geometry::distance(&self.origin, &point);
                if distance < self.reading {
                    self.reading = distance;
                    self.engaged = Some(obstacle.id());
                }
            }
        }
    }

    /// Current reading in `[0, max_range]`.
    pub fn reading(&self) -> f32 {
        self.reading
    }

    /// Reading scaled to `[0, 1]`, where 1.0 means nothing detected.
    pub fn normalized_reading(&self) -> f32 {
        self.reading / self.max_range
    }

    /// Maximum sensing distance.
    pub fn max_range(&self) -> f32 {
        self.max_range
    }

    /// Angular offset from the agent heading, radians.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Segment origin, for the rendering layer.
    pub fn origin(&self) -> &Array1<f32> {
        &self.origin
    }

    /// Segment end, for the rendering layer.
    pub fn end(&self) -> &Array1<f32> {
        &self.end
    }

    /// Whether some obstacle currently decides the reading.
    pub fn is_engaged(&self) -> bool {
        self.engaged.is_some()
    }

    /// Id of the obstacle currently deciding the reading.
    pub fn engaged_obstacle(&self) -> Option<usize> {
        self.engaged
    }
}
