// src/arena.rs
//
// Fixed battle region. A contestant is only eligible for engagement while its
// center point sits inside this polygon; the boundary itself counts as inside.

use crate::types::ArenaConfig;

/// Closed polygon in frame-pixel coordinates defining the legal battle surface.
/// Immutable for the session.
#[derive(Debug, Clone)]
pub struct Arena {
    vertices: Vec<(f32, f32)>,
}

/// Squared-distance tolerance for treating a point as lying on an edge.
const BOUNDARY_EPSILON: f64 = 1e-6;

impl Arena {
    pub fn new(vertices: Vec<(f32, f32)>) -> Self {
        Self { vertices }
    }

    pub fn from_config(config: &ArenaConfig) -> Self {
        Self::new(config.vertices.clone())
    }

    pub fn vertices(&self) -> &[(f32, f32)] {
        &self.vertices
    }

    /// Boundary-inclusive point containment, even-odd rule.
    ///
    /// Fails closed: a degenerate polygon (< 3 vertices) or a non-finite
    /// point is never contained.
    pub fn contains(&self, point: (f32, f32)) -> bool {
        let n = self.vertices.len();
        if n < 3 || !point.0.is_finite() || !point.1.is_finite() {
            return false;
        }

        let (px, py) = (point.0 as f64, point.1 as f64);

        // Boundary check first: a point on any edge is inside
        let mut j = n - 1;
        for i in 0..n {
            let (ax, ay) = (self.vertices[j].0 as f64, self.vertices[j].1 as f64);
            let (bx, by) = (self.vertices[i].0 as f64, self.vertices[i].1 as f64);
            if distance_to_segment_sq(px, py, ax, ay, bx, by) <= BOUNDARY_EPSILON {
                return true;
            }
            j = i;
        }

        // Even-odd crossing count
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let (xi, yi) = (self.vertices[i].0 as f64, self.vertices[i].1 as f64);
            let (xj, yj) = (self.vertices[j].0 as f64, self.vertices[j].1 as f64);

            if (yi > py) != (yj > py) {
                let x_cross = (xj - xi) * (py - yi) / (yj - yi) + xi;
                if px < x_cross {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }
}

fn distance_to_segment_sq(px: f64, py: f64, ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    let (dx, dy) = (bx - ax, by - ay);
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq > 0.0 {
        (((px - ax) * dx + (py - ay) * dy) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let (cx, cy) = (ax + t * dx, ay + t * dy);
    (px - cx) * (px - cx) + (py - cy) * (py - cy)
}
