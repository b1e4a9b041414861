//! Point-in-polygon tests
//!
//! Two conventions live here. [`crossing_parity`] is the classic
//! even-odd ray cast: an edge counts when it straddles the query row
//! with one endpoint strictly above, and only crossings strictly to the
//! right of the point toggle the parity. Points exactly on a right or
//! top edge therefore come out as outside. The [`Contains`] impl is
//! closed: it accepts anything within [`EPSILON`] of an edge before
//! falling back to the parity test.

use rust3d_math::{Vec2, EPSILON};

use super::Contains;
use crate::distance::point_segment2;
use crate::shapes::{Polygon2, Segment2};

/// Even-odd crossing test with half-open edge handling
pub fn crossing_parity(polygon: &Polygon2, point: Vec2) -> bool {
    let mut inside = false;
    for (a, b) in polygon.edges() {
        if (a.y > point.y) != (b.y > point.y) {
            let x = a.x + (point.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if point.x < x {
                inside = !inside;
            }
        }
    }
    inside
}

/// True when `point` lies within [`EPSILON`] of some edge
pub fn on_boundary(polygon: &Polygon2, point: Vec2) -> bool {
    polygon.edges().any(|(a, b)| {
        point_segment2(point, &Segment2::from_endpoints(a, b)).squared_distance <= EPSILON * EPSILON
    })
}

impl Contains<Vec2> for Polygon2 {
    fn contains(&self, point: &Vec2) -> bool {
        on_boundary(self, *point) || crossing_parity(self, *point)
    }
}
