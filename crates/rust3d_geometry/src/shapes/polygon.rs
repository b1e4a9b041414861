use rust3d_math::{MathError, Vec2};
use serde::{Serialize, Deserialize};

/// Simple polygon in the plane
///
/// Vertices are expected in counter-clockwise order without
/// self-intersections. Only the vertex count is checked.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Polygon2 {
    vertices: Vec<Vec2>,
}

impl Polygon2 {
    /// Build a polygon from at least three vertices
    pub fn new(vertices: Vec<Vec2>) -> Result<Self, MathError> {
        if vertices.len() < 3 {
            return Err(MathError::TooFewVertices(vertices.len()));
        }
        Ok(Self { vertices })
    }

    #[inline]
    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// A polygon is never empty, [`Polygon2::new`] rejects fewer than
    /// three vertices
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Edges as `(start, end)` pairs, closing back to the first vertex
    pub fn edges(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Shoelace area, positive for counter-clockwise winding
    pub fn signed_area(&self) -> f32 {
        0.5 * self.edges().map(|(a, b)| a.perp_dot(b)).sum::<f32>()
    }

    pub fn is_counter_clockwise(&self) -> bool {
        self.signed_area() > 0.0
    }
}
