//! Indexed triangle mesh surface.
//!
//! Vertex normals are computed once at construction as area-weighted averages of
//! the adjacent face normals. Projection searches every triangle for the closest
//! point and interpolates the vertex normals barycentrically there. Triangles are
//! expected to wind counter-clockwise when seen from the side the normals
//! should face.
use glam::Vec3;

use crate::error::{Error, Result};
use crate::surface::{GeometryOracle, HeightField, SurfaceHit};

#[derive(Debug, Clone)]
pub struct TriangleMesh {
    vertices: Vec<Vec3>,
    triangles: Vec<[u32; 3]>,
    vertex_normals: Vec<Vec3>,
}

impl TriangleMesh {
    /// Creates a mesh, validating indices and computing vertex normals.
    pub fn new(vertices: Vec<Vec3>, triangles: Vec<[u32; 3]>) -> Result<Self> {
        if triangles.is_empty() {
            return Err(Error::InvalidSurface("mesh has no triangles".into()));
        }
        if vertices.iter().any(|v| !v.is_finite()) {
            return Err(Error::InvalidSurface("mesh vertices must be finite".into()));
        }
        if let Some(tri) = triangles
            .iter()
            .find(|tri| tri.iter().any(|&i| i as usize >= vertices.len()))
        {
            return Err(Error::InvalidSurface(format!(
                "triangle {tri:?} references a vertex outside 0..{}",
                vertices.len()
            )));
        }

        let vertex_normals = compute_vertex_normals(&vertices, &triangles);
        Ok(Self {
            vertices,
            triangles,
            vertex_normals,
        })
    }

    /// Triangulates a height field, two triangles per grid cell.
    pub fn from_height_field(field: &HeightField) -> Result<Self> {
        let cols = field.cols();
        let rows = field.rows();
        let mut vertices = Vec::with_capacity(cols * rows);
        for row in 0..rows {
            for col in 0..cols {
                let v = field
                    .vertex(col, row)
                    .ok_or_else(|| Error::InvalidSurface("height field sample missing".into()))?;
                vertices.push(v);
            }
        }

        let index = |col: usize, row: usize| (row * cols + col) as u32;
        let mut triangles = Vec::with_capacity((cols - 1) * (rows - 1) * 2);
        for row in 0..rows - 1 {
            for col in 0..cols - 1 {
                let a = index(col, row);
                let b = index(col + 1, row);
                let c = index(col + 1, row + 1);
                let d = index(col, row + 1);
                triangles.push([a, b, c]);
                triangles.push([a, c, d]);
            }
        }

        Self::new(vertices, triangles)
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    pub fn vertex_normals(&self) -> &[Vec3] {
        &self.vertex_normals
    }

    fn corners(&self, tri: &[u32; 3]) -> [Vec3; 3] {
        tri.map(|i| self.vertices[i as usize])
    }
}

fn compute_vertex_normals(vertices: &[Vec3], triangles: &[[u32; 3]]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; vertices.len()];
    for tri in triangles {
        let [a, b, c] = tri.map(|i| vertices[i as usize]);
        // Unnormalized cross product weights each face by twice its area.
        let face = (b - a).cross(c - a);
        for &i in tri {
            normals[i as usize] += face;
        }
    }
    normals.iter().map(|n| n.normalize_or_zero()).collect()
}

/// Closest point on triangle `abc` to `p`, with barycentric weights for `a`, `b`, `c`.
fn closest_point_on_triangle(p: Vec3, a: Vec3, b: Vec3, c: Vec3) -> (Vec3, Vec3) {
    let ab = b - a;
    let ac = c - a;
    let ap = p - a;
    let d1 = ab.dot(ap);
    let d2 = ac.dot(ap);
    if d1 <= 0.0 && d2 <= 0.0 {
        return (a, Vec3::X);
    }

    let bp = p - b;
    let d3 = ab.dot(bp);
    let d4 = ac.dot(bp);
    if d3 >= 0.0 && d4 <= d3 {
        return (b, Vec3::Y);
    }

    let vc = d1 * d4 - d3 * d2;
    if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
        let v = d1 / (d1 - d3);
        return (a + ab * v, Vec3::new(1.0 - v, v, 0.0));
    }

    let cp = p - c;
    let d5 = ab.dot(cp);
    let d6 = ac.dot(cp);
    if d6 >= 0.0 && d5 <= d6 {
        return (c, Vec3::Z);
    }

    let vb = d5 * d2 - d1 * d6;
    if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
        let w = d2 / (d2 - d6);
        return (a + ac * w, Vec3::new(1.0 - w, 0.0, w));
    }

    let va = d3 * d6 - d5 * d4;
    if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 {
        let w = (d4 - d3) / ((d4 - d3) + (d5 - d6));
        return (b + (c - b) * w, Vec3::new(0.0, 1.0 - w, w));
    }

    let denom = 1.0 / (va + vb + vc);
    let v = vb * denom;
    let w = vc * denom;
    (a + ab * v + ac * w, Vec3::new(1.0 - v - w, v, w))
}

impl GeometryOracle for TriangleMesh {
    fn project(&self, point: Vec3, search_radius: f32) -> Option<SurfaceHit> {
        let limit = search_radius * search_radius;
        let mut best: Option<(f32, usize, Vec3, Vec3)> = None;

        for (index, tri) in self.triangles.iter().enumerate() {
            let [a, b, c] = self.corners(tri);
            let (closest, weights) = closest_point_on_triangle(point, a, b, c);
            let d2 = closest.distance_squared(point);
            if !d2.is_finite() || d2 > limit {
                continue;
            }
            if best.is_none_or(|(best_d2, ..)| d2 < best_d2) {
                best = Some((d2, index, closest, weights));
            }
        }

        let (_, index, position, weights) = best?;
        let tri = self.triangles[index];
        let interpolated = self.vertex_normals[tri[0] as usize] * weights.x
            + self.vertex_normals[tri[1] as usize] * weights.y
            + self.vertex_normals[tri[2] as usize] * weights.z;
        let normal = interpolated.try_normalize().or_else(|| {
            let [a, b, c] = self.corners(&tri);
            (b - a).cross(c - a).try_normalize()
        })?;

        Some(SurfaceHit { position, normal })
    }
}
