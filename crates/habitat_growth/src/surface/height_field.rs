//! Regular-grid height field surface.
//!
//! Heights are stored row-major with `cols` samples along X and `rows` samples
//! along Y, spaced `cell_size` apart starting at `origin`. Between samples the
//! surface is bilinear. Projection drops a point vertically onto the surface,
//! which approximates the nearest point for gently varying terrain.
use glam::{Vec2, Vec3};

use crate::error::{Error, Result};
use crate::surface::{GeometryOracle, SurfaceHit};

#[derive(Debug, Clone)]
pub struct HeightField {
    origin: Vec2,
    cell_size: f32,
    cols: usize,
    rows: usize,
    heights: Vec<f32>,
}

impl HeightField {
    /// Creates a height field from row-major samples.
    pub fn new(
        origin: Vec2,
        cell_size: f32,
        cols: usize,
        rows: usize,
        heights: Vec<f32>,
    ) -> Result<Self> {
        if cols < 2 || rows < 2 {
            return Err(Error::InvalidSurface(
                "height field needs at least 2x2 samples".into(),
            ));
        }
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(Error::InvalidSurface("cell_size must be > 0".into()));
        }
        if !origin.is_finite() {
            return Err(Error::InvalidSurface("origin must be finite".into()));
        }
        if heights.len() != cols * rows {
            return Err(Error::InvalidSurface(format!(
                "expected {} height samples, got {}",
                cols * rows,
                heights.len()
            )));
        }
        if heights.iter().any(|h| !h.is_finite()) {
            return Err(Error::InvalidSurface("heights must be finite".into()));
        }

        Ok(Self {
            origin,
            cell_size,
            cols,
            rows,
            heights,
        })
    }

    /// Samples `f(x, y)` at every grid point.
    pub fn from_fn(
        origin: Vec2,
        cell_size: f32,
        cols: usize,
        rows: usize,
        mut f: impl FnMut(f32, f32) -> f32,
    ) -> Result<Self> {
        let len = cols.checked_mul(rows).ok_or_else(|| {
            Error::InvalidSurface(format!("{cols}x{rows} samples overflow the grid size"))
        })?;
        let mut heights = Vec::with_capacity(len);
        for row in 0..rows {
            for col in 0..cols {
                let x = origin.x + col as f32 * cell_size;
                let y = origin.y + row as f32 * cell_size;
                heights.push(f(x, y));
            }
        }
        Self::new(origin, cell_size, cols, rows, heights)
    }

    /// Flat field at height `z`, centered on the origin with the given extent.
    pub fn flat(extent: f32, cell_size: f32, z: f32) -> Result<Self> {
        if !extent.is_finite() || extent <= 0.0 {
            return Err(Error::InvalidSurface("extent must be finite and > 0".into()));
        }
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(Error::InvalidSurface("cell_size must be > 0".into()));
        }
        let cells = (extent / cell_size).ceil().max(1.0);
        if cells >= u32::MAX as f32 {
            return Err(Error::InvalidSurface(format!(
                "extent {extent} needs too many cells of size {cell_size}"
            )));
        }
        let cells = cells as usize;
        let half = cells as f32 * cell_size * 0.5;
        Self::from_fn(
            Vec2::splat(-half),
            cell_size,
            cells + 1,
            cells + 1,
            |_, _| z,
        )
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// World-space XY extent covered by the samples.
    pub fn extent(&self) -> Vec2 {
        Vec2::new(
            (self.cols - 1) as f32 * self.cell_size,
            (self.rows - 1) as f32 * self.cell_size,
        )
    }

    /// Height sample at a grid index.
    pub fn sample(&self, col: usize, row: usize) -> Option<f32> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        Some(self.heights[row * self.cols + col])
    }

    /// World position of a grid sample.
    pub fn vertex(&self, col: usize, row: usize) -> Option<Vec3> {
        let z = self.sample(col, row)?;
        Some(Vec3::new(
            self.origin.x + col as f32 * self.cell_size,
            self.origin.y + row as f32 * self.cell_size,
            z,
        ))
    }

    /// Interpolated height at world XY, or `None` outside the grid.
    pub fn height_at(&self, xy: Vec2) -> Option<f32> {
        self.surface_at(xy).map(|(z, _)| z)
    }

    fn surface_at(&self, xy: Vec2) -> Option<(f32, Vec3)> {
        let local = (xy - self.origin) / self.cell_size;
        let max_x = (self.cols - 1) as f32;
        let max_y = (self.rows - 1) as f32;
        if !local.is_finite() || local.x < 0.0 || local.y < 0.0 || local.x > max_x || local.y > max_y
        {
            return None;
        }

        let col = (local.x.floor() as usize).min(self.cols - 2);
        let row = (local.y.floor() as usize).min(self.rows - 2);
        let tx = local.x - col as f32;
        let ty = local.y - row as f32;

        let h00 = self.heights[row * self.cols + col];
        let h10 = self.heights[row * self.cols + col + 1];
        let h01 = self.heights[(row + 1) * self.cols + col];
        let h11 = self.heights[(row + 1) * self.cols + col + 1];

        let z = h00 * (1.0 - tx) * (1.0 - ty)
            + h10 * tx * (1.0 - ty)
            + h01 * (1.0 - tx) * ty
            + h11 * tx * ty;

        // Analytic gradient of the bilinear patch, in world units.
        let dz_dx = ((1.0 - ty) * (h10 - h00) + ty * (h11 - h01)) / self.cell_size;
        let dz_dy = ((1.0 - tx) * (h01 - h00) + tx * (h11 - h10)) / self.cell_size;
        let normal = Vec3::new(-dz_dx, -dz_dy, 1.0).normalize();

        Some((z, normal))
    }
}

impl GeometryOracle for HeightField {
    fn project(&self, point: Vec3, search_radius: f32) -> Option<SurfaceHit> {
        let (z, normal) = self.surface_at(point.truncate())?;
        let position = point.truncate().extend(z);
        if position.distance(point) > search_radius {
            return None;
        }
        Some(SurfaceHit { position, normal })
    }
}
