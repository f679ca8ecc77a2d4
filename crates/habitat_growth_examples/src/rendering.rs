//! Top-down PNG rendering of grown colonies.
use std::path::Path;

use glam::{Vec2, Vec3};
use habitat_growth::prelude::*;
use image::{Rgb, RgbImage};
use tracing_subscriber::EnvFilter;

/// Installs a formatting subscriber filtered by `RUST_LOG` (default `info`).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // try_init fails when a global subscriber is already set.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Image and color settings for [`render_colony_to_png`].
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Output size in pixels (width, height).
    pub image_size: (u32, u32),
    /// World-space XY extent shown in the image.
    pub domain_extent: Vec2,
    /// World-space XY center of the image.
    pub domain_center: Vec2,
    pub background: [u8; 3],
    /// Module color for the seed; later modules fade toward `late_color`.
    pub early_color: [u8; 3],
    pub late_color: [u8; 3],
    /// Disk radius in pixels.
    pub module_radius: i32,
    /// Terrain steeper than this is tinted red when a height field is supplied.
    pub slope_limit_deg: f32,
}

impl RenderConfig {
    pub fn new(image_size: (u32, u32), domain_extent: Vec2) -> Self {
        Self {
            image_size,
            domain_extent,
            domain_center: Vec2::ZERO,
            background: [24, 22, 28],
            early_color: [255, 214, 102],
            late_color: [96, 196, 255],
            module_radius: 4,
            slope_limit_deg: 30.0,
        }
    }

    pub fn with_background(mut self, background: [u8; 3]) -> Self {
        self.background = background;
        self
    }

    pub fn with_domain_center(mut self, domain_center: Vec2) -> Self {
        self.domain_center = domain_center;
        self
    }

    pub fn with_module_radius(mut self, module_radius: i32) -> Self {
        self.module_radius = module_radius;
        self
    }

    pub fn with_slope_limit_deg(mut self, slope_limit_deg: f32) -> Self {
        self.slope_limit_deg = slope_limit_deg;
        self
    }

    fn pixel_to_world(&self, px: u32, py: u32) -> Vec2 {
        let (w, h) = self.image_size;
        let u = (px as f32 + 0.5) / w as f32;
        // Image rows grow downward; world Y grows upward.
        let v = 1.0 - (py as f32 + 0.5) / h as f32;
        self.domain_center + (Vec2::new(u, v) - 0.5) * self.domain_extent
    }

    fn world_to_pixel(&self, p: Vec3) -> (i32, i32) {
        let (w, h) = self.image_size;
        let uv = (p.truncate() - self.domain_center) / self.domain_extent + 0.5;
        (
            (uv.x * w as f32).floor() as i32,
            ((1.0 - uv.y) * h as f32).floor() as i32,
        )
    }
}

fn lerp_color(a: [u8; 3], b: [u8; 3], t: f32) -> Rgb<u8> {
    let t = t.clamp(0.0, 1.0);
    Rgb(std::array::from_fn(|i| {
        (a[i] as f32 + (b[i] as f32 - a[i] as f32) * t).round() as u8
    }))
}

fn shade_terrain(img: &mut RgbImage, field: &HeightField, rc: &RenderConfig) {
    let (min_z, max_z) = (0..field.rows())
        .flat_map(|row| (0..field.cols()).map(move |col| (col, row)))
        .filter_map(|(col, row)| field.sample(col, row))
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), z| {
            (lo.min(z), hi.max(z))
        });
    let span = (max_z - min_z).max(1e-3);

    for (px, py, pixel) in img.enumerate_pixels_mut() {
        let xy = rc.pixel_to_world(px, py);
        let Some(hit) = field.project(xy.extend(max_z + 1.0), f32::INFINITY) else {
            continue;
        };
        let t = (hit.position.z - min_z) / span;
        let base = lerp_color(rc.background, [150, 140, 130], 0.25 + 0.75 * t);
        let steep = slope_deg(hit.normal, Vec3::Z).is_some_and(|s| s > rc.slope_limit_deg);
        *pixel = if steep {
            lerp_color(base.0, [190, 60, 50], 0.5)
        } else {
            base
        };
    }
}

fn draw_disk(img: &mut RgbImage, center: (i32, i32), radius: i32, color: Rgb<u8>) {
    let (w, h) = (img.width() as i32, img.height() as i32);
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy > radius * radius {
                continue;
            }
            let (x, y) = (center.0 + dx, center.1 + dy);
            if x >= 0 && y >= 0 && x < w && y < h {
                img.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}

/// Renders a colony seen from above, optionally over a shaded height field.
pub fn render_colony_to_png(
    colony: &Colony,
    terrain: Option<&HeightField>,
    rc: &RenderConfig,
    out_path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let (w, h) = rc.image_size;
    anyhow::ensure!(w > 0 && h > 0, "image size must be non-zero");

    let mut img = RgbImage::from_pixel(w, h, Rgb(rc.background));
    if let Some(field) = terrain {
        shade_terrain(&mut img, field, rc);
    }

    let last = colony
        .modules()
        .last()
        .map(|m| m.creation_index)
        .unwrap_or(0)
        .max(1);
    for module in colony.iter() {
        let t = module.creation_index as f32 / last as f32;
        let color = lerp_color(rc.early_color, rc.late_color, t);
        draw_disk(&mut img, rc.world_to_pixel(module.position), rc.module_radius, color);
    }
    draw_disk(
        &mut img,
        rc.world_to_pixel(colony.seed().position),
        rc.module_radius + 2,
        Rgb([255, 255, 255]),
    );

    img.save(out_path.as_ref())?;
    tracing::info!(
        "Wrote {} modules to {}.",
        colony.len(),
        out_path.as_ref().display()
    );
    Ok(())
}
