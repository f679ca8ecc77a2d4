#![forbid(unsafe_code)]

mod rendering;
mod terrain;

pub use rendering::{init_tracing, render_colony_to_png, RenderConfig};
pub use terrain::{crater, ridge, rolling_hills};
