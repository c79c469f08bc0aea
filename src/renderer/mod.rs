//! Render adapter boundary
//!
//! Renderers only ever see a `Snapshot`; they never touch race state.
//! `shapes` holds the pure road geometry, `canvas` draws it with Canvas2D on
//! the web, and `hud` is a log-only sink for headless runs.

pub mod hud;
pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use hud::HudLogger;

use crate::session::Snapshot;

/// Something that can draw a frame
pub trait RenderSink {
    fn draw(&mut self, snapshot: &Snapshot<'_>);
}
