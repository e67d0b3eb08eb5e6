// Layout engine: record → pages of positioned text and image operations.
// Pure and synchronous; see render::render for the full record → PDF path.

pub mod canvas;
pub mod engine;
pub mod error;
pub mod font_metrics;
pub mod wrap;

// Re-export the public API consumed by other modules (config, state, render).
pub use font_metrics::{default_page_config, PageConfig, PageSize};
