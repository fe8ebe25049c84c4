// Layout: measures content blocks, paginates them onto fixed-size pages and
// hands the resulting render plan to a drawing backend.
// Pagination is CPU-bound and must run inside tokio::task::spawn_blocking.

pub mod blocks;
pub mod engine;
pub mod font_metrics;
pub mod plan;
pub mod renderer;

// Re-export the public API consumed by the composer and handlers.
pub use engine::LayoutEngine;
pub use plan::RenderPlan;
pub use renderer::{render, TextRenderer};
