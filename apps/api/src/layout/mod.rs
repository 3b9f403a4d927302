// Document rendering: templates, font metrics, block layout, pagination, PDF output.
// Layout and serialization are CPU-bound; handlers run them in tokio::task::spawn_blocking.

pub mod blocks;
pub mod font_metrics;
pub mod handlers;
pub mod page_fill;
pub mod pdf;
pub mod renderer;
pub mod template;

// Re-export the public API consumed by handlers.
pub use blocks::{DocumentKind, RenderedDocument};
pub use pdf::to_pdf;
pub use renderer::{render, render_bio, render_cover_letter};
pub use template::TemplateSpec;
