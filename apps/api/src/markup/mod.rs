// Rewrite markup: parses <ADD>/<DEL>/<REWRITE> annotated text and renders it
// in clean or changes mode. Pure and synchronous; no I/O here except the handler.

pub mod handlers;
pub mod parser;
pub mod render;

pub use render::{render, MarkupViews, RenderMode};
