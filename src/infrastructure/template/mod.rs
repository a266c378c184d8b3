//! HTML templating

mod engine;

pub use engine::{escape_html, Bindings, Template, TemplateError};
