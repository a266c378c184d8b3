//! HTML template parsing and rendering
//!
//! Supports placeholder syntax: `{{ name }}`. Every placeholder must be bound
//! at render time; values are inserted verbatim, so callers bind escaped text
//! (see [`Bindings::text`]) or prebuilt markup (see [`Bindings::html`]).

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use thiserror::Error;

/// Regex to match placeholders: {{ name }}
static PLACEHOLDER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{\s*([a-z_][a-z0-9_]*)\s*\}\}").expect("placeholder pattern is valid")
});

/// Template processing errors
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TemplateError {
    #[error("Template '{template}' has no binding for '{name}'")]
    MissingBinding { template: String, name: String },

    #[error("Unknown template: {0}")]
    UnknownTemplate(String),
}

/// Values bound to placeholders for one render
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings {
    values: HashMap<String, String>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind plain text, escaping it for HTML
    pub fn text(&mut self, name: &str, value: &str) -> &mut Self {
        self.values.insert(name.to_string(), escape_html(value));
        self
    }

    /// Bind markup that is already safe to embed
    pub fn html(&mut self, name: &str, markup: impl Into<String>) -> &mut Self {
        self.values.insert(name.to_string(), markup.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }
}

/// A parsed HTML template
#[derive(Debug, Clone)]
pub struct Template {
    name: String,
    content: String,
    placeholders: Vec<String>,
}

impl Template {
    /// Parse a template and collect its placeholder names
    pub fn parse(name: impl Into<String>, content: impl Into<String>) -> Self {
        let content = content.into();
        let mut seen = HashSet::new();

        let placeholders = PLACEHOLDER_PATTERN
            .captures_iter(&content)
            .map(|cap| cap[1].to_string())
            .filter(|placeholder| seen.insert(placeholder.clone()))
            .collect();

        Self {
            name: name.into(),
            content,
            placeholders,
        }
    }

    /// Render with the given bindings; unbound placeholders are an error
    pub fn render(&self, bindings: &Bindings) -> Result<String, TemplateError> {
        if let Some(missing) = self.placeholders.iter().find(|p| !bindings.contains(p)) {
            return Err(TemplateError::MissingBinding {
                template: self.name.clone(),
                name: missing.clone(),
            });
        }

        let rendered = PLACEHOLDER_PATTERN.replace_all(&self.content, |cap: &Captures| {
            bindings.get(&cap[1]).unwrap_or_default().to_string()
        });

        Ok(rendered.into_owned())
    }
}

/// Escape text for use in HTML element content and quoted attributes
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }

    escaped
}
