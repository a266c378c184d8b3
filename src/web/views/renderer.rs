//! Page renderer: typed views expanded into the site layout

use std::collections::HashMap;

use crate::domain::CurrentUser;
use crate::infrastructure::template::{escape_html, Bindings, Template, TemplateError};

/// Templates shipped with the binary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateName {
    Layout,
    Main,
    SignUp,
    SignIn,
    NotFound,
}

impl TemplateName {
    pub const ALL: [Self; 5] = [
        Self::Layout,
        Self::Main,
        Self::SignUp,
        Self::SignIn,
        Self::NotFound,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Layout => "layout",
            Self::Main => "main",
            Self::SignUp => "signup",
            Self::SignIn => "signin",
            Self::NotFound => "404",
        }
    }

    fn source(self) -> &'static str {
        match self {
            Self::Layout => include_str!("../../../templates/layout.html"),
            Self::Main => include_str!("../../../templates/main.html"),
            Self::SignUp => include_str!("../../../templates/signup.html"),
            Self::SignIn => include_str!("../../../templates/signin.html"),
            Self::NotFound => include_str!("../../../templates/404.html"),
        }
    }
}

/// Request-scoped values every view can read
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    pub base_url: &'a str,
    pub current_user: Option<&'a CurrentUser>,
}

/// A page with a typed context
pub trait View {
    fn template(&self) -> TemplateName;

    fn title(&self) -> &str;

    /// Bind this view's placeholders
    fn bind(&self, ctx: &PageContext<'_>, bindings: &mut Bindings);
}

/// Expands views into full HTML documents
#[derive(Debug, Clone)]
pub struct Renderer {
    templates: HashMap<TemplateName, Template>,
    base_url: String,
}

impl Renderer {
    pub fn new(base_url: impl Into<String>) -> Self {
        let templates = TemplateName::ALL
            .into_iter()
            .map(|name| (name, Template::parse(name.as_str(), name.source())))
            .collect();

        Self {
            templates,
            base_url: base_url.into(),
        }
    }

    /// Render `view` for the visitor and wrap it in the layout.
    ///
    /// `base_url` is bound for every page and the visitor reaches the view
    /// through its [`PageContext`]; the layout gets the matching nav.
    pub fn render(
        &self,
        view: &dyn View,
        current_user: Option<&CurrentUser>,
    ) -> Result<String, TemplateError> {
        let ctx = PageContext {
            base_url: &self.base_url,
            current_user,
        };

        let mut bindings = Bindings::new();
        bindings.text("base_url", &self.base_url);
        view.bind(&ctx, &mut bindings);

        let content = self.template(view.template())?.render(&bindings)?;

        let mut layout = Bindings::new();
        layout
            .text("title", view.title())
            .text("base_url", &self.base_url)
            .html("nav", nav(&ctx))
            .html("content", content);

        self.template(TemplateName::Layout)?.render(&layout)
    }

    fn template(&self, name: TemplateName) -> Result<&Template, TemplateError> {
        self.templates
            .get(&name)
            .ok_or_else(|| TemplateError::UnknownTemplate(name.as_str().to_string()))
    }
}

fn nav(ctx: &PageContext<'_>) -> String {
    let base = escape_html(ctx.base_url);

    match ctx.current_user {
        Some(user) => format!(
            r#"<span>Signed in as <strong>{}</strong></span> <a href="{}/sign-out">Sign out</a>"#,
            escape_html(&user.login),
            base
        ),
        None => format!(
            r#"<a href="{0}/sign-in">Sign in</a> <a href="{0}/sign-up">Sign up</a>"#,
            base
        ),
    }
}

/// `<p class="error">…</p>`, or nothing
pub(crate) fn error_paragraph(message: Option<&str>) -> String {
    message
        .map(|m| format!(r#"<p class="error">{}</p>"#, escape_html(m)))
        .unwrap_or_default()
}
