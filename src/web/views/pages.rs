//! Typed contexts for each page

use crate::domain::{Country, FieldErrors, FormParams};
use crate::infrastructure::template::{escape_html, Bindings};
use crate::infrastructure::user::SIGN_UP_RULES;

use super::renderer::{error_paragraph, PageContext, TemplateName, View};

/// Home page
#[derive(Debug, Clone, Copy, Default)]
pub struct MainView;

impl View for MainView {
    fn template(&self) -> TemplateName {
        TemplateName::Main
    }

    fn title(&self) -> &str {
        "Home"
    }

    fn bind(&self, ctx: &PageContext<'_>, bindings: &mut Bindings) {
        let base = escape_html(ctx.base_url);

        let greeting = match ctx.current_user {
            Some(user) => format!(
                "<p>Hello, <strong>{}</strong>! You are signed in with {}.</p>",
                escape_html(&user.login),
                escape_html(&user.email)
            ),
            None => format!(
                r#"<p>Please <a href="{0}/sign-in">sign in</a> or <a href="{0}/sign-up">create an account</a>.</p>"#,
                base
            ),
        };

        bindings.html("greeting", greeting);
    }
}

/// Sign-up form, blank or re-filled after a rejected submission
#[derive(Debug, Clone, Copy)]
pub struct SignUpView<'a> {
    pub countries: &'a [Country],
    pub errors: &'a FieldErrors,
    /// Submitted values as received, before cleaning
    pub params: &'a FormParams,
}

impl SignUpView<'_> {
    fn param(&self, name: &str) -> &str {
        self.params.get(name).map(String::as_str).unwrap_or_default()
    }

    fn country_options(&self) -> String {
        let selected = self.param("country_id").trim();

        self.countries
            .iter()
            .map(|country| {
                let id = country.id().to_string();
                format!(
                    r#"<option value="{}"{}>{}</option>"#,
                    id,
                    if id == selected { " selected" } else { "" },
                    escape_html(country.name())
                )
            })
            .collect::<Vec<_>>()
            .join("\n        ")
    }
}

impl View for SignUpView<'_> {
    fn template(&self) -> TemplateName {
        TemplateName::SignUp
    }

    fn title(&self) -> &str {
        "Sign up"
    }

    fn bind(&self, _ctx: &PageContext<'_>, bindings: &mut Bindings) {
        bindings
            .text("email", self.param("email"))
            .text("login", self.param("login"))
            .html("country_options", self.country_options())
            .html(
                "agree_checked",
                if self.param("agree").trim().is_empty() {
                    ""
                } else {
                    " checked"
                },
            );

        for (field, _) in SIGN_UP_RULES {
            bindings.html(
                &format!("{}_error", field),
                error_paragraph(self.errors.get(*field).map(String::as_str)),
            );
        }
    }
}

/// Sign-in form
#[derive(Debug, Clone, Copy, Default)]
pub struct SignInView {
    /// The last attempt failed; which credential was wrong is not revealed
    pub error: bool,
}

pub const SIGN_IN_FAILED: &str = "Incorrect login or password";

impl View for SignInView {
    fn template(&self) -> TemplateName {
        TemplateName::SignIn
    }

    fn title(&self) -> &str {
        "Sign in"
    }

    fn bind(&self, _ctx: &PageContext<'_>, bindings: &mut Bindings) {
        bindings.html("error", error_paragraph(self.error.then_some(SIGN_IN_FAILED)));
    }
}

/// Page shown for unknown paths
#[derive(Debug, Clone, Copy, Default)]
pub struct NotFoundView;

impl View for NotFoundView {
    fn template(&self) -> TemplateName {
        TemplateName::NotFound
    }

    fn title(&self) -> &str {
        "Page not found"
    }

    fn bind(&self, _ctx: &PageContext<'_>, _bindings: &mut Bindings) {}
}
