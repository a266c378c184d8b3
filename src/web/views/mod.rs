//! Server-rendered pages

mod pages;
mod renderer;

pub use pages::{MainView, NotFoundView, SignInView, SignUpView, SIGN_IN_FAILED};
pub use renderer::{PageContext, Renderer, TemplateName, View};
