//! Site base URL and route paths

/// Fixed set of pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    SignUp,
    SignIn,
    SignOut,
}

impl Route {
    /// Every route, in matching order
    pub const ALL: [Self; 4] = [Self::Home, Self::SignUp, Self::SignIn, Self::SignOut];

    /// Path relative to the base URL
    pub fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::SignUp => "/sign-up",
            Self::SignIn => "/sign-in",
            Self::SignOut => "/sign-out",
        }
    }
}

/// Where the site is mounted
///
/// `base_url` may be empty, a path (`/app`) or an absolute URL
/// (`https://example.com/app`). Routes are served under its path component;
/// redirects point at the full base URL.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Site {
    base_url: String,
    base_path: String,
}

impl Site {
    pub fn new(base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        let base_path = path_component(&base_url).trim_end_matches('/').to_string();

        Self {
            base_url,
            base_path,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Request path a route is served at
    pub fn mount_path(&self, route: Route) -> String {
        format!("{}{}", self.base_path, route.path())
    }

    /// Absolute or root-relative URL for redirects and links
    pub fn url(&self, route: Route) -> String {
        format!("{}{}", self.base_url, route.path())
    }
}

fn path_component(base_url: &str) -> &str {
    match base_url.split_once("://") {
        Some((_, rest)) => rest.find('/').map(|i| &rest[i..]).unwrap_or(""),
        None => base_url,
    }
}
