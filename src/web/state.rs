//! Application state shared by every handler

use std::sync::Arc;

use crate::infrastructure::user::AccountService;

use super::site::{Route, Site};
use super::types::{PageResponse, WebError};
use super::views::{Renderer, View};
use super::visitor::Visitor;

#[derive(Debug, Clone)]
pub struct AppState {
    pub accounts: Arc<AccountService>,
    pub renderer: Arc<Renderer>,
    pub site: Arc<Site>,
}

impl AppState {
    pub fn new(accounts: AccountService, site: Site) -> Self {
        let renderer = Renderer::new(site.base_url());

        Self {
            accounts: Arc::new(accounts),
            renderer: Arc::new(renderer),
            site: Arc::new(site),
        }
    }

    /// Render a full page for `visitor`
    pub fn page(&self, view: &dyn View, visitor: &Visitor) -> Result<PageResponse, WebError> {
        let html = self.renderer.render(view, visitor.current_user())?;
        Ok(PageResponse::Page(html))
    }

    /// `302` to a route under the base URL
    pub fn redirect(&self, route: Route) -> PageResponse {
        PageResponse::Redirect(self.site.url(route))
    }
}
