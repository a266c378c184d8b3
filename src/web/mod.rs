//! Web layer: routing, sessions, handlers and page rendering

pub mod handlers;
pub mod middleware;
pub mod router;
pub mod site;
pub mod state;
pub mod types;
pub mod views;
pub mod visitor;

pub use router::{create_router, session_layer};
pub use site::{Route, Site};
pub use state::AppState;
pub use visitor::{Visitor, CURRENT_USER_KEY};
