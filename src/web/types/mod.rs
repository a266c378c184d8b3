//! Request and response types for the web layer

mod error;
mod form;
mod response;

pub use error::WebError;
pub use form::FormInput;
pub use response::PageResponse;
