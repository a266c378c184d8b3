//! Infrastructure layer - storage backends, password hashing, templates, logging

pub mod country;
pub mod logging;
pub mod storage;
pub mod template;
pub mod user;
