//! Page handlers

mod home;
mod not_found;
mod sign_in;
mod sign_out;
mod sign_up;

pub use home::home;
pub use not_found::not_found;
pub use sign_in::sign_in;
pub use sign_out::sign_out;
pub use sign_up::sign_up;
