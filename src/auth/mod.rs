//! Log in, sign up and log out, and the middleware guarding the other routes.

mod cookie;
mod log_in;
mod log_out;
mod middleware;
mod redirect;
mod sign_up;

pub use cookie::{DEFAULT_COOKIE_DURATION, invalidate_auth_cookie, set_auth_cookie};
pub use log_in::{get_log_in_page, post_log_in};
pub use log_out::get_log_out;
pub use middleware::{auth_guard, auth_guard_hx};
pub use redirect::normalize_redirect_url;
pub use sign_up::{get_sign_up_page, post_sign_up};

#[cfg(test)]
pub use cookie::COOKIE_TOKEN;

#[cfg(test)]
pub use middleware::AuthState;
