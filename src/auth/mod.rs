//! Authentication: the log-in, registration and log-out routes, the auth
//! cookie holding the backend API token, and the middleware guarding
//! the other routes.

mod cookie;
mod log_in;
mod log_out;
mod middleware;
mod redirect;
mod register;
mod token;

pub use cookie::{
    DEFAULT_COOKIE_DURATION, REMEMBER_ME_COOKIE_DURATION, invalidate_auth_cookie, set_auth_cookie,
};
pub use log_in::{get_log_in_page, post_log_in};
pub use log_out::get_log_out;
pub use middleware::{auth_guard, auth_guard_hx};
pub use redirect::normalize_redirect_url;
pub use register::{get_register_page, register_user};

pub(crate) use cookie::removal_cookie;

#[cfg(test)]
pub(crate) use cookie::COOKIE_TOKEN;
