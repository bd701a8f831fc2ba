pub mod authenticated_user;
pub mod errors;
pub mod middleware;
pub mod session_service;

pub use authenticated_user::AuthenticatedUser;
pub use errors::AuthError;
pub use middleware::{auth_middleware, require_auth_middleware, resolve_user};
pub use session_service::{SessionClaims, SessionService};

use tower_cookies::{Cookie, Cookies, cookie::SameSite};

pub const SESSION_COOKIE: &str = "mokki_session";

pub fn set_session_cookie(cookies: &Cookies, token: String) {
    let cookie = Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();
    cookies.add(cookie);
}

pub fn clear_session_cookie(cookies: &Cookies) {
    cookies.remove(Cookie::build((SESSION_COOKIE, "")).path("/").build());
}
