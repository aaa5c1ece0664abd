// [library] Signed cookies - the client can read the user id but cannot forge one
use tower_cookies::{cookie::SameSite, Cookie, Cookies, Key};

// [business] Cookie holding the logged-in user's id
pub const SESSION_COOKIE: &str = "user_id";

pub fn start_session(cookies: &Cookies, key: &Key, user_id: i32) {
    let mut cookie = Cookie::new(SESSION_COOKIE, user_id.to_string());
    cookie.set_http_only(true); // [security] Not readable from page scripts
    cookie.set_path("/");
    cookie.set_same_site(SameSite::Lax);
    cookies.signed(key).add(cookie);
}

pub fn end_session(cookies: &Cookies, key: &Key) {
    let mut cookie = Cookie::new(SESSION_COOKIE, "");
    cookie.set_path("/");
    cookies.signed(key).remove(cookie);
}

// [security] None for a missing, tampered or malformed cookie
pub fn current_user_id(cookies: &Cookies, key: &Key) -> Option<i32> {
    cookies
        .signed(key)
        .get(SESSION_COOKIE)
        .and_then(|cookie| cookie.value().parse::<i32>().ok())
}
