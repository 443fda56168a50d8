//! Session cookie builders.
//!
//! The cookie carries only an opaque session id; all session state lives
//! server-side in the auth service's session store.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

/// Cookie name for the session id.
pub const MEDREC_SESSION: &str = "medrec_session";

/// Set the session cookie on the jar.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use medrec_auth_types::cookie::{set_session_cookie, MEDREC_SESSION};
///
/// let jar = CookieJar::new();
/// let jar = set_session_cookie(jar, "abc".to_string(), "example.com".to_string(), 86400);
/// let cookie = jar.get(MEDREC_SESSION).unwrap();
/// assert_eq!(cookie.value(), "abc");
/// assert_eq!(cookie.path(), Some("/"));
/// assert_eq!(cookie.domain(), Some("example.com"));
/// assert_eq!(cookie.max_age(), Some(time::Duration::seconds(86400)));
/// assert!(cookie.http_only().unwrap_or(false));
/// assert!(cookie.secure().unwrap_or(false));
/// ```
pub fn set_session_cookie(
    jar: CookieJar,
    session_id: String,
    domain: String,
    max_age_secs: u64,
) -> CookieJar {
    let cookie = Cookie::build((MEDREC_SESSION, session_id))
        .path("/")
        .domain(domain)
        .max_age(Duration::seconds(max_age_secs as i64))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .build();
    jar.add(cookie)
}

/// Read the session id from the jar, ignoring empty values left by a logout.
pub fn session_id(jar: &CookieJar) -> Option<String> {
    jar.get(MEDREC_SESSION)
        .map(|c| c.value().to_owned())
        .filter(|v| !v.is_empty())
}

/// Expire the session cookie by setting Max-Age to 0.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use medrec_auth_types::cookie::{clear_session_cookie, set_session_cookie, session_id, MEDREC_SESSION};
///
/// let jar = set_session_cookie(CookieJar::new(), "abc".to_string(), "example.com".to_string(), 60);
/// let jar = clear_session_cookie(jar, "example.com".to_string());
/// let cookie = jar.get(MEDREC_SESSION).unwrap();
/// assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
/// assert_eq!(session_id(&jar), None);
/// ```
pub fn clear_session_cookie(jar: CookieJar, domain: String) -> CookieJar {
    let cookie = Cookie::build((MEDREC_SESSION, ""))
        .path("/")
        .domain(domain)
        .max_age(Duration::ZERO)
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .build();
    jar.add(cookie)
}
