//! Session transport — how tokens travel between client and server.
//!
//! Precedence on extraction is header over cookie, exactly: some API
//! clients only ever send `Authorization: Bearer`, while browsers ride
//! on the `jwt` cookie.

use axum::http::{HeaderMap, header};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use askhub_core::config::auth::AuthConfig;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "jwt";

/// Value written on logout in place of a token.
pub const LOGOUT_SENTINEL: &str = "loggedout";

/// Lifetime of the logout overwrite cookie.
const LOGOUT_COOKIE_SECONDS: i64 = 10;

/// Pulls the session token off a request, bearer header first, cookie
/// second. The logout sentinel reads as "no token".
pub fn extract_token(headers: &HeaderMap, jar: &CookieJar) -> Option<String> {
    if let Some(value) = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
    {
        if let Some(token) = value.strip_prefix("Bearer ") {
            if !token.is_empty() {
                return Some(token.to_string());
            }
        }
    }

    jar.get(SESSION_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty() && v != LOGOUT_SENTINEL)
}

/// Builds the session cookie for a freshly signed token.
///
/// `http_only` always; `secure` only when deployment config says so.
pub fn session_cookie(token: &str, config: &AuthConfig) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token.to_string()))
        .path("/")
        .http_only(true)
        .secure(config.cookie_secure)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::days(config.cookie_ttl_days))
        .build()
}

/// Builds the logout overwrite cookie.
///
/// This only invalidates the client's copy; a replayed token elsewhere
/// stays valid until its natural expiry (tokens are stateless).
pub fn logout_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, LOGOUT_SENTINEL))
        .path("/")
        .http_only(true)
        .max_age(time::Duration::seconds(LOGOUT_COOKIE_SECONDS))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "unused".into(),
            jwt_ttl_days: 90,
            cookie_ttl_days: 90,
            cookie_secure: true,
            reset_token_ttl_minutes: 10,
            argon2_memory_kib: 8,
            argon2_iterations: 1,
            argon2_parallelism: 1,
        }
    }

    fn bearer(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            format!("Bearer {token}").parse().unwrap(),
        );
        headers
    }

    #[test]
    fn test_header_wins_over_cookie() {
        let headers = bearer("header-token");
        let jar = CookieJar::new().add(Cookie::new(SESSION_COOKIE, "cookie-token"));
        assert_eq!(
            extract_token(&headers, &jar).as_deref(),
            Some("header-token")
        );
    }

    #[test]
    fn test_cookie_fallback() {
        let headers = HeaderMap::new();
        let jar = CookieJar::new().add(Cookie::new(SESSION_COOKIE, "cookie-token"));
        assert_eq!(
            extract_token(&headers, &jar).as_deref(),
            Some("cookie-token")
        );
    }

    #[test]
    fn test_no_token_anywhere() {
        assert_eq!(extract_token(&HeaderMap::new(), &CookieJar::new()), None);
    }

    #[test]
    fn test_logout_sentinel_reads_as_absent() {
        let jar = CookieJar::new().add(Cookie::new(SESSION_COOKIE, LOGOUT_SENTINEL));
        assert_eq!(extract_token(&HeaderMap::new(), &jar), None);
    }

    #[test]
    fn test_non_bearer_scheme_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Basic abc123".parse().unwrap());
        assert_eq!(extract_token(&headers, &CookieJar::new()), None);
    }

    #[test]
    fn test_session_cookie_flags() {
        let cookie = session_cookie("tok", &config());
        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.max_age(), Some(time::Duration::days(90)));
    }

    #[test]
    fn test_logout_cookie_is_short_lived() {
        let cookie = logout_cookie();
        assert_eq!(cookie.value(), LOGOUT_SENTINEL);
        assert_eq!(cookie.max_age(), Some(time::Duration::seconds(10)));
        assert_eq!(cookie.http_only(), Some(true));
    }
}
