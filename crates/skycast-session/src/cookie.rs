// Cookie handling for HttpOnly session cookies

use actix_web::cookie::time::Duration as CookieDuration;
use actix_web::cookie::time::OffsetDateTime;
use actix_web::cookie::{Cookie, SameSite};

/// Cookie name carrying the signed session token
pub const SESSION_COOKIE_NAME: &str = "skycast_session";

/// Configuration for session cookies
#[derive(Debug, Clone)]
pub struct CookieConfig {
    /// Whether to set the Secure flag (true behind TLS)
    pub secure: bool,
    /// Cookie path (default: "/")
    pub path: String,
    /// SameSite policy
    pub same_site: SameSite,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            secure: false,
            path: "/".to_string(),
            same_site: SameSite::Strict,
        }
    }
}

/// Create an HttpOnly session cookie carrying the signed token.
///
/// # Arguments
/// * `token` - Signed session token
/// * `ttl_hours` - Cookie lifetime, matching the server-side session expiry
/// * `config` - Cookie configuration
pub fn create_session_cookie<'a>(token: &str, ttl_hours: i64, config: &CookieConfig) -> Cookie<'a> {
    Cookie::build(SESSION_COOKIE_NAME, token.to_string())
        .path(config.path.clone())
        .http_only(true)
        .secure(config.secure)
        .same_site(config.same_site)
        .max_age(CookieDuration::hours(ttl_hours))
        .finish()
}

/// Create a cookie that clears the session cookie in the browser.
///
/// Used during logout.
pub fn create_logout_cookie<'a>(config: &CookieConfig) -> Cookie<'a> {
    Cookie::build(SESSION_COOKIE_NAME, "")
        .path(config.path.clone())
        .http_only(true)
        .secure(config.secure)
        .same_site(config.same_site)
        .expires(OffsetDateTime::UNIX_EPOCH)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_session_cookie() {
        let config = CookieConfig::default();
        let cookie = create_session_cookie("abc.def", 24, &config);

        assert_eq!(cookie.name(), SESSION_COOKIE_NAME);
        assert_eq!(cookie.value(), "abc.def");
        assert!(cookie.http_only().unwrap_or(false));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(CookieDuration::hours(24)));
    }

    #[test]
    fn test_create_logout_cookie() {
        let config = CookieConfig::default();
        let cookie = create_logout_cookie(&config);

        assert_eq!(cookie.name(), SESSION_COOKIE_NAME);
        assert_eq!(cookie.value(), "");
        assert!(cookie.http_only().unwrap_or(false));
    }

    #[test]
    fn test_secure_flag_follows_config() {
        let config = CookieConfig {
            secure: true,
            ..Default::default()
        };
        let cookie = create_session_cookie("abc.def", 1, &config);
        assert!(cookie.secure().unwrap_or(false));
    }
}
