use axum::http::{header, HeaderMap, HeaderValue};
use lazy_static::lazy_static;
use regex::Regex;
use uuid::Uuid;

use super::dto::CreateUserRequest;
use super::repo_types::NewUser;
use crate::{config::SessionConfig, error::ApiError};

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub(crate) fn is_valid_url(url: &str) -> bool {
    lazy_static! {
        static ref URL_RE: Regex = Regex::new(r"^https?://[^\s/$.?#][^\s]*$").unwrap();
    }
    URL_RE.is_match(url)
}

/// Validates a registration and mints its session token.
pub fn new_user(req: CreateUserRequest) -> Result<NewUser, ApiError> {
    let name = req.name.trim().to_string();
    if name.is_empty() {
        return Err(ApiError::Validation("Name is required.".into()));
    }

    let email = req.email.trim().to_lowercase();
    if !is_valid_email(&email) {
        return Err(ApiError::Validation("Invalid email.".into()));
    }

    let avatar_url = req.avatar_url.trim().to_string();
    if !is_valid_url(&avatar_url) {
        return Err(ApiError::Validation("Invalid avatar url.".into()));
    }

    Ok(NewUser {
        session_id: Uuid::new_v4(),
        name,
        email,
        avatar_url,
    })
}

/// `Set-Cookie` value carrying a session token.
pub fn session_cookie(cfg: &SessionConfig, session_id: Uuid) -> Result<HeaderValue, ApiError> {
    let cookie = format!(
        "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
        cfg.cookie_name,
        session_id,
        cfg.max_age_seconds()
    );
    cookie_header(&cookie)
}

/// `Set-Cookie` value telling the client to drop its session cookie.
pub fn expired_session_cookie(cfg: &SessionConfig) -> Result<HeaderValue, ApiError> {
    let cookie = format!(
        "{}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax",
        cfg.cookie_name
    );
    cookie_header(&cookie)
}

// fails only when SESSION_COOKIE_NAME holds characters a header can't carry
fn cookie_header(cookie: &str) -> Result<HeaderValue, ApiError> {
    HeaderValue::from_str(cookie)
        .map_err(|e| ApiError::Internal(anyhow::Error::new(e).context("build session cookie")))
}

/// Value of the named cookie across all `Cookie` headers of a request.
pub fn read_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, email: &str, avatar_url: &str) -> CreateUserRequest {
        CreateUserRequest {
            name: name.into(),
            email: email.into(),
            avatar_url: avatar_url.into(),
        }
    }

    #[test]
    fn email_validation() {
        assert!(is_valid_email("leonardo@example.com"));
        assert!(!is_valid_email("leonardo@example"));
        assert!(!is_valid_email("leo nardo@example.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn url_validation() {
        assert!(is_valid_url("https://avatars.githubusercontent.com/u/19802320?v=4"));
        assert!(is_valid_url("http://localhost:3000/a.png"));
        assert!(!is_valid_url("ftp://example.com/a.png"));
        assert!(!is_valid_url("not a url"));
    }

    #[test]
    fn new_user_normalizes_email() {
        let user = new_user(request(
            " Leonardo ",
            " Leo@Example.COM ",
            "https://example.com/me.png",
        ))
        .unwrap();
        assert_eq!(user.name, "Leonardo");
        assert_eq!(user.email, "leo@example.com");
        assert!(!user.session_id.is_nil());
    }

    #[test]
    fn new_user_rejects_bad_input() {
        assert!(new_user(request("", "a@b.co", "https://x.io/a")).is_err());
        assert!(new_user(request("Leo", "nope", "https://x.io/a")).is_err());
        assert!(new_user(request("Leo", "a@b.co", "x.io/a")).is_err());
    }

    #[test]
    fn session_cookie_format() {
        let cfg = SessionConfig::default();
        let id = Uuid::nil();
        let cookie = session_cookie(&cfg, id).unwrap();
        assert_eq!(
            cookie.to_str().unwrap(),
            "sessionId=00000000-0000-0000-0000-000000000000; Path=/; Max-Age=604800; HttpOnly; SameSite=Lax"
        );
        assert!(expired_session_cookie(&cfg)
            .unwrap()
            .to_str()
            .unwrap()
            .contains("Max-Age=0"));
    }

    #[test]
    fn read_cookie_finds_named_value() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("theme=dark"));
        headers.append(
            header::COOKIE,
            HeaderValue::from_static("lang=pt; sessionId=abc-123"),
        );
        assert_eq!(read_cookie(&headers, "sessionId"), Some("abc-123"));
        assert_eq!(read_cookie(&headers, "theme"), Some("dark"));
        assert_eq!(read_cookie(&headers, "missing"), None);
    }

    #[test]
    fn read_cookie_ignores_empty_value() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("sessionId="));
        assert_eq!(read_cookie(&headers, "sessionId"), None);
    }
}
