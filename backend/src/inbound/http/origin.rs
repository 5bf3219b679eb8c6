//! Origin allow-list for browser-facing endpoints.
//!
//! The deployment configures exactly one frontend origin. Auth mutations
//! require a matching `Origin` header (CSRF guard for cookie-carried
//! credentials); the CORS middleware reuses the same allow-list.

use actix_web::http::header::ORIGIN;
use actix_web::HttpRequest;
use tracing::warn;
use url::Url;

use crate::domain::Error;

/// The single origin allowed to call browser-facing endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowedOrigin(Url);

/// Failures raised when parsing the configured origin.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OriginParseError {
    /// Value did not parse as an absolute URL.
    #[error("frontend origin is not a valid URL: {message}")]
    InvalidUrl { message: String },
    /// URL parsed but carries a path, query, or fragment.
    #[error("frontend origin must not contain a path, query, or fragment")]
    NotAnOrigin,
}

impl AllowedOrigin {
    /// Parse and validate the configured origin value.
    ///
    /// # Examples
    /// ```
    /// use maintlog::inbound::http::origin::AllowedOrigin;
    ///
    /// let origin = AllowedOrigin::parse("http://localhost:5173").expect("valid origin");
    /// assert!(origin.matches("http://localhost:5173"));
    /// assert!(!origin.matches("http://evil.example"));
    /// ```
    pub fn parse(value: &str) -> Result<Self, OriginParseError> {
        let url = Url::parse(value.trim()).map_err(|err| OriginParseError::InvalidUrl {
            message: err.to_string(),
        })?;
        if url.path() != "/" || url.query().is_some() || url.fragment().is_some() {
            return Err(OriginParseError::NotAnOrigin);
        }
        Ok(Self(url))
    }

    /// The serialized origin (scheme://host[:port]) without a trailing slash.
    pub fn as_header_value(&self) -> String {
        let mut rendered = self.0.as_str().to_owned();
        if rendered.ends_with('/') {
            rendered.pop();
        }
        rendered
    }

    /// Whether a raw `Origin` header value names this origin.
    pub fn matches(&self, candidate: &str) -> bool {
        match Url::parse(candidate) {
            Ok(url) => {
                url.scheme() == self.0.scheme()
                    && url.host_str() == self.0.host_str()
                    && url.port_or_known_default() == self.0.port_or_known_default()
            }
            Err(_) => false,
        }
    }
}

/// Reject a request whose `Origin` header is absent or foreign.
pub fn require_matching_origin(req: &HttpRequest, allowed: &AllowedOrigin) -> Result<(), Error> {
    let Some(header) = req.headers().get(ORIGIN) else {
        warn!("missing Origin header on state-changing auth request");
        return Err(Error::forbidden("Origin not allowed"));
    };
    let value = header
        .to_str()
        .map_err(|_| Error::forbidden("Origin not allowed"))?;
    if allowed.matches(value) {
        Ok(())
    } else {
        warn!(origin = value, "rejected request from disallowed origin");
        Err(Error::forbidden("Origin not allowed"))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("http://localhost:5173", "http://localhost:5173", true)]
    #[case("http://localhost:5173/", "http://localhost:5173", true)]
    #[case("https://app.example.com", "https://app.example.com", true)]
    // Default ports are equivalent to explicit ones.
    #[case("https://app.example.com", "https://app.example.com:443", true)]
    #[case("http://localhost:5173", "http://localhost:5174", false)]
    #[case("http://localhost:5173", "https://localhost:5173", false)]
    #[case("http://localhost:5173", "http://evil.example", false)]
    #[case("http://localhost:5173", "not a url", false)]
    fn origin_matching(#[case] configured: &str, #[case] candidate: &str, #[case] expected: bool) {
        let allowed = AllowedOrigin::parse(configured).expect("valid origin");
        assert_eq!(allowed.matches(candidate), expected);
    }

    #[rstest]
    #[case("http://localhost:5173/app")]
    #[case("http://localhost:5173/?q=1")]
    #[case("localhost:5173")]
    #[case("")]
    fn origin_parse_rejects_non_origins(#[case] value: &str) {
        assert!(AllowedOrigin::parse(value).is_err());
    }

    #[rstest]
    fn header_value_has_no_trailing_slash() {
        let allowed = AllowedOrigin::parse("http://localhost:5173").expect("valid origin");
        assert_eq!(allowed.as_header_value(), "http://localhost:5173");
    }
}
