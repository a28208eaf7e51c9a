//! Request headers and URL building.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Url;

use crate::HttpError;

/// Common HTTP header values.
pub mod headers {
    pub const CONTENT_TYPE_JSON: &str = "application/json";
}

/// Accumulates a base URL and headers shared by a family of requests.
#[derive(Debug, Clone, Default)]
pub struct RequestBuilder {
    headers: HeaderMap,
    base_url: Option<String>,
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Add a header. Invalid names or values are skipped.
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::try_from(name.as_ref()),
            HeaderValue::try_from(value.as_ref()),
        ) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Add bearer token authorization. The value is marked sensitive so it
    /// stays out of debug output.
    pub fn bearer_auth(mut self, token: impl AsRef<str>) -> Result<Self, HttpError> {
        let mut value = HeaderValue::try_from(format!("Bearer {}", token.as_ref()))
            .map_err(|_| HttpError::InvalidHeader { name: "authorization" })?;
        value.set_sensitive(true);
        self.headers.insert(AUTHORIZATION, value);
        Ok(self)
    }

    /// Ask for JSON responses.
    pub fn accept_json(mut self) -> Self {
        self.headers
            .insert(ACCEPT, HeaderValue::from_static(headers::CONTENT_TYPE_JSON));
        self
    }

    /// Get the built headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Append path segments to the base URL.
    ///
    /// Each segment is percent-encoded, so a `/`, `?` or `#` inside one stays
    /// part of that segment.
    pub fn url<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Result<Url, HttpError> {
        let base = self
            .base_url
            .as_deref()
            .ok_or_else(|| HttpError::InvalidUrl("no base URL set".to_string()))?;
        let mut url =
            Url::parse(base).map_err(|e| HttpError::InvalidUrl(format!("{base}: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| HttpError::InvalidUrl(format!("{base} cannot be a base URL")))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_segments() {
        let builder = RequestBuilder::new().base_url("http://cases.local:5000/");
        assert_eq!(
            builder.url(["api", "criminals", "7", "audit-logs"]).unwrap().as_str(),
            "http://cases.local:5000/api/criminals/7/audit-logs"
        );
        let builder = RequestBuilder::new().base_url("http://cases.local:5000/v2");
        assert_eq!(
            builder.url(["api", "x"]).unwrap().as_str(),
            "http://cases.local:5000/v2/api/x"
        );
    }

    #[test]
    fn test_url_encodes_segments() {
        let builder = RequestBuilder::new().base_url("http://cases.local");
        let url = builder.url(["api", "criminals", "64f1?x=1#", "status-history"]).unwrap();
        assert_eq!(url.as_str(), "http://cases.local/api/criminals/64f1%3Fx=1%23/status-history");
        assert!(url.query().is_none());
        assert!(url.fragment().is_none());

        let url = builder.url(["api", "criminals", "a/b", "audit-logs"]).unwrap();
        assert_eq!(url.path(), "/api/criminals/a%2Fb/audit-logs");
    }

    #[test]
    fn test_url_needs_a_usable_base() {
        assert!(matches!(
            RequestBuilder::new().url(["api"]),
            Err(HttpError::InvalidUrl(_))
        ));
        assert!(matches!(
            RequestBuilder::new().base_url("not a url").url(["api"]),
            Err(HttpError::InvalidUrl(_))
        ));
        assert!(matches!(
            RequestBuilder::new().base_url("mailto:desk@cases.local").url(["api"]),
            Err(HttpError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_bearer_auth_is_sensitive() {
        let builder = RequestBuilder::new().bearer_auth("abc.def.ghi").unwrap();
        let auth = builder.headers().get(AUTHORIZATION).unwrap();
        assert_eq!(auth.to_str().unwrap(), "Bearer abc.def.ghi");
        assert!(auth.is_sensitive());
        assert!(!format!("{:?}", builder).contains("abc.def.ghi"));
    }

    #[test]
    fn test_bearer_auth_rejects_unsendable_token() {
        let err = RequestBuilder::new().bearer_auth("abc\ndef").unwrap_err();
        assert!(matches!(err, HttpError::InvalidHeader { name: "authorization" }));
    }

    #[test]
    fn test_invalid_header_is_skipped() {
        let builder = RequestBuilder::new()
            .header("bad header", "x")
            .header("X-Case-Client", "casebook")
            .accept_json();
        assert_eq!(builder.headers().len(), 2);
        assert_eq!(builder.headers()[ACCEPT], "application/json");
    }
}
