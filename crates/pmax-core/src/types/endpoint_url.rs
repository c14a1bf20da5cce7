//! Unisphere endpoint URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// A validated Unisphere endpoint URL.
///
/// Unisphere instances must be reached over HTTPS; plain HTTP is accepted
/// only for loopback hosts so tests can talk to a local mock server.
///
/// # Example
///
/// ```
/// use pmax_core::EndpointUrl;
///
/// let endpoint = EndpointUrl::new("https://unisphere.example.com:8443").unwrap();
/// assert_eq!(endpoint.rest_url("/univmax/restapi/version"),
///            "https://unisphere.example.com:8443/univmax/restapi/version");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EndpointUrl(Url);

impl EndpointUrl {
    /// Create a new endpoint URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not absolute, has no host, or uses a
    /// scheme other than HTTPS (HTTP allowed only for loopback).
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| InvalidInputError::EndpointUrl {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        // Normalize: remove trailing slash
        let normalized = if url.path() == "/" {
            let mut u = url.clone();
            u.set_path("");
            u
        } else {
            url
        };

        Ok(Self(normalized))
    }

    /// Returns the full URL for a REST path under this endpoint.
    ///
    /// `path` must begin with `/`.
    pub fn rest_url(&self, path: &str) -> String {
        let base = self.0.as_str().trim_end_matches('/');
        format!("{}{}", base, path)
    }

    /// Returns the base URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        if url.cannot_be_a_base() {
            return Err(InvalidInputError::EndpointUrl {
                value: original.to_string(),
                reason: "must be an absolute URL".to_string(),
            }
            .into());
        }

        let is_loopback = url
            .host_str()
            .is_some_and(|h| h == "localhost" || h == "127.0.0.1" || h == "::1" || h == "[::1]");

        let scheme = url.scheme();
        if scheme != "https" && !(scheme == "http" && is_loopback) {
            return Err(InvalidInputError::EndpointUrl {
                value: original.to_string(),
                reason: "must use HTTPS (HTTP allowed only for loopback)".to_string(),
            }
            .into());
        }

        if url.host_str().is_none() {
            return Err(InvalidInputError::EndpointUrl {
                value: original.to_string(),
                reason: "must have a host".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

impl fmt::Display for EndpointUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EndpointUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for EndpointUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for EndpointUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        EndpointUrl::new(&s).map_err(serde::de::Error::custom)
    }
}

impl AsRef<str> for EndpointUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_https_url() {
        let endpoint = EndpointUrl::new("https://unisphere.example.com:8443").unwrap();
        assert_eq!(endpoint.host(), Some("unisphere.example.com"));
    }

    #[test]
    fn valid_loopback_http() {
        let endpoint = EndpointUrl::new("http://127.0.0.1:8443").unwrap();
        assert_eq!(endpoint.host(), Some("127.0.0.1"));
    }

    #[test]
    fn rest_url_construction() {
        let endpoint = EndpointUrl::new("https://unisphere.example.com:8443").unwrap();
        assert_eq!(
            endpoint.rest_url("/univmax/restapi/version"),
            "https://unisphere.example.com:8443/univmax/restapi/version"
        );
    }

    #[test]
    fn normalizes_trailing_slash() {
        let endpoint = EndpointUrl::new("https://unisphere.example.com/").unwrap();
        assert_eq!(
            endpoint.rest_url("/univmax/restapi/version"),
            "https://unisphere.example.com/univmax/restapi/version"
        );
    }

    #[test]
    fn invalid_http_non_loopback() {
        assert!(EndpointUrl::new("http://unisphere.example.com").is_err());
    }

    #[test]
    fn invalid_relative_url() {
        assert!(EndpointUrl::new("/univmax/restapi").is_err());
    }
}
