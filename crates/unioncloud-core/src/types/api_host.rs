//! API host type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// A validated UnionCloud host.
///
/// Accepts either a bare domain (`union.unioncloud.org`, which is given an
/// `https://` scheme) or a full base URL. Plain HTTP is only allowed for
/// localhost so that tests can run against a local mock server.
///
/// # Example
///
/// ```
/// use unioncloud_core::ApiHost;
///
/// let host = ApiHost::new("union.unioncloud.org").unwrap();
/// assert_eq!(host.api_url("/authenticate"),
///            "https://union.unioncloud.org/api/authenticate");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ApiHost(Url);

impl ApiHost {
    /// Create a new host from a domain or URL, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a usable absolute HTTPS address.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref().trim();
        let candidate = if s.contains("://") {
            s.to_string()
        } else {
            format!("https://{}", s)
        };

        let url = Url::parse(&candidate).map_err(|e| InvalidInputError::Host {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        Ok(Self(url))
    }

    /// Returns the full URL of an API endpoint path such as `/users`.
    pub fn api_url(&self, endpoint: &str) -> String {
        let base = self.0.as_str().trim_end_matches('/');
        format!("{}/api{}", base, endpoint)
    }

    /// Returns the base URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the inner URL.
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        if url.cannot_be_a_base() {
            return Err(InvalidInputError::Host {
                value: original.to_string(),
                reason: "must be an absolute URL".to_string(),
            }
            .into());
        }

        let scheme = url.scheme();
        let is_localhost = url
            .host_str()
            .is_some_and(|h| h == "localhost" || h == "127.0.0.1" || h == "[::1]");

        if scheme != "https" && !(scheme == "http" && is_localhost) {
            return Err(InvalidInputError::Host {
                value: original.to_string(),
                reason: "must use HTTPS (HTTP allowed only for localhost)".to_string(),
            }
            .into());
        }

        if url.host_str().is_none_or(str::is_empty) {
            return Err(InvalidInputError::Host {
                value: original.to_string(),
                reason: "must have a host".to_string(),
            }
            .into());
        }

        if url.query().is_some() || url.fragment().is_some() {
            return Err(InvalidInputError::Host {
                value: original.to_string(),
                reason: "must not carry a query or fragment".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

impl fmt::Display for ApiHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ApiHost {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for ApiHost {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for ApiHost {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ApiHost::new(&s).map_err(serde::de::Error::custom)
    }
}

impl AsRef<str> for ApiHost {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}
