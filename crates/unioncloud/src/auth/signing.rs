//! Authenticate request signing and response parsing.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};

use unioncloud_core::{Credentials, DecodeError, Error};

/// Endpoint path of the authenticate call; the only one sent without a token.
pub(crate) const AUTHENTICATE_PATH: &str = "/authenticate";

/// Marker the service puts in `result` on a successful authenticate.
const SUCCESS: &str = "SUCCESS";

/// Request body for authenticate.
#[derive(Serialize)]
pub(crate) struct AuthenticateRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub app_id: &'a str,
    pub date_stamp: String,
    pub hash: String,
}

impl<'a> AuthenticateRequest<'a> {
    /// Sign `credentials` with the unix time of `now`.
    pub fn sign(credentials: &'a Credentials, now: DateTime<Utc>) -> Self {
        let date_stamp = now.timestamp().to_string();
        let hash = request_hash(
            credentials.email(),
            credentials.password(),
            credentials.app_id(),
            &date_stamp,
            credentials.app_password(),
        );

        Self {
            email: credentials.email(),
            password: credentials.password(),
            app_id: credentials.app_id(),
            date_stamp,
            hash,
        }
    }
}

/// Lower-case hex SHA-256 over the concatenated authenticate fields.
///
/// The date stamp binds the signature to a moment in time; the service is
/// responsible for bounding acceptable clock skew.
pub fn request_hash(
    email: &str,
    password: &str,
    app_id: &str,
    date_stamp: &str,
    app_password: &str,
) -> String {
    let mut hasher = Sha256::new();
    hasher.update(email.as_bytes());
    hasher.update(password.as_bytes());
    hasher.update(app_id.as_bytes());
    hasher.update(date_stamp.as_bytes());
    hasher.update(app_password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Token and lifetime from a successful authenticate response.
#[derive(Debug)]
pub(crate) struct IssuedToken {
    pub token: String,
    pub expires_in: Duration,
}

/// Parse an authenticate payload.
///
/// Returns `Ok(None)` when `result` is not `"SUCCESS"`: the service sends no
/// error envelope in that case and the token is left untouched.
pub(crate) fn parse_authenticate_response(data: &Value) -> Result<Option<IssuedToken>, Error> {
    if data.get("result").and_then(Value::as_str) != Some(SUCCESS) {
        return Ok(None);
    }

    let response = data.get("response");
    let token = response
        .and_then(|r| r.get("auth_token"))
        .and_then(Value::as_str)
        .ok_or_else(|| DecodeError::UnexpectedShape {
            message: "authenticate response is missing 'auth_token'".to_string(),
        })?;
    let expires = response
        .and_then(|r| r.get("expires"))
        .and_then(seconds)
        .ok_or_else(|| DecodeError::UnexpectedShape {
            message: "authenticate response is missing 'expires'".to_string(),
        })?;

    let expires_in =
        Duration::try_seconds(expires).ok_or_else(|| DecodeError::UnexpectedShape {
            message: format!("authenticate 'expires' out of range: {expires}"),
        })?;

    Ok(Some(IssuedToken {
        token: token.to_string(),
        expires_in,
    }))
}

/// Seconds as a JSON number or numeric string.
fn seconds(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn hash_matches_sha256_of_concatenation() {
        // sha256("abc")
        assert_eq!(
            request_hash("a", "", "b", "", "c"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn sign_uses_one_timestamp_for_stamp_and_hash() {
        let creds = Credentials::new("e@x.test", "pw", "app", "apppw");
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let request = AuthenticateRequest::sign(&creds, now);

        assert_eq!(request.date_stamp, "1700000000");
        assert_eq!(
            request.hash,
            request_hash("e@x.test", "pw", "app", "1700000000", "apppw")
        );
    }

    #[test]
    fn signed_body_never_contains_app_password() {
        let creds = Credentials::new("e@x.test", "pw", "app", "apppw");
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let body = serde_json::to_value(AuthenticateRequest::sign(&creds, now)).unwrap();
        assert!(!body.to_string().contains("apppw"));
        assert_eq!(body["date_stamp"], "1700000000");
    }

    #[test]
    fn parses_success_response() {
        let data = json!({"result": "SUCCESS", "response": {"auth_token": "abc", "expires": 3600}});
        let issued = parse_authenticate_response(&data).unwrap().unwrap();
        assert_eq!(issued.token, "abc");
        assert_eq!(issued.expires_in.num_seconds(), 3600);
    }

    #[test]
    fn accepts_numeric_string_expiry() {
        let data = json!({"result": "SUCCESS", "response": {"auth_token": "abc", "expires": "60"}});
        let issued = parse_authenticate_response(&data).unwrap().unwrap();
        assert_eq!(issued.expires_in.num_seconds(), 60);
    }

    #[test]
    fn non_success_result_yields_none() {
        let data = json!({"result": "FAILURE"});
        assert!(parse_authenticate_response(&data).unwrap().is_none());
    }

    #[test]
    fn out_of_range_expiry_is_decode_error() {
        for expires in [json!(10_000_000_000_000_000_i64), json!(i64::MAX), json!(1e300)] {
            let data = json!({
                "result": "SUCCESS",
                "response": {"auth_token": "abc", "expires": expires}
            });
            assert!(matches!(
                parse_authenticate_response(&data),
                Err(Error::Decode(DecodeError::UnexpectedShape { .. }))
            ));
        }
    }

    #[test]
    fn success_without_token_is_decode_error() {
        let data = json!({"result": "SUCCESS", "response": {}});
        assert!(matches!(
            parse_authenticate_response(&data),
            Err(Error::Decode(_))
        ));
    }
}
