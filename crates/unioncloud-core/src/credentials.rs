//! Login credentials type.

use std::fmt;

/// Credentials for the UnionCloud authenticate call.
///
/// A user's email and password plus the application id and application
/// password issued to the integrating app.
///
/// # Security
///
/// Neither password is exposed in Debug output.
///
/// # Example
///
/// ```
/// use unioncloud_core::Credentials;
///
/// let creds = Credentials::new("officer@union.test", "pw", "app-1", "app-secret");
/// assert_eq!(creds.email(), "officer@union.test");
/// assert_eq!(creds.app_id(), "app-1");
/// ```
#[derive(Clone)]
pub struct Credentials {
    email: String,
    password: String,
    app_id: String,
    app_password: String,
}

impl Credentials {
    /// Create new credentials.
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        app_id: impl Into<String>,
        app_password: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            app_id: app_id.into(),
            app_password: app_password.into(),
        }
    }

    /// Returns the user's email.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the application id.
    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    /// Returns the user's password.
    ///
    /// # Security
    ///
    /// Use this only when constructing the authenticate request.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Returns the application password.
    ///
    /// # Security
    ///
    /// Only ever used as input to the request hash; it is never sent.
    pub fn app_password(&self) -> &str {
        &self.app_password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("app_id", &self.app_id)
            .field("app_password", &"[REDACTED]")
            .finish()
    }
}
