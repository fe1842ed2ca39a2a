//! The UnionCloud API client.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument};

use unioncloud_core::{
    ApiHost, ApiResponse, Clock, Credentials, DecodeError, Error, Method, RequestSpec,
    SystemClock, TokenSnapshot, Transport,
};

use crate::auth::{
    AUTHENTICATE_PATH, AuthState, AuthenticateRequest, parse_authenticate_response,
};
use crate::options::ClientOptions;
use crate::pipeline::{RequestBuilder, ResponseNormalizer};
use crate::transport::ReqwestTransport;

/// A client for one UnionCloud host.
///
/// Each client is a single logical session with its own auth token.
/// Requests take `&self`; anything that changes the token, host, or
/// options takes `&mut self`. Callers that need concurrency own one client
/// per task.
///
/// # Example
///
/// ```no_run
/// use unioncloud::{ApiHost, Credentials, UnionCloud};
///
/// # async fn example() -> Result<(), unioncloud::Error> {
/// let mut client = UnionCloud::new(ApiHost::new("union.unioncloud.org")?)?;
/// let creds = Credentials::new("admin@union.test", "password", "app-id", "app-password");
///
/// if client.authenticate(&creds).await?.is_some() {
///     let users = client.users(None, None).await?;
///     println!("{}", users.data);
/// }
/// # Ok(())
/// # }
/// ```
pub struct UnionCloud {
    host: ApiHost,
    options: ClientOptions,
    transport: Arc<dyn Transport>,
    auth: AuthState,
}

impl UnionCloud {
    /// Create a client with default options over HTTPS.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialised.
    pub fn new(host: ApiHost) -> Result<Self, Error> {
        Self::builder(host).build()
    }

    /// Start building a client for `host`.
    pub fn builder(host: ApiHost) -> UnionCloudBuilder {
        UnionCloudBuilder {
            host,
            options: ClientOptions::default(),
            transport: None,
            clock: None,
        }
    }

    /// The host requests are sent to.
    pub fn host(&self) -> &ApiHost {
        &self.host
    }

    /// Point the client at another host. The auth token is kept.
    pub fn set_host(&mut self, host: ApiHost) {
        debug!(%host, "Changing host");
        self.host = host;
    }

    /// Current options.
    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Merge `options` into the current options.
    pub fn set_options(&mut self, options: ClientOptions) {
        self.options.merge(options);
    }

    /// Store a token obtained elsewhere, returning its expiry.
    pub fn set_auth_token(
        &mut self,
        token: impl Into<String>,
        expires_at: DateTime<Utc>,
    ) -> DateTime<Utc> {
        self.auth.set(token, expires_at)
    }

    /// Snapshot of the stored token, valid or not.
    pub fn get_auth_token(&self) -> Option<TokenSnapshot> {
        self.auth.get()
    }

    /// Returns true if a token is stored and has not expired.
    pub fn is_authenticated(&self) -> bool {
        self.auth.is_valid()
    }

    /// Authenticate and store the issued token.
    ///
    /// Returns the token's expiry, or `None` when the service did not
    /// report `SUCCESS`. In that case the stored token is left as it was.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the service replies with an
    /// error envelope, or a `SUCCESS` reply lacks the token or its expiry.
    #[instrument(skip_all, fields(host = %self.host))]
    pub async fn authenticate(
        &mut self,
        credentials: &Credentials,
    ) -> Result<Option<DateTime<Utc>>, Error> {
        info!("Authenticating");

        let now = self.auth.now();
        let body = serde_json::to_value(AuthenticateRequest::sign(credentials, now))?;
        let response = self
            .call(RequestSpec::new(Method::Post, AUTHENTICATE_PATH).with_body(body))
            .await?;

        match parse_authenticate_response(&response.data)? {
            Some(issued) => {
                let expires_at = now.checked_add_signed(issued.expires_in).ok_or_else(|| {
                    DecodeError::UnexpectedShape {
                        message: "authenticate expiry overflows the clock".to_string(),
                    }
                })?;
                let expires_at = self.auth.set(issued.token, expires_at);
                info!(%expires_at, "Authenticated");
                Ok(Some(expires_at))
            }
            None => {
                debug!("Authenticate did not report success");
                Ok(None)
            }
        }
    }

    /// Send one request through the pipeline.
    ///
    /// Every catalog operation ends up here; it is public so endpoints the
    /// client does not wrap can still be reached.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AuthExpired`] before any network traffic if the
    /// request needs a token and none is valid. Otherwise any transport,
    /// decode, or service error from the exchange.
    #[instrument(skip_all, fields(method = %spec.method, path = %spec.path))]
    pub async fn call(&self, spec: RequestSpec) -> Result<ApiResponse, Error> {
        let request = RequestBuilder::new(&self.host).build(&spec, &self.auth)?;
        let token = if spec.path == AUTHENTICATE_PATH {
            None
        } else {
            self.auth.current()
        };

        let envelope = self.transport.execute(&request).await?;
        debug!(status = envelope.status, "Response received");

        ResponseNormalizer::new(self.transport.as_ref(), self.options.debug_enabled())
            .normalize(&request, &envelope, token)
            .await
    }
}

impl std::fmt::Debug for UnionCloud {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnionCloud")
            .field("host", &self.host)
            .field("options", &self.options)
            .field("auth", &self.auth)
            .finish_non_exhaustive()
    }
}

/// Builder for [`UnionCloud`].
pub struct UnionCloudBuilder {
    host: ApiHost,
    options: ClientOptions,
    transport: Option<Arc<dyn Transport>>,
    clock: Option<Arc<dyn Clock>>,
}

impl UnionCloudBuilder {
    /// Initial options.
    pub fn options(mut self, options: ClientOptions) -> Self {
        self.options = options;
        self
    }

    /// Use `transport` instead of the default [`ReqwestTransport`].
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Read time from `clock` instead of the system clock.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns an error if no transport was given and the default one
    /// cannot be created.
    pub fn build(self) -> Result<UnionCloud, Error> {
        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new()?),
        };
        let clock: Arc<dyn Clock> = match self.clock {
            Some(clock) => clock,
            None => Arc::new(SystemClock),
        };

        Ok(UnionCloud {
            host: self.host,
            options: self.options,
            transport,
            auth: AuthState::new(clock),
        })
    }
}
