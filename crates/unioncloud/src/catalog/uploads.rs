//! Bulk JSON uploads.

use serde::Serialize;
use tracing::instrument;

use unioncloud_core::{ApiResponse, Error, Method, Query};

use super::{Endpoint, data, spec};
use crate::client::UnionCloud;

/// Upload student records.
pub const UPLOAD_STUDENTS: Endpoint =
    Endpoint::new("upload_students", Method::Post, "/json/upload/students");

/// Upload guest records.
pub const UPLOAD_GUESTS: Endpoint =
    Endpoint::new("upload_guests", Method::Post, "/json/upload/guests");

/// Upload programme records.
pub const UPLOAD_PROGRAMMES: Endpoint =
    Endpoint::new("upload_programmes", Method::Post, "/json/upload/programmes");

impl UnionCloud {
    /// Upload student records.
    #[instrument(skip_all)]
    pub async fn upload_students(&self, records: impl Serialize) -> Result<ApiResponse, Error> {
        let request = spec(&UPLOAD_STUDENTS, &[], Query::new(), Some(data(records)?))?;
        self.call(request).await
    }

    /// Upload guest records.
    #[instrument(skip_all)]
    pub async fn upload_guests(&self, records: impl Serialize) -> Result<ApiResponse, Error> {
        let request = spec(&UPLOAD_GUESTS, &[], Query::new(), Some(data(records)?))?;
        self.call(request).await
    }

    /// Upload programme records.
    #[instrument(skip_all)]
    pub async fn upload_programmes(&self, records: impl Serialize) -> Result<ApiResponse, Error> {
        let request = spec(&UPLOAD_PROGRAMMES, &[], Query::new(), Some(data(records)?))?;
        self.call(request).await
    }
}
