//! User group memberships.

use std::fmt::Display;

use serde::Serialize;
use serde_json::json;
use tracing::instrument;

use unioncloud_core::{ApiResponse, Error, Method, Query};

use super::{Endpoint, data, spec};
use crate::client::UnionCloud;

/// Add a user to a group.
pub const MEMBERSHIP_CREATE: Endpoint =
    Endpoint::new("membership_create", Method::Post, "/user_group_memberships");

/// Add many memberships at once.
pub const MEMBERSHIP_CREATE_MULTIPLE: Endpoint = Endpoint::new(
    "membership_create_multiple",
    Method::Post,
    "/user_group_memberships/upload",
);

/// Change a membership's expiry.
pub const MEMBERSHIP_UPDATE: Endpoint =
    Endpoint::new("membership_update", Method::Put, "/user_group_memberships/{}");

/// Remove a membership.
pub const MEMBERSHIP_DELETE: Endpoint =
    Endpoint::new("membership_delete", Method::Delete, "/user_group_memberships/{}");

/// Remove many memberships at once.
pub const MEMBERSHIP_DELETE_MULTIPLE: Endpoint = Endpoint::new(
    "membership_delete_multiple",
    Method::Post,
    "/user_group_memberships/delete",
);

#[derive(Serialize)]
struct NewMembership<'a, U, G> {
    uid: &'a U,
    ug_id: &'a G,
    expire_date: &'a str,
}

impl UnionCloud {
    /// Add user `uid` to group `ug_id` until `expire_date`.
    ///
    /// `expire_date` is passed through in whatever format the service
    /// expects, typically `YYYY-MM-DD`.
    #[instrument(skip(self, uid, ug_id), fields(uid = %uid, ug_id = %ug_id))]
    pub async fn membership_create(
        &self,
        uid: impl Display + Serialize,
        ug_id: impl Display + Serialize,
        expire_date: &str,
    ) -> Result<ApiResponse, Error> {
        let body = data(NewMembership {
            uid: &uid,
            ug_id: &ug_id,
            expire_date,
        })?;
        let request = spec(&MEMBERSHIP_CREATE, &[], Query::new(), Some(body))?;
        self.call(request).await
    }

    /// Add many memberships in one request.
    #[instrument(skip_all)]
    pub async fn membership_create_multiple(
        &self,
        memberships: impl Serialize,
    ) -> Result<ApiResponse, Error> {
        let request = spec(
            &MEMBERSHIP_CREATE_MULTIPLE,
            &[],
            Query::new(),
            Some(data(memberships)?),
        )?;
        self.call(request).await
    }

    /// Change when membership `ugm_id` expires.
    #[instrument(skip(self, ugm_id), fields(ugm_id = %ugm_id))]
    pub async fn membership_update(
        &self,
        ugm_id: impl Display,
        expire_date: &str,
    ) -> Result<ApiResponse, Error> {
        let body = data(json!({ "expire_date": expire_date }))?;
        let request = spec(&MEMBERSHIP_UPDATE, &[&ugm_id], Query::new(), Some(body))?;
        self.call(request).await
    }

    /// Remove membership `ugm_id`.
    #[instrument(skip(self, ugm_id), fields(ugm_id = %ugm_id))]
    pub async fn membership_delete(&self, ugm_id: impl Display) -> Result<ApiResponse, Error> {
        let request = spec(&MEMBERSHIP_DELETE, &[&ugm_id], Query::new(), None)?;
        self.call(request).await
    }

    /// Remove many memberships in one request.
    #[instrument(skip_all)]
    pub async fn membership_delete_multiple(
        &self,
        memberships: impl Serialize,
    ) -> Result<ApiResponse, Error> {
        let request = spec(
            &MEMBERSHIP_DELETE_MULTIPLE,
            &[],
            Query::new(),
            Some(data(memberships)?),
        )?;
        self.call(request).await
    }
}
