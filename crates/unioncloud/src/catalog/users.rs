//! Users.

use std::fmt::Display;

use serde::Serialize;
use tracing::instrument;

use unioncloud_core::{ApiResponse, Error, Method, Query};

use super::{Endpoint, FIRST_PAGE, Mode, data, mode_page, spec};
use crate::client::UnionCloud;

/// List users.
pub const USERS: Endpoint = Endpoint::new("users", Method::Get, "/users");

/// Search users by filter.
pub const USER_SEARCH: Endpoint = Endpoint::new("user_search", Method::Post, "/users/search");

/// Fetch one user.
pub const USER_GET: Endpoint = Endpoint::new("user_get", Method::Get, "/users/{}");

/// List a user's group memberships.
pub const USER_GROUP_MEMBERSHIPS: Endpoint = Endpoint::new(
    "user_group_memberships",
    Method::Get,
    "/users/{}/user_group_memberships",
);

/// Update a user.
pub const USER_UPDATE: Endpoint = Endpoint::new("user_update", Method::Put, "/users/{}");

/// Delete a user.
pub const USER_DELETE: Endpoint = Endpoint::new("user_delete", Method::Delete, "/users/{}");

impl UnionCloud {
    /// List users. Defaults to standard mode, first page.
    #[instrument(skip(self))]
    pub async fn users(&self, mode: Option<Mode>, page: Option<u32>) -> Result<ApiResponse, Error> {
        let query = mode_page(mode.unwrap_or(Mode::Standard), page.unwrap_or(FIRST_PAGE));
        let request = spec(&USERS, &[], query, None)?;
        self.call(request).await
    }

    /// Search users matching `filters`.
    #[instrument(skip(self, filters))]
    pub async fn user_search(
        &self,
        filters: impl Serialize,
        mode: Option<Mode>,
        page: Option<u32>,
    ) -> Result<ApiResponse, Error> {
        let query = mode_page(mode.unwrap_or(Mode::Standard), page.unwrap_or(FIRST_PAGE));
        let request = spec(&USER_SEARCH, &[], query, Some(data(filters)?))?;
        self.call(request).await
    }

    /// Fetch one user by UID.
    #[instrument(skip(self, uid), fields(uid = %uid))]
    pub async fn user_get(
        &self,
        uid: impl Display,
        mode: Option<Mode>,
    ) -> Result<ApiResponse, Error> {
        let query = Query::new().with("mode", mode.unwrap_or(Mode::Standard));
        let request = spec(&USER_GET, &[&uid], query, None)?;
        self.call(request).await
    }

    /// List the user group memberships of a user.
    #[instrument(skip(self, uid), fields(uid = %uid))]
    pub async fn user_group_memberships(
        &self,
        uid: impl Display,
        mode: Option<Mode>,
        page: Option<u32>,
    ) -> Result<ApiResponse, Error> {
        let query = mode_page(mode.unwrap_or(Mode::Standard), page.unwrap_or(FIRST_PAGE));
        let request = spec(&USER_GROUP_MEMBERSHIPS, &[&uid], query, None)?;
        self.call(request).await
    }

    /// Apply `changes` to a user.
    #[instrument(skip(self, uid, changes), fields(uid = %uid))]
    pub async fn user_update(
        &self,
        uid: impl Display,
        changes: impl Serialize,
    ) -> Result<ApiResponse, Error> {
        let request = spec(&USER_UPDATE, &[&uid], Query::new(), Some(data(changes)?))?;
        self.call(request).await
    }

    /// Delete a user.
    #[instrument(skip(self, uid), fields(uid = %uid))]
    pub async fn user_delete(&self, uid: impl Display) -> Result<ApiResponse, Error> {
        let request = spec(&USER_DELETE, &[&uid], Query::new(), None)?;
        self.call(request).await
    }
}
