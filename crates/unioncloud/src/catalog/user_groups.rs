//! User groups.

use std::fmt::Display;

use serde::Serialize;
use serde_json::json;
use tracing::instrument;

use unioncloud_core::{ApiResponse, Error, Method, Query};

use super::{Endpoint, FIRST_PAGE, Mode, data, mode_page, spec};
use crate::client::UnionCloud;

/// List user groups.
pub const USER_GROUPS: Endpoint = Endpoint::new("user_groups", Method::Get, "/user_groups");

/// Search user groups by filter.
pub const USER_GROUP_SEARCH: Endpoint =
    Endpoint::new("user_group_search", Method::Get, "/user_groups/search");

/// Create a user group.
pub const USER_GROUP_CREATE: Endpoint =
    Endpoint::new("user_group_create", Method::Post, "/user_groups");

/// Fetch one user group.
pub const USER_GROUP_GET: Endpoint =
    Endpoint::new("user_group_get", Method::Get, "/user_groups/{}");

/// List the members of a user group.
pub const USER_GROUP_MEMBERS: Endpoint = Endpoint::new(
    "user_group_members",
    Method::Get,
    "/user_groups/{}/user_group_memberships",
);

/// Update a user group.
pub const USER_GROUP_UPDATE: Endpoint =
    Endpoint::new("user_group_update", Method::Put, "/user_groups/{}");

/// Delete a user group.
pub const USER_GROUP_DELETE: Endpoint =
    Endpoint::new("user_group_delete", Method::Delete, "/user_groups/{}");

/// Folder tree user groups are filed in.
pub const USER_GROUP_FOLDER_STRUCTURE: Endpoint = Endpoint::new(
    "user_group_folder_structure",
    Method::Get,
    "/user_groups/folderstructure",
);

impl UnionCloud {
    /// List user groups. Defaults to standard mode, first page.
    #[instrument(skip(self))]
    pub async fn user_groups(
        &self,
        mode: Option<Mode>,
        page: Option<u32>,
    ) -> Result<ApiResponse, Error> {
        let query = mode_page(mode.unwrap_or(Mode::Standard), page.unwrap_or(FIRST_PAGE));
        let request = spec(&USER_GROUPS, &[], query, None)?;
        self.call(request).await
    }

    /// Search user groups matching `filters`.
    ///
    /// The service takes this search as a GET with a JSON body.
    #[instrument(skip(self, filters))]
    pub async fn user_group_search(
        &self,
        filters: impl Serialize,
        mode: Option<Mode>,
        page: Option<u32>,
    ) -> Result<ApiResponse, Error> {
        let query = mode_page(mode.unwrap_or(Mode::Standard), page.unwrap_or(FIRST_PAGE));
        let request = spec(&USER_GROUP_SEARCH, &[], query, Some(data(filters)?))?;
        self.call(request).await
    }

    /// Create a user group, optionally inside a folder.
    #[instrument(skip(self, description))]
    pub async fn user_group_create(
        &self,
        name: &str,
        description: &str,
        folder_id: Option<i64>,
    ) -> Result<ApiResponse, Error> {
        let body = data(json!({
            "ug_name": name,
            "ug_description": description,
            "folder_id": folder_id,
        }))?;
        let request = spec(&USER_GROUP_CREATE, &[], Query::new(), Some(body))?;
        self.call(request).await
    }

    /// Fetch one user group.
    #[instrument(skip(self, ug_id), fields(ug_id = %ug_id))]
    pub async fn user_group_get(
        &self,
        ug_id: impl Display,
        mode: Option<Mode>,
    ) -> Result<ApiResponse, Error> {
        let query = Query::new().with("mode", mode.unwrap_or(Mode::Standard));
        let request = spec(&USER_GROUP_GET, &[&ug_id], query, None)?;
        self.call(request).await
    }

    /// List the memberships of a user group.
    #[instrument(skip(self, ug_id), fields(ug_id = %ug_id))]
    pub async fn user_group_members(
        &self,
        ug_id: impl Display,
        mode: Option<Mode>,
        page: Option<u32>,
    ) -> Result<ApiResponse, Error> {
        let query = mode_page(mode.unwrap_or(Mode::Standard), page.unwrap_or(FIRST_PAGE));
        let request = spec(&USER_GROUP_MEMBERS, &[&ug_id], query, None)?;
        self.call(request).await
    }

    /// Apply `changes` to a user group.
    #[instrument(skip(self, ug_id, changes), fields(ug_id = %ug_id))]
    pub async fn user_group_update(
        &self,
        ug_id: impl Display,
        changes: impl Serialize,
    ) -> Result<ApiResponse, Error> {
        let request = spec(&USER_GROUP_UPDATE, &[&ug_id], Query::new(), Some(data(changes)?))?;
        self.call(request).await
    }

    /// Delete a user group.
    #[instrument(skip(self, ug_id), fields(ug_id = %ug_id))]
    pub async fn user_group_delete(&self, ug_id: impl Display) -> Result<ApiResponse, Error> {
        let request = spec(&USER_GROUP_DELETE, &[&ug_id], Query::new(), None)?;
        self.call(request).await
    }

    /// Fetch the user group folder tree.
    #[instrument(skip(self))]
    pub async fn user_group_folder_structure(&self) -> Result<ApiResponse, Error> {
        let request = spec(&USER_GROUP_FOLDER_STRUCTURE, &[], Query::new(), None)?;
        self.call(request).await
    }
}
