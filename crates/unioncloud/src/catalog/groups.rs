//! Student groups.

use std::fmt::Display;

use serde::Serialize;
use tracing::instrument;

use unioncloud_core::{ApiResponse, Error, Method, Query};

use super::{Endpoint, FIRST_PAGE, Mode, data, mode_page, spec};
use crate::client::UnionCloud;

/// List groups.
pub const GROUPS: Endpoint = Endpoint::new("groups", Method::Get, "/groups");

/// Fetch one group.
pub const GROUP_GET: Endpoint = Endpoint::new("group_get", Method::Get, "/groups/{}");

/// Join a user to a group.
pub const GROUP_JOIN: Endpoint = Endpoint::new("group_join", Method::Post, "/groups/{}/join");

#[derive(Serialize)]
struct JoinRequest<'a, U, M> {
    uid: &'a U,
    membership_type_id: &'a M,
}

impl UnionCloud {
    /// List groups. Defaults to full mode, first page.
    #[instrument(skip(self))]
    pub async fn groups(
        &self,
        mode: Option<Mode>,
        page: Option<u32>,
    ) -> Result<ApiResponse, Error> {
        let query = mode_page(mode.unwrap_or(Mode::Full), page.unwrap_or(FIRST_PAGE));
        let request = spec(&GROUPS, &[], query, None)?;
        self.call(request).await
    }

    /// Fetch one group. Defaults to full mode.
    #[instrument(skip(self, group_id), fields(group_id = %group_id))]
    pub async fn group_get(
        &self,
        group_id: impl Display,
        mode: Option<Mode>,
    ) -> Result<ApiResponse, Error> {
        let query = Query::new().with("mode", mode.unwrap_or(Mode::Full));
        let request = spec(&GROUP_GET, &[&group_id], query, None)?;
        self.call(request).await
    }

    /// Join user `uid` to a group with the given membership type.
    #[instrument(
        skip(self, group_id, uid, membership_type_id),
        fields(group_id = %group_id, uid = %uid)
    )]
    pub async fn group_join(
        &self,
        group_id: impl Display,
        uid: impl Display + Serialize,
        membership_type_id: impl Serialize,
    ) -> Result<ApiResponse, Error> {
        let body = data(JoinRequest {
            uid: &uid,
            membership_type_id: &membership_type_id,
        })?;
        let request = spec(&GROUP_JOIN, &[&group_id], Query::new(), Some(body))?;
        self.call(request).await
    }
}
