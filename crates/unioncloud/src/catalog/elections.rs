//! Elections: categories, positions, standings, voters, and votes.
//!
//! Voter listings can be large enough that the service answers with a
//! `file_path` reference instead of the records; the pipeline resolves it
//! before the response gets here.

use std::fmt::Display;

use tracing::instrument;

use unioncloud_core::{ApiResponse, Error, Method, Query};

use super::{Endpoint, FIRST_PAGE, Mode, VoterType, mode_page, page_mode, spec};
use crate::client::UnionCloud;

/// List election categories.
pub const ELECTION_CATEGORIES: Endpoint =
    Endpoint::new("election_categories", Method::Get, "/election_categories");

/// Fetch one election category.
pub const ELECTION_CATEGORY_GET: Endpoint =
    Endpoint::new("election_category_get", Method::Get, "/election_categories/{}");

/// List election positions.
pub const ELECTION_POSITIONS: Endpoint =
    Endpoint::new("election_positions", Method::Get, "/election_positions");

/// Fetch one election position.
pub const ELECTION_POSITION_GET: Endpoint =
    Endpoint::new("election_position_get", Method::Get, "/election_positions/{}");

/// List elections.
pub const ELECTIONS: Endpoint = Endpoint::new("elections", Method::Get, "/elections");

/// Fetch one election.
pub const ELECTION_GET: Endpoint = Endpoint::new("election_get", Method::Get, "/elections/{}");

/// Standings of an election.
pub const ELECTION_STANDINGS: Endpoint = Endpoint::new(
    "election_standings",
    Method::Get,
    "/elections/{}/election_standings",
);

/// Voters of an election.
pub const ELECTION_VOTERS: Endpoint =
    Endpoint::new("election_voters", Method::Get, "/elections/{}/election_voters");

/// Voter demographics of an election.
pub const ELECTION_VOTERS_DEMOGRAPHICS: Endpoint = Endpoint::new(
    "election_voters_demographics",
    Method::Get,
    "/elections/{}/election_voters_demographics",
);

/// Votes cast in an election.
pub const ELECTION_VOTES: Endpoint =
    Endpoint::new("election_votes", Method::Get, "/elections/{}/votes");

fn page_query(page: Option<u32>) -> Query {
    Query::new().with("page", page.unwrap_or(FIRST_PAGE))
}

impl UnionCloud {
    /// List election categories.
    #[instrument(skip(self))]
    pub async fn election_categories(&self, page: Option<u32>) -> Result<ApiResponse, Error> {
        let request = spec(&ELECTION_CATEGORIES, &[], page_query(page), None)?;
        self.call(request).await
    }

    /// Fetch one election category.
    #[instrument(skip(self, category_id), fields(category_id = %category_id))]
    pub async fn election_category_get(
        &self,
        category_id: impl Display,
    ) -> Result<ApiResponse, Error> {
        let request = spec(&ELECTION_CATEGORY_GET, &[&category_id], Query::new(), None)?;
        self.call(request).await
    }

    /// List election positions. Defaults to the first page in full mode.
    #[instrument(skip(self))]
    pub async fn election_positions(
        &self,
        page: Option<u32>,
        mode: Option<Mode>,
    ) -> Result<ApiResponse, Error> {
        let query = page_mode(page.unwrap_or(FIRST_PAGE), mode.unwrap_or(Mode::Full));
        let request = spec(&ELECTION_POSITIONS, &[], query, None)?;
        self.call(request).await
    }

    /// Fetch one election position. Defaults to standard mode.
    #[instrument(skip(self, position_id), fields(position_id = %position_id))]
    pub async fn election_position_get(
        &self,
        position_id: impl Display,
        mode: Option<Mode>,
    ) -> Result<ApiResponse, Error> {
        let query = Query::new().with("mode", mode.unwrap_or(Mode::Standard));
        let request = spec(&ELECTION_POSITION_GET, &[&position_id], query, None)?;
        self.call(request).await
    }

    /// List elections. Defaults to the first page in full mode.
    #[instrument(skip(self))]
    pub async fn elections(
        &self,
        page: Option<u32>,
        mode: Option<Mode>,
    ) -> Result<ApiResponse, Error> {
        let query = mode_page(mode.unwrap_or(Mode::Full), page.unwrap_or(FIRST_PAGE));
        let request = spec(&ELECTIONS, &[], query, None)?;
        self.call(request).await
    }

    /// Fetch one election. Defaults to full mode.
    #[instrument(skip(self, election_id), fields(election_id = %election_id))]
    pub async fn election_get(
        &self,
        election_id: impl Display,
        mode: Option<Mode>,
    ) -> Result<ApiResponse, Error> {
        let query = Query::new().with("mode", mode.unwrap_or(Mode::Full));
        let request = spec(&ELECTION_GET, &[&election_id], query, None)?;
        self.call(request).await
    }

    /// Standings of an election.
    #[instrument(skip(self, election_id), fields(election_id = %election_id))]
    pub async fn election_standings(
        &self,
        election_id: impl Display,
        page: Option<u32>,
        mode: Option<Mode>,
    ) -> Result<ApiResponse, Error> {
        let query = page_mode(page.unwrap_or(FIRST_PAGE), mode.unwrap_or(Mode::Full));
        let request = spec(&ELECTION_STANDINGS, &[&election_id], query, None)?;
        self.call(request).await
    }

    /// Voters of an election. Defaults to actual voters, first page.
    #[instrument(skip(self, election_id), fields(election_id = %election_id))]
    pub async fn election_voters(
        &self,
        election_id: impl Display,
        voter_type: Option<VoterType>,
        page: Option<u32>,
    ) -> Result<ApiResponse, Error> {
        let query = Query::new()
            .with("page", page.unwrap_or(FIRST_PAGE))
            .with("voter_type", voter_type.unwrap_or_default());
        let request = spec(&ELECTION_VOTERS, &[&election_id], query, None)?;
        self.call(request).await
    }

    /// Voter demographics of an election.
    #[instrument(skip(self, election_id), fields(election_id = %election_id))]
    pub async fn election_voters_demographics(
        &self,
        election_id: impl Display,
        voter_type: Option<VoterType>,
        page: Option<u32>,
        mode: Option<Mode>,
    ) -> Result<ApiResponse, Error> {
        let query = Query::new()
            .with("page", page.unwrap_or(FIRST_PAGE))
            .with("voter_type", voter_type.unwrap_or_default())
            .with("mode", mode.unwrap_or(Mode::Full));
        let request = spec(&ELECTION_VOTERS_DEMOGRAPHICS, &[&election_id], query, None)?;
        self.call(request).await
    }

    /// Votes cast in an election.
    #[instrument(skip(self, election_id), fields(election_id = %election_id))]
    pub async fn election_votes(
        &self,
        election_id: impl Display,
        page: Option<u32>,
    ) -> Result<ApiResponse, Error> {
        let request = spec(&ELECTION_VOTES, &[&election_id], page_query(page), None)?;
        self.call(request).await
    }
}
