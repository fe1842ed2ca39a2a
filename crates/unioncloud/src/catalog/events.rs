//! Events, with their ticket types and questions.

use std::fmt::Display;

use serde::Serialize;
use tracing::instrument;

use unioncloud_core::{ApiResponse, Error, Method, Query};

use super::{Endpoint, Mode, data, spec};
use crate::client::UnionCloud;

/// List event types.
pub const EVENT_TYPES: Endpoint = Endpoint::new("event_types", Method::Get, "/event_types");

/// List events.
pub const EVENTS: Endpoint = Endpoint::new("events", Method::Get, "/events");

/// Search events by filter.
pub const EVENT_SEARCH: Endpoint = Endpoint::new("event_search", Method::Post, "/events/search");

/// Create an event.
pub const EVENT_CREATE: Endpoint = Endpoint::new("event_create", Method::Post, "/events");

/// Fetch one event.
pub const EVENT_GET: Endpoint = Endpoint::new("event_get", Method::Get, "/events/{}");

/// Update an event.
pub const EVENT_UPDATE: Endpoint = Endpoint::new("event_update", Method::Put, "/events/{}");

/// Cancel an event.
pub const EVENT_CANCEL: Endpoint =
    Endpoint::new("event_cancel", Method::Put, "/events/{}/cancel");

/// List an event's attendees.
pub const EVENT_ATTENDEES: Endpoint =
    Endpoint::new("event_attendees", Method::Get, "/events/{}/attendees");

/// Add a ticket type to an event.
pub const EVENT_TICKET_TYPE_CREATE: Endpoint = Endpoint::new(
    "event_ticket_type_create",
    Method::Post,
    "/events/{}/event_ticket_types",
);

/// Update one of an event's ticket types.
pub const EVENT_TICKET_TYPE_UPDATE: Endpoint = Endpoint::new(
    "event_ticket_type_update",
    Method::Put,
    "/events/{}/event_ticket_types/{}",
);

/// Remove one of an event's ticket types.
pub const EVENT_TICKET_TYPE_DELETE: Endpoint = Endpoint::new(
    "event_ticket_type_delete",
    Method::Delete,
    "/events/{}/event_ticket_types/{}",
);

/// Add a question to an event.
pub const EVENT_QUESTION_CREATE: Endpoint =
    Endpoint::new("event_question_create", Method::Post, "/events/{}/questions");

/// Update one of an event's questions.
pub const EVENT_QUESTION_UPDATE: Endpoint =
    Endpoint::new("event_question_update", Method::Put, "/events/{}/questions/{}");

/// Remove one of an event's questions.
pub const EVENT_QUESTION_DELETE: Endpoint =
    Endpoint::new("event_question_delete", Method::Delete, "/events/{}/questions/{}");

fn mode_query(mode: Option<Mode>) -> Query {
    Query::new().with("mode", mode.unwrap_or(Mode::Standard))
}

impl UnionCloud {
    /// List event types.
    #[instrument(skip(self))]
    pub async fn event_types(&self) -> Result<ApiResponse, Error> {
        let request = spec(&EVENT_TYPES, &[], Query::new(), None)?;
        self.call(request).await
    }

    /// List events. Defaults to standard mode.
    #[instrument(skip(self))]
    pub async fn events(&self, mode: Option<Mode>) -> Result<ApiResponse, Error> {
        let request = spec(&EVENTS, &[], mode_query(mode), None)?;
        self.call(request).await
    }

    /// Search events matching `filters`.
    #[instrument(skip(self, filters))]
    pub async fn event_search(
        &self,
        filters: impl Serialize,
        mode: Option<Mode>,
    ) -> Result<ApiResponse, Error> {
        let request = spec(&EVENT_SEARCH, &[], mode_query(mode), Some(data(filters)?))?;
        self.call(request).await
    }

    /// Create an event.
    #[instrument(skip_all)]
    pub async fn event_create(&self, event: impl Serialize) -> Result<ApiResponse, Error> {
        let request = spec(&EVENT_CREATE, &[], Query::new(), Some(data(event)?))?;
        self.call(request).await
    }

    /// Fetch one event.
    #[instrument(skip(self, event_id), fields(event_id = %event_id))]
    pub async fn event_get(
        &self,
        event_id: impl Display,
        mode: Option<Mode>,
    ) -> Result<ApiResponse, Error> {
        let request = spec(&EVENT_GET, &[&event_id], mode_query(mode), None)?;
        self.call(request).await
    }

    /// Apply `changes` to an event.
    #[instrument(skip(self, event_id, changes), fields(event_id = %event_id))]
    pub async fn event_update(
        &self,
        event_id: impl Display,
        changes: impl Serialize,
    ) -> Result<ApiResponse, Error> {
        let request = spec(&EVENT_UPDATE, &[&event_id], Query::new(), Some(data(changes)?))?;
        self.call(request).await
    }

    /// Cancel an event.
    #[instrument(skip(self, event_id), fields(event_id = %event_id))]
    pub async fn event_cancel(&self, event_id: impl Display) -> Result<ApiResponse, Error> {
        let request = spec(&EVENT_CANCEL, &[&event_id], Query::new(), None)?;
        self.call(request).await
    }

    /// List an event's attendees.
    #[instrument(skip(self, event_id), fields(event_id = %event_id))]
    pub async fn event_attendees(
        &self,
        event_id: impl Display,
        mode: Option<Mode>,
    ) -> Result<ApiResponse, Error> {
        let request = spec(&EVENT_ATTENDEES, &[&event_id], mode_query(mode), None)?;
        self.call(request).await
    }

    /// Add a ticket type to an event.
    #[instrument(skip(self, event_id, ticket_type), fields(event_id = %event_id))]
    pub async fn event_ticket_type_create(
        &self,
        event_id: impl Display,
        ticket_type: impl Serialize,
    ) -> Result<ApiResponse, Error> {
        let body = data(ticket_type)?;
        let request = spec(&EVENT_TICKET_TYPE_CREATE, &[&event_id], Query::new(), Some(body))?;
        self.call(request).await
    }

    /// Apply `changes` to one of an event's ticket types.
    #[instrument(
        skip(self, event_id, ticket_type_id, changes),
        fields(event_id = %event_id, ticket_type_id = %ticket_type_id)
    )]
    pub async fn event_ticket_type_update(
        &self,
        event_id: impl Display,
        ticket_type_id: impl Display,
        changes: impl Serialize,
    ) -> Result<ApiResponse, Error> {
        let body = data(changes)?;
        let request = spec(
            &EVENT_TICKET_TYPE_UPDATE,
            &[&event_id, &ticket_type_id],
            Query::new(),
            Some(body),
        )?;
        self.call(request).await
    }

    /// Remove one of an event's ticket types.
    #[instrument(
        skip(self, event_id, ticket_type_id),
        fields(event_id = %event_id, ticket_type_id = %ticket_type_id)
    )]
    pub async fn event_ticket_type_delete(
        &self,
        event_id: impl Display,
        ticket_type_id: impl Display,
    ) -> Result<ApiResponse, Error> {
        let request = spec(
            &EVENT_TICKET_TYPE_DELETE,
            &[&event_id, &ticket_type_id],
            Query::new(),
            None,
        )?;
        self.call(request).await
    }

    /// Add a question to an event.
    #[instrument(skip(self, event_id, question), fields(event_id = %event_id))]
    pub async fn event_question_create(
        &self,
        event_id: impl Display,
        question: impl Serialize,
    ) -> Result<ApiResponse, Error> {
        let body = data(question)?;
        let request = spec(&EVENT_QUESTION_CREATE, &[&event_id], Query::new(), Some(body))?;
        self.call(request).await
    }

    /// Apply `changes` to one of an event's questions.
    #[instrument(
        skip(self, event_id, question_id, changes),
        fields(event_id = %event_id, question_id = %question_id)
    )]
    pub async fn event_question_update(
        &self,
        event_id: impl Display,
        question_id: impl Display,
        changes: impl Serialize,
    ) -> Result<ApiResponse, Error> {
        let body = data(changes)?;
        let request = spec(
            &EVENT_QUESTION_UPDATE,
            &[&event_id, &question_id],
            Query::new(),
            Some(body),
        )?;
        self.call(request).await
    }

    /// Remove one of an event's questions.
    #[instrument(
        skip(self, event_id, question_id),
        fields(event_id = %event_id, question_id = %question_id)
    )]
    pub async fn event_question_delete(
        &self,
        event_id: impl Display,
        question_id: impl Display,
    ) -> Result<ApiResponse, Error> {
        let request = spec(
            &EVENT_QUESTION_DELETE,
            &[&event_id, &question_id],
            Query::new(),
            None,
        )?;
        self.call(request).await
    }
}
