//! Endpoint catalog.
//!
//! Every operation the client wraps is an [`Endpoint`] constant plus a
//! method on [`UnionCloud`](crate::UnionCloud). The constants are grouped
//! by resource in the submodules and listed together in [`ENDPOINTS`].

mod elections;
mod events;
mod groups;
mod memberships;
mod uploads;
mod user_groups;
mod users;

use std::fmt;

use serde::Serialize;
use serde_json::{Value, json};

use unioncloud_core::{Error, InvalidInputError, Method, Query, RequestSpec};

pub use elections::*;
pub use events::*;
pub use groups::*;
pub use memberships::*;
pub use uploads::*;
pub use user_groups::*;
pub use users::*;

/// First page of a listing.
pub const FIRST_PAGE: u32 = 1;

/// One API operation: HTTP method and path template.
///
/// `{}` placeholders in the path are filled positionally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    /// Operation name.
    pub name: &'static str,
    /// HTTP method.
    pub method: Method,
    /// Path template below `/api`.
    pub path: &'static str,
}

impl Endpoint {
    /// Define an endpoint.
    pub const fn new(name: &'static str, method: Method, path: &'static str) -> Self {
        Self { name, method, path }
    }

    /// Number of `{}` placeholders in the path.
    pub fn arity(&self) -> usize {
        self.path.matches("{}").count()
    }

    /// Fill the path template, percent-encoding each segment.
    ///
    /// # Errors
    ///
    /// Returns an error if the number of arguments does not match the
    /// template, or an argument is empty.
    pub fn path_with(&self, args: &[&dyn fmt::Display]) -> Result<String, InvalidInputError> {
        if args.len() != self.arity() {
            return Err(self.path_error(format!(
                "expected {} path arguments, got {}",
                self.arity(),
                args.len()
            )));
        }

        let mut path = String::with_capacity(self.path.len());
        let mut pieces = self.path.split("{}");
        if let Some(first) = pieces.next() {
            path.push_str(first);
        }
        for (arg, piece) in args.iter().zip(pieces) {
            let segment = arg.to_string();
            if segment.is_empty() {
                return Err(self.path_error("empty path segment".to_string()));
            }
            path.push_str(&urlencoding::encode(&segment));
            path.push_str(piece);
        }
        Ok(path)
    }

    /// A request for this endpoint with no query or body.
    pub fn request(&self, args: &[&dyn fmt::Display]) -> Result<RequestSpec, InvalidInputError> {
        Ok(RequestSpec::new(self.method, self.path_with(args)?))
    }

    fn path_error(&self, reason: String) -> InvalidInputError {
        InvalidInputError::Path {
            template: self.path.to_string(),
            reason,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

/// How much of each record the service returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Basic,
    Standard,
    Full,
}

impl Mode {
    /// Query-string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Basic => "basic",
            Mode::Standard => "standard",
            Mode::Full => "full",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which voters an election voter listing covers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct VoterType(String);

impl VoterType {
    /// Voters who actually voted.
    pub fn actual() -> Self {
        Self("actual".to_string())
    }

    /// Any other voter type the service understands.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Query-string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for VoterType {
    fn default() -> Self {
        Self::actual()
    }
}

impl fmt::Display for VoterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Every endpoint the client wraps.
pub const ENDPOINTS: &[Endpoint] = &[
    UPLOAD_STUDENTS,
    UPLOAD_GUESTS,
    UPLOAD_PROGRAMMES,
    USERS,
    USER_SEARCH,
    USER_GET,
    USER_GROUP_MEMBERSHIPS,
    USER_UPDATE,
    USER_DELETE,
    USER_GROUPS,
    USER_GROUP_SEARCH,
    USER_GROUP_CREATE,
    USER_GROUP_GET,
    USER_GROUP_MEMBERS,
    USER_GROUP_UPDATE,
    USER_GROUP_DELETE,
    USER_GROUP_FOLDER_STRUCTURE,
    MEMBERSHIP_CREATE,
    MEMBERSHIP_CREATE_MULTIPLE,
    MEMBERSHIP_UPDATE,
    MEMBERSHIP_DELETE,
    MEMBERSHIP_DELETE_MULTIPLE,
    EVENT_TYPES,
    EVENTS,
    EVENT_SEARCH,
    EVENT_CREATE,
    EVENT_GET,
    EVENT_UPDATE,
    EVENT_CANCEL,
    EVENT_ATTENDEES,
    EVENT_TICKET_TYPE_CREATE,
    EVENT_TICKET_TYPE_UPDATE,
    EVENT_TICKET_TYPE_DELETE,
    EVENT_QUESTION_CREATE,
    EVENT_QUESTION_UPDATE,
    EVENT_QUESTION_DELETE,
    ELECTION_CATEGORIES,
    ELECTION_CATEGORY_GET,
    ELECTION_POSITIONS,
    ELECTION_POSITION_GET,
    ELECTIONS,
    ELECTION_GET,
    ELECTION_STANDINGS,
    ELECTION_VOTERS,
    ELECTION_VOTERS_DEMOGRAPHICS,
    ELECTION_VOTES,
    GROUPS,
    GROUP_GET,
    GROUP_JOIN,
];

/// Wrap a payload as `{"data": payload}`.
fn data(payload: impl Serialize) -> Result<Value, Error> {
    let payload = serde_json::to_value(payload).map_err(|e| InvalidInputError::Other {
        message: format!("unserializable payload: {}", e),
    })?;
    Ok(json!({ "data": payload }))
}

fn mode_page(mode: Mode, page: u32) -> Query {
    Query::new().with("mode", mode).with("page", page)
}

fn page_mode(page: u32, mode: Mode) -> Query {
    Query::new().with("page", page).with("mode", mode)
}

/// Request for `endpoint` with the given path arguments, query, and body.
fn spec(
    endpoint: &Endpoint,
    args: &[&dyn fmt::Display],
    query: Query,
    body: Option<Value>,
) -> Result<RequestSpec, Error> {
    let mut spec = endpoint.request(args)?.with_query(query);
    spec.body = body;
    Ok(spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn fills_placeholders_in_order() {
        let path = EVENT_TICKET_TYPE_UPDATE.path_with(&[&12, &"7"]).unwrap();
        assert_eq!(path, "/events/12/event_ticket_types/7");
    }

    #[test]
    fn percent_encodes_segments() {
        let path = USER_GET.path_with(&[&"a b/c"]).unwrap();
        assert_eq!(path, "/users/a%20b%2Fc");
    }

    #[test]
    fn rejects_wrong_argument_count() {
        let err = USER_GET.path_with(&[]).unwrap_err();
        assert!(matches!(err, InvalidInputError::Path { .. }));
        assert!(USERS.path_with(&[&1]).is_err());
    }

    #[test]
    fn rejects_empty_segment() {
        assert!(GROUP_GET.path_with(&[&""]).is_err());
    }

    #[test]
    fn catalog_names_are_unique() {
        let names: HashSet<_> = ENDPOINTS.iter().map(|e| e.name).collect();
        assert_eq!(names.len(), ENDPOINTS.len());
        assert_eq!(ENDPOINTS.len(), 49);
    }

    #[test]
    fn catalog_paths_are_well_formed() {
        for endpoint in ENDPOINTS {
            assert!(endpoint.path.starts_with('/'), "{}", endpoint);
            assert!(!endpoint.path.ends_with('/'), "{}", endpoint);
            assert!(endpoint.arity() <= 2, "{}", endpoint);
        }
    }

    #[test]
    fn data_wraps_payload() {
        let body = data(serde_json::json!({"uid": 1})).unwrap();
        assert_eq!(body, serde_json::json!({"data": {"uid": 1}}));
    }

    #[test]
    fn mode_serializes_lowercase() {
        assert_eq!(serde_json::to_value(Mode::Full).unwrap(), "full");
        assert_eq!(VoterType::default().as_str(), "actual");
    }
}
