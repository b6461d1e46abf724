use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A client check-in recorded by `POST /api/status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct StatusCheck {
    /// Unique identifier (UUID v4).
    pub id: String,
    /// Name the client reported.
    #[cfg_attr(feature = "openapi", schema(example = "web-frontend"))]
    pub client_name: String,
    /// When the check-in was recorded.
    pub timestamp: DateTime<Utc>,
}

impl StatusCheck {
    /// Record a check-in for `client_name` at the current time.
    #[must_use]
    pub fn new(client_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            client_name: client_name.into(),
            timestamp: Utc::now().trunc_subsecs(6),
        }
    }
}

/// Request body for creating a [`StatusCheck`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct StatusCheckCreate {
    /// Name of the reporting client.
    #[cfg_attr(feature = "openapi", schema(example = "web-frontend"))]
    pub client_name: String,
}

impl From<StatusCheckCreate> for StatusCheck {
    fn from(req: StatusCheckCreate) -> Self {
        Self::new(req.client_name)
    }
}
