use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A persisted task. Timestamps travel as ISO-8601 strings; both are
/// nullable on the wire, though `created_at` is always set by the server.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub completed_at: Option<String>,
    pub created_at: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct CreateTaskRequest {
    pub name: String,
    pub description: String,
}

/// PUT body. The update response echoes these fields back verbatim, so the
/// type serializes as well.
#[derive(Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    pub name: String,
    pub description: String,
    pub completed_at: Option<String>,
}

/// A login account. Read-only from the HTTP surface; rows exist only for
/// credential lookup.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Serialize, ToSchema)]
pub struct DeleteResponse {
    pub result: bool,
}

/// Decoded token payload. `exp` is a Unix timestamp in seconds.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Claims {
    pub id: i64,
    pub email: String,
    pub exp: usize,
}
