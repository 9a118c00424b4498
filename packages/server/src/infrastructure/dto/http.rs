//! HTTP API response DTOs.

use serde::Serialize;

/// Response body of `GET /api/health`
#[derive(Debug, Serialize)]
pub struct HealthDto {
    pub status: &'static str,
    /// Number of connections currently registered for live messages
    pub connections: usize,
}
