//! Handlers under `/time`: server clock and service health.

use axum::extract::State;
use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ServerTime {
    /// Unix time in milliseconds.
    pub timestamp: i64,
    /// RFC 3339, UTC.
    pub datetime: String,
    pub timezone: &'static str,
}

/// Resident and virtual memory of this process, in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryUsage {
    pub rss: u64,
    pub virtual_size: u64,
}

#[derive(Debug, Serialize)]
pub struct ServiceHealth {
    pub status: &'static str,
    /// Seconds since startup.
    pub uptime: f64,
    /// `null` where `/proc` is unavailable.
    pub memory: Option<MemoryUsage>,
    pub version: &'static str,
    pub database: &'static str,
}

/// GET /api/time/time
pub async fn server_time() -> Json<ApiResponse<ServerTime>> {
    let now = Utc::now();
    Json(ApiResponse::ok(
        "Server time retrieved successfully",
        ServerTime {
            timestamp: now.timestamp_millis(),
            datetime: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            timezone: "UTC",
        },
    ))
}

/// GET /api/time/health
///
/// Always 200; a store outage shows up as `database: "disconnected"` and
/// `status: "degraded"`.
pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<ServiceHealth>> {
    let db_healthy = catalog_db::health_check(&state.pool).await.is_ok();
    let memory = match tokio::fs::read_to_string("/proc/self/status").await {
        Ok(status) => parse_proc_status(&status),
        Err(_) => None,
    };

    Json(ApiResponse::ok(
        "Service is running normally",
        ServiceHealth {
            status: if db_healthy { "healthy" } else { "degraded" },
            uptime: state.uptime_secs(),
            memory,
            version: env!("CARGO_PKG_VERSION"),
            database: if db_healthy { "connected" } else { "disconnected" },
        },
    ))
}

/// Pull `VmRSS` and `VmSize` (reported in kB) out of `/proc/self/status`.
fn parse_proc_status(status: &str) -> Option<MemoryUsage> {
    let kib = |key: &str| -> Option<u64> {
        let line = status.lines().find(|l| l.starts_with(key))?;
        let value = line[key.len()..].trim().trim_end_matches("kB").trim();
        value.parse::<u64>().ok().map(|v| v * 1024)
    };
    Some(MemoryUsage {
        rss: kib("VmRSS:")?,
        virtual_size: kib("VmSize:")?,
    })
}
