//! Structured user-detail probe.
//!
//! The probe is an optimization: any failure or unexpected payload makes it
//! inconclusive (`None`) and the caller falls back to the page heuristics.

use crate::transport::Transport;
use handlecheck_core::{CheckResult, Endpoints, Handle};
use serde::Deserialize;

/// `statusCode` reported for an existing, active account.
pub const STATUS_OK: i64 = 0;

/// `statusCode` reported when no account holds the handle.
pub const STATUS_USER_NOT_FOUND: i64 = 10202;

/// `statusCode` reported for a banned account.
pub const STATUS_USER_BANNED: i64 = 10101;

#[derive(Debug, Deserialize)]
struct UserDetailResponse {
    #[serde(rename = "statusCode")]
    status_code: Option<i64>,
    #[serde(rename = "status_code")]
    status_code_snake: Option<i64>,
    #[serde(rename = "userInfo", default)]
    user_info: Option<UserInfo>,
}

#[derive(Debug, Deserialize)]
struct UserInfo {
    #[serde(default)]
    user: Option<UserEntry>,
}

#[derive(Debug, Deserialize)]
struct UserEntry {
    #[serde(rename = "uniqueId", default)]
    unique_id: Option<String>,
}

/// Query the structured endpoint for a handle.
///
/// Returns `None` when the probe is inconclusive: non-200 status, unparseable
/// body, unknown status code, or a transport fault (logged and swallowed).
pub async fn probe(
    transport: &dyn Transport,
    endpoints: &Endpoints,
    handle: &Handle,
) -> Option<CheckResult> {
    let url = endpoints.detail_api_url_for(handle.as_str());

    let page = match transport.get(&url).await {
        Ok(page) => page,
        Err(e) => {
            tracing::debug!("Structured probe failed for @{}: {}", handle, e);
            return None;
        }
    };

    if page.status != 200 {
        tracing::debug!("Structured probe for @{} returned HTTP {}", handle, page.status);
        return None;
    }

    interpret_detail(handle, &page.body)
}

/// Classify a structured-endpoint body. Pure; used by [`probe`].
#[must_use]
pub fn interpret_detail(handle: &Handle, body: &str) -> Option<CheckResult> {
    let response: UserDetailResponse = match serde_json::from_str(body) {
        Ok(response) => response,
        Err(e) => {
            tracing::debug!("Failed to parse structured probe response for @{}: {}", handle, e);
            return None;
        }
    };

    let status_code = response
        .status_code
        .or(response.status_code_snake)
        .unwrap_or(STATUS_OK);

    match status_code {
        STATUS_OK => {
            let unique_id = response
                .user_info
                .and_then(|info| info.user)
                .and_then(|user| user.unique_id)?;

            if unique_id.eq_ignore_ascii_case(handle.as_str()) {
                tracing::info!("@{}: taken (confirmed by structured probe)", handle);
                Some(CheckResult::taken(
                    handle.as_str(),
                    "Handle is taken (confirmed by structured probe)",
                ))
            } else {
                tracing::debug!(
                    "Structured probe for @{} returned a different account ({})",
                    handle,
                    unique_id
                );
                None
            }
        }
        STATUS_USER_NOT_FOUND => {
            tracing::info!("@{}: available (confirmed by structured probe)", handle);
            Some(CheckResult::available(
                handle.as_str(),
                "Handle is available (confirmed by structured probe)",
            ))
        }
        STATUS_USER_BANNED => {
            tracing::info!("@{}: banned (confirmed by structured probe)", handle);
            Some(CheckResult::unavailable(handle.as_str(), "Account is banned"))
        }
        other => {
            tracing::debug!("Structured probe for @{} returned statusCode {}", handle, other);
            None
        }
    }
}
