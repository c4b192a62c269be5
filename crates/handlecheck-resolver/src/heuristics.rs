//! Heuristic classification of profile page responses.
//!
//! HTTP 200 bodies go through [`CASCADE`], an ordered list of rules over the
//! lowercased body where the first match wins. When nothing matches the page
//! falls to [`DEFAULT_VERDICT`]: an undetected profile is presumed to exist,
//! so a false "available" is never produced by the absence of evidence.

use handlecheck_core::{CheckResult, Handle, HandleStatus};

const AVAILABLE_MESSAGE: &str = "Handle is available for registration";
const TAKEN_MESSAGE: &str = "Handle is already taken by another account";

/// How a rule inspects the lowercased page body.
#[derive(Debug, Clone, Copy)]
pub enum Matcher {
    /// Any of the markers occurs in the body
    AnyMarker(&'static [&'static str]),
    /// One of the JSON keys is present with the checked handle as its value,
    /// written either `"key":"handle"` or `"key": "handle"`
    HandleValue(&'static [&'static str]),
    /// At least `min` distinct keys occur in the body
    DistinctKeys {
        /// Candidate keys
        keys: &'static [&'static str],
        /// Minimum number of distinct keys present
        min: usize,
    },
}

impl Matcher {
    /// Evaluate against an already lowercased body and handle.
    #[must_use]
    pub fn matches(&self, body: &str, handle: &str) -> bool {
        match self {
            Self::AnyMarker(markers) => markers.iter().any(|m| body.contains(m)),
            Self::HandleValue(keys) => keys.iter().any(|key| {
                body.contains(&format!("{key}:\"{handle}\""))
                    || body.contains(&format!("{key}: \"{handle}\""))
            }),
            Self::DistinctKeys { keys, min } => {
                keys.iter().filter(|key| body.contains(*key)).count() >= *min
            }
        }
    }
}

/// Status and message a rule assigns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    /// Resulting status
    pub status: HandleStatus,
    /// Message attached to the result
    pub message: &'static str,
}

/// One entry of the classification cascade.
#[derive(Debug, Clone, Copy)]
pub struct ClassificationRule {
    /// Stable rule name, used in logs and tests
    pub name: &'static str,
    /// Body predicate
    pub matcher: Matcher,
    /// Outcome when the predicate holds
    pub verdict: Verdict,
}

/// Ordered page heuristics for HTTP 200 responses. First match wins.
pub const CASCADE: &[ClassificationRule] = &[
    ClassificationRule {
        name: "not_found_code",
        matcher: Matcher::AnyMarker(&[
            "\"statuscode\":10202",
            "\"statuscode\": 10202",
            "\"status_code\":10202",
            "\"status_code\": 10202",
            "\"statusmsg\":\"user not exist\"",
            "\"statusmsg\": \"user not exist\"",
            "\"statusmsg\":\"user doesn't exist\"",
            "\"errormsg\":\"user not exist\"",
        ]),
        verdict: Verdict {
            status: HandleStatus::Available,
            message: AVAILABLE_MESSAGE,
        },
    },
    ClassificationRule {
        name: "unique_id",
        matcher: Matcher::HandleValue(&["\"uniqueid\"", "\"unique_id\""]),
        verdict: Verdict {
            status: HandleStatus::Taken,
            message: TAKEN_MESSAGE,
        },
    },
    ClassificationRule {
        name: "profile_statistics",
        matcher: Matcher::DistinctKeys {
            keys: &[
                "\"followercount\"",
                "\"followingcount\"",
                "\"heartcount\"",
                "\"videocount\"",
                "\"diggcount\"",
                "\"follower_count\"",
                "\"following_count\"",
                "\"heart_count\"",
            ],
            min: 2,
        },
        verdict: Verdict {
            status: HandleStatus::Taken,
            message: TAKEN_MESSAGE,
        },
    },
    ClassificationRule {
        name: "banned",
        matcher: Matcher::AnyMarker(&[
            "this account has been banned",
            "account suspended",
            "this account is suspended",
            "this account was banned",
            "account has been suspended",
            "violates our community guidelines",
            "\"statuscode\":10101",
            "\"status_code\":10101",
        ]),
        verdict: Verdict {
            status: HandleStatus::Unavailable,
            message: "Account is banned (the handle may become available later)",
        },
    },
    ClassificationRule {
        name: "not_found_text",
        matcher: Matcher::AnyMarker(&[
            "couldn't find this account",
            "couldn't find this page",
            "user not found",
            "page not found",
            "this account doesn't exist",
            "user doesn't exist",
        ]),
        verdict: Verdict {
            status: HandleStatus::Available,
            message: AVAILABLE_MESSAGE,
        },
    },
];

/// Outcome when no rule in [`CASCADE`] matches.
pub const DEFAULT_VERDICT: Verdict = Verdict {
    status: HandleStatus::Taken,
    message: "Handle is presumably taken (requires manual verification)",
};

/// Result of running the cascade over one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// Name of the matching rule, `None` for the default verdict
    pub rule: Option<&'static str>,
    /// Assigned verdict
    pub verdict: Verdict,
}

/// Run the cascade over an HTTP 200 body.
#[must_use]
pub fn classify_page(handle: &Handle, body: &str) -> Classification {
    let body = body.to_lowercase();
    let handle = handle.as_str().to_lowercase();

    CASCADE
        .iter()
        .find(|rule| rule.matcher.matches(&body, &handle))
        .map_or(
            Classification {
                rule: None,
                verdict: DEFAULT_VERDICT,
            },
            |rule| Classification {
                rule: Some(rule.name),
                verdict: rule.verdict,
            },
        )
}

/// Classify a profile page response by status code, then body.
#[must_use]
pub fn classify_response(handle: &Handle, status: u16, body: &str) -> CheckResult {
    match status {
        404 => {
            tracing::info!("@{}: available (HTTP 404)", handle);
            CheckResult::available(handle.as_str(), AVAILABLE_MESSAGE)
        }
        200 => {
            let classification = classify_page(handle, body);
            let verdict = classification.verdict;
            tracing::info!(
                "@{}: {:?} (rule: {})",
                handle,
                verdict.status,
                classification.rule.unwrap_or("default")
            );
            CheckResult::new(handle.as_str(), verdict.status, Some(verdict.message.to_string()))
        }
        403 => {
            tracing::warn!("@{}: access denied (HTTP 403)", handle);
            CheckResult::error(handle.as_str(), "Access denied (possibly rate limited)")
        }
        s if s >= 500 => {
            tracing::error!("@{}: upstream server error (HTTP {})", handle, s);
            CheckResult::error(handle.as_str(), format!("Upstream server error: HTTP {s}"))
        }
        s => {
            tracing::warn!("@{}: unexpected HTTP {}, presuming taken", handle, s);
            CheckResult::taken(
                handle.as_str(),
                format!("Unexpected status (HTTP {s}), presumably taken"),
            )
        }
    }
}
