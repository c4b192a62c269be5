//! Human-readable rendering of check results.
//!
//! These helpers are pure; the status labels live here rather than on
//! [`HandleStatus`] so the data model stays presentation-agnostic.

use crate::types::{CheckResult, HandleStatus};

const HEAVY_RULE: &str = "════════════════════════════════════════";
const LIGHT_RULE: &str = "────────────────────────────────────────";

/// Display label for a status.
#[must_use]
pub fn status_label(status: HandleStatus) -> &'static str {
    match status {
        HandleStatus::Available => "✅ Available",
        HandleStatus::Taken => "❌ Taken",
        HandleStatus::Unavailable => "⚠️ Unavailable (banned/invalid)",
        HandleStatus::Error => "🔴 Check failed",
    }
}

fn section_heading(status: HandleStatus) -> &'static str {
    match status {
        HandleStatus::Available => "✅ AVAILABLE HANDLES:",
        HandleStatus::Taken => "❌ TAKEN HANDLES:",
        HandleStatus::Unavailable => "⚠️ UNAVAILABLE HANDLES:",
        HandleStatus::Error => "🔴 CHECK ERRORS:",
    }
}

/// Fallback annotation for report entries that carry no message.
fn missing_message(status: HandleStatus) -> Option<&'static str> {
    match status {
        HandleStatus::Unavailable => Some("Banned/invalid"),
        HandleStatus::Error => Some("Unknown error"),
        HandleStatus::Available | HandleStatus::Taken => None,
    }
}

/// Per-status counts for a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    /// Number of results
    pub total: usize,
    /// `Available` results
    pub available: usize,
    /// `Taken` results
    pub taken: usize,
    /// `Unavailable` results
    pub unavailable: usize,
    /// `Error` results
    pub errors: usize,
}

impl StatusCounts {
    /// Count the results of a batch by status.
    #[must_use]
    pub fn tally(results: &[CheckResult]) -> Self {
        results.iter().fold(
            Self {
                total: results.len(),
                ..Self::default()
            },
            |mut counts, result| {
                match result.status() {
                    HandleStatus::Available => counts.available += 1,
                    HandleStatus::Taken => counts.taken += 1,
                    HandleStatus::Unavailable => counts.unavailable += 1,
                    HandleStatus::Error => counts.errors += 1,
                }
                counts
            },
        )
    }

    /// Count for a single status.
    #[must_use]
    pub fn get(&self, status: HandleStatus) -> usize {
        match status {
            HandleStatus::Available => self.available,
            HandleStatus::Taken => self.taken,
            HandleStatus::Unavailable => self.unavailable,
            HandleStatus::Error => self.errors,
        }
    }
}

/// Render one result as `@handle: <label>`.
#[must_use]
pub fn format_result(result: &CheckResult) -> String {
    format!("@{}: {}", result.display_handle(), status_label(result.status()))
}

/// Render the short completion summary for a batch.
#[must_use]
pub fn format_summary(counts: &StatusCounts) -> String {
    format!(
        "Checked: {}\nAvailable: {}\nTaken: {}\nUnavailable: {}\nErrors: {}",
        counts.total, counts.available, counts.taken, counts.unavailable, counts.errors
    )
}

/// Render a full batch as a sectioned text report.
///
/// Counts come first, then one section per non-empty status in report order.
/// Unavailable and error entries are annotated with their message.
#[must_use]
pub fn format_report(results: &[CheckResult]) -> String {
    if results.is_empty() {
        return "No results to display.".to_string();
    }

    let counts = StatusCounts::tally(results);
    let mut lines = vec![
        HEAVY_RULE.to_string(),
        "📊 HANDLE AVAILABILITY REPORT".to_string(),
        HEAVY_RULE.to_string(),
        String::new(),
        format!("📈 Total checked: {}", counts.total),
        format!("✅ Available: {}", counts.available),
        format!("❌ Taken: {}", counts.taken),
        format!("⚠️ Unavailable: {}", counts.unavailable),
        format!("🔴 Errors: {}", counts.errors),
        String::new(),
    ];

    for status in HandleStatus::ALL {
        if counts.get(status) == 0 {
            continue;
        }

        lines.push(LIGHT_RULE.to_string());
        lines.push(section_heading(status).to_string());
        lines.push(LIGHT_RULE.to_string());

        for result in results.iter().filter(|r| r.status() == status) {
            let entry = match missing_message(status) {
                Some(fallback) => format!(
                    "  • @{} - {}",
                    result.display_handle(),
                    result.message().unwrap_or(fallback)
                ),
                None => format!("  • @{}", result.display_handle()),
            };
            lines.push(entry);
        }
        lines.push(String::new());
    }

    lines.push(HEAVY_RULE.to_string());
    lines.push("End of report".to_string());
    lines.push(HEAVY_RULE.to_string());

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_batch() -> Vec<CheckResult> {
        vec![
            CheckResult::available("free_one", "free"),
            CheckResult::taken("@Busy", "taken"),
            CheckResult::new("banned_acct", HandleStatus::Unavailable, None),
            CheckResult::error("flaky", "Failed after 3 attempts: timed out"),
            CheckResult::available("free_two", "free"),
        ]
    }

    #[test]
    fn test_format_result() {
        let result = CheckResult::taken(" @Busy ", "taken");
        assert_eq!(format_result(&result), "@Busy: ❌ Taken");

        let result = CheckResult::available("free_one", "free");
        assert_eq!(format_result(&result), "@free_one: ✅ Available");
    }

    #[test]
    fn test_tally() {
        let counts = StatusCounts::tally(&sample_batch());
        assert_eq!(
            counts,
            StatusCounts {
                total: 5,
                available: 2,
                taken: 1,
                unavailable: 1,
                errors: 1,
            }
        );
    }

    #[test]
    fn test_format_summary() {
        let summary = format_summary(&StatusCounts::tally(&sample_batch()));
        assert!(summary.starts_with("Checked: 5"));
        assert!(summary.contains("Errors: 1"));
    }

    #[test]
    fn test_report_sections_and_annotations() {
        let report = format_report(&sample_batch());

        assert!(report.contains("📈 Total checked: 5"));
        assert!(report.contains("✅ Available: 2"));

        let available = report.find("✅ AVAILABLE HANDLES:").expect("available section");
        let taken = report.find("TAKEN HANDLES").expect("taken section");
        let unavailable = report.find("UNAVAILABLE HANDLES").expect("unavailable section");
        let errors = report.find("CHECK ERRORS").expect("error section");
        assert!(available < taken && taken < unavailable && unavailable < errors);

        assert!(report.contains("  • @free_one\n  • @free_two\n"));
        assert!(report.contains("  • @Busy\n"));
        assert!(report.contains("  • @banned_acct - Banned/invalid"));
        assert!(report.contains("  • @flaky - Failed after 3 attempts: timed out"));
        assert!(report.trim_end().ends_with(HEAVY_RULE));
    }

    #[test]
    fn test_report_skips_empty_sections() {
        let report = format_report(&[CheckResult::taken("someone", "taken")]);
        assert!(!report.contains("✅ AVAILABLE HANDLES:"));
        assert!(!report.contains("CHECK ERRORS"));
        assert!(report.contains("TAKEN HANDLES"));
    }

    #[test]
    fn test_empty_report() {
        assert_eq!(format_report(&[]), "No results to display.");
    }
}
