//! Client-facing export rendering: CSV and Markdown.
//!
//! Both renderers are pure functions over an assessment tree; the current
//! date is passed in rather than read from the clock so output is
//! reproducible in tests and in batch tooling.

use chrono::NaiveDate;

use crate::client::ClientId;
use crate::document::AssessmentData;
use crate::policy::Policy;
use crate::stats::ComplianceStats;

/// Column header row of the CSV export.
pub const CSV_HEADER: &str = "Category,Policy Name,Status,Description,User Impact,\
User Impact Level,Technical Owner,Client Approval,Notes,Rollout Date,Days Until Rollout";

/// Renders the full assessment as CSV, one row per policy in scan order.
///
/// Every field is double-quoted with embedded quotes doubled. Policies with
/// no recorded status or approval show `Pending` in those columns. The final
/// column counts days from `today` to the rollout date (negative once the
/// date has passed) and is blank when no parseable date is set.
pub fn render_csv(data: &AssessmentData, today: NaiveDate) -> String {
    let mut rows = vec![CSV_HEADER.to_string()];
    for (category, policy) in data.policies() {
        let days = days_until(&policy.rollout_date, today)
            .map(|d| d.to_string())
            .unwrap_or_default();
        let fields = [
            category,
            policy.name.as_str(),
            policy.status.map_or("Pending", |s| s.as_str()),
            policy.description.as_str(),
            policy.user_impact.as_str(),
            policy.impact_level().as_str(),
            policy.tech.as_str(),
            policy.client_approval.map_or("Pending", |a| a.as_str()),
            policy.notes.as_str(),
            policy.rollout_date.as_str(),
            days.as_str(),
        ];
        rows.push(
            fields
                .iter()
                .map(|f| csv_field(f))
                .collect::<Vec<_>>()
                .join(","),
        );
    }
    rows.join("\n")
}

/// Renders the Markdown assessment report: a header block, an executive
/// summary of the compliance statistics, then every policy grouped by
/// category in scan order.
pub fn render_report(client_id: &ClientId, data: &AssessmentData, generated: NaiveDate) -> String {
    let stats = ComplianceStats::compute(data);
    let p = &stats.percentages;

    let mut lines: Vec<String> = Vec::new();
    lines.push("# Microsoft Best Practices Assessment Report".to_string());
    lines.push(String::new());
    lines.push(format!("## Client: {}", client_id.display_name()));
    lines.push(String::new());
    lines.push(format!("## Generated: {}", generated.format("%Y-%m-%d")));
    lines.push(String::new());
    lines.push("### Executive Summary".to_string());
    lines.push(String::new());
    lines.push(format!("- **Total Policies Assessed:** {}", stats.total));
    lines.push(format!("- **Compliant:** {} ({}%)", stats.compliant, p.compliant));
    lines.push(format!("- **Partially Compliant:** {} ({}%)", stats.partial, p.partial));
    lines.push(format!("- **Not Compliant:** {} ({}%)", stats.non_compliant, p.non_compliant));
    lines.push(format!("- **Pending Review:** {} ({}%)", stats.pending, p.pending));
    lines.push(format!("- **Client Approved:** {} ({}%)", stats.approved, p.approved));
    lines.push(String::new());
    lines.push("### Detailed Assessment by Category".to_string());

    for (category, policies) in data.categories() {
        lines.push(String::new());
        lines.push(format!("#### {category}"));
        for policy in policies {
            lines.push(String::new());
            lines.push(format!("**{}**", policy.name));
            lines.push(policy_detail_lines(policy));
        }
    }

    let mut report = lines.join("\n");
    report.push('\n');
    report
}

fn policy_detail_lines(policy: &Policy) -> String {
    let mut lines = vec![
        format!(
            "- Status: {}",
            policy.status.map_or("Pending Review", |s| s.as_str())
        ),
        format!(
            "- User Impact Level: {}",
            policy.impact_level().as_str().to_uppercase()
        ),
        format!(
            "- Client Approval: {}",
            policy.client_approval.map_or("Pending", |a| a.as_str())
        ),
        format!(
            "- Technical Owner: {}",
            if policy.tech.is_empty() { "Not assigned" } else { &policy.tech }
        ),
        format!(
            "- Rollout Date: {}",
            if policy.rollout_date.is_empty() { "Not scheduled" } else { &policy.rollout_date }
        ),
    ];
    if !policy.notes.is_empty() {
        lines.push(format!("- Notes: {}", policy.notes));
    }
    lines.join("\n")
}

fn csv_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

fn days_until(rollout_date: &str, today: NaiveDate) -> Option<i64> {
    let date = NaiveDate::parse_from_str(rollout_date, "%Y-%m-%d").ok()?;
    Some((date - today).num_days())
}
