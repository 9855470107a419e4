//! Plain-text rendering of the console views.

use chrono::{DateTime, Utc};
use qbank_console::dashboard::{CompanyStatsView, ReviewerSnapshot, WriterSnapshot};
use qbank_console::dates::{format_date, format_relative_time};
use qbank_console::{DetailTab, FormErrors, ListState, tab_rows};
use qbank_sdk::{LeaderboardEntry, Question, User};

const NAME_WIDTH: usize = 28;

fn status(active: bool) -> &'static str {
    if active { "Active" } else { "Inactive" }
}

fn clip(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_owned();
    }
    let mut clipped: String = text.chars().take(width.saturating_sub(1)).collect();
    clipped.push('~');
    clipped
}

#[must_use]
pub fn company_table(state: &ListState) -> String {
    if let Some(error) = &state.error {
        return format!("Failed to load companies: {error}");
    }
    if state.items.is_empty() {
        return "No companies found".to_owned();
    }

    let mut lines = vec![format!(
        "{:>6}  {:<NAME_WIDTH$}  {:<28}  {:<12}  {:<8}  {}",
        "ID", "Company", "Email", "Mobile", "Status", "Created"
    )];
    lines.extend(state.items.iter().map(|company| {
        format!(
            "{:>6}  {:<NAME_WIDTH$}  {:<28}  {:<12}  {:<8}  {}",
            company.id,
            clip(&company.display_name(), NAME_WIDTH),
            clip(company.email.as_deref().unwrap_or_default(), 28),
            company.mobile_number.as_deref().unwrap_or_default(),
            status(company.is_active),
            format_date(company.created_at.as_deref()),
        )
    }));
    lines.push(format!(
        "Page {} of {} ({} companies)",
        state.page.saturating_add(1),
        state.total_pages().max(1),
        state.total
    ));
    lines.join("\n")
}

#[must_use]
pub fn company_detail(company: &User) -> String {
    let mut lines = vec![company.display_name()];
    for tab in DetailTab::ALL {
        lines.push(String::new());
        lines.push(format!("== {} ==", tab.title()));
        lines.extend(
            tab_rows(company, tab)
                .into_iter()
                .map(|(label, value)| format!("{label:<16} {value}")),
        );
    }
    lines.join("\n")
}

#[must_use]
pub fn form_errors(errors: &FormErrors) -> String {
    errors
        .fields()
        .flat_map(|(field, messages)| {
            messages
                .iter()
                .map(move |message| format!("  {field}: {message}"))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[must_use]
pub fn company_dashboard(stats: &CompanyStatsView) -> String {
    [
        format!("Total employees  {}", stats.total_employees),
        format!("Total questions  {}", stats.total_questions),
    ]
    .join("\n")
}

fn question_line(question: &Question, now: DateTime<Utc>) -> String {
    format!(
        "  #{:<6} {:<15} {:>4}  {}  ({})",
        question.id,
        question.status.label(),
        question.score(),
        clip(&question.text, 60),
        format_relative_time(question.created_at.as_deref(), now),
    )
}

fn leaderboard_lines(entries: &[LeaderboardEntry]) -> impl Iterator<Item = String> + '_ {
    entries.iter().enumerate().map(|(index, entry)| {
        let rank = entry
            .rank
            .map_or_else(|| (index + 1).to_string(), |rank| rank.to_string());
        format!("  {rank:>2}. {:<40} {}", clip(entry.label(), 40), entry.score)
    })
}

#[must_use]
pub fn writer_dashboard(snapshot: &WriterSnapshot, now: DateTime<Utc>) -> String {
    let stats = &snapshot.stats;
    let mut lines = vec![
        format!("Total questions  {}", stats.total_questions),
        format!("My questions     {}", stats.my_questions),
        format!("Pending review   {}", stats.pending_review),
        format!("Invalidated      {}", stats.invalidated),
        format!("My score         {}", stats.my_score),
        String::new(),
        "Recent questions".to_owned(),
    ];
    lines.extend(snapshot.recent.iter().map(|q| question_line(q, now)));
    lines.push(String::new());
    lines.push("Top questions".to_owned());
    lines.extend(leaderboard_lines(&snapshot.top_questions));
    lines.push(String::new());
    lines.push("Top employees".to_owned());
    lines.extend(leaderboard_lines(&snapshot.top_employees));
    lines.join("\n")
}

#[must_use]
pub fn reviewer_dashboard(snapshot: &ReviewerSnapshot, now: DateTime<Utc>) -> String {
    let stats = &snapshot.stats;
    let mut lines = vec![
        format!("Total questions  {}", stats.total_questions),
        format!("Pending review   {}", stats.pending_review),
        format!("Invalidated      {}", stats.invalidated),
        format!("Reviewed by me   {}", stats.reviewed_by_me),
        String::new(),
        "Recent questions".to_owned(),
    ];
    lines.extend(snapshot.questions.iter().map(|q| question_line(q, now)));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acme() -> User {
        User {
            id: 3,
            company_name: Some("Acme Tools".into()),
            email: Some("asha@acme.test".into()),
            is_active: true,
            created_at: Some("2024-03-05T10:00:00Z".into()),
            ..User::default()
        }
    }

    #[test]
    fn table_lists_rows_and_page_footer() {
        let state = ListState {
            items: vec![acme()],
            total: 23,
            page: 1,
            ..ListState::default()
        };
        let table = company_table(&state);
        assert!(table.contains("Acme Tools"));
        assert!(table.contains("Mar 5, 2024"));
        assert!(table.ends_with("Page 2 of 3 (23 companies)"));
    }

    #[test]
    fn inline_error_replaces_the_table() {
        let state = ListState {
            error: Some("Server error".into()),
            ..ListState::default()
        };
        assert_eq!(company_table(&state), "Failed to load companies: Server error");
    }

    #[test]
    fn detail_shows_every_tab_with_placeholders() {
        let detail = company_detail(&acme());
        assert!(detail.contains("== Contact Information =="));
        assert!(detail.contains("GST Number       N/A"));
    }

    #[test]
    fn long_names_are_clipped() {
        assert_eq!(clip("abcdef", 4), "abc~");
        assert_eq!(clip("abc", 4), "abc");
    }

    #[test]
    fn field_errors_are_listed() {
        let mut errors = FormErrors::new();
        errors.add("gst_number", "Invalid GST number format");
        assert_eq!(form_errors(&errors), "  gst_number: Invalid GST number format");
    }
}
