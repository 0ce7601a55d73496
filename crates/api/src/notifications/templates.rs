//! Email subject/body templates, one builder per notification.
//!
//! Bodies are small self-contained HTML fragments with a single
//! call-to-action link back into the app. Every interpolated value is
//! HTML-escaped.

use chrono::NaiveDate;
use shiftboard_core::shift_request::{RequestStatus, RequestType};
use shiftboard_core::timeoff::{TimeOffStatus, TimeOffType};
use shiftboard_core::types::Area;
use shiftboard_store::models::shift::ShiftDoc;

/// Escape a value for interpolation into an HTML body.
pub fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#039;")
}

/// Join the app base URL with a path.
pub fn link(app_url: &str, path: &str) -> String {
    format!("{}{}", app_url.trim_end_matches('/'), path)
}

fn action_button(href: &str, label: &str) -> String {
    format!(
        "<p><a href=\"{href}\" style=\"display:inline-block;padding:12px 14px;\
         background:#3FA9F5;color:#001423;border-radius:10px;text-decoration:none;\
         font-weight:800\">{label}</a></p>"
    )
}

fn wrap(subject: &str, inner: &str) -> String {
    format!(
        "<div style=\"font-family:system-ui;line-height:1.4\">\
         <h2>{}</h2>{inner}</div>",
        escape_html(subject)
    )
}

/// One employee's share of a freshly published week.
pub fn schedule_published(
    employee_name: &str,
    shifts: &[ShiftDoc],
    week_start: NaiveDate,
    area: Area,
    schedule_link: &str,
) -> (String, String) {
    let subject = format!("Your schedule for the week of {week_start} ({area})");
    let items: String = shifts
        .iter()
        .map(|s| {
            format!(
                "<li><b>{}</b> | {}-{} | {}</li>",
                s.date,
                s.start.format("%H:%M"),
                s.end.format("%H:%M"),
                escape_html(&s.role)
            )
        })
        .collect();
    let inner = format!(
        "<p>Hi {}, here are <b>only</b> your shifts for this week:</p><ul>{items}</ul>{}",
        escape_html(employee_name),
        action_button(schedule_link, "View full schedule")
    );
    let html = wrap(&subject, &inner);
    (subject, html)
}

/// Confirmation to the manager after a successful publish.
pub fn publish_confirmation(
    week_start: NaiveDate,
    area: Area,
    schedule_link: &str,
) -> (String, String) {
    let subject = format!("Schedule published for {week_start} ({area})");
    let inner = format!(
        "<p>The schedule is live and employees were notified.</p>\
         <p><a href=\"{schedule_link}\">Open in app</a></p>"
    );
    (subject.clone(), wrap(&subject, &inner))
}

/// To the target: someone wants their shift.
pub fn swap_requested(
    requester_name: &str,
    requester_email: &str,
    request_type: RequestType,
    note: Option<&str>,
    swaps_link: &str,
) -> (String, String) {
    let subject = match request_type {
        RequestType::Take => "Request: a coworker wants to take one of your shifts",
        RequestType::Swap => "Request: a coworker wants to swap a shift with you",
    }
    .to_string();
    let note_line = note
        .map(|n| format!("<p><b>Note:</b> {}</p>", escape_html(n)))
        .unwrap_or_default();
    let inner = format!(
        "<p><b>Requested by:</b> {} ({})</p>{note_line}\
         <p>Open the app to accept or reject:</p>{}",
        escape_html(requester_name),
        escape_html(requester_email),
        action_button(swaps_link, "View in app")
    );
    (subject.clone(), wrap(&subject, &inner))
}

/// To the manager: the target accepted, final approval needed.
pub fn swap_needs_manager(
    requester_name: &str,
    requester_email: &str,
    target_name: &str,
    target_email: &str,
    swaps_link: &str,
) -> (String, String) {
    let subject = "Shift change awaiting manager approval".to_string();
    let inner = format!(
        "<p><b>Requester:</b> {} ({})</p><p><b>Target:</b> {} ({})</p>{}",
        escape_html(requester_name),
        escape_html(requester_email),
        escape_html(target_name),
        escape_html(target_email),
        action_button(swaps_link, "Approve or reject in app")
    );
    (subject.clone(), wrap(&subject, &inner))
}

/// To both parties: the manager decided.
pub fn swap_manager_decision(status: RequestStatus, swaps_link: &str) -> (String, String) {
    let subject = if status == RequestStatus::ApprovedByManager {
        "Shift change approved by the manager"
    } else {
        "Shift change rejected by the manager"
    }
    .to_string();
    let inner = format!(
        "<p>Status: <b>{}</b></p>{}",
        escape_html(&format!("{status:?}")),
        action_button(swaps_link, "View details in app")
    );
    (subject.clone(), wrap(&subject, &inner))
}

fn timeoff_type_label(t: TimeOffType) -> &'static str {
    match t {
        TimeOffType::Full => "Full day",
        TimeOffType::HalfAm => "Half day (morning)",
        TimeOffType::HalfPm => "Half day (afternoon)",
    }
}

/// To the manager: a new time-off request.
pub fn timeoff_pending(
    employee_name: &str,
    employee_email: &str,
    date: NaiveDate,
    time_off_type: TimeOffType,
    note: Option<&str>,
    timeoff_link: &str,
) -> (String, String) {
    let subject = "New time-off request (approve/reject)".to_string();
    let note_line = note
        .map(|n| format!("<p><b>Note:</b> {}</p>", escape_html(n)))
        .unwrap_or_default();
    let inner = format!(
        "<p><b>Employee:</b> {} ({})</p><p><b>Date:</b> {date}</p>\
         <p><b>Type:</b> {}</p>{note_line}{}",
        escape_html(employee_name),
        escape_html(employee_email),
        timeoff_type_label(time_off_type),
        action_button(timeoff_link, "Open in app")
    );
    (subject.clone(), wrap(&subject, &inner))
}

/// To the employee: the manager decided their time-off request.
pub fn timeoff_decision(
    status: TimeOffStatus,
    date: NaiveDate,
    time_off_type: TimeOffType,
    note: Option<&str>,
    timeoff_link: &str,
) -> (String, String) {
    let subject = if status == TimeOffStatus::Approved {
        "Your time off was approved"
    } else {
        "Your time off was rejected"
    }
    .to_string();
    let note_line = note
        .map(|n| format!("<p><b>Note:</b> {}</p>", escape_html(n)))
        .unwrap_or_default();
    let inner = format!(
        "<p><b>Date:</b> {date}</p><p><b>Type:</b> {}</p>{note_line}{}",
        timeoff_type_label(time_off_type),
        action_button(timeoff_link, "View details in app")
    );
    (subject.clone(), wrap(&subject, &inner))
}

/// To the manager: a new availability proposal.
pub fn availability_pending(
    employee_name: &str,
    employee_email: &str,
    summary: &str,
    availability_link: &str,
) -> (String, String) {
    let subject = "New availability request (approve/reject)".to_string();
    let inner = format!(
        "<p><b>Employee:</b> {} ({})</p><p><b>Proposal:</b> {}</p>{}",
        escape_html(employee_name),
        escape_html(employee_email),
        escape_html(summary),
        action_button(availability_link, "Open in app")
    );
    (subject.clone(), wrap(&subject, &inner))
}

/// To the employee: the manager decided their availability proposal.
pub fn availability_decision(
    approved: bool,
    summary: &str,
    availability_link: &str,
) -> (String, String) {
    let subject = if approved {
        "Your availability was approved"
    } else {
        "Your availability was rejected"
    }
    .to_string();
    let inner = format!(
        "<p><b>Proposal:</b> {}</p>{}",
        escape_html(summary),
        action_button(availability_link, "View details in app")
    );
    (subject.clone(), wrap(&subject, &inner))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_html_metacharacters() {
        assert_eq!(
            escape_html(r#"<b>&"'</b>"#),
            "&lt;b&gt;&amp;&quot;&#039;&lt;/b&gt;"
        );
    }

    #[test]
    fn link_joins_without_double_slash() {
        assert_eq!(
            link("https://app.example.com/", "/dashboard?tab=swaps"),
            "https://app.example.com/dashboard?tab=swaps"
        );
    }

    #[test]
    fn note_is_escaped_in_swap_request() {
        let (_, html) = swap_requested(
            "Ana",
            "ana@example.com",
            RequestType::Take,
            Some("<script>"),
            "https://app/dashboard",
        );
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }
}
