//! Card markup for the activities list.
//!
//! Cards are rendered to strings so the list container can keep a single
//! delegated click handler keyed on `.remove-btn` and its data attributes.

use crate::model::Activity;

pub const REMOVE_BUTTON_SELECTOR: &str = ".remove-btn";

/// Escapes the five HTML-significant characters so server strings are inert.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

fn participant_items(name: &str, participants: &[String]) -> String {
    if participants.is_empty() {
        return r#"<li class="no-participants">No participants yet</li>"#.to_string();
    }
    let name = escape_html(name);
    participants
        .iter()
        .map(|p| {
            let email = escape_html(p);
            format!(
                r#"<li class="participant-item"><span class="participant-email">{email}</span><button class="remove-btn" data-activity="{name}" data-email="{email}" title="Remove participant">&times;</button></li>"#
            )
        })
        .collect()
}

/// Inner markup of one `.activity-card`.
pub fn activity_card(name: &str, activity: &Activity) -> String {
    format!(
        r#"<h4>{}</h4><p>{}</p><p><strong>Schedule:</strong> {}</p><p><strong>Availability:</strong> {} spots left</p><div class="participants-section"><p><strong>Participants:</strong></p><ul class="participants-list">{}</ul></div>"#,
        escape_html(name),
        escape_html(&activity.description),
        escape_html(&activity.schedule),
        activity.spots_left(),
        participant_items(name, &activity.participants),
    )
}
