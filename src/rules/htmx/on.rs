//! `hx-on:*` event names
//!
//! Attribute names reach us lowercased, so every vocabulary is compared
//! case-insensitively, and dashes are ignored so `before-request` matches
//! `beforeRequest`.

use super::Finding;
use crate::htmlspec::htmx::{DOM_EVENTS, V2_EVENTS_LOWER, V4_ACTIONS, V4_PHASES, V4_STANDALONE_EVENTS};
use crate::rules::HtmxVersion;

const HTMX_PREFIX: &str = "htmx:";

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|&c| c != '-')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Event name carried by an `hx-on` attribute, with shorthands expanded
fn event_name(attribute: &str) -> Option<String> {
    let rest = attribute
        .strip_prefix("hx-on:")
        .or_else(|| attribute.strip_prefix("hx-on-"))?;

    // `hx-on::after-request` and `hx-on--after-request` mean `htmx:after-request`
    let expanded = match rest.strip_prefix([':', '-']) {
        Some(shorthand) => format!("{}{}", HTMX_PREFIX, shorthand),
        None => rest.to_string(),
    };
    Some(expanded)
}

pub fn validate_event_handler(attribute: &str, version: HtmxVersion) -> Vec<Finding> {
    let event = match event_name(attribute) {
        Some(event) if !event.is_empty() => event,
        _ => return vec![Finding::error("hx-on:* requires an event name")],
    };

    let lowered = event.to_ascii_lowercase();
    if DOM_EVENTS.contains(lowered.as_str()) {
        return Vec::new();
    }

    if lowered.starts_with(HTMX_PREFIX) {
        return match version {
            HtmxVersion::V2 => validate_v2_event(&event),
            HtmxVersion::V4 => validate_v4_event(&event),
        };
    }

    vec![Finding::warning(format!(
        "unknown event '{}' in hx-on:*; if this is a custom event, ignore this warning",
        event
    ))]
}

fn validate_v2_event(event: &str) -> Vec<Finding> {
    let normalized = normalize(event);
    if V2_EVENTS_LOWER.iter().any(|known| normalize(known) == normalized) {
        return Vec::new();
    }
    vec![Finding::warning(format!("unknown htmx event '{}'", event))]
}

fn validate_v4_event(event: &str) -> Vec<Finding> {
    let remainder = &event[HTMX_PREFIX.len()..];
    let (phase, rest) = remainder.split_once(':').unwrap_or((remainder, ""));

    if phase.is_empty() {
        return vec![Finding::error(format!("invalid htmx event format '{}'", event))];
    }

    let phase_lower = phase.to_ascii_lowercase();
    if !V4_PHASES.contains(&phase_lower.as_str()) {
        if V4_STANDALONE_EVENTS.contains(&phase_lower.as_str()) {
            return Vec::new();
        }
        return vec![Finding::warning(format!(
            "unknown htmx 4 event phase '{}' in '{}'",
            phase, event
        ))];
    }

    let action = rest.split(':').next().unwrap_or("");
    if !action.is_empty() && !V4_ACTIONS.contains(normalize(action).as_str()) {
        return vec![Finding::warning(format!(
            "unknown htmx 4 event action '{}' in '{}'",
            action, event
        ))];
    }

    Vec::new()
}
