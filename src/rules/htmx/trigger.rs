//! `hx-trigger`: comma-separated trigger specifications

use super::Finding;
use crate::htmlspec::htmx::{is_time_value, INTERSECT_MODIFIERS, QUEUE_MODES, TRIGGER_MODIFIERS};

pub fn validate_trigger(value: &str) -> Vec<Finding> {
    value
        .split(',')
        .map(str::trim)
        .filter(|spec| !spec.is_empty())
        .flat_map(validate_single)
        .collect()
}

fn validate_single(spec: &str) -> Vec<Finding> {
    let parts: Vec<&str> = spec.split_whitespace().collect();
    let Some((event, modifiers)) = parts.split_first() else {
        return Vec::new();
    };

    match event.to_ascii_lowercase().as_str() {
        "every" => validate_every(modifiers),
        "intersect" => modifiers
            .iter()
            .filter(|m| **m != "once" && !INTERSECT_MODIFIERS.iter().any(|p| m.starts_with(p)))
            .map(|m| Finding::warning(format!("unknown intersect modifier '{}'", m)))
            .collect(),
        _ => modifiers.iter().filter_map(|m| validate_modifier(m)).collect(),
    }
}

fn validate_every(rest: &[&str]) -> Vec<Finding> {
    match rest.first() {
        None => vec![Finding::error(
            "hx-trigger 'every' requires a time value (e.g., 'every 1s')",
        )],
        Some(interval) if !is_time_value(interval) => vec![Finding::error(
            "hx-trigger 'every' requires a valid time value (e.g., '1s', '500ms')",
        )],
        Some(_) => Vec::new(),
    }
}

fn validate_modifier(modifier: &str) -> Option<Finding> {
    // Filter expressions such as [ctrlKey] are not checked
    if modifier.starts_with('[') && modifier.ends_with(']') {
        return None;
    }

    let Some((name, value)) = modifier.split_once(':') else {
        return (!TRIGGER_MODIFIERS.contains(modifier.to_ascii_lowercase().as_str())).then(|| {
            Finding::warning(format!("unknown hx-trigger modifier '{}'", modifier))
        });
    };

    let name = name.to_ascii_lowercase();
    if !TRIGGER_MODIFIERS.contains(name.as_str()) {
        return Some(Finding::warning(format!("unknown hx-trigger modifier '{}'", name)));
    }

    match name.as_str() {
        "delay" | "throttle" if !is_time_value(value) => Some(Finding::error(format!(
            "hx-trigger {} requires a time value (e.g., '1s', '500ms')",
            name
        ))),
        "queue" if !QUEUE_MODES.contains(&value.to_ascii_lowercase().as_str()) => {
            Some(Finding::error(
                "hx-trigger queue mode should be 'first', 'last', 'all', or 'none'",
            ))
        }
        _ => None,
    }
}
