//! `hx-swap`: strategy followed by `name:value` modifiers

use super::Finding;
use crate::htmlspec::htmx::{is_time_value, SWAP_MODIFIERS, SWAP_STRATEGIES, SWAP_STRATEGIES_V4};
use crate::rules::HtmxVersion;

pub fn validate_swap(value: &str, version: HtmxVersion) -> Vec<Finding> {
    let mut parts = value.split_whitespace();
    let Some(strategy) = parts.next() else {
        return Vec::new();
    };

    let lowered = strategy.to_ascii_lowercase();
    if version != HtmxVersion::V4 && SWAP_STRATEGIES_V4.contains(&lowered.as_str()) {
        return vec![Finding::warning(format!(
            "hx-swap value '{}' is only available in htmx 4",
            lowered
        ))];
    }
    if !SWAP_STRATEGIES.contains(lowered.as_str()) {
        return vec![Finding::error(format!("invalid hx-swap value '{}'", strategy))];
    }

    parts.filter_map(validate_modifier).collect()
}

fn validate_modifier(modifier: &str) -> Option<Finding> {
    let Some((name, value)) = modifier.split_once(':') else {
        return Some(Finding::error(format!(
            "invalid hx-swap modifier '{}' (missing colon)",
            modifier
        )));
    };

    let name = name.to_ascii_lowercase();
    if !SWAP_MODIFIERS.contains(name.as_str()) {
        return Some(Finding::warning(format!("unknown hx-swap modifier '{}'", name)));
    }

    match name.as_str() {
        "swap" | "settle" if !is_time_value(value) => Some(Finding::error(format!(
            "hx-swap {} modifier requires a time value (e.g., '1s', '500ms')",
            name
        ))),
        "scroll" | "show" => {
            let position = value.to_ascii_lowercase();
            // `top`, `bottom`, or `selector:top` style targets
            let valid = position == "top"
                || position == "bottom"
                || value.starts_with('#')
                || value.contains(':');
            (!valid).then(|| {
                Finding::warning(format!(
                    "hx-swap {} modifier value should be 'top', 'bottom', or a selector",
                    name
                ))
            })
        }
        "focus-scroll" | "transition" if value != "true" && value != "false" => Some(
            Finding::error(format!("hx-swap {} modifier should be 'true' or 'false'", name)),
        ),
        _ => None,
    }
}
