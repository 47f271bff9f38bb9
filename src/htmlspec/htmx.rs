//! htmx attribute and event vocabularies for versions 2 and 4

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

type Vocabulary = Lazy<HashSet<&'static str>>;

fn collect(values: &[&'static str]) -> HashSet<&'static str> {
    values.iter().copied().collect()
}

/// Swap strategies, lowercased
pub static SWAP_STRATEGIES: Vocabulary = Lazy::new(|| {
    collect(&[
        "innerhtml", "outerhtml", "beforebegin", "afterbegin", "beforeend", "afterend", "delete",
        "none", "textcontent", "upsert",
    ])
});

/// Swap strategies introduced in htmx 4
pub const SWAP_STRATEGIES_V4: &[&str] = &["textcontent", "upsert"];

pub static SWAP_MODIFIERS: Vocabulary = Lazy::new(|| {
    collect(&[
        "swap", "settle", "scroll", "show", "focus-scroll", "transition", "ignoretitle",
    ])
});

pub static TRIGGER_MODIFIERS: Vocabulary = Lazy::new(|| {
    collect(&[
        "once", "changed", "delay", "throttle", "from", "target", "consume", "queue", "root",
        "threshold",
    ])
});

/// Modifiers accepted after `intersect`, as prefixes
pub const INTERSECT_MODIFIERS: &[&str] = &["root:", "threshold:"];

pub const QUEUE_MODES: &[&str] = &["first", "last", "all", "none"];

/// A duration such as `500ms` or `1s`
pub static TIME_VALUE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+(?:ms|s)$").unwrap());

/// Single-word `hx-target` values
pub const TARGET_SPECIAL_VALUES: &[&str] = &["this", "next", "previous", "body"];

/// Keywords that take a selector in `hx-target`
pub const TARGET_KEYWORDS: &[&str] = &["closest", "find", "next", "previous"];

/// DOM events accepted in `hx-on:*`, lowercased
pub static DOM_EVENTS: Vocabulary = Lazy::new(|| {
    collect(&[
        // Mouse
        "click", "dblclick", "mousedown", "mouseup", "mousemove", "mouseenter", "mouseleave",
        "mouseover", "mouseout",
        // Keyboard
        "keydown", "keyup", "keypress",
        // Form
        "submit", "change", "input", "focus", "blur", "reset", "invalid", "select",
        // Document and window
        "load", "unload", "resize", "scroll", "error", "beforeunload", "hashchange", "popstate",
        // Drag
        "drag", "dragstart", "dragend", "dragover", "dragenter", "dragleave", "drop",
        // Touch
        "touchstart", "touchend", "touchmove", "touchcancel",
        // Pointer
        "pointerdown", "pointerup", "pointermove", "pointerenter", "pointerleave", "pointerover",
        "pointerout", "pointercancel",
        // Animation and transition
        "animationstart", "animationend", "animationiteration", "transitionstart",
        "transitionend", "transitionrun", "transitioncancel",
        // Clipboard
        "copy", "cut", "paste",
        // Media
        "play", "pause", "ended", "volumechange", "seeking", "seeked", "timeupdate", "loadeddata",
        "loadedmetadata",
        "contextmenu", "wheel", "compositionstart", "compositionend",
    ])
});

/// htmx 2 events; attribute names arrive lowercased, so compare case-insensitively
pub const V2_EVENTS: &[&str] = &[
    "htmx:abort",
    "htmx:afterOnLoad",
    "htmx:afterProcessNode",
    "htmx:afterRequest",
    "htmx:afterSettle",
    "htmx:afterSwap",
    "htmx:beforeCleanupElement",
    "htmx:beforeOnLoad",
    "htmx:beforeProcessNode",
    "htmx:beforeRequest",
    "htmx:beforeSend",
    "htmx:beforeSwap",
    "htmx:beforeTransition",
    "htmx:configRequest",
    "htmx:confirm",
    "htmx:historyCacheError",
    "htmx:historyCacheHit",
    "htmx:historyCacheMiss",
    "htmx:historyCacheMissLoad",
    "htmx:historyCacheMissLoadError",
    "htmx:historyRestore",
    "htmx:beforeHistorySave",
    "htmx:beforeHistoryUpdate",
    "htmx:load",
    "htmx:noSSESourceError",
    "htmx:oobAfterSwap",
    "htmx:oobBeforeSwap",
    "htmx:oobErrorNoTarget",
    "htmx:onLoadError",
    "htmx:prompt",
    "htmx:pushedIntoHistory",
    "htmx:replacedInHistory",
    "htmx:responseError",
    "htmx:sendAbort",
    "htmx:sendError",
    "htmx:sseError",
    "htmx:swapError",
    "htmx:targetError",
    "htmx:timeout",
    "htmx:trigger",
    "htmx:validateUrl",
    "htmx:validation:validate",
    "htmx:validation:failed",
    "htmx:validation:halted",
    "htmx:xhr:abort",
    "htmx:xhr:loadstart",
    "htmx:xhr:loadend",
    "htmx:xhr:progress",
];

/// Lowercased [`V2_EVENTS`]
pub static V2_EVENTS_LOWER: Lazy<HashSet<String>> =
    Lazy::new(|| V2_EVENTS.iter().map(|e| e.to_ascii_lowercase()).collect());

/// htmx 4 event phases (`htmx:phase:action`)
pub const V4_PHASES: &[&str] = &["before", "after", "error", "finally"];

/// htmx 4 events that have no phase
pub const V4_STANDALONE_EVENTS: &[&str] = &["load", "abort", "trigger", "confirm", "prompt"];

/// htmx 4 event actions, lowercased
pub static V4_ACTIONS: Vocabulary = Lazy::new(|| {
    collect(&[
        "request", "swap", "settle", "send", "process", "cleanup", "onload", "transition",
        "viewtransition", "history", "historyupdate", "historysave", "sse", "oob",
    ])
});

/// Attributes that issue a request
pub const REQUEST_ATTRIBUTES: &[&str] = &["hx-get", "hx-post", "hx-put", "hx-patch", "hx-delete"];

/// Attribute names understood by htmx 2
pub static V2_ATTRIBUTES: Vocabulary = Lazy::new(|| {
    collect(&[
        "hx-get", "hx-post", "hx-put", "hx-patch", "hx-delete", "hx-trigger", "hx-target",
        "hx-swap", "hx-swap-oob", "hx-select", "hx-select-oob", "hx-vals", "hx-push-url",
        "hx-replace-url", "hx-boost", "hx-confirm", "hx-disable", "hx-disabled-elt",
        "hx-disinherit", "hx-encoding", "hx-ext", "hx-headers", "hx-history", "hx-history-elt",
        "hx-include", "hx-indicator", "hx-inherit", "hx-params", "hx-preserve", "hx-prompt",
        "hx-request", "hx-sync", "hx-validate", "hx-vars",
    ])
});

/// Attribute names added in htmx 4
pub static V4_ONLY_ATTRIBUTES: Vocabulary = Lazy::new(|| {
    collect(&["hx-optimistic", "hx-action", "hx-method", "hx-config", "hx-status"])
});

/// htmx 2 attribute names removed or replaced in htmx 4
pub static V4_DEPRECATED_ATTRIBUTES: Vocabulary = Lazy::new(|| {
    collect(&[
        "hx-vars", "hx-params", "hx-request", "hx-history", "hx-history-elt", "hx-disinherit",
        "hx-inherit", "hx-prompt",
    ])
});

/// True for `hx-*` and `data-hx-*` names, lowercased
pub fn is_htmx_attribute(name: &str) -> bool {
    name.starts_with("hx-") || name.starts_with("data-hx-")
}

/// True for `hx-on:*`, `hx-on-*` and `hx-on::*` names
pub fn is_event_handler_attribute(name: &str) -> bool {
    name.starts_with("hx-on:") || name.starts_with("hx-on-")
}

pub fn is_time_value(value: &str) -> bool {
    TIME_VALUE.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_values() {
        assert!(is_time_value("1s"));
        assert!(is_time_value("500ms"));
        assert!(!is_time_value("1.5s"));
        assert!(!is_time_value("fast"));
        assert!(!is_time_value("10"));
    }

    #[test]
    fn test_v4_swap_strategies_are_in_vocabulary() {
        for strategy in SWAP_STRATEGIES_V4 {
            assert!(SWAP_STRATEGIES.contains(strategy));
        }
    }

    #[test]
    fn test_deprecated_attributes_exist_in_v2() {
        for attr in V4_DEPRECATED_ATTRIBUTES.iter() {
            assert!(V2_ATTRIBUTES.contains(attr), "{}", attr);
        }
        for attr in V4_ONLY_ATTRIBUTES.iter() {
            assert!(!V2_ATTRIBUTES.contains(attr), "{}", attr);
        }
    }

    #[test]
    fn test_v2_events_lowercased() {
        assert!(V2_EVENTS_LOWER.contains("htmx:afterrequest"));
        assert_eq!(V2_EVENTS_LOWER.len(), V2_EVENTS.len());
    }

    #[test]
    fn test_event_handler_attribute() {
        assert!(is_event_handler_attribute("hx-on:click"));
        assert!(is_event_handler_attribute("hx-on::after-request"));
        assert!(is_event_handler_attribute("hx-on-click"));
        assert!(!is_event_handler_attribute("hx-one"));
    }

    #[test]
    fn test_htmx_attribute_names() {
        assert!(is_htmx_attribute("hx-get"));
        assert!(is_htmx_attribute("data-hx-post"));
        assert!(!is_htmx_attribute("data-x"));
        assert!(!is_htmx_attribute("hx"));
    }
}
