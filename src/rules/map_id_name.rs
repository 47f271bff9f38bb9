//! `map-id-name`: image map naming

use super::{report, Rule, MAP_ID_NAME};
use crate::diagnostic::{Diagnostic, Severity};
use crate::document::Document;
use crate::template::is_templated;

pub struct MapIdName;

impl Rule for MapIdName {
    fn id(&self) -> &'static str {
        MAP_ID_NAME
    }

    fn description(&self) -> &'static str {
        "map name must be non-empty and match its id"
    }

    fn check(&self, doc: &Document) -> Vec<Diagnostic> {
        let mut results = Vec::new();

        for (_, map) in doc.elements().filter(|(_, n)| n.is("map")) {
            let Some(name) = map.attr("name") else {
                results.push(report(doc, map, MAP_ID_NAME, Severity::Error, "map must have a name attribute"));
                continue;
            };
            if is_templated(name) {
                continue;
            }

            if name.is_empty() {
                results.push(report(doc, map, MAP_ID_NAME, Severity::Error, "map name must not be empty"));
                continue;
            }
            if name.chars().any(char::is_whitespace) {
                results.push(report(
                    doc,
                    map,
                    MAP_ID_NAME,
                    Severity::Error,
                    format!("map name '{}' must not contain whitespace", name),
                ));
            }
            if let Some(id) = map.attr("id").filter(|id| !is_templated(id)) {
                if id != name {
                    results.push(report(
                        doc,
                        map,
                        MAP_ID_NAME,
                        Severity::Error,
                        format!("map id '{}' must match name '{}'", id, name),
                    ));
                }
            }
        }

        results
    }
}
