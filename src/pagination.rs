//! Cursor extraction from Sentry's `Link` response header.

use std::collections::BTreeMap;

/// Relation name (`next`, `prev`, ...) to opaque cursor token.
pub type Cursors = BTreeMap<String, String>;

pub fn parse_link_header(header: Option<&str>) -> Cursors {
    let mut cursors = Cursors::new();
    let Some(header) = header else {
        return cursors;
    };
    for segment in header.split(',') {
        if let Some((rel, cursor)) = parse_link_segment(segment) {
            cursors.insert(rel, cursor);
        }
    }
    cursors
}

fn parse_link_segment(segment: &str) -> Option<(String, String)> {
    let mut parts = segment.split(';');
    let target = parts.next()?;
    let open = target.find('<')?;
    target[open..].find('>')?;
    let mut rel = None;
    let mut cursor = None;
    let mut has_results = false;
    for param in parts {
        let Some((key, value)) = param.split_once('=') else {
            continue;
        };
        let value = value.trim().trim_matches('"');
        match key.trim() {
            "rel" => rel = Some(value.to_string()),
            "cursor" => cursor = Some(value.to_string()),
            "results" => has_results = value == "true",
            _ => {}
        }
    }
    if !has_results {
        return None;
    }
    Some((rel?, cursor?))
}
