//! Rendering helpers for standings and pairings.
//!
//! Player names are stored exactly as registered. Anything that shows them
//! to a person passes them through [`strip_markup`] first.

use std::fmt::Write;

use crate::tournament::{Pairing, StandingRow};

/// Elements whose content is dropped along with the tags
const DROPPED_ELEMENTS: &[&str] = &["script", "style"];

/// Remove markup tags from a name for display.
///
/// Tags are removed and their text content kept, except for `<script>` and
/// `<style>` elements which are dropped entirely. A `<` that never closes is
/// kept as literal text.
pub fn strip_markup(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        let after_open = &rest[open..];
        let Some(close) = after_open.find('>') else {
            out.push_str(after_open);
            return out;
        };

        let tag = &after_open[1..close];
        rest = &after_open[close + 1..];

        // A self-closing `<script/>` has no body to drop
        let self_closing = tag.trim_end().ends_with('/');
        if let Some(element) = dropped_element(tag) {
            if !self_closing {
                rest = skip_past_closing_tag(rest, element);
            }
        }
    }

    out.push_str(rest);
    out
}

/// Name of a dropped element opened by `tag`, if any
fn dropped_element(tag: &str) -> Option<&'static str> {
    let name = tag
        .trim_start()
        .split(|c: char| c.is_whitespace() || c == '/')
        .next()
        .unwrap_or_default();
    DROPPED_ELEMENTS
        .iter()
        .copied()
        .find(|element| element.eq_ignore_ascii_case(name))
}

fn skip_past_closing_tag<'a>(rest: &'a str, element: &str) -> &'a str {
    let closing = format!("</{element}");
    let lower = rest.to_ascii_lowercase();
    match lower.find(&closing) {
        Some(start) => match rest[start..].find('>') {
            Some(end) => &rest[start + end + 1..],
            None => "",
        },
        None => "",
    }
}

/// Render standings as a fixed-width text table
pub fn render_standings(rows: &[StandingRow]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>4}  {:>6}  {:<30}  {:>4}  {:>7}",
        "RANK", "ID", "NAME", "WINS", "MATCHES"
    );
    for (rank, row) in rows.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>4}  {:>6}  {:<30}  {:>4}  {:>7}",
            rank + 1,
            row.id,
            strip_markup(&row.name),
            row.wins,
            row.matches
        );
    }
    out
}

/// Render pairings one per line, numbered by table
pub fn render_pairings(pairings: &[Pairing]) -> String {
    let mut out = String::new();
    for (table, pairing) in pairings.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}. {} ({}) vs {} ({})",
            table + 1,
            strip_markup(&pairing.name1),
            pairing.id1,
            strip_markup(&pairing.name2),
            pairing.id2
        );
    }
    out
}
