//! Cleaning untrusted generator output

use regex::Regex;
use std::collections::HashSet;

/// Split generator output into candidate names.
///
/// Lines are trimmed and empty ones dropped. Leading list markers
/// (`1.`, `2)`, `-`, `*`) are removed since models add them despite being
/// told not to.
pub fn parse_candidate_lines(text: &str) -> Vec<String> {
    let marker = Regex::new(r"^(?:\d+[.)]\s+|[-*•]\s+)").ok();

    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| match &marker {
            Some(re) => re.replace(line, "").trim().to_string(),
            None => line.to_string(),
        })
        .filter(|line| !line.is_empty())
        .collect()
}

/// Drop case-insensitive repeats, keeping first occurrences in order
pub fn dedupe_candidates(candidates: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|c| seen.insert(c.to_lowercase()))
        .collect()
}
