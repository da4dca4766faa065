//! Skill and career extraction from free text (bios, resume snippets, goals).
//!
//! Both heuristics are single passes over the career catalog. A catalog name is
//! found when its lowercase form appears in the lowercase text bounded by
//! non-alphanumeric characters or the text edges, so "Go" is not found inside "Google".

use std::collections::HashSet;

use crate::grading::careers::CareerCatalog;

/// Returns catalog skills mentioned in `text`, in catalog order, deduplicated ignoring case.
pub fn extract_skills(text: &str, catalog: &CareerCatalog) -> Vec<String> {
    let haystack = text.to_lowercase();
    let mut seen = HashSet::new();
    let mut found = Vec::new();

    for (_, profile) in catalog.iter() {
        for skill in profile.all_skills() {
            let needle = skill.to_lowercase();
            if seen.contains(&needle) {
                continue;
            }
            if contains_term(&haystack, &needle) {
                seen.insert(needle);
                found.push(skill.to_string());
            }
        }
    }

    found
}

/// Returns the catalog career named in `text`, preferring the longest matching name.
pub fn detect_career(text: &str, catalog: &CareerCatalog) -> Option<String> {
    let haystack = text.to_lowercase();
    catalog
        .names()
        .filter(|name| contains_term(&haystack, &name.to_lowercase()))
        .max_by_key(|name| name.len())
        .map(str::to_string)
}

/// Whole-term search. Both arguments must already be lowercase.
fn contains_term(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }

    let mut start = 0;
    while let Some(pos) = haystack[start..].find(needle) {
        let begin = start + pos;
        let end = begin + needle.len();

        let before_ok = haystack[..begin]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let after_ok = haystack[end..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());

        if before_ok && after_ok {
            return true;
        }

        // advance past the first char of this occurrence
        start = begin + haystack[begin..].chars().next().map_or(1, char::len_utf8);
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_term_respects_boundaries() {
        assert!(contains_term("i write go daily", "go"));
        assert!(!contains_term("i work at google", "go"));
        assert!(contains_term("node.js, sql", "node.js"));
        assert!(contains_term("c++", "c++"));
        assert!(!contains_term("", "rust"));
        assert!(!contains_term("rust", ""));
    }

    #[test]
    fn test_contains_term_finds_later_occurrence() {
        assert!(contains_term("mongodb and sql", "sql"));
        assert!(contains_term("nosql vs sql", "sql"));
    }

    #[test]
    fn test_extract_skills_from_bio() {
        let catalog = CareerCatalog::builtin();
        let text = "Three years building React apps with TypeScript, plus some Docker and SQL.";
        let skills = extract_skills(text, &catalog);
        for expected in ["React", "TypeScript", "Docker", "SQL"] {
            assert!(skills.iter().any(|s| s == expected), "missing {expected} in {skills:?}");
        }
        assert!(!skills.iter().any(|s| s == "Python"));
    }

    #[test]
    fn test_extract_skills_deduplicates() {
        let catalog = CareerCatalog::builtin();
        let skills = extract_skills("sql SQL Sql", &catalog);
        assert_eq!(skills.iter().filter(|s| s.eq_ignore_ascii_case("sql")).count(), 1);
    }

    #[test]
    fn test_extract_skills_empty_text() {
        let catalog = CareerCatalog::builtin();
        assert!(extract_skills("", &catalog).is_empty());
    }

    #[test]
    fn test_detect_career_prefers_longest_name() {
        let catalog = CareerCatalog::builtin();
        assert_eq!(
            detect_career("I want to become a full stack developer next year", &catalog).as_deref(),
            Some("Full Stack Developer")
        );
        assert_eq!(
            detect_career("Aspiring Data Scientist", &catalog).as_deref(),
            Some("Data Scientist")
        );
    }

    #[test]
    fn test_detect_career_none_when_absent() {
        let catalog = CareerCatalog::builtin();
        assert_eq!(detect_career("I like gardening", &catalog), None);
    }
}
