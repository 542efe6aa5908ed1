//! Deterministic fallback candidates
//!
//! Candidate `i` is `base + suffixes[i % n] + "." + tld`. After the first
//! pass over the suffixes the pass number is appended (`examplenow2.com`),
//! so the sequence never repeats a name. `base` is shortened when needed so
//! the synthesized label stays within 63 characters.

const MAX_LABEL_LEN: usize = 63;

/// The `i`-th synthesized candidate for `base`
pub fn candidate(base: &str, suffixes: &[String], tld: &str, i: usize) -> Option<String> {
    if suffixes.is_empty() {
        return None;
    }

    let suffix = &suffixes[i % suffixes.len()];
    let pass = i / suffixes.len();

    let tail = if pass == 0 {
        suffix.clone()
    } else {
        format!("{}{}", suffix, pass + 1)
    };

    // base is validated ASCII, so byte slicing stays on char boundaries
    let keep = MAX_LABEL_LEN.saturating_sub(tail.len()).min(base.len());
    Some(format!("{}{}.{}", &base[..keep], tail, tld))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainValidator;
    use crate::types::DEFAULT_SUFFIXES;

    fn suffixes() -> Vec<String> {
        DEFAULT_SUFFIXES.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_first_pass_in_suffix_order() {
        let names: Vec<String> = (0..5)
            .filter_map(|i| candidate("example", &suffixes(), "com", i))
            .collect();

        assert_eq!(
            names,
            vec![
                "examplenow.com",
                "examplehub.com",
                "examplesite.com",
                "exampleonline.com",
                "examplepro.com",
            ]
        );
    }

    #[test]
    fn test_cycle_produces_new_names() {
        let suffixes = suffixes();
        assert_eq!(candidate("example", &suffixes, "com", 5).unwrap(), "examplenow2.com");
        assert_eq!(candidate("example", &suffixes, "com", 11).unwrap(), "examplehub3.com");

        let names: std::collections::HashSet<String> = (0..50)
            .filter_map(|i| candidate("example", &suffixes, "com", i))
            .collect();
        assert_eq!(names.len(), 50);
    }

    #[test]
    fn test_longest_label_is_shortened() {
        let base = "a".repeat(63);
        let suffixes = suffixes();

        let first = candidate(&base, &suffixes, "com", 0).unwrap();
        assert_eq!(first, format!("{}now.com", "a".repeat(60)));

        for i in 0..60 {
            let name = candidate(&base, &suffixes, "com", i).unwrap();
            let label = name.trim_end_matches(".com");
            assert!(label.len() <= 63, "{} is too long", label);
            assert!(DomainValidator::new().validate(&name).is_ok());
        }
    }

    #[test]
    fn test_no_suffixes() {
        assert!(candidate("example", &[], "com", 0).is_none());
    }
}
