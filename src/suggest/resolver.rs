//! Bounded generate / verify / backfill loop

use crate::domain::{AvailabilityEvaluator, DomainValidator};
use crate::error::{DomainScoutError, Result};
use crate::llm::CandidateSource;
use crate::suggest::backfill;
use crate::suggest::candidates::{dedupe_candidates, parse_candidate_lines};
use crate::types::{SuggestConfig, SuggestionOrigin};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

/// A name that verified as available
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub domain: String,
    pub origin: SuggestionOrigin,
}

/// Confirmed-available names for one seed, in acceptance order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestionSet {
    pub seed: String,
    pub suggestions: Vec<Suggestion>,
}

impl SuggestionSet {
    pub fn names(&self) -> Vec<String> {
        self.suggestions.iter().map(|s| s.domain.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.suggestions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suggestions.is_empty()
    }
}

/// Per-request bookkeeping
struct Run {
    accepted: Vec<Suggestion>,
    /// Lowercased names already accepted, rejected, or otherwise ruled out
    seen: HashSet<String>,
    verifications: usize,
}

/// Produces exactly `count` available alternatives to a seed domain
pub struct SuggestionResolver {
    evaluator: Arc<AvailabilityEvaluator>,
    source: Option<Arc<dyn CandidateSource>>,
    validator: DomainValidator,
    config: SuggestConfig,
}

impl SuggestionResolver {
    /// Resolver without an AI source; every name comes from the backfill
    pub fn new(evaluator: Arc<AvailabilityEvaluator>, config: SuggestConfig) -> Self {
        Self {
            evaluator,
            source: None,
            validator: DomainValidator::new(),
            config,
        }
    }

    /// Use `source` as the primary candidate supplier
    pub fn with_source(mut self, source: Arc<dyn CandidateSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Resolve the configured number of suggestions
    pub async fn resolve(&self, seed: &str) -> Result<SuggestionSet> {
        self.resolve_count(seed, self.config.count).await
    }

    /// Resolve exactly `count` suggestions or fail
    pub async fn resolve_count(&self, seed: &str, count: usize) -> Result<SuggestionSet> {
        let start_time = Instant::now();
        let seed = self.validator.validate(seed)?;

        let mut run = Run {
            accepted: Vec::with_capacity(count),
            seen: HashSet::from([seed.full_domain.clone()]),
            verifications: 0,
        };

        let candidates = self.generate_candidates(&seed.full_domain).await;
        let ai_candidates = candidates.len();

        for candidate in candidates {
            if run.accepted.len() >= count {
                break;
            }
            self.try_accept(&mut run, &candidate, SuggestionOrigin::Ai).await;
        }

        let base = seed.registrable_label();
        let mut attempts = 0;
        while run.accepted.len() < count && attempts < self.config.max_fallback_attempts {
            let Some(candidate) =
                backfill::candidate(base, &self.config.suffixes, &self.config.fallback_tld, attempts)
            else {
                break;
            };
            attempts += 1;
            self.try_accept(&mut run, &candidate, SuggestionOrigin::Fallback).await;
        }

        if run.accepted.len() < count {
            tracing::warn!(
                domain = %seed.full_domain,
                found = run.accepted.len(),
                wanted = count,
                fallback_attempts = attempts,
                "Could not confirm enough available suggestions"
            );
            return Err(DomainScoutError::suggestions_exhausted(
                seed.full_domain,
                run.accepted.len(),
                count,
            ));
        }

        tracing::info!(
            domain = %seed.full_domain,
            ai_candidates,
            fallback_attempts = attempts,
            verifications = run.verifications,
            duration_ms = %start_time.elapsed().as_millis(),
            "Suggestions resolved"
        );

        Ok(SuggestionSet {
            seed: seed.full_domain,
            suggestions: run.accepted,
        })
    }

    /// Ask the source for names; any failure yields an empty list.
    ///
    /// At most `candidate_batch` names are kept, however long the reply.
    async fn generate_candidates(&self, seed: &str) -> Vec<String> {
        let Some(source) = &self.source else {
            tracing::debug!(domain = %seed, "No candidate source configured");
            return Vec::new();
        };

        match source.generate(seed, self.config.candidate_batch).await {
            Ok(text) => dedupe_candidates(parse_candidate_lines(&text))
                .into_iter()
                .take(self.config.candidate_batch)
                .collect(),
            Err(e) => {
                tracing::warn!(domain = %seed, error = %e, "Candidate generation failed, using fallback");
                Vec::new()
            }
        }
    }

    /// Verify one candidate and accept it if available
    async fn try_accept(&self, run: &mut Run, candidate: &str, origin: SuggestionOrigin) {
        let validated = match self.validator.validate(candidate) {
            Ok(v) => v,
            Err(e) => {
                tracing::debug!(candidate = %candidate, error = %e, "Discarding malformed candidate");
                return;
            }
        };

        if !run.seen.insert(validated.full_domain.clone()) {
            return;
        }

        run.verifications += 1;
        match self.evaluator.is_available(&validated.full_domain).await {
            Ok(true) => run.accepted.push(Suggestion {
                domain: validated.full_domain,
                origin,
            }),
            Ok(false) => {
                tracing::debug!(candidate = %validated.full_domain, %origin, "Candidate is taken");
            }
            Err(e) => {
                tracing::warn!(
                    candidate = %validated.full_domain,
                    %origin,
                    error = %e,
                    "Could not verify candidate"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RegistryLookup, RegistryRecord};
    use crate::error::ErrorKind;
    use crate::types::LookupMethod;
    use async_trait::async_trait;
    use parking_lot::Mutex;

    /// Registry where listed names are taken or fail; the rest are free
    #[derive(Default)]
    struct FakeRegistry {
        taken: Vec<&'static str>,
        failing: Vec<&'static str>,
        queries: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl RegistryLookup for FakeRegistry {
        async fn lookup(&self, domain: &str) -> Result<RegistryRecord> {
            self.queries.lock().push(domain.to_string());
            if self.failing.iter().any(|d| *d == domain) {
                return Err(DomainScoutError::timeout("fake lookup", 1));
            }
            if self.taken.iter().any(|d| *d == domain) {
                return Ok(RegistryRecord {
                    domain_name: Some(domain.to_string()),
                    ..RegistryRecord::unregistered(LookupMethod::Rdap)
                });
            }
            Ok(RegistryRecord::unregistered(LookupMethod::Rdap))
        }

        fn name(&self) -> &'static str {
            "fake"
        }
    }

    struct FakeSource(Option<&'static str>);

    #[async_trait]
    impl CandidateSource for FakeSource {
        async fn generate(&self, _seed: &str, _count: usize) -> Result<String> {
            self.0
                .map(str::to_string)
                .ok_or_else(|| DomainScoutError::llm_provider("fake", "quota exceeded", None))
        }
    }

    fn resolver(registry: Arc<FakeRegistry>, source: Option<&'static str>) -> SuggestionResolver {
        let evaluator = Arc::new(AvailabilityEvaluator::new(registry));
        SuggestionResolver::new(evaluator, SuggestConfig::default())
            .with_source(Arc::new(FakeSource(source)))
    }

    #[tokio::test]
    async fn test_ai_names_then_backfill() {
        let registry = Arc::new(FakeRegistry {
            taken: vec!["taken1.com"],
            ..Default::default()
        });
        let resolver = resolver(registry.clone(), Some("taken1.com\ntaken1.com\nfree1.io"));

        let set = resolver.resolve("example.com").await.unwrap();

        assert_eq!(
            set.names(),
            vec![
                "free1.io",
                "examplenow.com",
                "examplehub.com",
                "examplesite.com",
                "exampleonline.com",
            ]
        );
        assert_eq!(set.suggestions[0].origin, SuggestionOrigin::Ai);
        assert!(set.suggestions[1..].iter().all(|s| s.origin == SuggestionOrigin::Fallback));

        // the duplicate was never looked up twice
        let queries = registry.queries.lock();
        assert_eq!(queries.iter().filter(|q| *q == "taken1.com").count(), 1);
    }

    #[tokio::test]
    async fn test_stops_verifying_at_count() {
        let registry = Arc::new(FakeRegistry::default());
        let resolver = resolver(
            registry.clone(),
            Some("a-one.com\nb-two.com\nc-three.com\nd-four.com\ne-five.com\nf-six.com\ng-seven.com"),
        );

        let set = resolver.resolve("example.com").await.unwrap();

        assert_eq!(set.len(), 5);
        assert_eq!(registry.queries.lock().len(), 5);
        assert!(set.suggestions.iter().all(|s| s.origin == SuggestionOrigin::Ai));
    }

    #[tokio::test]
    async fn test_generation_failure_uses_fallback_in_order() {
        let registry = Arc::new(FakeRegistry {
            taken: vec!["examplehub.com"],
            ..Default::default()
        });
        let resolver = resolver(registry, None);

        let set = resolver.resolve("example.com").await.unwrap();

        assert_eq!(
            set.names(),
            vec![
                "examplenow.com",
                "examplesite.com",
                "exampleonline.com",
                "examplepro.com",
                "examplenow2.com",
            ]
        );
    }

    #[tokio::test]
    async fn test_no_source_is_fallback_only() {
        let evaluator = Arc::new(AvailabilityEvaluator::new(Arc::new(FakeRegistry::default())));
        let resolver = SuggestionResolver::new(evaluator, SuggestConfig::default());

        let set = resolver.resolve("Example.COM").await.unwrap();

        assert_eq!(set.seed, "example.com");
        assert_eq!(set.names()[0], "examplenow.com");
        assert_eq!(set.len(), 5);
    }

    #[tokio::test]
    async fn test_results_are_distinct_and_exclude_seed() {
        let registry = Arc::new(FakeRegistry::default());
        let resolver = resolver(
            registry,
            Some("Example.com\nExampleNow.com\nexamplenow.com\nNot a domain\nbrightly.io"),
        );

        let set = resolver.resolve("example.com").await.unwrap();
        let names = set.names();

        assert_eq!(names.len(), 5);
        let unique: HashSet<String> = names.iter().map(|n| n.to_lowercase()).collect();
        assert_eq!(unique.len(), 5);
        assert!(!names.contains(&"example.com".to_string()));
        assert_eq!(names[0], "examplenow.com");
        assert_eq!(names[1], "brightly.io");
        assert_eq!(names[2], "examplehub.com");
    }

    #[tokio::test]
    async fn test_verification_failure_is_rejection() {
        let registry = Arc::new(FakeRegistry {
            failing: vec!["flaky.io"],
            ..Default::default()
        });
        let resolver = resolver(registry, Some("flaky.io"));

        let set = resolver.resolve("example.com").await.unwrap();

        assert!(!set.names().contains(&"flaky.io".to_string()));
        assert_eq!(set.len(), 5);
    }

    #[tokio::test]
    async fn test_everything_taken_is_bounded() {
        let registry = Arc::new(FakeRegistry::default());

        struct AllTaken(Arc<FakeRegistry>);

        #[async_trait]
        impl RegistryLookup for AllTaken {
            async fn lookup(&self, domain: &str) -> Result<RegistryRecord> {
                self.0.queries.lock().push(domain.to_string());
                Ok(RegistryRecord {
                    domain_name: Some(domain.to_string()),
                    ..RegistryRecord::unregistered(LookupMethod::Rdap)
                })
            }

            fn name(&self) -> &'static str {
                "all-taken"
            }
        }

        let evaluator = Arc::new(AvailabilityEvaluator::new(Arc::new(AllTaken(registry.clone()))));
        let config = SuggestConfig {
            max_fallback_attempts: 12,
            ..Default::default()
        };
        let resolver = SuggestionResolver::new(evaluator, config)
            .with_source(Arc::new(FakeSource(Some("one.com\ntwo.com"))));

        let err = resolver.resolve("example.com").await.unwrap_err();

        assert!(matches!(err, DomainScoutError::SuggestionsExhausted { found: 0, wanted: 5, .. }));
        assert_eq!(err.kind(), ErrorKind::CollaboratorUnavailable);
        assert_eq!(registry.queries.lock().len(), 2 + 12);
    }

    #[tokio::test]
    async fn test_long_reply_is_capped_at_batch() {
        struct Chatty;

        #[async_trait]
        impl CandidateSource for Chatty {
            async fn generate(&self, _seed: &str, _count: usize) -> Result<String> {
                Ok((0..500).map(|i| format!("name{}.com\n", i)).collect())
            }
        }

        struct Taken(Mutex<usize>);

        #[async_trait]
        impl RegistryLookup for Taken {
            async fn lookup(&self, domain: &str) -> Result<RegistryRecord> {
                *self.0.lock() += 1;
                Ok(RegistryRecord {
                    domain_name: Some(domain.to_string()),
                    ..RegistryRecord::unregistered(LookupMethod::Rdap)
                })
            }

            fn name(&self) -> &'static str {
                "taken"
            }
        }

        let registry = Arc::new(Taken(Mutex::new(0)));
        let config = SuggestConfig::default();
        let expected = config.candidate_batch + config.max_fallback_attempts;
        let resolver = SuggestionResolver::new(
            Arc::new(AvailabilityEvaluator::new(registry.clone())),
            config,
        )
        .with_source(Arc::new(Chatty));

        let err = resolver.resolve("example.com").await.unwrap_err();

        assert!(matches!(err, DomainScoutError::SuggestionsExhausted { found: 0, .. }));
        assert_eq!(*registry.0.lock(), expected);
    }

    #[tokio::test]
    async fn test_longest_label_seed_still_resolves() {
        let seed = format!("{}.com", "a".repeat(63));
        let resolver = resolver(Arc::new(FakeRegistry::default()), None);

        let set = resolver.resolve(&seed).await.unwrap();

        assert_eq!(set.len(), 5);
        assert!(set
            .names()
            .iter()
            .all(|name| name.trim_end_matches(".com").len() <= 63));
    }

    #[tokio::test]
    async fn test_invalid_seed() {
        let resolver = resolver(Arc::new(FakeRegistry::default()), Some("a.com"));
        let err = resolver.resolve("  ").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Input);
    }

    #[tokio::test]
    async fn test_multi_label_seed_uses_registrable_label() {
        let resolver = resolver(Arc::new(FakeRegistry::default()), None);
        let set = resolver.resolve("shop.example.com").await.unwrap();
        assert_eq!(set.names()[0], "examplenow.com");
    }
}
