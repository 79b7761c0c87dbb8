//! Recommendation resolution: external inference first, local rules second.
//!
//! The external attempt always finishes (answer or terminal failure) before
//! the rule table is consulted. Inference failures are logged and absorbed;
//! the resolver always produces a usable recommendation.

use crate::inference::InferenceEngine;
use crate::{rules, JournalEntry, Recommendation, RecommendationSource};
use tracing::{debug, warn};

/// Shown when the user has no journal entries yet
pub const GET_STARTED_MESSAGE: &str =
    "Start your wellness journey by logging your first journal entry!";

/// Separator used when the external process returns several suggestions
const JOIN_SEPARATOR: &str = ", ";

pub struct RecommendationResolver<I> {
    engine: I,
}

impl<I: InferenceEngine> RecommendationResolver<I> {
    pub fn new(engine: I) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &I {
        &self.engine
    }

    /// Resolve a recommendation for the user's most recent entry
    pub async fn resolve(&self, latest: Option<&JournalEntry>) -> Recommendation {
        let Some(entry) = latest else {
            debug!("No journal entries, skipping both engines");
            return Recommendation {
                text: GET_STARTED_MESSAGE.to_string(),
                source: RecommendationSource::GetStarted,
            };
        };

        let sleep = round_sleep_hours(entry.sleep_hours);
        match self.engine.infer(entry.stress, entry.mood, sleep).await {
            Ok(recs) if !recs.is_empty() && !recs.iter().any(|r| signals_error(r)) => {
                debug!("External inference returned {} recommendations", recs.len());
                return Recommendation {
                    text: recs.join(JOIN_SEPARATOR),
                    source: RecommendationSource::External,
                };
            }
            Ok(recs) if recs.is_empty() => {
                debug!("External inference returned nothing, falling back to rules");
            }
            Ok(recs) => {
                warn!("External inference flagged an error: {:?}", recs);
            }
            Err(e) => {
                warn!("External inference failed, falling back to rules: {}", e);
            }
        }

        let rule = rules::evaluate(entry);
        Recommendation {
            text: rule.text().to_string(),
            source: RecommendationSource::Rule(rule),
        }
    }
}

/// Nearest whole hour, halves rounded away from zero
pub fn round_sleep_hours(hours: f64) -> i32 {
    hours.round() as i32
}

/// Whether a returned suggestion is an error report rather than advice
fn signals_error(recommendation: &str) -> bool {
    let trimmed = recommendation.trim();
    trimmed.is_empty() || trimmed.to_ascii_lowercase().starts_with("error")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{InferenceError, UserId};
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    /// Scripted engine recording every call
    struct ScriptedEngine {
        reply: fn() -> Result<Vec<String>, InferenceError>,
        calls: AtomicUsize,
        last_args: Mutex<Option<(i32, i32, i32)>>,
    }

    impl ScriptedEngine {
        fn new(reply: fn() -> Result<Vec<String>, InferenceError>) -> Self {
            Self {
                reply,
                calls: AtomicUsize::new(0),
                last_args: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl InferenceEngine for ScriptedEngine {
        async fn infer(
            &self,
            stress: i32,
            mood: i32,
            sleep_hours: i32,
        ) -> Result<Vec<String>, InferenceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_args.lock().unwrap() = Some((stress, mood, sleep_hours));
            (self.reply)()
        }
    }

    fn entry(stress: i32, mood: i32, sleep: f64) -> JournalEntry {
        JournalEntry::new(UserId(1), Utc::now(), "", mood, stress, sleep).unwrap()
    }

    #[tokio::test]
    async fn test_no_entry_returns_get_started_without_inference() {
        crate::logging::init_test();
        let resolver = RecommendationResolver::new(ScriptedEngine::new(|| Ok(vec!["x".into()])));

        let rec = resolver.resolve(None).await;
        assert_eq!(rec.text, GET_STARTED_MESSAGE);
        assert_eq!(rec.source, RecommendationSource::GetStarted);
        assert_eq!(resolver.engine.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_external_answer_is_joined() {
        let resolver = RecommendationResolver::new(ScriptedEngine::new(|| {
            Ok(vec!["Box Breathing".into(), "Body Scan".into()])
        }));

        let rec = resolver.resolve(Some(&entry(6, 5, 7.0))).await;
        assert_eq!(rec.text, "Box Breathing, Body Scan");
        assert_eq!(rec.source, RecommendationSource::External);
    }

    #[tokio::test]
    async fn test_timeout_falls_back_to_rules() {
        let resolver = RecommendationResolver::new(ScriptedEngine::new(|| {
            Err(InferenceError::Timeout(Duration::from_secs(10)))
        }));
        let latest = entry(9, 5, 4.0);

        let rec = resolver.resolve(Some(&latest)).await;
        assert_eq!(rec.text, rules::recommend(&latest));
        assert_eq!(
            rec.source,
            RecommendationSource::Rule(rules::RuleKind::GuidedMeditation)
        );
    }

    #[tokio::test]
    async fn test_every_failure_kind_falls_back() {
        let failures: [fn() -> Result<Vec<String>, InferenceError>; 4] = [
            || Err(InferenceError::Unavailable("missing".into())),
            || Err(InferenceError::Timeout(Duration::from_millis(1))),
            || Err(InferenceError::Protocol("bad json".into())),
            || Err(InferenceError::Reported("boom".into())),
        ];
        let latest = entry(3, 8, 8.0);

        for reply in failures {
            let resolver = RecommendationResolver::new(ScriptedEngine::new(reply));
            let rec = resolver.resolve(Some(&latest)).await;
            assert_eq!(rec.text, "Maintenance Meditation (doing great)");
        }
    }

    #[tokio::test]
    async fn test_empty_or_error_flagged_result_falls_back() {
        let latest = entry(6, 5, 7.0);
        let replies: [fn() -> Result<Vec<String>, InferenceError>; 3] = [
            || Ok(vec![]),
            || Ok(vec!["Breathe".into(), "Error: knowledge base missing".into()]),
            || Ok(vec!["  ".into()]),
        ];

        for reply in replies {
            let resolver = RecommendationResolver::new(ScriptedEngine::new(reply));
            let rec = resolver.resolve(Some(&latest)).await;
            assert_eq!(rec.text, rules::recommend(&latest));
            assert_eq!(resolver.engine.calls.load(Ordering::SeqCst), 1);
        }
    }

    #[tokio::test]
    async fn test_sleep_hours_rounded_before_inference() {
        let resolver = RecommendationResolver::new(ScriptedEngine::new(|| Ok(vec!["ok".into()])));

        resolver.resolve(Some(&entry(7, 4, 6.5))).await;
        assert_eq!(*resolver.engine.last_args.lock().unwrap(), Some((7, 4, 7)));

        resolver.resolve(Some(&entry(7, 4, 6.49))).await;
        assert_eq!(*resolver.engine.last_args.lock().unwrap(), Some((7, 4, 6)));
    }

    #[test]
    fn test_round_sleep_hours_half_away_from_zero() {
        assert_eq!(round_sleep_hours(0.5), 1);
        assert_eq!(round_sleep_hours(7.5), 8);
        assert_eq!(round_sleep_hours(7.4), 7);
        assert_eq!(round_sleep_hours(0.0), 0);
        assert_eq!(round_sleep_hours(24.0), 24);
    }
}
