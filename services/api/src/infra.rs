use chrono::Utc;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use wellness_triage::workflows::triage::{
    AnalyticsCounter, AnalyticsError, AnalyticsSink, Case, CaseId, CasePatch, CaseStore,
    CounterSnapshot, StoreError, UserContext,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local case store. Every patch is applied under one lock, so updates to the same
/// case never interleave.
#[derive(Default, Clone)]
pub(crate) struct InMemoryCaseStore {
    sequence: Arc<AtomicU64>,
    cases: Arc<Mutex<HashMap<CaseId, Case>>>,
}

impl InMemoryCaseStore {
    fn lock(&self) -> Result<MutexGuard<'_, HashMap<CaseId, Case>>, StoreError> {
        self.cases
            .lock()
            .map_err(|_| StoreError::Unavailable("case store mutex poisoned".to_string()))
    }

    fn next_case_id(&self) -> CaseId {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        CaseId(format!("case-{id:06}"))
    }
}

impl CaseStore for InMemoryCaseStore {
    fn create(&self, user_context: UserContext) -> Result<Case, StoreError> {
        let case = Case::new(self.next_case_id(), user_context, Utc::now());
        self.lock()?.insert(case.id.clone(), case.clone());
        Ok(case)
    }

    fn get(&self, id: &CaseId) -> Result<Option<Case>, StoreError> {
        Ok(self.lock()?.get(id).cloned())
    }

    fn update(&self, id: &CaseId, patch: CasePatch) -> Result<Case, StoreError> {
        let mut guard = self.lock()?;
        let case = guard.get_mut(id).ok_or(StoreError::NotFound)?;
        case.apply(patch, Utc::now());
        Ok(case.clone())
    }

    fn all(&self) -> Result<Vec<Case>, StoreError> {
        let guard = self.lock()?;
        let mut cases: Vec<Case> = guard.values().cloned().collect();
        cases.sort_by(|left, right| left.id.cmp(&right.id));
        Ok(cases)
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryAnalytics {
    counters: Arc<Mutex<CounterSnapshot>>,
}

impl AnalyticsSink for InMemoryAnalytics {
    fn increment(&self, counter: AnalyticsCounter) -> Result<(), AnalyticsError> {
        let mut guard = self
            .counters
            .lock()
            .map_err(|_| AnalyticsError::Unavailable("analytics mutex poisoned".to_string()))?;
        match counter {
            AnalyticsCounter::AdvancedInputTrigger => guard.advanced_input_triggers += 1,
            AnalyticsCounter::SafetyFlag => guard.safety_flags += 1,
            AnalyticsCounter::DropOff(stage) => *guard.drop_offs.entry(stage).or_default() += 1,
        }
        Ok(())
    }

    fn snapshot(&self) -> Result<CounterSnapshot, AnalyticsError> {
        self.counters
            .lock()
            .map(|guard| guard.clone())
            .map_err(|_| AnalyticsError::Unavailable("analytics mutex poisoned".to_string()))
    }
}

/// Parse a wire label (`"current_discomfort"`, `"very_high"`, ...) through the type's serde
/// representation so CLI flags accept exactly what the HTTP API accepts.
pub(crate) fn parse_label<T>(raw: &str) -> Result<T, String>
where
    T: DeserializeOwned,
{
    let value = serde_json::Value::String(raw.trim().to_ascii_lowercase());
    serde_json::from_value(value).map_err(|_| format!("'{raw}' is not a recognised value"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wellness_triage::workflows::triage::{
        ActivityLevel, AgeRange, CaseStatus, LocaleTier, PrimaryGoal, SleepQuality, StressLevel,
    };

    fn context() -> UserContext {
        UserContext {
            age_range: AgeRange::Age18To25,
            gender: None,
            city_tier: LocaleTier::Rural,
            sleep_quality: SleepQuality::Excellent,
            stress_level: StressLevel::Low,
            activity_level: ActivityLevel::Active,
            primary_goal: PrimaryGoal::Prevention,
        }
    }

    #[test]
    fn store_allocates_sequential_ids_and_merges_patches() {
        let store = InMemoryCaseStore::default();
        let first = store.create(context()).expect("create");
        let second = store.create(context()).expect("create");
        assert_eq!(first.id.0, "case-000001");
        assert_eq!(second.id.0, "case-000002");

        let updated = store
            .update(
                &first.id,
                CasePatch {
                    status: Some(CaseStatus::Completed),
                    ..CasePatch::default()
                },
            )
            .expect("update");
        assert_eq!(updated.status, CaseStatus::Completed);
        assert_eq!(updated.user_context, first.user_context);
        assert!(updated.updated_at >= first.updated_at);

        let ids: Vec<String> = store
            .all()
            .expect("list")
            .into_iter()
            .map(|case| case.id.0)
            .collect();
        assert_eq!(ids, vec!["case-000001", "case-000002"]);
    }

    #[test]
    fn update_of_unknown_case_is_not_found() {
        let store = InMemoryCaseStore::default();
        let result = store.update(&CaseId("case-404".to_string()), CasePatch::default());
        assert!(matches!(result, Err(StoreError::NotFound)));
    }

    #[test]
    fn analytics_tallies_counters() {
        let analytics = InMemoryAnalytics::default();
        analytics
            .increment(AnalyticsCounter::SafetyFlag)
            .expect("increment");
        analytics
            .increment(AnalyticsCounter::DropOff("symptoms".to_string()))
            .expect("increment");
        analytics
            .increment(AnalyticsCounter::DropOff("symptoms".to_string()))
            .expect("increment");

        let snapshot = analytics.snapshot().expect("snapshot");
        assert_eq!(snapshot.safety_flags, 1);
        assert_eq!(snapshot.advanced_input_triggers, 0);
        assert_eq!(snapshot.drop_offs.get("symptoms"), Some(&2));
    }

    #[test]
    fn labels_parse_like_the_wire_format() {
        assert_eq!(
            parse_label::<PrimaryGoal>("Current_Discomfort"),
            Ok(PrimaryGoal::CurrentDiscomfort)
        );
        assert_eq!(
            parse_label::<StressLevel>("very_high"),
            Ok(StressLevel::VeryHigh)
        );
        assert!(parse_label::<SleepQuality>("restless").is_err());
    }
}
