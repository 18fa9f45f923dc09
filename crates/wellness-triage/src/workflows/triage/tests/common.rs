use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::Utc;
use serde_json::Value;

use crate::workflows::triage::domain::{
    ActivityLevel, AgeRange, CaseId, LocaleTier, PrimaryGoal, SleepQuality, StressLevel,
    SymptomId, SymptomInput, UserContext,
};
use crate::workflows::triage::repository::{
    AnalyticsCounter, AnalyticsError, AnalyticsSink, Case, CasePatch, CaseStore, StoreError,
};
use crate::workflows::triage::stats::CounterSnapshot;
use crate::workflows::triage::{triage_router, GateConfig, TriageService};

/// Lifestyle answers used throughout the scenarios: good sleep, moderate stress, light
/// activity. These estimate a vata prakriti.
pub(super) fn context(goal: PrimaryGoal) -> UserContext {
    UserContext {
        age_range: AgeRange::Age26To35,
        gender: None,
        city_tier: LocaleTier::Tier1,
        sleep_quality: SleepQuality::Good,
        stress_level: StressLevel::Moderate,
        activity_level: ActivityLevel::Light,
        primary_goal: goal,
    }
}

pub(super) fn selection(ids: &[SymptomId]) -> SymptomInput {
    SymptomInput {
        selected_symptom_ids: ids.to_vec(),
        free_text: None,
    }
}

pub(super) type MemoryService = TriageService<MemoryStore, RecordingAnalytics>;

pub(super) fn build_service() -> (MemoryService, Arc<MemoryStore>, Arc<RecordingAnalytics>) {
    let store = Arc::new(MemoryStore::default());
    let analytics = Arc::new(RecordingAnalytics::default());
    let service = TriageService::new(store.clone(), analytics.clone(), GateConfig::default());
    (service, store, analytics)
}

pub(super) fn open_case(service: &MemoryService, goal: PrimaryGoal) -> CaseId {
    service
        .create_case(context(goal))
        .expect("case opens")
        .id
}

#[derive(Default)]
pub(super) struct MemoryStore {
    sequence: AtomicU64,
    pub(super) cases: Mutex<HashMap<CaseId, Case>>,
}

impl CaseStore for MemoryStore {
    fn create(&self, user_context: UserContext) -> Result<Case, StoreError> {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        let case = Case::new(CaseId(format!("case-{id:06}")), user_context, Utc::now());
        self.cases
            .lock()
            .expect("store mutex poisoned")
            .insert(case.id.clone(), case.clone());
        Ok(case)
    }

    fn get(&self, id: &CaseId) -> Result<Option<Case>, StoreError> {
        Ok(self
            .cases
            .lock()
            .expect("store mutex poisoned")
            .get(id)
            .cloned())
    }

    fn update(&self, id: &CaseId, patch: CasePatch) -> Result<Case, StoreError> {
        let mut guard = self.cases.lock().expect("store mutex poisoned");
        let case = guard.get_mut(id).ok_or(StoreError::NotFound)?;
        case.apply(patch, Utc::now());
        Ok(case.clone())
    }

    fn all(&self) -> Result<Vec<Case>, StoreError> {
        Ok(self
            .cases
            .lock()
            .expect("store mutex poisoned")
            .values()
            .cloned()
            .collect())
    }
}

/// Reads succeed from a fixed case, writes always fail.
pub(super) struct ReadOnlyStore {
    pub(super) case: Case,
}

impl CaseStore for ReadOnlyStore {
    fn create(&self, _user_context: UserContext) -> Result<Case, StoreError> {
        Err(StoreError::Unavailable("read only".to_string()))
    }

    fn get(&self, id: &CaseId) -> Result<Option<Case>, StoreError> {
        Ok((id == &self.case.id).then(|| self.case.clone()))
    }

    fn update(&self, _id: &CaseId, _patch: CasePatch) -> Result<Case, StoreError> {
        Err(StoreError::Unavailable("read only".to_string()))
    }

    fn all(&self) -> Result<Vec<Case>, StoreError> {
        Ok(vec![self.case.clone()])
    }
}

pub(super) struct UnavailableStore;

impl CaseStore for UnavailableStore {
    fn create(&self, _user_context: UserContext) -> Result<Case, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn get(&self, _id: &CaseId) -> Result<Option<Case>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _id: &CaseId, _patch: CasePatch) -> Result<Case, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn all(&self) -> Result<Vec<Case>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }
}

#[derive(Default)]
pub(super) struct RecordingAnalytics {
    events: Mutex<Vec<AnalyticsCounter>>,
}

impl RecordingAnalytics {
    pub(super) fn events(&self) -> Vec<AnalyticsCounter> {
        self.events.lock().expect("analytics mutex poisoned").clone()
    }
}

impl AnalyticsSink for RecordingAnalytics {
    fn increment(&self, counter: AnalyticsCounter) -> Result<(), AnalyticsError> {
        self.events
            .lock()
            .expect("analytics mutex poisoned")
            .push(counter);
        Ok(())
    }

    fn snapshot(&self) -> Result<CounterSnapshot, AnalyticsError> {
        let mut snapshot = CounterSnapshot::default();
        for event in self.events() {
            match event {
                AnalyticsCounter::AdvancedInputTrigger => snapshot.advanced_input_triggers += 1,
                AnalyticsCounter::SafetyFlag => snapshot.safety_flags += 1,
                AnalyticsCounter::DropOff(stage) => {
                    *snapshot.drop_offs.entry(stage).or_default() += 1
                }
            }
        }
        Ok(snapshot)
    }
}

pub(super) struct FailingAnalytics;

impl AnalyticsSink for FailingAnalytics {
    fn increment(&self, _counter: AnalyticsCounter) -> Result<(), AnalyticsError> {
        Err(AnalyticsError::Unavailable("collector down".to_string()))
    }

    fn snapshot(&self) -> Result<CounterSnapshot, AnalyticsError> {
        Err(AnalyticsError::Unavailable("collector down".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn router_with_service(service: MemoryService) -> axum::Router {
    triage_router(Arc::new(service))
}
