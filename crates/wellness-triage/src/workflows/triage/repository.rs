use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::assessment::DiagnosisResult;
use super::doctor::{DoctorCaseFile, DoctorDecision};
use super::domain::{
    AdvancedInputs, CaseId, CaseStatus, SymptomInput, UserContext, UserFeedback,
};
use super::gate::ConfirmationGateResult;
use super::guidance::DISCLAIMER;
use super::report::{HealthSnapshot, MedicalAwareness, NextStepsOptions, PreventiveGuidance};
use super::stats::CounterSnapshot;

/// Aggregate root for one user's journey through triage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Case {
    pub id: CaseId,
    pub status: CaseStatus,
    pub user_context: UserContext,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symptom_input: Option<SymptomInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnosis_result: Option<DiagnosisResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation_gate: Option<ConfirmationGateResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advanced_inputs: Option<AdvancedInputs>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_snapshot: Option<HealthSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preventive_guidance: Option<PreventiveGuidance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medical_awareness: Option<MedicalAwareness>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_steps_options: Option<NextStepsOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor_case_file: Option<DoctorCaseFile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor_decision: Option<DoctorDecision>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<UserFeedback>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Case {
    pub fn new(id: CaseId, user_context: UserContext, now: DateTime<Utc>) -> Self {
        Self {
            id,
            status: CaseStatus::ContextCollected,
            user_context,
            symptom_input: None,
            diagnosis_result: None,
            confirmation_gate: None,
            advanced_inputs: None,
            health_snapshot: None,
            preventive_guidance: None,
            medical_awareness: None,
            next_steps_options: None,
            doctor_case_file: None,
            doctor_decision: None,
            feedback: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Field-level merge. Fields absent from the patch keep their current value.
    pub fn apply(&mut self, patch: CasePatch, now: DateTime<Utc>) {
        let CasePatch {
            status,
            symptom_input,
            diagnosis_result,
            confirmation_gate,
            advanced_inputs,
            health_snapshot,
            preventive_guidance,
            medical_awareness,
            next_steps_options,
            doctor_case_file,
            doctor_decision,
            feedback,
        } = patch;

        if let Some(status) = status {
            self.status = status;
        }
        if let Some(input) = symptom_input {
            self.symptom_input = Some(input);
        }
        if let Some(result) = diagnosis_result {
            self.diagnosis_result = Some(result);
        }
        if let Some(gate) = confirmation_gate {
            self.confirmation_gate = Some(gate);
        }
        if let Some(inputs) = advanced_inputs {
            self.advanced_inputs = inputs;
        }
        if let Some(snapshot) = health_snapshot {
            self.health_snapshot = Some(snapshot);
        }
        if let Some(guidance) = preventive_guidance {
            self.preventive_guidance = Some(guidance);
        }
        if let Some(awareness) = medical_awareness {
            self.medical_awareness = Some(awareness);
        }
        if let Some(options) = next_steps_options {
            self.next_steps_options = Some(options);
        }
        if let Some(file) = doctor_case_file {
            self.doctor_case_file = file;
        }
        if let Some(decision) = doctor_decision {
            self.doctor_decision = decision;
        }
        if let Some(feedback) = feedback {
            self.feedback = Some(feedback);
        }
        self.updated_at = now;
    }

    pub fn into_view(self) -> CaseView {
        CaseView {
            case: self,
            disclaimer: DISCLAIMER,
        }
    }
}

/// Partial update handed to [`CaseStore::update`].
///
/// Clearable fields use `Option<Option<_>>`: `Some(None)` erases the stored value.
#[derive(Debug, Clone, Default)]
pub struct CasePatch {
    pub status: Option<CaseStatus>,
    pub symptom_input: Option<SymptomInput>,
    pub diagnosis_result: Option<DiagnosisResult>,
    pub confirmation_gate: Option<ConfirmationGateResult>,
    pub advanced_inputs: Option<Option<AdvancedInputs>>,
    pub health_snapshot: Option<HealthSnapshot>,
    pub preventive_guidance: Option<PreventiveGuidance>,
    pub medical_awareness: Option<MedicalAwareness>,
    pub next_steps_options: Option<NextStepsOptions>,
    pub doctor_case_file: Option<Option<DoctorCaseFile>>,
    pub doctor_decision: Option<Option<DoctorDecision>>,
    pub feedback: Option<UserFeedback>,
}

/// Case as returned over HTTP, always carrying the disclaimer.
#[derive(Debug, Clone, Serialize)]
pub struct CaseView {
    #[serde(flatten)]
    pub case: Case,
    pub disclaimer: &'static str,
}

/// Storage abstraction so the service module can be exercised in isolation.
///
/// Implementations allocate case ids and must apply each patch atomically per id.
pub trait CaseStore: Send + Sync {
    fn create(&self, user_context: UserContext) -> Result<Case, StoreError>;
    fn get(&self, id: &CaseId) -> Result<Option<Case>, StoreError>;
    fn update(&self, id: &CaseId, patch: CasePatch) -> Result<Case, StoreError>;
    fn all(&self) -> Result<Vec<Case>, StoreError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("case not found")]
    NotFound,
    #[error("case store unavailable: {0}")]
    Unavailable(String),
}

/// Flow stages a drop-off can be reported for. Anything else is rejected so the counter map
/// stays bounded.
pub const DROP_OFF_STAGES: [&str; 9] = [
    "context",
    "symptoms",
    "processing",
    "assessment",
    "results",
    "advanced_inputs",
    "doctor_review",
    "medicines",
    "feedback",
];

/// Counters recorded by the analytics collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AnalyticsCounter {
    AdvancedInputTrigger,
    SafetyFlag,
    DropOff(String),
}

impl AnalyticsCounter {
    pub fn name(&self) -> &'static str {
        match self {
            AnalyticsCounter::AdvancedInputTrigger => "advanced_input_trigger",
            AnalyticsCounter::SafetyFlag => "safety_flag",
            AnalyticsCounter::DropOff(_) => "drop_off",
        }
    }
}

/// Best-effort analytics hook. The service logs and drops any error it returns.
pub trait AnalyticsSink: Send + Sync {
    fn increment(&self, counter: AnalyticsCounter) -> Result<(), AnalyticsError>;
    fn snapshot(&self) -> Result<CounterSnapshot, AnalyticsError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    #[error("analytics sink unavailable: {0}")]
    Unavailable(String),
}
