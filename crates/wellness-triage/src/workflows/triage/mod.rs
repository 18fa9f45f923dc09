//! Dual assessment and confirmation-gate triage.
//!
//! A case collects lifestyle context, then a symptom selection that is scored twice: once
//! by the constitutional (dosha) model and once by the risk heuristic. The confirmation gate
//! decides whether medicine recommendations stay locked until extra evidence arrives.
//! Lifestyle guidance is never gated.

pub mod assessment;
pub mod catalog;
pub mod doctor;
pub mod domain;
pub mod gate;
pub(crate) mod guidance;
pub mod report;
pub mod repository;
pub mod router;
pub mod service;
pub mod stats;

#[cfg(test)]
mod tests;

pub use assessment::{
    AssessmentEngine, ConstitutionalAssessment, DiagnosisResult, DoshaBalance, ImbalanceLevel,
    PossibleCondition, RiskAssessment, RiskLevel, SymptomCluster,
};
pub use catalog::{Symptom, SymptomCatalog, SymptomCategory};
pub use doctor::{
    DoctorCaseFile, DoctorConsent, DoctorDecision, DoctorDecisionSubmission, DoctorVerdict,
};
pub use domain::{
    ActivityLevel, AdvancedInputType, AdvancedInputs, AgeRange, CaseId, CaseStatus, Dosha,
    FeedbackSubmission, Gender, LocaleTier, PrimaryGoal, SleepQuality, StressLevel,
    SymptomId, SymptomInput, UserContext, UserFeedback,
};
pub use gate::{ConfirmationGate, ConfirmationGateResult, GateConfig};
pub use guidance::DISCLAIMER;
pub use report::{HealthSnapshot, MedicalAwareness, NextStepsOptions, PreventiveGuidance};
pub use repository::{
    AnalyticsCounter, AnalyticsError, AnalyticsSink, Case, CasePatch, CaseStore, CaseView,
    StoreError, DROP_OFF_STAGES,
};
pub use router::triage_router;
pub use service::{TriageService, TriageServiceError};
pub use stats::{AdminStats, CounterSnapshot};
