use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::assessment::AssessmentEngine;
use super::catalog::SymptomCatalog;
use super::doctor::{
    DoctorCaseFile, DoctorConsent, DoctorDecision, DoctorDecisionSubmission, DoctorVerdict,
};
use super::domain::{
    AdvancedInputs, CaseId, CaseStatus, FeedbackSubmission, SymptomInput, UserContext,
    UserFeedback,
};
use super::gate::{apply_advanced_inputs, ConfirmationGate, GateConfig};
use super::report::{HealthSnapshot, MedicalAwareness, NextStepsOptions, PreventiveGuidance};
use super::repository::{
    AnalyticsCounter, AnalyticsSink, Case, CasePatch, CaseStore, StoreError, DROP_OFF_STAGES,
};
use super::stats::AdminStats;

/// Service composing the assessment engine, confirmation gate, case store and analytics.
pub struct TriageService<S, A> {
    store: Arc<S>,
    analytics: Arc<A>,
    engine: Arc<AssessmentEngine>,
    gate: Arc<ConfirmationGate>,
}

static FEEDBACK_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_feedback_id() -> String {
    let id = FEEDBACK_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("fb-{id:06}")
}

impl<S, A> TriageService<S, A>
where
    S: CaseStore + 'static,
    A: AnalyticsSink + 'static,
{
    pub fn new(store: Arc<S>, analytics: Arc<A>, config: GateConfig) -> Self {
        Self::with_catalog(store, analytics, config, SymptomCatalog::standard())
    }

    pub fn with_catalog(
        store: Arc<S>,
        analytics: Arc<A>,
        config: GateConfig,
        catalog: SymptomCatalog,
    ) -> Self {
        Self {
            store,
            analytics,
            engine: Arc::new(AssessmentEngine::new(catalog)),
            gate: Arc::new(ConfirmationGate::new(config, catalog)),
        }
    }

    pub fn catalog(&self) -> &SymptomCatalog {
        self.engine.catalog()
    }

    pub fn gate_config(&self) -> &GateConfig {
        self.gate.config()
    }

    /// Open a case for a freshly captured user context.
    pub fn create_case(&self, user_context: UserContext) -> Result<Case, TriageServiceError> {
        let case = self.store.create(user_context)?;
        info!(case_id = %case.id, goal = ?case.user_context.primary_goal, "triage case opened");
        Ok(case)
    }

    pub fn get(&self, case_id: &CaseId) -> Result<Case, TriageServiceError> {
        self.store
            .get(case_id)?
            .ok_or_else(|| TriageServiceError::NotFound(case_id.clone()))
    }

    /// Score a symptom selection, run the confirmation gate and persist everything derived.
    ///
    /// Resubmission replaces the previous evaluation and clears evidence and doctor review
    /// attached to it.
    pub fn submit_symptoms(
        &self,
        case_id: &CaseId,
        input: SymptomInput,
    ) -> Result<Case, TriageServiceError> {
        let case = self.get(case_id)?;
        validate_selection(&input)?;

        let mut diagnosis = self.engine.assess(&case.user_context, &input);
        let gate = self.gate.evaluate(
            &input.selected_symptom_ids,
            &diagnosis.medical_assessment,
            case.user_context.primary_goal,
        );
        diagnosis.is_finalized = !gate.triggered;

        let status = if gate.triggered {
            CaseStatus::ConfirmationGate
        } else {
            CaseStatus::DiagnosisComplete
        };
        let ayurvedic = &diagnosis.ayurvedic_assessment;
        let medical = &diagnosis.medical_assessment;
        let has_red_flags = !medical.red_flags.is_empty();

        let patch = CasePatch {
            status: Some(status),
            symptom_input: Some(input),
            health_snapshot: Some(HealthSnapshot::from_assessments(ayurvedic, medical)),
            preventive_guidance: Some(PreventiveGuidance::for_dosha(ayurvedic.vikriti)),
            medical_awareness: Some(MedicalAwareness::standard()),
            next_steps_options: Some(NextStepsOptions::after_assessment(&gate)),
            confirmation_gate: Some(gate.clone()),
            diagnosis_result: Some(diagnosis.clone()),
            advanced_inputs: Some(None),
            doctor_case_file: Some(None),
            doctor_decision: Some(None),
            feedback: None,
        };

        let updated = self.commit(case_id, patch)?;

        info!(
            case_id = %case_id,
            status = status.label(),
            risk_level = diagnosis.medical_assessment.risk_level.label(),
            gate_triggered = gate.triggered,
            "symptoms assessed"
        );

        if gate.triggered {
            self.record(AnalyticsCounter::AdvancedInputTrigger);
        }
        if has_red_flags {
            self.record(AnalyticsCounter::SafetyFlag);
        }

        Ok(updated)
    }

    /// Apply user-supplied evidence to the existing gate result.
    pub fn submit_advanced_inputs(
        &self,
        case_id: &CaseId,
        evidence: AdvancedInputs,
    ) -> Result<Case, TriageServiceError> {
        let case = self.get(case_id)?;
        if matches!(
            case.status,
            CaseStatus::AwaitingDoctorReview
                | CaseStatus::DoctorApproved
                | CaseStatus::DoctorRejected
                | CaseStatus::Completed
        ) {
            return Err(TriageServiceError::InvalidInput(format!(
                "case is {} and no longer accepts advanced inputs",
                case.status.label()
            )));
        }

        let (Some(current_gate), Some(mut diagnosis)) =
            (case.confirmation_gate.as_ref(), case.diagnosis_result.clone())
        else {
            return Err(TriageServiceError::InvalidInput(
                "case has no assessment to verify".to_string(),
            ));
        };

        let gate = apply_advanced_inputs(current_gate, &evidence);
        let status = if gate.inputs_provided {
            CaseStatus::DiagnosisComplete
        } else {
            CaseStatus::AwaitingAdvancedInputs
        };

        diagnosis.is_finalized = gate.inputs_provided;

        let patch = CasePatch {
            status: Some(status),
            next_steps_options: Some(NextStepsOptions::after_advanced_inputs(&gate)),
            confirmation_gate: Some(gate.clone()),
            advanced_inputs: Some(Some(evidence)),
            diagnosis_result: Some(diagnosis),
            ..CasePatch::default()
        };

        let updated = self.commit(case_id, patch)?;
        info!(
            case_id = %case_id,
            inputs_provided = gate.inputs_provided,
            "advanced inputs evaluated"
        );
        Ok(updated)
    }

    /// Package a diagnosed case for practitioner review.
    pub fn request_doctor_review(
        &self,
        case_id: &CaseId,
        consent: DoctorConsent,
    ) -> Result<Case, TriageServiceError> {
        let case = self.get(case_id)?;
        if !consent.consent_given {
            return Err(TriageServiceError::InvalidInput(
                "consent is required before a case is shared with a doctor".to_string(),
            ));
        }

        let (diagnosis, symptoms) = match (&case.diagnosis_result, &case.symptom_input) {
            (Some(diagnosis), Some(symptoms)) => (diagnosis, symptoms),
            _ => {
                return Err(TriageServiceError::InvalidInput(
                    "case has no diagnosis to review".to_string(),
                ))
            }
        };

        if !matches!(
            case.status,
            CaseStatus::ConfirmationGate
                | CaseStatus::AwaitingAdvancedInputs
                | CaseStatus::DiagnosisComplete
        ) {
            return Err(TriageServiceError::InvalidInput(format!(
                "case is {} and cannot be sent for doctor review",
                case.status.label()
            )));
        }

        let file = DoctorCaseFile::compile(
            &case.user_context,
            symptoms,
            diagnosis,
            case.confirmation_gate.as_ref(),
            case.advanced_inputs.as_ref(),
        );

        let patch = CasePatch {
            status: Some(CaseStatus::AwaitingDoctorReview),
            doctor_case_file: Some(Some(file)),
            doctor_decision: Some(None),
            ..CasePatch::default()
        };

        let updated = self.commit(case_id, patch)?;
        info!(case_id = %case_id, "doctor review requested");
        Ok(updated)
    }

    /// Record the practitioner's verdict. Medicine flags stay as the gate left them.
    pub fn record_doctor_decision(
        &self,
        case_id: &CaseId,
        submission: DoctorDecisionSubmission,
    ) -> Result<Case, TriageServiceError> {
        let case = self.get(case_id)?;
        if case.status != CaseStatus::AwaitingDoctorReview {
            return Err(TriageServiceError::InvalidInput(format!(
                "case is {} and not awaiting doctor review",
                case.status.label()
            )));
        }

        let verdict = submission.decision;
        if verdict == DoctorVerdict::Rejected && submission.rejection_reason().is_none() {
            return Err(TriageServiceError::InvalidInput(
                "a rejection must include a reason".to_string(),
            ));
        }

        let status = match verdict {
            DoctorVerdict::Approved | DoctorVerdict::Modified => CaseStatus::DoctorApproved,
            DoctorVerdict::Rejected => CaseStatus::DoctorRejected,
        };

        let patch = CasePatch {
            status: Some(status),
            doctor_decision: Some(Some(DoctorDecision::from_submission(
                submission,
                Utc::now(),
            ))),
            ..CasePatch::default()
        };

        let updated = self.commit(case_id, patch)?;
        info!(case_id = %case_id, decision = verdict.label(), "doctor decision recorded");
        Ok(updated)
    }

    /// Store user feedback and close the case.
    pub fn submit_feedback(
        &self,
        case_id: &CaseId,
        submission: FeedbackSubmission,
    ) -> Result<UserFeedback, TriageServiceError> {
        self.get(case_id)?;

        let feedback = UserFeedback {
            id: next_feedback_id(),
            case_id: case_id.clone(),
            was_helpful: submission.was_helpful,
            symptoms_improved: submission.symptoms_improved,
            side_effects: submission.side_effects,
            additional_comments: submission.additional_comments,
            created_at: Utc::now(),
        };

        let patch = CasePatch {
            status: Some(CaseStatus::Completed),
            feedback: Some(feedback.clone()),
            ..CasePatch::default()
        };

        self.commit(case_id, patch)?;
        info!(case_id = %case_id, helpful = feedback.was_helpful, "feedback recorded");
        Ok(feedback)
    }

    /// Count a user abandoning the flow at `stage`. Only the known flow stages are counted.
    pub fn record_drop_off(&self, stage: &str) -> Result<(), TriageServiceError> {
        let stage = stage.trim().to_ascii_lowercase();
        if stage.is_empty() {
            return Err(TriageServiceError::InvalidInput(
                "drop-off stage must not be blank".to_string(),
            ));
        }
        if !DROP_OFF_STAGES.contains(&stage.as_str()) {
            return Err(TriageServiceError::InvalidInput(format!(
                "unknown drop-off stage '{stage}'"
            )));
        }
        self.record(AnalyticsCounter::DropOff(stage));
        Ok(())
    }

    pub fn admin_stats(&self) -> Result<AdminStats, TriageServiceError> {
        let cases = self.store.all()?;
        let counters = match self.analytics.snapshot() {
            Ok(counters) => counters,
            Err(error) => {
                warn!(%error, "analytics snapshot unavailable, reporting zero counters");
                Default::default()
            }
        };
        Ok(AdminStats::compile(&cases, &counters))
    }

    fn commit(&self, case_id: &CaseId, patch: CasePatch) -> Result<Case, TriageServiceError> {
        self.store.update(case_id, patch).map_err(|error| match error {
            StoreError::NotFound => TriageServiceError::NotFound(case_id.clone()),
            other => TriageServiceError::Store(other),
        })
    }

    fn record(&self, counter: AnalyticsCounter) {
        let name = counter.name();
        if let Err(error) = self.analytics.increment(counter) {
            warn!(counter = name, %error, "analytics increment dropped");
        }
    }
}

fn validate_selection(input: &SymptomInput) -> Result<(), TriageServiceError> {
    if input.selected_symptom_ids.is_empty() {
        return Err(TriageServiceError::InvalidInput(
            "at least one symptom must be selected".to_string(),
        ));
    }

    let mut seen = HashSet::with_capacity(input.selected_symptom_ids.len());
    if let Some(duplicate) = input
        .selected_symptom_ids
        .iter()
        .find(|id| !seen.insert(**id))
    {
        return Err(TriageServiceError::InvalidInput(format!(
            "symptom {duplicate} selected more than once"
        )));
    }

    Ok(())
}

/// Error raised by the triage service.
#[derive(Debug, thiserror::Error)]
pub enum TriageServiceError {
    #[error("case {0} not found")]
    NotFound(CaseId),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Store(StoreError),
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for TriageServiceError {
    fn from(error: StoreError) -> Self {
        TriageServiceError::Store(error)
    }
}
