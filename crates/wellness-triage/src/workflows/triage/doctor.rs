use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::assessment::{ConstitutionalAssessment, DiagnosisResult};
use super::domain::{
    ActivityLevel, AdvancedInputs, SleepQuality, StressLevel, SymptomInput, UserContext,
};
use super::gate::ConfirmationGateResult;

/// Patient consent captured before a case is shared with a practitioner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorConsent {
    pub consent_given: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifestyleSnapshot {
    pub sleep_quality: SleepQuality,
    pub stress_level: StressLevel,
    pub activity_level: ActivityLevel,
}

impl From<&UserContext> for LifestyleSnapshot {
    fn from(context: &UserContext) -> Self {
        Self {
            sleep_quality: context.sleep_quality,
            stress_level: context.stress_level,
            activity_level: context.activity_level,
        }
    }
}

/// Everything a reviewing practitioner sees. Built once when review is requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorCaseFile {
    pub symptoms: SymptomInput,
    pub lifestyle: LifestyleSnapshot,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advanced_inputs: Option<AdvancedInputs>,
    pub ai_confidence_before: u8,
    /// Only present once advanced inputs satisfied the gate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_confidence_after: Option<u8>,
    pub dosha_analysis: ConstitutionalAssessment,
}

impl DoctorCaseFile {
    pub fn compile(
        context: &UserContext,
        symptoms: &SymptomInput,
        diagnosis: &DiagnosisResult,
        gate: Option<&ConfirmationGateResult>,
        advanced_inputs: Option<&AdvancedInputs>,
    ) -> Self {
        let verified = advanced_inputs.is_some() && gate.is_some_and(|gate| gate.inputs_provided);

        Self {
            symptoms: symptoms.clone(),
            lifestyle: LifestyleSnapshot::from(context),
            advanced_inputs: advanced_inputs.cloned(),
            ai_confidence_before: diagnosis.medical_assessment.confidence_score,
            ai_confidence_after: verified.then_some(diagnosis.overall_confidence),
            dosha_analysis: diagnosis.ayurvedic_assessment,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoctorVerdict {
    Approved,
    Modified,
    Rejected,
}

impl DoctorVerdict {
    pub const fn label(self) -> &'static str {
        match self {
            DoctorVerdict::Approved => "approved",
            DoctorVerdict::Modified => "modified",
            DoctorVerdict::Rejected => "rejected",
        }
    }
}

/// Practitioner decision as received over the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorDecisionSubmission {
    pub decision: DoctorVerdict,
    #[serde(default)]
    pub approved_medicines: Vec<String>,
    #[serde(default)]
    pub modified_medicines: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    #[serde(default)]
    pub consultation_required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor_notes: Option<String>,
}

impl DoctorDecisionSubmission {
    pub(crate) fn rejection_reason(&self) -> Option<&str> {
        self.rejection_reason
            .as_deref()
            .map(str::trim)
            .filter(|reason| !reason.is_empty())
    }
}

/// Stored decision, stamped when recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorDecision {
    pub decision: DoctorVerdict,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub approved_medicines: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modified_medicines: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    pub consultation_required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor_notes: Option<String>,
    pub decided_at: DateTime<Utc>,
}

impl DoctorDecision {
    pub fn from_submission(submission: DoctorDecisionSubmission, decided_at: DateTime<Utc>) -> Self {
        Self {
            decision: submission.decision,
            approved_medicines: submission.approved_medicines,
            modified_medicines: submission.modified_medicines,
            rejection_reason: submission.rejection_reason,
            consultation_required: submission.consultation_required,
            doctor_notes: submission.doctor_notes,
            decided_at,
        }
    }
}
