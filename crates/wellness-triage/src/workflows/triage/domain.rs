use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for triage cases. Allocated by the case store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaseId(pub String);

impl fmt::Display for CaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Catalog identifier of a selectable symptom.
pub type SymptomId = u32;

/// Constitutional type used by the Ayurvedic model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dosha {
    Vata,
    Pitta,
    Kapha,
}

impl Dosha {
    pub const fn label(self) -> &'static str {
        match self {
            Dosha::Vata => "vata",
            Dosha::Pitta => "pitta",
            Dosha::Kapha => "kapha",
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            Dosha::Vata => "Vata",
            Dosha::Pitta => "Pitta",
            Dosha::Kapha => "Kapha",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgeRange {
    #[serde(rename = "18-25")]
    Age18To25,
    #[serde(rename = "26-35")]
    Age26To35,
    #[serde(rename = "36-45")]
    Age36To45,
    #[serde(rename = "46-55")]
    Age46To55,
    #[serde(rename = "56-65")]
    Age56To65,
    #[serde(rename = "65+")]
    Age65Plus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
    PreferNotToSay,
}

/// Coarse locale bucket; only informs lifestyle copy downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocaleTier {
    Tier1,
    Tier2,
    Tier3,
    Rural,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SleepQuality {
    Poor,
    Fair,
    Good,
    Excellent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StressLevel {
    Low,
    Moderate,
    High,
    VeryHigh,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimaryGoal {
    Prevention,
    CurrentDiscomfort,
    LongTermWellness,
}

/// Lifestyle and demographic snapshot captured once when a case is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserContext {
    pub age_range: AgeRange,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    pub city_tier: LocaleTier,
    pub sleep_quality: SleepQuality,
    pub stress_level: StressLevel,
    pub activity_level: ActivityLevel,
    pub primary_goal: PrimaryGoal,
}

/// Symptoms selected from the checklist plus optional free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymptomInput {
    pub selected_symptom_ids: Vec<SymptomId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free_text: Option<String>,
}

/// Evidence types the confirmation gate can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvancedInputType {
    SkinImage,
    TongueImage,
    FaceImage,
    DoctorConsultation,
    /// Reserved for practitioner-assisted readings.
    PulseReading,
}

impl AdvancedInputType {
    pub const fn label(self) -> &'static str {
        match self {
            AdvancedInputType::SkinImage => "skin_image",
            AdvancedInputType::TongueImage => "tongue_image",
            AdvancedInputType::FaceImage => "face_image",
            AdvancedInputType::DoctorConsultation => "doctor_consultation",
            AdvancedInputType::PulseReading => "pulse_reading",
        }
    }
}

/// Verification evidence supplied after the gate triggers. Image fields hold storage
/// references, never the image bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedInputs {
    #[serde(default, alias = "skinImageUrl", skip_serializing_if = "Option::is_none")]
    pub skin_image_ref: Option<String>,
    #[serde(default, alias = "tongueImageUrl", skip_serializing_if = "Option::is_none")]
    pub tongue_image_ref: Option<String>,
    #[serde(default, alias = "faceImageUrl", skip_serializing_if = "Option::is_none")]
    pub face_image_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor_consultation_completed: Option<bool>,
    #[serde(default, alias = "additionalNotes", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl AdvancedInputs {
    pub fn has_skin_image(&self) -> bool {
        is_present(&self.skin_image_ref)
    }

    pub fn has_tongue_image(&self) -> bool {
        is_present(&self.tongue_image_ref)
    }

    pub fn has_face_image(&self) -> bool {
        is_present(&self.face_image_ref)
    }

    pub fn doctor_consultation_completed(&self) -> bool {
        self.doctor_consultation_completed.unwrap_or(false)
    }

    /// True when the submission carries at least one piece of evidence.
    pub fn has_any_evidence(&self) -> bool {
        self.has_skin_image()
            || self.has_tongue_image()
            || self.has_face_image()
            || self.doctor_consultation_completed()
            || is_present(&self.notes)
    }
}

fn is_present(value: &Option<String>) -> bool {
    value
        .as_deref()
        .map(|raw| !raw.trim().is_empty())
        .unwrap_or(false)
}

/// Lifecycle of a triage case. Only forward transitions exist; resubmitting symptoms
/// restarts from `SymptomsSubmitted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    ContextCollected,
    SymptomsSubmitted,
    ConfirmationGate,
    AwaitingAdvancedInputs,
    DiagnosisComplete,
    AwaitingDoctorReview,
    DoctorApproved,
    DoctorRejected,
    Completed,
}

impl CaseStatus {
    pub const fn label(self) -> &'static str {
        match self {
            CaseStatus::ContextCollected => "context_collected",
            CaseStatus::SymptomsSubmitted => "symptoms_submitted",
            CaseStatus::ConfirmationGate => "confirmation_gate",
            CaseStatus::AwaitingAdvancedInputs => "awaiting_advanced_inputs",
            CaseStatus::DiagnosisComplete => "diagnosis_complete",
            CaseStatus::AwaitingDoctorReview => "awaiting_doctor_review",
            CaseStatus::DoctorApproved => "doctor_approved",
            CaseStatus::DoctorRejected => "doctor_rejected",
            CaseStatus::Completed => "completed",
        }
    }
}

/// Feedback payload accepted from the user once a case has run its course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackSubmission {
    pub was_helpful: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symptoms_improved: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side_effects: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_comments: Option<String>,
}

/// Stored feedback record. Kept for future model retraining; nothing downstream reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFeedback {
    pub id: String,
    pub case_id: CaseId,
    pub was_helpful: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symptoms_improved: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side_effects: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_comments: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_context_round_trips_wire_labels() {
        let payload = serde_json::json!({
            "ageRange": "26-35",
            "cityTier": "tier2",
            "sleepQuality": "good",
            "stressLevel": "very_high",
            "activityLevel": "light",
            "primaryGoal": "current_discomfort"
        });

        let context: UserContext = serde_json::from_value(payload).expect("context parses");
        assert_eq!(context.age_range, AgeRange::Age26To35);
        assert_eq!(context.gender, None);
        assert_eq!(context.stress_level, StressLevel::VeryHigh);
        assert_eq!(context.primary_goal, PrimaryGoal::CurrentDiscomfort);
    }

    #[test]
    fn user_context_rejects_out_of_enum_values() {
        let payload = serde_json::json!({
            "ageRange": "26-35",
            "cityTier": "tier2",
            "sleepQuality": "amazing",
            "stressLevel": "low",
            "activityLevel": "light",
            "primaryGoal": "prevention"
        });

        assert!(serde_json::from_value::<UserContext>(payload).is_err());
    }

    #[test]
    fn advanced_inputs_accept_legacy_url_fields() {
        let payload = serde_json::json!({
            "skinImageUrl": "uploads/skin-1.jpg",
            "additionalNotes": "rash on forearm"
        });

        let inputs: AdvancedInputs = serde_json::from_value(payload).expect("inputs parse");
        assert!(inputs.has_skin_image());
        assert!(!inputs.has_tongue_image());
        assert_eq!(inputs.notes.as_deref(), Some("rash on forearm"));
    }

    #[test]
    fn blank_references_do_not_count_as_evidence() {
        let inputs = AdvancedInputs {
            skin_image_ref: Some("   ".to_string()),
            doctor_consultation_completed: Some(false),
            ..AdvancedInputs::default()
        };

        assert!(!inputs.has_skin_image());
        assert!(!inputs.has_any_evidence());
    }
}
