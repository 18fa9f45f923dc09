use serde::{Deserialize, Serialize};

use super::assessment::{
    ConstitutionalAssessment, DoshaBalance, ImbalanceLevel, RiskAssessment, RiskLevel,
};
use super::domain::Dosha;
use super::gate::ConfirmationGateResult;
use super::guidance::{guidance_for, ESCALATION_ADVICE, WARNING_SIGNS, WHEN_TO_SEEK_HELP};

pub const MEDICINES_GATED_REASON: &str =
    "Additional verification required before medicine recommendations";
pub const MEDICINES_MISSING_INPUTS_REASON: &str = "Required verification inputs not provided";

/// Plain-language summary of a submission.
///
/// Pure function of both assessments so the copy can be checked without a case.
pub fn summary_text(ayurvedic: &ConstitutionalAssessment, medical: &RiskAssessment) -> String {
    let mut summary = format!(
        "Based on your symptoms, you appear to have a {} {} imbalance. ",
        ayurvedic.imbalance_level.label(),
        ayurvedic.vikriti.display_name()
    );

    if ayurvedic.prakriti != ayurvedic.vikriti {
        summary.push_str(&format!(
            "Your natural constitution (Prakriti) appears to be {}, but current factors have shifted your balance. ",
            ayurvedic.prakriti.display_name()
        ));
    }

    summary.push_str(match medical.risk_level {
        RiskLevel::Low => "This is generally manageable with lifestyle and dietary adjustments.",
        RiskLevel::Medium => {
            "Consider monitoring your symptoms and making gradual lifestyle changes."
        }
        RiskLevel::High => {
            "We recommend consulting with a healthcare practitioner for personalized guidance."
        }
    });

    summary
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoshaImbalance {
    pub primary: Dosha,
    pub level: ImbalanceLevel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthSnapshot {
    pub summary: String,
    pub dosha_imbalance: DoshaImbalance,
    pub dosha_visualization: DoshaBalance,
}

impl HealthSnapshot {
    pub fn from_assessments(ayurvedic: &ConstitutionalAssessment, medical: &RiskAssessment) -> Self {
        Self {
            summary: summary_text(ayurvedic, medical),
            dosha_imbalance: DoshaImbalance {
                primary: ayurvedic.vikriti,
                level: ayurvedic.imbalance_level,
            },
            dosha_visualization: ayurvedic.dosha_balance,
        }
    }
}

/// Lifestyle suggestions for the current imbalance. Never prescriptions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreventiveGuidance {
    pub habits: Vec<String>,
    pub food_preferences: Vec<String>,
    pub sleep_tips: Vec<String>,
    pub stress_tips: Vec<String>,
    pub activity_tips: Vec<String>,
}

impl PreventiveGuidance {
    pub fn for_dosha(dosha: Dosha) -> Self {
        let guidance = guidance_for(dosha);
        Self {
            habits: first(guidance.habits, 3),
            food_preferences: first(guidance.food_preferences, 3),
            sleep_tips: first(guidance.sleep_tips, 2),
            stress_tips: first(guidance.stress_tips, 2),
            activity_tips: first(guidance.activity_tips, 2),
        }
    }
}

fn first(entries: &[&str], count: usize) -> Vec<String> {
    entries
        .iter()
        .take(count)
        .map(|entry| entry.to_string())
        .collect()
}

fn owned(entries: &[&str]) -> Vec<String> {
    first(entries, entries.len())
}

/// Escalation copy shown with every diagnosis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalAwareness {
    pub escalation_advice: Vec<String>,
    pub warning_signs_to_watch: Vec<String>,
    pub when_to_seek_help: Vec<String>,
}

impl MedicalAwareness {
    pub fn standard() -> Self {
        Self {
            escalation_advice: owned(&ESCALATION_ADVICE),
            warning_signs_to_watch: owned(&WARNING_SIGNS),
            when_to_seek_help: owned(&WHEN_TO_SEEK_HELP),
        }
    }
}

/// User-facing unlock flags. Lifestyle guidance and doctor consultation are never gated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextStepsOptions {
    pub lifestyle_only_enabled: bool,
    pub medicines_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medicines_disabled_reason: Option<String>,
    pub consult_doctor_enabled: bool,
}

impl NextStepsOptions {
    fn build(medicines_enabled: bool, disabled_reason: &str) -> Self {
        Self {
            lifestyle_only_enabled: true,
            medicines_enabled,
            medicines_disabled_reason: (!medicines_enabled).then(|| disabled_reason.to_string()),
            consult_doctor_enabled: true,
        }
    }

    /// Options right after symptoms are scored.
    pub fn after_assessment(gate: &ConfirmationGateResult) -> Self {
        Self::build(gate.can_enable_medicines, MEDICINES_GATED_REASON)
    }

    /// Options after the user supplied advanced inputs.
    pub fn after_advanced_inputs(gate: &ConfirmationGateResult) -> Self {
        Self::build(gate.can_enable_medicines, MEDICINES_MISSING_INPUTS_REASON)
    }
}
