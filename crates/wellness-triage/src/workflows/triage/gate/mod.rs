mod config;
mod evidence;

pub use config::GateConfig;
pub use evidence::{apply_advanced_inputs, requirement_satisfied};

use super::assessment::{RiskAssessment, RiskLevel};
use super::catalog::{SymptomCatalog, SymptomCategory};
use super::domain::{AdvancedInputType, PrimaryGoal, SymptomId};
use serde::{Deserialize, Serialize};

pub const MULTIPLE_CONDITIONS_REASON: &str = "Symptoms match multiple conditions";
pub const LOW_CONFIDENCE_REASON: &str = "AI confidence score is low";
pub const OVERLAPPING_PATTERNS_REASON: &str = "Overlapping symptom patterns detected";
pub const CURRENT_DISCOMFORT_REASON: &str = "Current discomfort requires additional verification";

/// Safety checkpoint outcome. Medicines stay locked while the gate is triggered and the
/// required evidence is missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationGateResult {
    pub triggered: bool,
    pub trigger_reasons: Vec<String>,
    pub required_inputs: Vec<AdvancedInputType>,
    pub inputs_provided: bool,
    pub can_proceed: bool,
    pub can_enable_medicines: bool,
}

impl ConfirmationGateResult {
    /// Whether medicines unlock: never triggered, or triggered with every input supplied.
    pub fn medicines_unlocked(&self) -> bool {
        !self.triggered || self.inputs_provided
    }
}

/// Decides whether a submission needs extra verification before medicine is offered.
#[derive(Debug, Clone, Default)]
pub struct ConfirmationGate {
    config: GateConfig,
    catalog: SymptomCatalog,
}

impl ConfirmationGate {
    pub fn new(config: GateConfig, catalog: SymptomCatalog) -> Self {
        Self { config, catalog }
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    pub fn evaluate(
        &self,
        symptom_ids: &[SymptomId],
        risk: &RiskAssessment,
        primary_goal: PrimaryGoal,
    ) -> ConfirmationGateResult {
        let checks = [
            (
                risk.possible_conditions.len() >= self.config.multiple_condition_threshold,
                MULTIPLE_CONDITIONS_REASON,
            ),
            (
                risk.confidence_score < self.config.low_confidence_threshold,
                LOW_CONFIDENCE_REASON,
            ),
            (
                risk.symptom_clusters.len() >= self.config.overlapping_cluster_threshold,
                OVERLAPPING_PATTERNS_REASON,
            ),
            (
                primary_goal == PrimaryGoal::CurrentDiscomfort,
                CURRENT_DISCOMFORT_REASON,
            ),
        ];

        let trigger_reasons: Vec<String> = checks
            .iter()
            .filter(|(hit, _)| *hit)
            .map(|(_, reason)| reason.to_string())
            .collect();
        let triggered = !trigger_reasons.is_empty();

        let required_inputs = if triggered {
            self.required_inputs(symptom_ids, risk)
        } else {
            Vec::new()
        };

        ConfirmationGateResult {
            triggered,
            trigger_reasons,
            required_inputs,
            inputs_provided: false,
            can_proceed: !triggered,
            can_enable_medicines: !triggered,
        }
    }

    fn required_inputs(
        &self,
        symptom_ids: &[SymptomId],
        risk: &RiskAssessment,
    ) -> Vec<AdvancedInputType> {
        let mut required = Vec::new();
        if self
            .catalog
            .any_in_category(symptom_ids, SymptomCategory::Skin)
        {
            required.push(AdvancedInputType::SkinImage);
        }
        if self
            .catalog
            .any_in_category(symptom_ids, SymptomCategory::Digestive)
        {
            required.push(AdvancedInputType::TongueImage);
        }
        if risk.risk_level == RiskLevel::High {
            required.push(AdvancedInputType::DoctorConsultation);
        }
        if required.is_empty() {
            required.push(AdvancedInputType::FaceImage);
        }
        required
    }
}
