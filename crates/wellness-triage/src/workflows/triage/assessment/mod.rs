mod constitution;
mod risk;

pub use constitution::{
    assess_constitution, estimate_prakriti, ConstitutionalAssessment, DoshaBalance,
    ImbalanceLevel, DOSHA_PRIORITY,
};
pub use risk::{
    assess_risk, PossibleCondition, RiskAssessment, RiskLevel, SymptomCluster,
    FATIGUE_RED_FLAG, SEVERITY_RED_FLAG,
};

use super::catalog::SymptomCatalog;
use super::domain::{SymptomInput, UserContext};
use serde::{Deserialize, Serialize};

/// Stateless evaluator running the constitutional and risk scorers over one submission.
///
/// The two scorers share nothing but the read-only catalog, so their order is irrelevant.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssessmentEngine {
    catalog: SymptomCatalog,
}

impl AssessmentEngine {
    pub fn new(catalog: SymptomCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &SymptomCatalog {
        &self.catalog
    }

    pub fn constitution(
        &self,
        context: &UserContext,
        input: &SymptomInput,
    ) -> ConstitutionalAssessment {
        assess_constitution(
            &self.catalog,
            &input.selected_symptom_ids,
            context.sleep_quality,
            context.stress_level,
            context.activity_level,
        )
    }

    pub fn risk(&self, context: &UserContext, input: &SymptomInput) -> RiskAssessment {
        assess_risk(
            &self.catalog,
            &input.selected_symptom_ids,
            input.free_text.as_deref(),
            context.primary_goal,
        )
    }

    /// Runs both scorers. `is_finalized` starts true and is settled by the gate.
    pub fn assess(&self, context: &UserContext, input: &SymptomInput) -> DiagnosisResult {
        let ayurvedic_assessment = self.constitution(context, input);
        let medical_assessment = self.risk(context, input);
        let overall_confidence = overall_confidence(&ayurvedic_assessment, &medical_assessment);

        DiagnosisResult {
            ayurvedic_assessment,
            medical_assessment,
            overall_confidence,
            is_finalized: true,
        }
    }
}

/// Blend of the risk confidence and the pattern-consistency check (80 when consistent,
/// 60 otherwise), rounded half up.
pub fn overall_confidence(
    ayurvedic: &ConstitutionalAssessment,
    medical: &RiskAssessment,
) -> u8 {
    let pattern_score: u16 = if ayurvedic.pattern_consistent { 80 } else { 60 };
    let sum = u16::from(medical.confidence_score) + pattern_score;
    ((sum + 1) / 2).min(100) as u8
}

/// Both assessments for one submission, bundled for storage and display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisResult {
    pub ayurvedic_assessment: ConstitutionalAssessment,
    pub medical_assessment: RiskAssessment,
    pub overall_confidence: u8,
    pub is_finalized: bool,
}
