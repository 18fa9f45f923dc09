use serde::{Deserialize, Serialize};

use super::super::catalog::{SymptomCatalog, SymptomCategory};
use super::super::domain::{PrimaryGoal, SymptomId};

pub const MENTAL_SYMPTOM_IDS: [SymptomId; 5] = [2, 3, 8, 11, 19];
pub const PHYSICAL_SYMPTOM_IDS: [SymptomId; 5] = [6, 7, 12, 17, 20];
/// Joint pain, heartburn, diarrhea, eye irritation, swelling.
pub const SEVERE_SYMPTOM_IDS: [SymptomId; 5] = [6, 10, 13, 14, 20];
/// Lethargy / low motivation.
pub const FATIGUE_SYMPTOM_ID: SymptomId = 19;

pub const SEVERITY_RED_FLAG: &str =
    "Multiple symptoms with potential severity - monitoring recommended";
pub const FATIGUE_RED_FLAG: &str =
    "Persistent fatigue may warrant professional evaluation if ongoing";

const OVERLAP_PENALTY: u8 = 15;

/// Symptom clusters in detection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymptomCluster {
    Dermatological,
    Gastrointestinal,
    #[serde(rename = "Mental/Emotional")]
    MentalEmotional,
    #[serde(rename = "Musculoskeletal/Systemic")]
    MusculoskeletalSystemic,
}

impl SymptomCluster {
    pub const fn label(self) -> &'static str {
        match self {
            SymptomCluster::Dermatological => "Dermatological",
            SymptomCluster::Gastrointestinal => "Gastrointestinal",
            SymptomCluster::MentalEmotional => "Mental/Emotional",
            SymptomCluster::MusculoskeletalSystemic => "Musculoskeletal/Systemic",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

/// Educational pattern match, never a diagnosis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PossibleCondition {
    pub name: String,
    pub confidence: u8,
    pub category: SymptomCluster,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub symptom_clusters: Vec<SymptomCluster>,
    pub possible_conditions: Vec<PossibleCondition>,
    pub confidence_score: u8,
    pub risk_level: RiskLevel,
    pub red_flags: Vec<String>,
    pub referral_recommended: bool,
}

fn detect_clusters(catalog: &SymptomCatalog, symptom_ids: &[SymptomId]) -> Vec<SymptomCluster> {
    let mentions = |set: &[SymptomId]| symptom_ids.iter().any(|id| set.contains(id));

    let mut clusters = Vec::new();
    if catalog.any_in_category(symptom_ids, SymptomCategory::Skin) {
        clusters.push(SymptomCluster::Dermatological);
    }
    if catalog.any_in_category(symptom_ids, SymptomCategory::Digestive) {
        clusters.push(SymptomCluster::Gastrointestinal);
    }
    if mentions(&MENTAL_SYMPTOM_IDS[..]) {
        clusters.push(SymptomCluster::MentalEmotional);
    }
    if mentions(&PHYSICAL_SYMPTOM_IDS[..]) {
        clusters.push(SymptomCluster::MusculoskeletalSystemic);
    }
    clusters
}

fn confidence_score(selected: usize, cluster_count: usize) -> u8 {
    let base: u8 = match selected {
        0 => 30,
        1 => 50,
        2 => 75,
        3 | 4 => 78,
        _ => 85,
    };

    let score = if cluster_count >= 3 {
        base.saturating_sub(OVERLAP_PENALTY)
    } else {
        base
    };
    score.min(100)
}

fn pattern_condition(
    catalog: &SymptomCatalog,
    symptom_ids: &[SymptomId],
    name: &str,
    category: SymptomCategory,
    cluster: SymptomCluster,
) -> PossibleCondition {
    let matching = catalog.count_in_category(symptom_ids, category);
    let confidence = (60 + 10 * matching).min(100) as u8;
    PossibleCondition {
        name: name.to_string(),
        confidence,
        category: cluster,
    }
}

/// Heuristic risk profile standing in for a future statistical model.
///
/// Deterministic by construction: the same ids and goal always produce the same
/// assessment. `_free_text` is accepted so callers do not change when text starts feeding
/// the score; it is unused today.
pub fn assess_risk(
    catalog: &SymptomCatalog,
    symptom_ids: &[SymptomId],
    _free_text: Option<&str>,
    primary_goal: PrimaryGoal,
) -> RiskAssessment {
    let selected = symptom_ids.len();
    let symptom_clusters = detect_clusters(catalog, symptom_ids);
    let confidence_score = confidence_score(selected, symptom_clusters.len());

    let has_severe = symptom_ids
        .iter()
        .any(|id| SEVERE_SYMPTOM_IDS.contains(id));

    let mut red_flags = Vec::new();
    if has_severe && selected >= 3 {
        red_flags.push(SEVERITY_RED_FLAG.to_string());
    }
    if symptom_ids.contains(&FATIGUE_SYMPTOM_ID) {
        red_flags.push(FATIGUE_RED_FLAG.to_string());
    }

    let mut risk_level = RiskLevel::Low;
    if selected >= 5 || has_severe {
        risk_level = RiskLevel::Medium;
    }
    if red_flags.len() >= 2 || (primary_goal == PrimaryGoal::CurrentDiscomfort && selected >= 4)
    {
        risk_level = RiskLevel::High;
    }

    // Mental and physical clusters do not yield condition entries.
    let mut possible_conditions = Vec::new();
    if symptom_clusters.contains(&SymptomCluster::Dermatological) {
        possible_conditions.push(pattern_condition(
            catalog,
            symptom_ids,
            "Skin sensitivity pattern",
            SymptomCategory::Skin,
            SymptomCluster::Dermatological,
        ));
    }
    if symptom_clusters.contains(&SymptomCluster::Gastrointestinal) {
        possible_conditions.push(pattern_condition(
            catalog,
            symptom_ids,
            "Digestive imbalance pattern",
            SymptomCategory::Digestive,
            SymptomCluster::Gastrointestinal,
        ));
    }

    RiskAssessment {
        symptom_clusters,
        possible_conditions,
        confidence_score,
        risk_level,
        red_flags,
        referral_recommended: risk_level == RiskLevel::High,
    }
}
