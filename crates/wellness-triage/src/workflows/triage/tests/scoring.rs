use super::common::*;
use crate::workflows::triage::assessment::{
    AssessmentEngine, DoshaBalance, ImbalanceLevel, RiskLevel, SymptomCluster,
    SEVERITY_RED_FLAG,
};
use crate::workflows::triage::domain::{Dosha, PrimaryGoal, SymptomId};

fn subsets(pool: &[SymptomId]) -> impl Iterator<Item = Vec<SymptomId>> + '_ {
    (0u32..(1 << pool.len())).map(move |mask| {
        pool.iter()
            .enumerate()
            .filter(|(bit, _)| mask & (1 << bit) != 0)
            .map(|(_, id)| *id)
            .collect()
    })
}

#[test]
fn dosha_balance_always_sums_to_one_hundred() {
    let engine = AssessmentEngine::default();
    let pool: Vec<SymptomId> = (1..=12).chain([17, 21, 99]).collect();

    for ids in subsets(&pool) {
        let assessment = engine.constitution(&context(PrimaryGoal::Prevention), &selection(&ids));
        assert_eq!(
            assessment.dosha_balance.total(),
            100,
            "selection {ids:?} produced {:?}",
            assessment.dosha_balance
        );
    }
}

#[test]
fn scoring_is_deterministic() {
    let engine = AssessmentEngine::default();
    let pool: Vec<SymptomId> = vec![2, 6, 10, 13, 19, 22];

    for ids in subsets(&pool) {
        let input = selection(&ids);
        let goal_context = context(PrimaryGoal::CurrentDiscomfort);
        assert_eq!(
            engine.constitution(&goal_context, &input),
            engine.constitution(&goal_context, &input)
        );
        assert_eq!(engine.risk(&goal_context, &input), engine.risk(&goal_context, &input));
    }
}

#[test]
fn empty_selection_is_mild_vata_with_floor_shares() {
    let engine = AssessmentEngine::default();
    let assessment = engine.constitution(&context(PrimaryGoal::Prevention), &selection(&[]));

    assert_eq!(assessment.vikriti, Dosha::Vata);
    assert_eq!(assessment.imbalance_level, ImbalanceLevel::Mild);
    assert_eq!(
        assessment.dosha_balance,
        DoshaBalance {
            vata: 33,
            pitta: 33,
            kapha: 34
        }
    );
}

#[test]
fn heartburn_alone_reads_as_mild_pitta_with_digestive_cluster() {
    let engine = AssessmentEngine::default();
    let result = engine.assess(&context(PrimaryGoal::Prevention), &selection(&[10]));

    let ayurvedic = &result.ayurvedic_assessment;
    assert_eq!(ayurvedic.vikriti, Dosha::Pitta);
    assert_eq!(ayurvedic.prakriti, Dosha::Vata);
    assert_eq!(ayurvedic.imbalance_level, ImbalanceLevel::Mild);

    let medical = &result.medical_assessment;
    assert_eq!(medical.symptom_clusters, vec![SymptomCluster::Gastrointestinal]);
    assert_eq!(medical.confidence_score, 50);
    // heartburn sits in the severe set
    assert_eq!(medical.risk_level, RiskLevel::Medium);
    assert!(medical.red_flags.is_empty());
    assert_eq!(medical.possible_conditions.len(), 1);
    assert_eq!(medical.possible_conditions[0].name, "Digestive imbalance pattern");
    assert_eq!(medical.possible_conditions[0].confidence, 70);
}

#[test]
fn broad_vata_selection_under_discomfort_is_high_risk() {
    let engine = AssessmentEngine::default();
    let result = engine.assess(
        &context(PrimaryGoal::CurrentDiscomfort),
        &selection(&[1, 2, 3, 4, 6]),
    );

    let medical = &result.medical_assessment;
    assert_eq!(
        medical.symptom_clusters,
        vec![
            SymptomCluster::Dermatological,
            SymptomCluster::MentalEmotional,
            SymptomCluster::MusculoskeletalSystemic
        ]
    );
    assert_eq!(medical.confidence_score, 70);
    assert_eq!(medical.red_flags, vec![SEVERITY_RED_FLAG.to_string()]);
    assert_eq!(medical.risk_level, RiskLevel::High);
    assert!(medical.referral_recommended);

    let ayurvedic = &result.ayurvedic_assessment;
    assert_eq!(ayurvedic.vikriti, Dosha::Vata);
    assert_eq!(ayurvedic.imbalance_level, ImbalanceLevel::Significant);
    assert!(ayurvedic.pattern_consistent);
    // (70 + 80) / 2
    assert_eq!(result.overall_confidence, 75);
}

#[test]
fn skin_and_digestive_selection_yields_two_conditions() {
    let engine = AssessmentEngine::default();
    let medical = engine.risk(&context(PrimaryGoal::Prevention), &selection(&[4, 5, 9]));

    assert_eq!(medical.confidence_score, 78);
    assert_eq!(medical.risk_level, RiskLevel::Low);
    let confidences: Vec<u8> = medical
        .possible_conditions
        .iter()
        .map(|condition| condition.confidence)
        .collect();
    assert_eq!(confidences, vec![80, 70]);
}
