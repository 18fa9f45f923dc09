use crate::infra::{parse_label, InMemoryAnalytics, InMemoryCaseStore};
use clap::Args;
use std::sync::Arc;
use wellness_triage::config::AppConfig;
use wellness_triage::error::AppError;
use wellness_triage::workflows::triage::{
    ActivityLevel, AdminStats, AdvancedInputType, AdvancedInputs, AgeRange, Case, DoctorConsent,
    DoctorDecisionSubmission, DoctorVerdict, FeedbackSubmission, GateConfig, Gender, LocaleTier,
    PrimaryGoal, SleepQuality, StressLevel, SymptomId, SymptomInput, TriageService, UserContext,
};

type LocalService = TriageService<InMemoryCaseStore, InMemoryAnalytics>;

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// Comma-separated symptom ids from the catalog (e.g. 4,5,9)
    #[arg(long, value_delimiter = ',', required = true)]
    pub(crate) symptoms: Vec<SymptomId>,
    /// Optional free-text description of the symptoms
    #[arg(long)]
    pub(crate) note: Option<String>,
    /// Age bracket (18-25, 26-35, 36-45, 46-55, 56-65, 65+)
    #[arg(long, value_parser = parse_label::<AgeRange>, default_value = "26-35")]
    pub(crate) age: AgeRange,
    /// prevention, current_discomfort or long_term_wellness
    #[arg(long, value_parser = parse_label::<PrimaryGoal>, default_value = "prevention")]
    pub(crate) goal: PrimaryGoal,
    /// poor, fair, good or excellent
    #[arg(long, value_parser = parse_label::<SleepQuality>, default_value = "good")]
    pub(crate) sleep: SleepQuality,
    /// low, moderate, high or very_high
    #[arg(long, value_parser = parse_label::<StressLevel>, default_value = "moderate")]
    pub(crate) stress: StressLevel,
    /// sedentary, light, moderate or active
    #[arg(long, value_parser = parse_label::<ActivityLevel>, default_value = "light")]
    pub(crate) activity: ActivityLevel,
    /// Print the full case payload as JSON instead of a summary
    #[arg(long)]
    pub(crate) json: bool,
}

impl AssessArgs {
    fn user_context(&self) -> UserContext {
        UserContext {
            age_range: self.age,
            gender: None,
            city_tier: LocaleTier::Tier1,
            sleep_quality: self.sleep,
            stress_level: self.stress,
            activity_level: self.activity,
            primary_goal: self.goal,
        }
    }

    fn symptom_input(&self) -> SymptomInput {
        SymptomInput {
            selected_symptom_ids: self.symptoms.clone(),
            free_text: self.note.clone(),
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Symptom ids used for the demo case
    #[arg(long, value_delimiter = ',', default_value = "4,5,6,19")]
    pub(crate) symptoms: Vec<SymptomId>,
    /// Stop after the confirmation gate instead of walking through doctor review
    #[arg(long)]
    pub(crate) skip_review: bool,
}

impl Default for DemoArgs {
    fn default() -> Self {
        Self {
            symptoms: vec![4, 5, 6, 19],
            skip_review: false,
        }
    }
}

fn local_service(config: GateConfig) -> LocalService {
    TriageService::new(
        Arc::new(InMemoryCaseStore::default()),
        Arc::new(InMemoryAnalytics::default()),
        config,
    )
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let case = assess_selection(&args, config.triage)?;

    if args.json {
        match serde_json::to_string_pretty(&case.into_view()) {
            Ok(json) => println!("{json}"),
            Err(err) => println!("Case payload unavailable: {err}"),
        }
        return Ok(());
    }

    render_assessment(&case);
    Ok(())
}

pub(crate) fn assess_selection(args: &AssessArgs, config: GateConfig) -> Result<Case, AppError> {
    let service = local_service(config);
    let case = service.create_case(args.user_context())?;
    let scored = service.submit_symptoms(&case.id, args.symptom_input())?;
    Ok(scored)
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let service = local_service(GateConfig::default());
    println!("Wellness triage demo");
    let stats = walkthrough(&service, &args)?;

    println!("\nAdmin statistics");
    match serde_json::to_string_pretty(&stats) {
        Ok(json) => println!("{json}"),
        Err(err) => println!("Statistics unavailable: {err}"),
    }
    Ok(())
}

fn demo_context() -> UserContext {
    UserContext {
        age_range: AgeRange::Age46To55,
        gender: Some(Gender::PreferNotToSay),
        city_tier: LocaleTier::Tier2,
        sleep_quality: SleepQuality::Fair,
        stress_level: StressLevel::High,
        activity_level: ActivityLevel::Sedentary,
        primary_goal: PrimaryGoal::CurrentDiscomfort,
    }
}

pub(crate) fn walkthrough(service: &LocalService, args: &DemoArgs) -> Result<AdminStats, AppError> {
    let case = service.create_case(demo_context())?;
    println!("- Opened {} ({})", case.id, case.status.label());

    let scored = service.submit_symptoms(
        &case.id,
        SymptomInput {
            selected_symptom_ids: args.symptoms.clone(),
            free_text: None,
        },
    )?;
    render_assessment(&scored);

    let gate_triggered = scored
        .confirmation_gate
        .as_ref()
        .map(|gate| gate.triggered)
        .unwrap_or(false);

    if gate_triggered {
        let required = scored
            .confirmation_gate
            .as_ref()
            .map(|gate| gate.required_inputs.clone())
            .unwrap_or_default();
        let verified = service.submit_advanced_inputs(&case.id, evidence_for(&required))?;
        println!(
            "\nEvidence supplied -> status {} | medicines enabled: {}",
            verified.status.label(),
            medicines_enabled(&verified)
        );
    }

    if !args.skip_review {
        let reviewing = service.request_doctor_review(
            &case.id,
            DoctorConsent {
                consent_given: true,
            },
        )?;
        println!("- Doctor review requested -> {}", reviewing.status.label());

        let decided = service.record_doctor_decision(
            &case.id,
            DoctorDecisionSubmission {
                decision: DoctorVerdict::Modified,
                approved_medicines: Vec::new(),
                modified_medicines: vec!["Triphala churna, half dose".to_string()],
                rejection_reason: None,
                consultation_required: true,
                doctor_notes: Some("Recheck in two weeks".to_string()),
            },
        )?;
        println!("- Doctor decision recorded -> {}", decided.status.label());

        let feedback = service.submit_feedback(
            &case.id,
            FeedbackSubmission {
                was_helpful: true,
                symptoms_improved: None,
                side_effects: None,
                additional_comments: None,
            },
        )?;
        println!("- Feedback {} stored, case completed", feedback.id);
    }

    // A second visitor who leaves at the symptom checklist.
    service.create_case(UserContext {
        primary_goal: PrimaryGoal::Prevention,
        ..demo_context()
    })?;
    service.record_drop_off("symptoms")?;

    Ok(service.admin_stats()?)
}

/// Evidence covering every required input, with placeholder storage references.
fn evidence_for(required: &[AdvancedInputType]) -> AdvancedInputs {
    let mut evidence = AdvancedInputs::default();
    for input in required {
        match input {
            AdvancedInputType::SkinImage => {
                evidence.skin_image_ref = Some("demo/skin.jpg".to_string())
            }
            AdvancedInputType::TongueImage => {
                evidence.tongue_image_ref = Some("demo/tongue.jpg".to_string())
            }
            AdvancedInputType::FaceImage => {
                evidence.face_image_ref = Some("demo/face.jpg".to_string())
            }
            AdvancedInputType::DoctorConsultation => {
                evidence.doctor_consultation_completed = Some(true)
            }
            AdvancedInputType::PulseReading => {
                evidence.notes = Some("pulse reading taken in clinic".to_string())
            }
        }
    }
    evidence
}

fn medicines_enabled(case: &Case) -> bool {
    case.next_steps_options
        .as_ref()
        .map(|options| options.medicines_enabled)
        .unwrap_or(false)
}

fn render_assessment(case: &Case) {
    let Some(diagnosis) = case.diagnosis_result.as_ref() else {
        println!("Case {} has no assessment yet", case.id);
        return;
    };
    let ayurvedic = &diagnosis.ayurvedic_assessment;
    let medical = &diagnosis.medical_assessment;

    println!("\nCase {} -> {}", case.id, case.status.label());
    if let Some(snapshot) = case.health_snapshot.as_ref() {
        println!("{}", snapshot.summary);
    }

    println!("Constitutional assessment");
    println!(
        "- prakriti {} | vikriti {} ({} imbalance)",
        ayurvedic.prakriti.display_name(),
        ayurvedic.vikriti.display_name(),
        ayurvedic.imbalance_level.label()
    );
    println!(
        "- balance: vata {}% | pitta {}% | kapha {}%",
        ayurvedic.dosha_balance.vata, ayurvedic.dosha_balance.pitta, ayurvedic.dosha_balance.kapha
    );

    println!("Risk assessment");
    let clusters: Vec<&str> = medical
        .symptom_clusters
        .iter()
        .map(|cluster| cluster.label())
        .collect();
    println!(
        "- risk {} | confidence {} | clusters: {}",
        medical.risk_level.label(),
        medical.confidence_score,
        if clusters.is_empty() {
            "none".to_string()
        } else {
            clusters.join(", ")
        }
    );
    for condition in &medical.possible_conditions {
        println!("  - {} ({}%)", condition.name, condition.confidence);
    }
    for flag in &medical.red_flags {
        println!("  ! {flag}");
    }
    println!("- overall confidence {}", diagnosis.overall_confidence);

    if let Some(gate) = case.confirmation_gate.as_ref() {
        if gate.triggered {
            let required: Vec<&str> = gate.required_inputs.iter().map(|input| input.label()).collect();
            println!("Confirmation gate: triggered");
            for reason in &gate.trigger_reasons {
                println!("  - {reason}");
            }
            println!("  required inputs: {}", required.join(", "));
        } else {
            println!("Confirmation gate: clear");
        }
    }

    if let Some(options) = case.next_steps_options.as_ref() {
        println!(
            "Next steps: lifestyle {} | medicines {} | consult doctor {}",
            options.lifestyle_only_enabled, options.medicines_enabled, options.consult_doctor_enabled
        );
        if let Some(reason) = options.medicines_disabled_reason.as_deref() {
            println!("  medicines locked: {reason}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wellness_triage::workflows::triage::{CaseStatus, CaseStore, RiskLevel};

    fn assess_args(symptoms: Vec<SymptomId>, goal: PrimaryGoal) -> AssessArgs {
        AssessArgs {
            symptoms,
            note: None,
            age: AgeRange::Age26To35,
            goal,
            sleep: SleepQuality::Good,
            stress: StressLevel::Moderate,
            activity: ActivityLevel::Light,
            json: false,
        }
    }

    #[test]
    fn assess_selection_scores_and_gates() {
        let case = assess_selection(
            &assess_args(vec![4, 5, 9], PrimaryGoal::Prevention),
            GateConfig::default(),
        )
        .expect("selection scores");

        assert_eq!(case.status, CaseStatus::ConfirmationGate);
        let diagnosis = case.diagnosis_result.expect("diagnosis stored");
        assert_eq!(diagnosis.overall_confidence, 78);
        assert!(!diagnosis.is_finalized);
        let gate = case.confirmation_gate.expect("gate stored");
        assert_eq!(
            gate.trigger_reasons,
            vec!["Symptoms match multiple conditions".to_string()]
        );
    }

    #[test]
    fn assess_selection_rejects_empty_input() {
        let result = assess_selection(
            &assess_args(Vec::new(), PrimaryGoal::Prevention),
            GateConfig::default(),
        );
        assert!(matches!(result, Err(AppError::Triage(_))));
    }

    #[test]
    fn evidence_covers_every_requirement() {
        let evidence = evidence_for(&[
            AdvancedInputType::SkinImage,
            AdvancedInputType::DoctorConsultation,
        ]);
        assert!(evidence.has_skin_image());
        assert!(evidence.doctor_consultation_completed());
        assert!(!evidence.has_tongue_image());
    }

    #[test]
    fn walkthrough_completes_case_and_reports_stats() {
        let store = Arc::new(InMemoryCaseStore::default());
        let service = TriageService::new(
            store.clone(),
            Arc::new(InMemoryAnalytics::default()),
            GateConfig::default(),
        );
        let stats = walkthrough(&service, &DemoArgs::default()).expect("demo runs");

        assert_eq!(stats.user_count, 2);
        assert_eq!(stats.advanced_input_triggers, 1);
        assert_eq!(stats.safety_flags, 1);
        assert_eq!(stats.drop_off_points.len(), 1);
        assert_eq!(stats.drop_off_points[0].stage, "symptoms");

        let cases = store.all().expect("store readable");
        let demo_case = cases
            .iter()
            .find(|case| case.status == CaseStatus::Completed)
            .expect("demo case completed");
        let risk = demo_case
            .diagnosis_result
            .as_ref()
            .map(|diagnosis| diagnosis.medical_assessment.risk_level);
        assert_eq!(risk, Some(RiskLevel::High));
        assert!(medicines_enabled(demo_case));
    }

    #[test]
    fn walkthrough_can_stop_at_the_gate() {
        let service = local_service(GateConfig::default());
        let args = DemoArgs {
            skip_review: true,
            ..DemoArgs::default()
        };
        let stats = walkthrough(&service, &args).expect("demo runs");
        assert_eq!(stats.user_count, 2);
    }
}
