use super::super::domain::{AdvancedInputType, AdvancedInputs};
use super::ConfirmationGateResult;

/// Whether the submitted evidence covers one required input.
///
/// Only skin, tongue and doctor requirements are matched against a dedicated field. Any
/// other requirement (face image, pulse reading) is accepted as soon as the submission
/// carries some evidence at all.
pub fn requirement_satisfied(required: AdvancedInputType, evidence: &AdvancedInputs) -> bool {
    match required {
        AdvancedInputType::SkinImage => evidence.has_skin_image(),
        AdvancedInputType::TongueImage => evidence.has_tongue_image(),
        AdvancedInputType::DoctorConsultation => evidence.doctor_consultation_completed(),
        AdvancedInputType::FaceImage | AdvancedInputType::PulseReading => {
            evidence.has_any_evidence()
        }
    }
}

/// Advanced-inputs transition. Recomputes the provided/proceed/medicine flags and carries
/// `triggered`, the reasons and the required inputs over untouched.
pub fn apply_advanced_inputs(
    gate: &ConfirmationGateResult,
    evidence: &AdvancedInputs,
) -> ConfirmationGateResult {
    let inputs_provided = gate
        .required_inputs
        .iter()
        .all(|required| requirement_satisfied(*required, evidence));

    ConfirmationGateResult {
        inputs_provided,
        can_proceed: inputs_provided,
        can_enable_medicines: inputs_provided,
        ..gate.clone()
    }
}
