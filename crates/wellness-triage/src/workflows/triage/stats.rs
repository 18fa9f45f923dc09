use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{Dosha, SymptomId};
use super::repository::Case;

const COMMON_SYMPTOM_LIMIT: usize = 10;

/// Raw counter values held by the analytics sink.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CounterSnapshot {
    pub advanced_input_triggers: u64,
    pub safety_flags: u64,
    pub drop_offs: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomFrequency {
    pub symptom: String,
    pub count: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoshaPatterns {
    pub vata: u64,
    pub pitta: u64,
    pub kapha: u64,
}

impl DoshaPatterns {
    fn record(&mut self, dosha: Dosha) {
        match dosha {
            Dosha::Vata => self.vata += 1,
            Dosha::Pitta => self.pitta += 1,
            Dosha::Kapha => self.kapha += 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropOffPoint {
    pub stage: String,
    pub count: u64,
    pub percentage: u64,
}

/// Aggregate view backing the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub user_count: u64,
    pub common_symptoms: Vec<SymptomFrequency>,
    pub dosha_patterns: DoshaPatterns,
    pub drop_off_points: Vec<DropOffPoint>,
    pub advanced_input_triggers: u64,
    pub safety_flags: u64,
}

impl AdminStats {
    pub fn compile(cases: &[Case], counters: &CounterSnapshot) -> Self {
        let mut symptom_counts: BTreeMap<SymptomId, u64> = BTreeMap::new();
        let mut dosha_patterns = DoshaPatterns::default();

        for case in cases {
            if let Some(input) = &case.symptom_input {
                for id in &input.selected_symptom_ids {
                    *symptom_counts.entry(*id).or_default() += 1;
                }
            }
            if let Some(result) = &case.diagnosis_result {
                dosha_patterns.record(result.ayurvedic_assessment.prakriti);
            }
        }

        // BTreeMap iteration keeps equal counts in id order after the stable sort.
        let mut ranked: Vec<(SymptomId, u64)> = symptom_counts.into_iter().collect();
        ranked.sort_by(|left, right| right.1.cmp(&left.1));
        let common_symptoms = ranked
            .into_iter()
            .take(COMMON_SYMPTOM_LIMIT)
            .map(|(id, count)| SymptomFrequency {
                symptom: format!("symptom_{id}"),
                count,
            })
            .collect();

        let total_cases = (cases.len() as u64).max(1);
        let drop_off_points = counters
            .drop_offs
            .iter()
            .map(|(stage, count)| DropOffPoint {
                stage: stage.clone(),
                count: *count,
                percentage: (count * 200 + total_cases) / (2 * total_cases),
            })
            .collect();

        Self {
            user_count: cases.len() as u64,
            common_symptoms,
            dosha_patterns,
            drop_off_points,
            advanced_input_triggers: counters.advanced_input_triggers,
            safety_flags: counters.safety_flags,
        }
    }
}
