use serde::{Deserialize, Serialize};

use super::super::catalog::SymptomCatalog;
use super::super::domain::{ActivityLevel, Dosha, SleepQuality, StressLevel, SymptomId};

/// Tie-break order when two doshas share the highest tally. Earlier entries win.
pub const DOSHA_PRIORITY: [Dosha; 3] = [Dosha::Vata, Dosha::Pitta, Dosha::Kapha];

const SIGNIFICANT_TALLY: u32 = 4;
const MODERATE_TALLY: u32 = 2;

/// Severity of the current imbalance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImbalanceLevel {
    Mild,
    Moderate,
    Significant,
}

impl ImbalanceLevel {
    pub const fn label(self) -> &'static str {
        match self {
            ImbalanceLevel::Mild => "mild",
            ImbalanceLevel::Moderate => "moderate",
            ImbalanceLevel::Significant => "significant",
        }
    }
}

/// Display percentages per dosha. The three values always sum to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoshaBalance {
    pub vata: u8,
    pub pitta: u8,
    pub kapha: u8,
}

impl DoshaBalance {
    pub fn get(&self, dosha: Dosha) -> u8 {
        match dosha {
            Dosha::Vata => self.vata,
            Dosha::Pitta => self.pitta,
            Dosha::Kapha => self.kapha,
        }
    }

    pub fn total(&self) -> u16 {
        u16::from(self.vata) + u16::from(self.pitta) + u16::from(self.kapha)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstitutionalAssessment {
    pub prakriti: Dosha,
    pub vikriti: Dosha,
    pub imbalance_level: ImbalanceLevel,
    pub dosha_balance: DoshaBalance,
    pub pattern_consistent: bool,
}

#[derive(Debug, Default, Clone, Copy)]
struct DoshaTally {
    vata: u32,
    pitta: u32,
    kapha: u32,
}

impl DoshaTally {
    fn from_symptoms(catalog: &SymptomCatalog, symptom_ids: &[SymptomId]) -> Self {
        let mut tally = Self::default();
        for dosha in symptom_ids.iter().filter_map(|id| catalog.dosha_for(*id)) {
            *tally.slot(dosha) += 1;
        }
        tally
    }

    fn slot(&mut self, dosha: Dosha) -> &mut u32 {
        match dosha {
            Dosha::Vata => &mut self.vata,
            Dosha::Pitta => &mut self.pitta,
            Dosha::Kapha => &mut self.kapha,
        }
    }

    fn get(&self, dosha: Dosha) -> u32 {
        match dosha {
            Dosha::Vata => self.vata,
            Dosha::Pitta => self.pitta,
            Dosha::Kapha => self.kapha,
        }
    }

    fn max(&self) -> u32 {
        self.vata.max(self.pitta).max(self.kapha)
    }

    /// Highest tally, resolved through `DOSHA_PRIORITY`. All-zero falls back to vata.
    fn dominant(&self) -> Dosha {
        DOSHA_PRIORITY
            .iter()
            .copied()
            .fold(DOSHA_PRIORITY[0], |best, dosha| {
                if self.get(dosha) > self.get(best) {
                    dosha
                } else {
                    best
                }
            })
    }
}

/// Baseline constitution estimated from lifestyle answers alone.
///
/// This is a coarse heuristic, not a validated prakriti instrument: active people under
/// any stress read as pitta, sedentary people who sleep reasonably read as kapha, and
/// everyone else defaults to vata.
pub fn estimate_prakriti(
    sleep_quality: SleepQuality,
    stress_level: StressLevel,
    activity_level: ActivityLevel,
) -> Dosha {
    match (activity_level, stress_level, sleep_quality) {
        (ActivityLevel::Active, stress, _) if stress != StressLevel::Low => Dosha::Pitta,
        (ActivityLevel::Sedentary, _, sleep) if sleep != SleepQuality::Poor => Dosha::Kapha,
        _ => Dosha::Vata,
    }
}

/// Share shown for a dosha whose computed percentage rounds to zero.
const fn floor_share(dosha: Dosha) -> i32 {
    match dosha {
        Dosha::Vata | Dosha::Pitta => 33,
        Dosha::Kapha => 34,
    }
}

fn dosha_balance(tally: &DoshaTally, selected: usize, vikriti: Dosha) -> DoshaBalance {
    let total = selected.max(1) as i64;
    let share = |dosha: Dosha| -> i32 {
        let count = i64::from(tally.get(dosha));
        // round-half-up of count * 100 / total, in integers
        let rounded = (count * 200 + total) / (2 * total);
        if rounded == 0 {
            floor_share(dosha)
        } else {
            rounded as i32
        }
    };

    let mut values = [
        (Dosha::Vata, share(Dosha::Vata)),
        (Dosha::Pitta, share(Dosha::Pitta)),
        (Dosha::Kapha, share(Dosha::Kapha)),
    ];

    let sum: i32 = values.iter().map(|(_, value)| value).sum();
    if sum != 100 {
        for (dosha, value) in values.iter_mut() {
            if *dosha == vikriti {
                *value += 100 - sum;
            }
        }
    }

    let percent = |value: i32| value.clamp(0, 100) as u8;
    DoshaBalance {
        vata: percent(values[0].1),
        pitta: percent(values[1].1),
        kapha: percent(values[2].1),
    }
}

/// Rule-based constitutional assessment over the selected symptoms and lifestyle answers.
pub fn assess_constitution(
    catalog: &SymptomCatalog,
    symptom_ids: &[SymptomId],
    sleep_quality: SleepQuality,
    stress_level: StressLevel,
    activity_level: ActivityLevel,
) -> ConstitutionalAssessment {
    let tally = DoshaTally::from_symptoms(catalog, symptom_ids);
    let vikriti = tally.dominant();
    let prakriti = estimate_prakriti(sleep_quality, stress_level, activity_level);
    let max_tally = tally.max();

    let imbalance_level = if max_tally >= SIGNIFICANT_TALLY {
        ImbalanceLevel::Significant
    } else if max_tally >= MODERATE_TALLY {
        ImbalanceLevel::Moderate
    } else {
        ImbalanceLevel::Mild
    };

    ConstitutionalAssessment {
        prakriti,
        vikriti,
        imbalance_level,
        dosha_balance: dosha_balance(&tally, symptom_ids.len(), vikriti),
        pattern_consistent: vikriti == prakriti || max_tally >= MODERATE_TALLY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assess(ids: &[SymptomId]) -> ConstitutionalAssessment {
        assess_constitution(
            &SymptomCatalog::standard(),
            ids,
            SleepQuality::Good,
            StressLevel::Moderate,
            ActivityLevel::Light,
        )
    }

    #[test]
    fn empty_selection_uses_defaults() {
        let assessment = assess(&[]);
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
    fn ties_resolve_by_priority_order() {
        // one pitta, one kapha
        assert_eq!(assess(&[10, 21]).vikriti, Dosha::Pitta);
        // one of each
        assert_eq!(assess(&[1, 9, 17]).vikriti, Dosha::Vata);
    }

    #[test]
    fn single_symptom_remainder_lands_on_vikriti() {
        let assessment = assess(&[10]);
        assert_eq!(assessment.vikriti, Dosha::Pitta);
        // 33 + 100 + 34 = 167, so pitta absorbs -67
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
    fn thirds_round_and_normalize() {
        let assessment = assess(&[1, 9, 17]);
        assert_eq!(
            assessment.dosha_balance,
            DoshaBalance {
                vata: 34,
                pitta: 33,
                kapha: 33
            }
        );
    }

    #[test]
    fn imbalance_level_follows_max_tally() {
        assert_eq!(assess(&[1]).imbalance_level, ImbalanceLevel::Mild);
        assert_eq!(assess(&[1, 2]).imbalance_level, ImbalanceLevel::Moderate);
        assert_eq!(
            assess(&[1, 2, 3, 4]).imbalance_level,
            ImbalanceLevel::Significant
        );
    }

    #[test]
    fn prakriti_depends_on_lifestyle_only() {
        assert_eq!(
            estimate_prakriti(SleepQuality::Poor, StressLevel::High, ActivityLevel::Active),
            Dosha::Pitta
        );
        assert_eq!(
            estimate_prakriti(SleepQuality::Good, StressLevel::Low, ActivityLevel::Active),
            Dosha::Vata
        );
        assert_eq!(
            estimate_prakriti(SleepQuality::Fair, StressLevel::Low, ActivityLevel::Sedentary),
            Dosha::Kapha
        );
        assert_eq!(
            estimate_prakriti(
                SleepQuality::Poor,
                StressLevel::Low,
                ActivityLevel::Sedentary
            ),
            Dosha::Vata
        );
    }

    #[test]
    fn strong_signal_counts_as_consistent() {
        // prakriti vata under the fixture lifestyle
        assert!(!assess(&[10]).pattern_consistent);
        assert!(assess(&[10, 13]).pattern_consistent);
        assert!(assess(&[1]).pattern_consistent);
    }

    #[test]
    fn unknown_ids_are_ignored_but_still_dilute_shares() {
        let assessment = assess(&[9, 99, 100, 101]);
        assert_eq!(assessment.vikriti, Dosha::Pitta);
        assert_eq!(assessment.dosha_balance.total(), 100);
    }
}
