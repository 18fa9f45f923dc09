use serde::Serialize;

use super::domain::Dosha::{Kapha, Pitta, Vata};
use super::domain::{Dosha, SymptomId};
use self::SymptomCategory::{Digestive, Energy, Mental, Physical, Respiratory, Skin, Sleep};

/// Grouping used by the checklist and by cluster detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SymptomCategory {
    Energy,
    Mental,
    Sleep,
    Skin,
    Digestive,
    Physical,
    Respiratory,
}

/// Read-only catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Symptom {
    pub id: SymptomId,
    pub name: &'static str,
    pub category: SymptomCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_dosha: Option<Dosha>,
}

const fn symptom(
    id: SymptomId,
    name: &'static str,
    category: SymptomCategory,
    related_dosha: Dosha,
) -> Symptom {
    Symptom {
        id,
        name,
        category,
        related_dosha: Some(related_dosha),
    }
}

static STANDARD_SYMPTOMS: [Symptom; 24] = [
    symptom(1, "Fatigue / Low energy", Energy, Vata),
    symptom(2, "Anxiety / Nervousness", Mental, Vata),
    symptom(3, "Difficulty sleeping", Sleep, Vata),
    symptom(4, "Dry skin", Skin, Vata),
    symptom(5, "Constipation", Digestive, Vata),
    symptom(6, "Joint pain / Stiffness", Physical, Vata),
    symptom(7, "Cold hands / feet", Physical, Vata),
    symptom(8, "Racing thoughts", Mental, Vata),
    symptom(9, "Skin rashes / Inflammation", Skin, Pitta),
    symptom(10, "Heartburn / Acid reflux", Digestive, Pitta),
    symptom(11, "Irritability / Anger", Mental, Pitta),
    symptom(12, "Excessive sweating", Physical, Pitta),
    symptom(13, "Loose stools / Diarrhea", Digestive, Pitta),
    symptom(14, "Eye irritation", Physical, Pitta),
    symptom(15, "Feeling overheated", Physical, Pitta),
    symptom(16, "Skin sensitivity", Skin, Pitta),
    symptom(17, "Weight gain / Sluggishness", Physical, Kapha),
    symptom(18, "Congestion / Excess mucus", Respiratory, Kapha),
    symptom(19, "Lethargy / Low motivation", Mental, Kapha),
    symptom(20, "Water retention / Swelling", Physical, Kapha),
    symptom(21, "Heavy feeling after meals", Digestive, Kapha),
    symptom(22, "Oily skin", Skin, Kapha),
    symptom(23, "Oversleeping", Sleep, Kapha),
    symptom(24, "Lack of appetite", Digestive, Kapha),
];

/// Immutable symptom lookup shared by both scorers and the confirmation gate.
///
/// Unknown ids are tolerated everywhere: they resolve to `None` and contribute nothing.
#[derive(Debug, Clone, Copy)]
pub struct SymptomCatalog {
    entries: &'static [Symptom],
}

impl SymptomCatalog {
    pub const fn standard() -> Self {
        Self {
            entries: &STANDARD_SYMPTOMS,
        }
    }

    pub const fn from_entries(entries: &'static [Symptom]) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &'static [Symptom] {
        self.entries
    }

    pub fn by_id(&self, id: SymptomId) -> Option<&'static Symptom> {
        self.entries.iter().find(|symptom| symptom.id == id)
    }

    pub fn dosha_for(&self, id: SymptomId) -> Option<Dosha> {
        self.by_id(id).and_then(|symptom| symptom.related_dosha)
    }

    pub fn is_category(&self, id: SymptomId, category: SymptomCategory) -> bool {
        self.by_id(id)
            .map(|symptom| symptom.category == category)
            .unwrap_or(false)
    }

    pub fn any_in_category(&self, ids: &[SymptomId], category: SymptomCategory) -> bool {
        ids.iter().any(|id| self.is_category(*id, category))
    }

    pub fn count_in_category(&self, ids: &[SymptomId], category: SymptomCategory) -> usize {
        ids.iter()
            .filter(|id| self.is_category(**id, category))
            .count()
    }
}

impl Default for SymptomCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_has_unique_sequential_ids() {
        let catalog = SymptomCatalog::standard();
        for (index, symptom) in catalog.entries().iter().enumerate() {
            assert_eq!(symptom.id as usize, index + 1);
        }
    }

    #[test]
    fn unknown_ids_resolve_to_nothing() {
        let catalog = SymptomCatalog::standard();
        assert!(catalog.by_id(99).is_none());
        assert!(catalog.dosha_for(0).is_none());
        assert!(!catalog.is_category(99, SymptomCategory::Skin));
    }

    #[test]
    fn counts_category_members() {
        let catalog = SymptomCatalog::standard();
        assert_eq!(catalog.count_in_category(&[4, 9, 10, 16], SymptomCategory::Skin), 3);
        assert!(catalog.any_in_category(&[1, 21], SymptomCategory::Digestive));
        assert!(!catalog.any_in_category(&[1, 2], SymptomCategory::Digestive));
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let catalog = SymptomCatalog::standard();
        let value = serde_json::to_value(catalog.by_id(10).expect("heartburn present"))
            .expect("serializes");
        assert_eq!(value["category"], "Digestive");
        assert_eq!(value["relatedDosha"], "pitta");
    }
}
