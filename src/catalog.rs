//! Category catalog — the rating vocabulary of the journal.
//!
//! Built-in categories carry a fixed, ordered five-level scale (position =
//! intensity, the charting ordinal) and a fixed display palette. The emotion
//! category is user-defined: an ordered, archivable list of named colors
//! persisted through the gateway. One lookup resolves `(category, level)`
//! to a display color for every category, built-in or custom.

use serde::{Deserialize, Serialize};

use crate::db::{Gateway, StorageError, EMOTIONS_KEY};

// ═══════════════════════════════════════════
// Constants — levels, palettes, vocabularies
// ═══════════════════════════════════════════

/// Display color for values that no longer resolve (deleted emotion,
/// unknown level).
pub const NEUTRAL_COLOR: &str = "#d1d5db";

/// Fixed physical-symptom vocabulary. Records carry a subset of these tags.
pub const SINTOMAS: &[&str] = &[
    "Dolor de cabeza",
    "Náuseas",
    "Fatiga",
    "Mareo",
    "Dolor muscular",
    "Hinchazón",
    "Palpitaciones",
    "Sudoración",
    "Escalofríos",
    "Insomnio",
];

/// Emotion set substituted while the user has no custom emotions stored,
/// so the emotion category is never empty.
pub const FALLBACK_EMOTIONS: &[(&str, &str)] = &[
    ("Alegría", "#9333ea"),
    ("Calma", "#14b8a6"),
    ("Ansiedad", "#f97316"),
    ("Tristeza", "#eab308"),
    ("Enojo", "#dc2626"),
];

/// The built-in rating categories, in form/display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RatingCategory {
    Dolor,
    Libido,
    Sueno,
    EstadoAnimo,
    Emocion,
    Energia,
    ClaridadMental,
    Motivacion,
    Estres,
    SensacionCorporal,
    ActividadFisica,
}

impl RatingCategory {
    pub const ALL: [RatingCategory; 11] = [
        RatingCategory::Dolor,
        RatingCategory::Libido,
        RatingCategory::Sueno,
        RatingCategory::EstadoAnimo,
        RatingCategory::Emocion,
        RatingCategory::Energia,
        RatingCategory::ClaridadMental,
        RatingCategory::Motivacion,
        RatingCategory::Estres,
        RatingCategory::SensacionCorporal,
        RatingCategory::ActividadFisica,
    ];

    /// Storage key — the persisted field name of this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dolor => "dolor",
            Self::Libido => "libido",
            Self::Sueno => "sueno",
            Self::EstadoAnimo => "estadoAnimo",
            Self::Emocion => "emocion",
            Self::Energia => "energia",
            Self::ClaridadMental => "claridadMental",
            Self::Motivacion => "motivacion",
            Self::Estres => "estres",
            Self::SensacionCorporal => "sensacionCorporal",
            Self::ActividadFisica => "actividadFisica",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.as_str() == key)
    }

    /// Human label for headers and legends.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Dolor => "Dolor",
            Self::Libido => "Libido",
            Self::Sueno => "Sueño",
            Self::EstadoAnimo => "Estado de ánimo",
            Self::Emocion => "Emoción",
            Self::Energia => "Energía",
            Self::ClaridadMental => "Claridad mental",
            Self::Motivacion => "Motivación",
            Self::Estres => "Estrés",
            Self::SensacionCorporal => "Sensación corporal",
            Self::ActividadFisica => "Actividad física",
        }
    }

    /// Fixed level scale, lowest to highest intensity. Empty for the
    /// emotion category, whose values come from the catalog.
    pub fn levels(&self) -> &'static [&'static str] {
        match self {
            Self::Dolor => &["Sin dolor", "Leve", "Moderado", "Fuerte", "Muy fuerte"],
            Self::Libido => &["Muy baja", "Baja", "Normal", "Alta", "Muy alta"],
            Self::Sueno => &["Muy malo", "Malo", "Regular", "Bueno", "Excelente"],
            Self::EstadoAnimo => &["Muy triste", "Triste", "Neutral", "Feliz", "Muy feliz"],
            Self::Emocion => &[],
            Self::Energia => &["Agotada", "Baja", "Normal", "Alta", "Rebosante"],
            Self::ClaridadMental => &["Muy nublada", "Nublada", "Normal", "Clara", "Muy clara"],
            Self::Motivacion => &["Nula", "Baja", "Normal", "Alta", "Muy alta"],
            Self::Estres => &["Sin estrés", "Leve", "Moderado", "Alto", "Muy alto"],
            Self::SensacionCorporal => &["Muy pesada", "Pesada", "Neutral", "Ligera", "Muy ligera"],
            Self::ActividadFisica => &["Ninguna", "Ligera", "Moderada", "Intensa", "Muy intensa"],
        }
    }

    /// Display palette parallel to `levels()`. Empty for the emotion
    /// category, whose colors live on the catalog items.
    fn palette(&self) -> &'static [&'static str] {
        match self {
            Self::Dolor => &["#22c55e", "#facc15", "#fb923c", "#ef4444", "#b91c1c"],
            Self::Libido => &["#93c5fd", "#60a5fa", "#c084fc", "#ec4899", "#db2777"],
            Self::Sueno => &["#4b5563", "#6b7280", "#eab308", "#4ade80", "#16a34a"],
            Self::EstadoAnimo => &["#3730a3", "#6366f1", "#9ca3af", "#fbbf24", "#facc15"],
            Self::Emocion => &[],
            Self::Energia => &["#b91c1c", "#f87171", "#9ca3af", "#4ade80", "#16a34a"],
            Self::ClaridadMental => &["#6b7280", "#9ca3af", "#93c5fd", "#60a5fa", "#2563eb"],
            Self::Motivacion => &["#64748b", "#94a3b8", "#fcd34d", "#fbbf24", "#f59e0b"],
            Self::Estres => &["#22c55e", "#facc15", "#fb923c", "#ef4444", "#b91c1c"],
            Self::SensacionCorporal => &["#57534e", "#78716c", "#a8a29e", "#7dd3fc", "#38bdf8"],
            Self::ActividadFisica => &["#9ca3af", "#86efac", "#4ade80", "#22c55e", "#15803d"],
        }
    }
}

// ═══════════════════════════════════════════
// Custom emotions
// ═══════════════════════════════════════════

/// One user-defined emotion. Archived items stay out of the selectable set
/// but keep their slot, name and color for historical records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomEmotion {
    pub name: String,
    pub color: String,
    #[serde(default)]
    pub archived: bool,
}

/// The catalog: built-in scales plus the stored custom emotion list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryCatalog {
    custom: Vec<CustomEmotion>,
}

impl CategoryCatalog {
    pub fn new(custom: Vec<CustomEmotion>) -> Self {
        Self { custom }
    }

    /// Load the custom emotion list from the gateway. A missing blob is an
    /// empty list (the fallback set then applies).
    pub fn load<G: Gateway>(gateway: &G) -> Result<Self, StorageError> {
        let custom = match gateway.get(EMOTIONS_KEY)? {
            Some(blob) => serde_json::from_str(&blob)?,
            None => Vec::new(),
        };
        Ok(Self { custom })
    }

    /// Write the custom emotion list through the gateway.
    pub fn save<G: Gateway>(&self, gateway: &mut G) -> Result<(), StorageError> {
        let blob = serde_json::to_string(&self.custom)?;
        gateway.set(EMOTIONS_KEY, &blob)
    }

    /// Full stored list, archived items included, in stored order.
    pub fn custom(&self) -> &[CustomEmotion] {
        &self.custom
    }

    /// Name sequence that defines emotion ordinals: the full stored list
    /// (archiving must not renumber history), or the fallback names while
    /// nothing is stored.
    fn ordinal_names(&self) -> Vec<&str> {
        if self.custom.is_empty() {
            FALLBACK_EMOTIONS.iter().map(|(name, _)| *name).collect()
        } else {
            self.custom.iter().map(|c| c.name.as_str()).collect()
        }
    }

    /// Selectable emotion names, stored order, archived excluded.
    pub fn active_emotion_names(&self) -> Vec<String> {
        if self.custom.is_empty() {
            FALLBACK_EMOTIONS
                .iter()
                .map(|(name, _)| (*name).to_string())
                .collect()
        } else {
            self.custom
                .iter()
                .filter(|c| !c.archived)
                .map(|c| c.name.clone())
                .collect()
        }
    }

    /// Colors parallel to `active_emotion_names()`.
    pub fn active_emotion_colors(&self) -> Vec<String> {
        if self.custom.is_empty() {
            FALLBACK_EMOTIONS
                .iter()
                .map(|(_, color)| (*color).to_string())
                .collect()
        } else {
            self.custom
                .iter()
                .filter(|c| !c.archived)
                .map(|c| c.color.clone())
                .collect()
        }
    }

    /// Replace name/color at `edit_index` (archived flag preserved), or
    /// append a new non-archived emotion when no index is given.
    pub fn add_or_update(&mut self, name: &str, color: &str, edit_index: Option<usize>) {
        match edit_index {
            Some(i) => {
                if let Some(item) = self.custom.get_mut(i) {
                    item.name = name.to_string();
                    item.color = color.to_string();
                }
            }
            None => self.custom.push(CustomEmotion {
                name: name.to_string(),
                color: color.to_string(),
                archived: false,
            }),
        }
    }

    pub fn archive(&mut self, index: usize) {
        if let Some(item) = self.custom.get_mut(index) {
            item.archived = true;
        }
    }

    pub fn unarchive(&mut self, index: usize) {
        if let Some(item) = self.custom.get_mut(index) {
            item.archived = false;
        }
    }

    /// Swap the item at `index` with its neighbor at `index + direction`
    /// (`direction` is -1 or +1). No-op when the neighbor is out of bounds.
    /// Operates on the full list by absolute index; see
    /// `absolute_index_of_active` for mapping a UI position.
    pub fn move_item(&mut self, index: usize, direction: isize) {
        let neighbor = index as isize + direction;
        if index < self.custom.len() && neighbor >= 0 && (neighbor as usize) < self.custom.len() {
            self.custom.swap(index, neighbor as usize);
        }
    }

    /// Permanently remove the slot at `index`. Unlike archiving this
    /// renumbers everything after it and orphans records using the name.
    pub fn delete(&mut self, index: usize) {
        if index < self.custom.len() {
            self.custom.remove(index);
        }
    }

    /// Map a position within the active (non-archived) subset back to the
    /// absolute stored index the mutating operations take. `None` while the
    /// fallback set is active or the position is out of range.
    pub fn absolute_index_of_active(&self, active_position: usize) -> Option<usize> {
        self.custom
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.archived)
            .nth(active_position)
            .map(|(i, _)| i)
    }

    /// 1-based position of `value` within the category's level sequence;
    /// `None` when the value no longer resolves.
    pub fn ordinal_of(&self, category: RatingCategory, value: &str) -> Option<usize> {
        let position = match category {
            RatingCategory::Emocion => self.ordinal_names().iter().position(|n| *n == value),
            _ => category.levels().iter().position(|l| *l == value),
        };
        position.map(|p| p + 1)
    }

    /// Unified `(category, level)` to display color lookup. Archived
    /// emotions keep resolving through their stored color; anything
    /// unresolvable degrades to the neutral gray.
    pub fn color_of(&self, category: RatingCategory, value: &str) -> String {
        match category {
            RatingCategory::Emocion => {
                if self.custom.is_empty() {
                    FALLBACK_EMOTIONS
                        .iter()
                        .find(|(name, _)| *name == value)
                        .map(|(_, color)| (*color).to_string())
                } else {
                    self.custom
                        .iter()
                        .find(|c| c.name == value)
                        .map(|c| c.color.clone())
                }
            }
            _ => category
                .levels()
                .iter()
                .position(|l| *l == value)
                .and_then(|i| category.palette().get(i))
                .map(|c| (*c).to_string()),
        }
        .unwrap_or_else(|| NEUTRAL_COLOR.to_string())
    }

    /// The options the form offers for a category: the fixed scale, or the
    /// active emotion names.
    pub fn selectable_levels(&self, category: RatingCategory) -> Vec<String> {
        match category {
            RatingCategory::Emocion => self.active_emotion_names(),
            _ => category.levels().iter().map(|l| (*l).to_string()).collect(),
        }
    }
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryGateway;

    fn catalog_with(names: &[(&str, &str)]) -> CategoryCatalog {
        CategoryCatalog::new(
            names
                .iter()
                .map(|(name, color)| CustomEmotion {
                    name: (*name).to_string(),
                    color: (*color).to_string(),
                    archived: false,
                })
                .collect(),
        )
    }

    // ───────────────────────────────────────
    // Built-in categories
    // ───────────────────────────────────────

    #[test]
    fn every_category_has_levels_except_emotion() {
        for cat in RatingCategory::ALL {
            if cat == RatingCategory::Emocion {
                assert!(cat.levels().is_empty());
            } else {
                assert_eq!(cat.levels().len(), 5, "{}", cat.as_str());
                assert_eq!(cat.palette().len(), 5, "{}", cat.as_str());
            }
        }
    }

    #[test]
    fn from_key_round_trips() {
        for cat in RatingCategory::ALL {
            assert_eq!(RatingCategory::from_key(cat.as_str()), Some(cat));
        }
        assert_eq!(RatingCategory::from_key("unknown"), None);
    }

    #[test]
    fn builtin_ordinal_is_position_plus_one() {
        let catalog = CategoryCatalog::default();
        assert_eq!(catalog.ordinal_of(RatingCategory::Dolor, "Sin dolor"), Some(1));
        assert_eq!(catalog.ordinal_of(RatingCategory::Dolor, "Muy fuerte"), Some(5));
        assert_eq!(catalog.ordinal_of(RatingCategory::Dolor, "Inexistente"), None);
    }

    #[test]
    fn builtin_ordinal_is_stable_across_calls() {
        let catalog = CategoryCatalog::default();
        let first = catalog.ordinal_of(RatingCategory::Sueno, "Bueno");
        let second = catalog.ordinal_of(RatingCategory::Sueno, "Bueno");
        assert_eq!(first, Some(4));
        assert_eq!(first, second);
    }

    #[test]
    fn builtin_color_resolves_by_level_position() {
        let catalog = CategoryCatalog::default();
        assert_eq!(catalog.color_of(RatingCategory::Dolor, "Sin dolor"), "#22c55e");
        assert_eq!(catalog.color_of(RatingCategory::Dolor, "Muy fuerte"), "#b91c1c");
        assert_eq!(catalog.color_of(RatingCategory::Dolor, "???"), NEUTRAL_COLOR);
    }

    // ───────────────────────────────────────
    // Fallback emotions
    // ───────────────────────────────────────

    #[test]
    fn empty_catalog_substitutes_fallback_set() {
        let catalog = CategoryCatalog::default();
        let names = catalog.active_emotion_names();
        assert_eq!(names.len(), 5);
        assert_eq!(names[0], "Alegría");
        assert_eq!(catalog.active_emotion_colors()[0], "#9333ea");
        assert_eq!(catalog.ordinal_of(RatingCategory::Emocion, "Calma"), Some(2));
        assert_eq!(catalog.color_of(RatingCategory::Emocion, "Calma"), "#14b8a6");
    }

    #[test]
    fn stored_emotions_replace_fallback_entirely() {
        let catalog = catalog_with(&[("Euforia", "#111111")]);
        assert_eq!(catalog.active_emotion_names(), vec!["Euforia"]);
        // Fallback names stop resolving once anything is stored
        assert_eq!(catalog.ordinal_of(RatingCategory::Emocion, "Alegría"), None);
        assert_eq!(catalog.color_of(RatingCategory::Emocion, "Alegría"), NEUTRAL_COLOR);
    }

    // ───────────────────────────────────────
    // Archive vs delete
    // ───────────────────────────────────────

    #[test]
    fn archive_hides_from_active_but_keeps_ordinal_and_color() {
        let mut catalog = catalog_with(&[("Calma", "#00ff00"), ("Ansiedad", "#ff0000")]);
        let before = catalog.ordinal_of(RatingCategory::Emocion, "Ansiedad");

        catalog.archive(0);

        assert_eq!(catalog.active_emotion_names(), vec!["Ansiedad"]);
        // Historical records keep their ordinal and color
        assert_eq!(catalog.ordinal_of(RatingCategory::Emocion, "Calma"), Some(1));
        assert_eq!(catalog.ordinal_of(RatingCategory::Emocion, "Ansiedad"), before);
        assert_eq!(catalog.color_of(RatingCategory::Emocion, "Calma"), "#00ff00");
    }

    #[test]
    fn unarchive_restores_selectability() {
        let mut catalog = catalog_with(&[("Calma", "#00ff00")]);
        catalog.archive(0);
        assert!(catalog.active_emotion_names().is_empty());
        catalog.unarchive(0);
        assert_eq!(catalog.active_emotion_names(), vec!["Calma"]);
    }

    #[test]
    fn delete_renumbers_and_orphans() {
        let mut catalog = catalog_with(&[("Calma", "#00ff00"), ("Ansiedad", "#ff0000")]);
        catalog.delete(0);

        assert_eq!(catalog.ordinal_of(RatingCategory::Emocion, "Calma"), None);
        assert_eq!(catalog.color_of(RatingCategory::Emocion, "Calma"), NEUTRAL_COLOR);
        // The survivor shifts down a slot
        assert_eq!(catalog.ordinal_of(RatingCategory::Emocion, "Ansiedad"), Some(1));
    }

    // ───────────────────────────────────────
    // Editing and ordering
    // ───────────────────────────────────────

    #[test]
    fn add_or_update_preserves_archived_flag_on_edit() {
        let mut catalog = catalog_with(&[("Calma", "#00ff00")]);
        catalog.archive(0);
        catalog.add_or_update("Serenidad", "#123456", Some(0));

        assert_eq!(catalog.custom()[0].name, "Serenidad");
        assert_eq!(catalog.custom()[0].color, "#123456");
        assert!(catalog.custom()[0].archived);
    }

    #[test]
    fn add_appends_non_archived() {
        let mut catalog = CategoryCatalog::default();
        catalog.add_or_update("Calma", "#00ff00", None);
        assert_eq!(catalog.custom().len(), 1);
        assert!(!catalog.custom()[0].archived);
    }

    #[test]
    fn move_swaps_neighbors_and_ignores_out_of_bounds() {
        let mut catalog = catalog_with(&[("A", "#1"), ("B", "#2"), ("C", "#3")]);
        catalog.move_item(1, 1);
        assert_eq!(catalog.custom()[1].name, "C");
        assert_eq!(catalog.custom()[2].name, "B");

        catalog.move_item(0, -1); // no-op at the top
        assert_eq!(catalog.custom()[0].name, "A");
        catalog.move_item(2, 1); // no-op at the bottom
        assert_eq!(catalog.custom()[2].name, "B");
    }

    #[test]
    fn absolute_index_skips_archived_slots() {
        let mut catalog = catalog_with(&[("A", "#1"), ("B", "#2"), ("C", "#3")]);
        catalog.archive(0);

        // Active list is [B, C]; position 1 is absolute slot 2
        assert_eq!(catalog.absolute_index_of_active(0), Some(1));
        assert_eq!(catalog.absolute_index_of_active(1), Some(2));
        assert_eq!(catalog.absolute_index_of_active(2), None);
    }

    #[test]
    fn absolute_index_is_none_for_fallback() {
        let catalog = CategoryCatalog::default();
        assert_eq!(catalog.absolute_index_of_active(0), None);
    }

    // ───────────────────────────────────────
    // Persistence
    // ───────────────────────────────────────

    #[test]
    fn save_then_load_round_trips() {
        let mut gateway = MemoryGateway::new();
        let mut catalog = catalog_with(&[("Calma", "#00ff00")]);
        catalog.archive(0);
        catalog.save(&mut gateway).unwrap();

        let reloaded = CategoryCatalog::load(&gateway).unwrap();
        assert_eq!(reloaded, catalog);
    }

    #[test]
    fn load_tolerates_items_without_archived_flag() {
        let gateway =
            MemoryGateway::new().seed(EMOTIONS_KEY, r##"[{"name":"Calma","color":"#00ff00"}]"##);
        let catalog = CategoryCatalog::load(&gateway).unwrap();
        assert_eq!(catalog.custom().len(), 1);
        assert!(!catalog.custom()[0].archived);
    }

    #[test]
    fn load_missing_blob_is_empty_list() {
        let gateway = MemoryGateway::new();
        let catalog = CategoryCatalog::load(&gateway).unwrap();
        assert!(catalog.custom().is_empty());
    }

    #[test]
    fn selectable_levels_are_scale_or_active_names() {
        let mut catalog = catalog_with(&[("Calma", "#00ff00"), ("Enojo", "#ff0000")]);
        catalog.archive(1);
        assert_eq!(
            catalog.selectable_levels(RatingCategory::Dolor),
            vec!["Sin dolor", "Leve", "Moderado", "Fuerte", "Muy fuerte"]
        );
        assert_eq!(
            catalog.selectable_levels(RatingCategory::Emocion),
            vec!["Calma"]
        );
    }
}
