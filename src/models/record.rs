//! Health record — one submitted wellbeing snapshot for a date and time.
//!
//! Serde field names are the persisted keys of the original data, so blobs
//! written by every earlier schema revision keep deserializing: absent
//! categories stay `None`, absent indicators default to off, a missing
//! `hora` defaults to midnight.

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::catalog::RatingCategory;

fn default_hora() -> String {
    "00:00".to_string()
}

/// Binary daily indicators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Indicators {
    #[serde(rename = "despertarNocturno", default)]
    pub despertar_nocturno: bool,
    #[serde(rename = "suenosVividos", default)]
    pub suenos_vividos: bool,
    #[serde(default)]
    pub periodo: bool,
    #[serde(default)]
    pub irritabilidad: bool,
}

impl Indicators {
    /// Indicator values keyed by their persisted names, in display order.
    pub fn as_pairs(&self) -> [(&'static str, bool); 4] {
        [
            ("despertarNocturno", self.despertar_nocturno),
            ("suenosVividos", self.suenos_vividos),
            ("periodo", self.periodo),
            ("irritabilidad", self.irritabilidad),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default)]
    pub id: String,

    /// Time of day, `HH:MM`. Only used to order records within a date.
    #[serde(default = "default_hora")]
    pub hora: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dolor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub libido: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sueno: Option<String>,
    #[serde(rename = "estadoAnimo", default, skip_serializing_if = "Option::is_none")]
    pub estado_animo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emocion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energia: Option<String>,
    #[serde(rename = "claridadMental", default, skip_serializing_if = "Option::is_none")]
    pub claridad_mental: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motivacion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estres: Option<String>,
    #[serde(rename = "sensacionCorporal", default, skip_serializing_if = "Option::is_none")]
    pub sensacion_corporal: Option<String>,
    #[serde(rename = "actividadFisica", default, skip_serializing_if = "Option::is_none")]
    pub actividad_fisica: Option<String>,

    #[serde(rename = "indicadores", default)]
    pub indicadores: Indicators,

    /// Selected tags from the fixed symptom vocabulary.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sintomas: Vec<String>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub comentarios: String,

    /// Creation/last-modification instant, `YYYY-MM-DD HH:MM:SS` local time.
    #[serde(default)]
    pub timestamp: String,
}

impl Record {
    /// Selected level for a category; empty selections read as unset.
    pub fn level(&self, category: RatingCategory) -> Option<&str> {
        let value = match category {
            RatingCategory::Dolor => &self.dolor,
            RatingCategory::Libido => &self.libido,
            RatingCategory::Sueno => &self.sueno,
            RatingCategory::EstadoAnimo => &self.estado_animo,
            RatingCategory::Emocion => &self.emocion,
            RatingCategory::Energia => &self.energia,
            RatingCategory::ClaridadMental => &self.claridad_mental,
            RatingCategory::Motivacion => &self.motivacion,
            RatingCategory::Estres => &self.estres,
            RatingCategory::SensacionCorporal => &self.sensacion_corporal,
            RatingCategory::ActividadFisica => &self.actividad_fisica,
        };
        value.as_deref().filter(|v| !v.is_empty())
    }

    pub fn set_level(&mut self, category: RatingCategory, value: impl Into<String>) {
        let slot = match category {
            RatingCategory::Dolor => &mut self.dolor,
            RatingCategory::Libido => &mut self.libido,
            RatingCategory::Sueno => &mut self.sueno,
            RatingCategory::EstadoAnimo => &mut self.estado_animo,
            RatingCategory::Emocion => &mut self.emocion,
            RatingCategory::Energia => &mut self.energia,
            RatingCategory::ClaridadMental => &mut self.claridad_mental,
            RatingCategory::Motivacion => &mut self.motivacion,
            RatingCategory::Estres => &mut self.estres,
            RatingCategory::SensacionCorporal => &mut self.sensacion_corporal,
            RatingCategory::ActividadFisica => &mut self.actividad_fisica,
        };
        *slot = Some(value.into());
    }

    /// Categories still missing a selection, in form order.
    pub fn missing_categories(&self) -> Vec<RatingCategory> {
        RatingCategory::ALL
            .into_iter()
            .filter(|cat| self.level(*cat).is_none())
            .collect()
    }

    /// A record is complete when every rating category has a selection.
    pub fn is_complete(&self) -> bool {
        self.missing_categories().is_empty()
    }

    /// Stamp the modification timestamp with the current local time.
    pub fn touch(&mut self) {
        self.timestamp = Local::now()
            .naive_local()
            .format("%Y-%m-%d %H:%M:%S")
            .to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_record() -> Record {
        let mut record = Record {
            hora: "09:00".into(),
            ..Record::default()
        };
        for cat in RatingCategory::ALL {
            let value = match cat {
                RatingCategory::Emocion => "Calma",
                _ => cat.levels()[1],
            };
            record.set_level(cat, value);
        }
        record
    }

    #[test]
    fn complete_record_has_no_missing_categories() {
        let record = complete_record();
        assert!(record.is_complete());
        assert!(record.missing_categories().is_empty());
    }

    #[test]
    fn missing_and_empty_selections_are_reported() {
        let mut record = complete_record();
        record.estado_animo = None;
        record.estres = Some(String::new());

        let missing = record.missing_categories();
        assert_eq!(
            missing,
            vec![RatingCategory::EstadoAnimo, RatingCategory::Estres]
        );
        assert!(!record.is_complete());
    }

    #[test]
    fn legacy_blob_deserializes_with_defaults() {
        // Earliest persisted shape: five categories, comment, timestamp.
        let blob = r#"{
            "dolor": "Leve",
            "libido": "Normal",
            "sueno": "Bueno",
            "estadoAnimo": "Feliz",
            "emocion": "Calma",
            "comentarios": "buen día",
            "timestamp": "2024-01-05T10:00:00.000Z"
        }"#;
        let record: Record = serde_json::from_str(blob).unwrap();

        assert_eq!(record.id, "");
        assert_eq!(record.hora, "00:00");
        assert_eq!(record.level(RatingCategory::Dolor), Some("Leve"));
        assert_eq!(record.level(RatingCategory::Energia), None);
        assert_eq!(record.indicadores, Indicators::default());
        assert!(record.sintomas.is_empty());
    }

    #[test]
    fn serialization_omits_unset_categories() {
        let record = Record {
            id: "id-1".into(),
            dolor: Some("Leve".into()),
            ..Record::default()
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"dolor\""));
        assert!(!json.contains("energia"));
        assert!(!json.contains("comentarios"));
    }

    #[test]
    fn touch_writes_local_timestamp_format() {
        let mut record = Record::default();
        record.touch();
        assert_eq!(record.timestamp.len(), 19);
        assert_eq!(&record.timestamp[4..5], "-");
        assert_eq!(&record.timestamp[13..14], ":");
    }

    #[test]
    fn indicator_pairs_use_persisted_names() {
        let indicators = Indicators {
            despertar_nocturno: true,
            ..Indicators::default()
        };
        let pairs = indicators.as_pairs();
        assert_eq!(pairs[0], ("despertarNocturno", true));
        assert_eq!(pairs[3], ("irritabilidad", false));
    }
}
