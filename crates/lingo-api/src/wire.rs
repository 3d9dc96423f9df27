//! JSON shapes exchanged with the translation backend.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDateTime, Utc};
use lingo_types::{Alternative, HistoryRecord, LanguagePair, TranslationResult};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Serialize)]
pub(crate) struct TranslateBody<'a> {
    pub text: &'a str,
    pub from_lang: &'a str,
    pub to_lang: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TranslationDto {
    pub id: String,
    pub text: String,
    pub from_lang: String,
    pub to_lang: String,
    pub main_translation: String,
    #[serde(default)]
    pub alternatives: Vec<Alternative>,
    #[serde(deserialize_with = "timestamp")]
    pub timestamp: DateTime<Utc>,
}

impl From<TranslationDto> for HistoryRecord {
    fn from(dto: TranslationDto) -> Self {
        HistoryRecord {
            id: dto.id,
            result: TranslationResult {
                main_translation: dto.main_translation,
                alternatives: dto.alternatives,
                source_pair: LanguagePair::new(dto.from_lang, dto.to_lang),
                source_text: dto.text,
                timestamp: dto.timestamp,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct HistoryDto {
    #[serde(default)]
    pub translations: Vec<TranslationDto>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LanguagesDto {
    pub languages: BTreeMap<String, String>,
}

/// Error body. `detail` is a string for handled errors and a list for
/// request validation failures.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorDto {
    detail: Option<serde_json::Value>,
}

impl ErrorDto {
    pub fn into_detail(self) -> Option<String> {
        match self.detail? {
            serde_json::Value::String(detail) => Some(detail),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Health {
    pub status: String,
    #[serde(default)]
    pub message: String,
}

/// ISO-8601 with or without an offset; naive values are UTC
fn timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
}

pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use chrono::Timelike;

    use super::*;

    #[test]
    fn naive_and_offset_timestamps_parse() {
        let naive = parse_timestamp("2025-03-01T10:15:30.123456").unwrap();
        assert_eq!(naive.hour(), 10);

        let offset = parse_timestamp("2025-03-01T12:15:30+02:00").unwrap();
        assert_eq!(offset.hour(), 10);

        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn translation_maps_to_record() {
        let body = r#"{
            "id": "5b1f",
            "text": "merhaba",
            "from_lang": "tr",
            "to_lang": "en",
            "main_translation": "hello",
            "alternatives": [
                {"translation": "hi", "context": "informal", "explanation": "casual greeting"},
                {"translation": "greetings"}
            ],
            "timestamp": "2025-03-01T10:15:30.123456"
        }"#;

        let record: HistoryRecord = serde_json::from_str::<TranslationDto>(body).unwrap().into();
        assert_eq!(record.id, "5b1f");
        assert_eq!(record.result.source_pair, LanguagePair::new("tr", "en"));
        assert_eq!(record.result.alternatives.len(), 2);
        assert_eq!(record.result.alternatives[0].context, "informal");
        assert_eq!(record.result.alternatives[1].explanation, "");
    }

    #[test]
    fn error_detail_shapes() {
        let text: ErrorDto = serde_json::from_str(r#"{"detail": "Text cannot be empty"}"#).unwrap();
        assert_eq!(text.into_detail().as_deref(), Some("Text cannot be empty"));

        let list: ErrorDto = serde_json::from_str(r#"{"detail": [{"msg": "field required"}]}"#).unwrap();
        assert!(list.into_detail().unwrap().contains("field required"));

        let none: ErrorDto = serde_json::from_str("{}").unwrap();
        assert!(none.into_detail().is_none());
    }
}
