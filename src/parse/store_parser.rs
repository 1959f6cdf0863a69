use indexmap::IndexMap;

use crate::model::date_key::DateKey;
use crate::model::store::TaskStore;
use crate::model::task::Task;

/// Error type for a persisted payload that cannot become a store
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("malformed task file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("task #{index} on {date} has no text")]
    EmptyText { date: DateKey, index: usize },
}

/// Parse the persisted JSON form of a store.
///
/// The payload is an object keyed by canonical date, each value an array of
/// tasks. Object order becomes display order. Days with an empty array are
/// dropped so that the returned store never holds an empty day.
pub fn parse_store(bytes: &[u8]) -> Result<TaskStore, FormatError> {
    let raw: IndexMap<DateKey, Vec<Task>> = serde_json::from_slice(bytes)?;

    let mut days = IndexMap::with_capacity(raw.len());
    for (date, tasks) in raw {
        if tasks.is_empty() {
            log::debug!("dropping empty day {} from task file", date);
            continue;
        }
        if let Some(index) = tasks.iter().position(|t| t.text.is_empty()) {
            return Err(FormatError::EmptyText { date, index });
        }
        days.insert(date, tasks);
    }

    Ok(TaskStore { days })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_full_payload() {
        let store = parse_store(
            br#"{
                "2024-03-05": [
                    {"text": "Dentist", "description": "10am", "completed": true},
                    {"text": "Pay rent", "description": "", "completed": false}
                ],
                "2024-03-01": [{"text": "Buy milk", "description": "", "completed": false}]
            }"#,
        )
        .unwrap();

        let dates: Vec<String> = store.dates().map(|d| d.to_string()).collect();
        assert_eq!(dates, vec!["2024-03-05", "2024-03-01"]);
        let first = store.task(&"2024-03-05".parse().unwrap(), 0).unwrap();
        assert_eq!(first.text, "Dentist");
        assert_eq!(first.description, "10am");
        assert!(first.completed);
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let store = parse_store(br#"{"2024-03-01": [{"text": "Buy milk"}]}"#).unwrap();
        let task = store.task(&"2024-03-01".parse().unwrap(), 0).unwrap();
        assert_eq!(task, &Task::new("Buy milk", ""));
    }

    #[test]
    fn test_empty_object_is_empty_store() {
        assert!(parse_store(b"{}").unwrap().is_empty());
    }

    #[test]
    fn test_empty_days_are_dropped() {
        let store = parse_store(br#"{"2024-03-01": [], "2024-03-02": [{"text": "x"}]}"#).unwrap();
        assert_eq!(store.len(), 1);
        assert!(!store.contains_date(&"2024-03-01".parse().unwrap()));
    }

    #[test]
    fn test_malformed_payloads_fail() {
        assert!(matches!(parse_store(b"not json {{{"), Err(FormatError::Json(_))));
        assert!(matches!(parse_store(b"[]"), Err(FormatError::Json(_))));
        assert!(matches!(
            parse_store(br#"{"2024-3-1": [{"text": "x"}]}"#),
            Err(FormatError::Json(_))
        ));
        assert!(matches!(
            parse_store(br#"{"2024-03-01": [{"description": "no text"}]}"#),
            Err(FormatError::Json(_))
        ));
        assert!(matches!(
            parse_store(br#"{"2024-03-01": [{"text": "a"}, {"text": ""}]}"#),
            Err(FormatError::EmptyText { index: 1, .. })
        ));
    }
}
