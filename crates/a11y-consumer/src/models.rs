//! Task and category records served by the backend

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub priority: i32,
    #[serde(with = "due_date")]
    pub due_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

/// Parse an RFC 3339 timestamp or a bare `YYYY-MM-DD` date (midnight UTC)
pub fn parse_due_date(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(stamp.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")?;
    Ok(Utc.from_utc_datetime(&date.and_time(NaiveTime::default())))
}

mod due_date {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_due_date(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_decode_backend_payload() {
        let json = r#"[
            {"id": 1, "name": "Work", "tasks": [
                {"id": 10, "name": "Report", "description": "Q3", "completed": false,
                 "priority": 2, "dueDate": "2024-05-01T09:30:00Z"}
            ]},
            {"id": 2, "name": "Home"}
        ]"#;
        let categories: Vec<Category> = serde_json::from_str(json).unwrap();

        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].tasks[0].name, "Report");
        assert_eq!(categories[0].tasks[0].due_date.month(), 5);
        assert!(categories[1].tasks.is_empty());
    }

    #[test]
    fn test_plain_date() {
        let due = parse_due_date("2024-12-24").unwrap();
        assert_eq!((due.year(), due.month(), due.day()), (2024, 12, 24));
        assert!(parse_due_date("next tuesday").is_err());
    }

    #[test]
    fn test_serializes_camel_case() {
        let task = Task {
            id: 3,
            name: "Call".into(),
            description: String::new(),
            completed: true,
            priority: 1,
            due_date: parse_due_date("2024-01-02").unwrap(),
        };
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["dueDate"], "2024-01-02T00:00:00+00:00");
        assert_eq!(value["completed"], true);
    }
}
