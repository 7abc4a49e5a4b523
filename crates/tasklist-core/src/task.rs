use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(format!("unknown priority: {other}")),
        }
    }
}

/// A single to-do entry. Field names match the persisted JSON layout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub text: String,

    #[serde(default)]
    pub priority: Priority,

    #[serde(default, deserialize_with = "blank_as_none_date")]
    pub due_date: Option<NaiveDate>,

    #[serde(default, deserialize_with = "blank_as_none")]
    pub category: Option<String>,

    #[serde(default)]
    pub completed: bool,
}

impl Task {
    /// Builds a pending task from raw form input. Returns `None` when the
    /// trimmed text is empty.
    pub fn from_input(
        text: &str,
        priority: Priority,
        due_date: Option<NaiveDate>,
        category: Option<&str>,
    ) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let category = category
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string);

        Some(Self {
            text: text.to_string(),
            priority,
            due_date,
            category,
            completed: false,
        })
    }

    pub fn toggle(&mut self) -> bool {
        self.completed = !self.completed;
        self.completed
    }
}

// Older saves wrote empty strings for unset fields.
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|value| !value.trim().is_empty()))
}

fn blank_as_none_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match blank_as_none(deserializer)? {
        Some(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::{Priority, Task};

    #[test]
    fn from_input_trims_and_drops_blank_category() {
        let task = Task::from_input("  Buy milk  ", Priority::High, None, Some("   "))
            .expect("non-blank text");
        assert_eq!(task.text, "Buy milk");
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.category, None);
        assert!(!task.completed);
    }

    #[test]
    fn from_input_rejects_whitespace() {
        assert!(Task::from_input("", Priority::Medium, None, None).is_none());
        assert!(Task::from_input(" \t\n", Priority::Medium, None, None).is_none());
    }

    #[test]
    fn priority_parses_case_insensitively() {
        assert_eq!("HIGH".parse::<Priority>(), Ok(Priority::High));
        assert_eq!(" low ".parse::<Priority>(), Ok(Priority::Low));
        assert!("urgent".parse::<Priority>().is_err());
        assert_eq!(Priority::default(), Priority::Medium);
    }

    #[test]
    fn missing_optional_fields_use_defaults() {
        let task: Task = serde_json::from_str(r#"{"text":"Walk dog"}"#).expect("parse");
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.due_date, None);
        assert_eq!(task.category, None);
        assert!(!task.completed);
    }

    #[test]
    fn empty_strings_read_as_absent() {
        let task: Task = serde_json::from_str(
            r#"{"text":"Pay rent","priority":"high","dueDate":"","category":"","completed":true}"#,
        )
        .expect("parse");
        assert_eq!(task.due_date, None);
        assert_eq!(task.category, None);
        assert!(task.completed);
    }
}
