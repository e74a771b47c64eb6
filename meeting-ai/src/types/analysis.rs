//! Output contract of a transcript analysis and the coercion into it.
//!
//! [`AnalysisResult::from_extracted`] takes the loosely-typed object returned by
//! the extractor and produces the strict result. Top-level shape problems are
//! fatal; problems with an individual task only drop that task.

use crate::Error;
use log::*;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Owner recorded for a task when the model names nobody.
pub const UNASSIGNED_OWNER: &str = "Unassigned";

const REQUIRED_FIELDS: [&str; 2] = ["summary", "tasks"];

/// Urgency of an action item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl FromStr for Priority {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            _ => Err(Error::InvalidPriority(value.to_string())),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Priority::High => write!(f, "High"),
            Priority::Medium => write!(f, "Medium"),
            Priority::Low => write!(f, "Low"),
        }
    }
}

/// An action item extracted from the meeting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Task {
    /// Person responsible, or "Unassigned".
    pub owner: String,
    /// What needs to be done. Never empty.
    pub task: String,
    /// Due date as stated by the model, if any.
    pub deadline: Option<String>,
    pub priority: Priority,
}

impl TryFrom<&Map<String, Value>> for Task {
    type Error = Error;

    fn try_from(entry: &Map<String, Value>) -> Result<Self, Self::Error> {
        let owner = match entry.get("owner") {
            None | Some(Value::Null) => UNASSIGNED_OWNER.to_string(),
            Some(Value::String(owner)) if owner.trim().is_empty() => {
                UNASSIGNED_OWNER.to_string()
            }
            Some(Value::String(owner)) => owner.trim().to_string(),
            Some(_) => return Err(Error::InvalidField("owner".to_string())),
        };

        let task = match entry.get("task") {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(task)) => task.trim().to_string(),
            Some(_) => return Err(Error::InvalidField("task".to_string())),
        };
        if task.is_empty() {
            return Err(Error::EmptyTaskDescription);
        }

        let deadline = match entry.get("deadline") {
            None | Some(Value::Null) => None,
            Some(Value::String(deadline)) => Some(deadline.clone()),
            Some(scalar @ (Value::Number(_) | Value::Bool(_))) => Some(scalar.to_string()),
            Some(_) => return Err(Error::InvalidField("deadline".to_string())),
        };

        let priority = match entry.get("priority") {
            None | Some(Value::Null) => Priority::default(),
            Some(Value::String(priority)) => priority.parse()?,
            Some(other) => return Err(Error::InvalidPriority(other.to_string())),
        };

        Ok(Task {
            owner,
            task,
            deadline,
            priority,
        })
    }
}

/// The normalized analysis returned to callers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AnalysisResult {
    /// Bullet points summarizing the discussion, in the order the model gave them.
    pub summary: Vec<String>,
    pub tasks: Vec<Task>,
    pub next_meeting_date: Option<String>,
}

impl AnalysisResult {
    /// Validate and coerce an extracted object into an `AnalysisResult`.
    ///
    /// Fails only when `summary` or `tasks` are missing, or `tasks` is not a list.
    /// Task entries that are not objects or cannot be coerced are logged and skipped.
    pub fn from_extracted(object: &Map<String, Value>) -> Result<Self, Error> {
        let missing: Vec<String> = REQUIRED_FIELDS
            .iter()
            .filter(|field| !object.contains_key(**field))
            .map(|field| field.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(Error::MissingRequiredFields(missing));
        }

        let summary = coerce_summary(&object["summary"]);

        let entries = object["tasks"]
            .as_array()
            .ok_or(Error::TasksNotASequence)?;
        let tasks = entries
            .iter()
            .enumerate()
            .filter_map(|(idx, entry)| coerce_task(idx, entry))
            .collect();

        let next_meeting_date = match object.get("next_meeting_date") {
            None | Some(Value::Null) => None,
            Some(Value::String(date)) => Some(date.clone()),
            Some(other) => {
                warn!("Coercing non-string next_meeting_date {other} to text");
                Some(other.to_string())
            }
        };

        Ok(AnalysisResult {
            summary,
            tasks,
            next_meeting_date,
        })
    }
}

fn coerce_summary(value: &Value) -> Vec<String> {
    match value {
        Value::Array(points) => points.iter().map(value_to_text).collect(),
        scalar if is_falsy(scalar) => Vec::new(),
        scalar => vec![value_to_text(scalar)],
    }
}

fn coerce_task(idx: usize, entry: &Value) -> Option<Task> {
    let Some(fields) = entry.as_object() else {
        warn!("Skipping task #{idx}: expected an object, found {entry}");
        return None;
    };

    Task::try_from(fields)
        .inspect_err(|e| warn!("Skipping task #{idx}: {e}"))
        .ok()
}

fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn coerces_well_formed_object() {
        let result = AnalysisResult::from_extracted(&object(json!({
            "summary": ["a"],
            "tasks": [{"owner": "Bob", "task": "Do X", "priority": "High"}]
        })))
        .unwrap();

        assert_eq!(
            result,
            AnalysisResult {
                summary: vec!["a".to_string()],
                tasks: vec![Task {
                    owner: "Bob".to_string(),
                    task: "Do X".to_string(),
                    deadline: None,
                    priority: Priority::High,
                }],
                next_meeting_date: None,
            }
        );
    }

    #[test]
    fn single_string_summary_is_wrapped() {
        let result = AnalysisResult::from_extracted(&object(json!({
            "summary": "solo point",
            "tasks": []
        })))
        .unwrap();
        assert_eq!(result.summary, vec!["solo point".to_string()]);
    }

    #[test]
    fn falsy_summary_becomes_empty() {
        for summary in [json!(null), json!(""), json!(false), json!(0), json!({})] {
            let result = AnalysisResult::from_extracted(&object(json!({
                "summary": summary,
                "tasks": []
            })))
            .unwrap();
            assert!(result.summary.is_empty(), "summary {summary} should be empty");
        }
    }

    #[test]
    fn summary_array_keeps_order_and_renders_non_strings() {
        let result = AnalysisResult::from_extracted(&object(json!({
            "summary": ["first", 2, "third"],
            "tasks": []
        })))
        .unwrap();
        assert_eq!(result.summary, vec!["first", "2", "third"]);
    }

    #[test]
    fn missing_required_fields_are_reported() {
        assert_eq!(
            AnalysisResult::from_extracted(&object(json!({"next_meeting_date": null}))),
            Err(Error::MissingRequiredFields(vec![
                "summary".to_string(),
                "tasks".to_string()
            ]))
        );
        assert_eq!(
            AnalysisResult::from_extracted(&object(json!({"summary": []}))),
            Err(Error::MissingRequiredFields(vec!["tasks".to_string()]))
        );
    }

    #[test]
    fn tasks_must_be_a_list() {
        assert_eq!(
            AnalysisResult::from_extracted(&object(json!({
                "summary": [],
                "tasks": {"task": "Do X"}
            }))),
            Err(Error::TasksNotASequence)
        );
    }

    #[test]
    fn malformed_task_is_dropped_and_valid_one_kept() {
        let result = AnalysisResult::from_extracted(&object(json!({
            "summary": [],
            "tasks": [
                {"owner": "Ann", "task": "Write report", "deadline": "Friday"},
                {"owner": "Bob"}
            ]
        })))
        .unwrap();

        assert_eq!(
            result.tasks,
            vec![Task {
                owner: "Ann".to_string(),
                task: "Write report".to_string(),
                deadline: Some("Friday".to_string()),
                priority: Priority::Medium,
            }]
        );
    }

    #[test]
    fn non_object_entries_and_bad_priorities_are_skipped_in_order() {
        let result = AnalysisResult::from_extracted(&object(json!({
            "summary": [],
            "tasks": [
                "call the vendor",
                {"task": "First"},
                {"task": "Urgent-ish", "priority": "Critical"},
                {"task": "   "},
                {"task": "Second", "priority": "low"}
            ],
            "next_meeting_date": "2024-06-03"
        })))
        .unwrap();

        let names: Vec<&str> = result.tasks.iter().map(|t| t.task.as_str()).collect();
        assert_eq!(names, vec!["First", "Second"]);
        assert_eq!(result.tasks[0].owner, UNASSIGNED_OWNER);
        assert_eq!(result.tasks[1].priority, Priority::Low);
        assert_eq!(result.next_meeting_date.as_deref(), Some("2024-06-03"));
    }

    #[test]
    fn task_coercion_errors() {
        assert_eq!(
            Task::try_from(&object(json!({"owner": "Ann"}))),
            Err(Error::EmptyTaskDescription)
        );
        assert_eq!(
            Task::try_from(&object(json!({"task": "x", "priority": "Urgent"}))),
            Err(Error::InvalidPriority("Urgent".to_string()))
        );
        assert_eq!(
            Task::try_from(&object(json!({"task": "x", "priority": 3}))),
            Err(Error::InvalidPriority("3".to_string()))
        );
        assert_eq!(
            Task::try_from(&object(json!({"task": ["x"]}))),
            Err(Error::InvalidField("task".to_string()))
        );
    }

    #[test]
    fn blank_owner_falls_back_to_unassigned() {
        let task = Task::try_from(&object(json!({"owner": "  ", "task": " Ship it "}))).unwrap();
        assert_eq!(task.owner, UNASSIGNED_OWNER);
        assert_eq!(task.task, "Ship it");
    }

    #[test]
    fn priority_parsing_is_case_insensitive() {
        assert_eq!(" HIGH ".parse::<Priority>(), Ok(Priority::High));
        assert_eq!("Medium".parse::<Priority>(), Ok(Priority::Medium));
        assert_eq!("low".parse::<Priority>(), Ok(Priority::Low));
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn serializes_to_the_response_contract() {
        let result = AnalysisResult {
            summary: vec!["Kickoff".to_string()],
            tasks: vec![Task {
                owner: "Ann".to_string(),
                task: "Book room".to_string(),
                deadline: None,
                priority: Priority::Low,
            }],
            next_meeting_date: None,
        };

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value,
            json!({
                "summary": ["Kickoff"],
                "tasks": [{"owner": "Ann", "task": "Book room", "deadline": null, "priority": "Low"}],
                "next_meeting_date": null
            })
        );

        let round_trip: AnalysisResult = serde_json::from_value(value).unwrap();
        assert_eq!(round_trip, result);
    }
}
