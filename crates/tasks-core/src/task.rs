use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Storage-assigned row id.
pub type TaskId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    /// 0 = open, 1 = done.
    pub completed: i64,
}

/// Completion flag as it arrives on the wire: `0`/`1` or a JSON boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Completion {
    Flag(i64),
    Bool(bool),
}

impl Completion {
    pub fn into_flag(self) -> Result<i64> {
        match self {
            Completion::Flag(v @ (0 | 1)) => Ok(v),
            Completion::Bool(b) => Ok(i64::from(b)),
            Completion::Flag(_) => Err(Error::validation("completed must be 0 or 1")),
        }
    }
}

/// A validated task ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub completed: i64,
}

impl NewTask {
    pub fn new(title: Option<String>, completed: Option<Completion>) -> Result<Self> {
        let title = match title {
            Some(t) if !t.is_empty() => t,
            _ => return Err(Error::validation("title is required")),
        };

        let completed = completed.map(Completion::into_flag).transpose()?.unwrap_or(0);

        Ok(Self { title, completed })
    }
}

/// Partial update. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub completed: Option<i64>,
}

impl TaskPatch {
    pub fn new(title: Option<String>, completed: Option<Completion>) -> Result<Self> {
        Ok(Self {
            title,
            completed: completed.map(Completion::into_flag).transpose()?,
        })
    }
}

/// Parse a path segment into a task id. Only positive integers are valid.
pub fn parse_task_id(raw: &str) -> Result<TaskId> {
    match raw.parse::<TaskId>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(Error::validation(format!("invalid task id: {raw}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_task_defaults_completed() {
        let task = NewTask::new(Some("Buy milk".to_string()), None).unwrap();

        assert_eq!(task.title, "Buy milk");
        assert_eq!(task.completed, 0);
    }

    #[test]
    fn test_new_task_requires_title() {
        assert!(matches!(NewTask::new(None, None), Err(Error::Validation(_))));
        assert!(matches!(
            NewTask::new(Some(String::new()), None),
            Err(Error::Validation(_))
        ));

        let spaced = NewTask::new(Some("   ".to_string()), None).unwrap();
        assert_eq!(spaced.title, "   ");
    }

    #[test]
    fn test_completion_range() {
        assert_eq!(Completion::Flag(1).into_flag().unwrap(), 1);
        assert_eq!(Completion::Bool(true).into_flag().unwrap(), 1);
        assert_eq!(Completion::Bool(false).into_flag().unwrap(), 0);

        let err = Completion::Flag(7).into_flag().unwrap_err();
        assert_eq!(err.to_string(), "completed must be 0 or 1");
    }

    #[test]
    fn test_completion_from_json() {
        let flag: Completion = serde_json::from_str("1").unwrap();
        assert_eq!(flag, Completion::Flag(1));

        let b: Completion = serde_json::from_str("false").unwrap();
        assert_eq!(b, Completion::Bool(false));

        assert!(serde_json::from_str::<Completion>("\"yes\"").is_err());
    }

    #[test]
    fn test_patch_keeps_absent_fields() {
        let patch = TaskPatch::new(None, Some(Completion::Flag(1))).unwrap();

        assert_eq!(patch.title, None);
        assert_eq!(patch.completed, Some(1));
    }

    #[test]
    fn test_patch_writes_empty_title_as_is() {
        let patch = TaskPatch::new(Some(String::new()), None).unwrap();
        assert_eq!(patch.title, Some(String::new()));
    }

    #[test]
    fn test_parse_task_id() {
        assert_eq!(parse_task_id("42").unwrap(), 42);
        assert!(parse_task_id("0").is_err());
        assert!(parse_task_id("-3").is_err());

        let err = parse_task_id("abc").unwrap_err();
        assert_eq!(err.to_string(), "invalid task id: abc");
    }
}
