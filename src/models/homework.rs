//! Homework records and the status catalog.

use std::str::FromStr;

use serde_json::Value;

use crate::error::{AppError, Result};

/// Review status of a submitted homework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCode {
    Approved,
    Reviewing,
    Rejected,
}

impl StatusCode {
    /// Wire name used by the homework API.
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusCode::Approved => "approved",
            StatusCode::Reviewing => "reviewing",
            StatusCode::Rejected => "rejected",
        }
    }

    /// Verdict text shown to the student.
    pub fn verdict(&self) -> &'static str {
        match self {
            StatusCode::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            StatusCode::Reviewing => "Работа взята на проверку ревьюером.",
            StatusCode::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl FromStr for StatusCode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "approved" => Ok(StatusCode::Approved),
            "reviewing" => Ok(StatusCode::Reviewing),
            "rejected" => Ok(StatusCode::Rejected),
            other => Err(AppError::UnknownStatus(other.to_string())),
        }
    }
}

/// One homework entry from a poll response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeworkRecord {
    /// Homework title
    pub name: String,

    /// Current review status
    pub status: StatusCode,
}

impl TryFrom<&Value> for HomeworkRecord {
    type Error = AppError;

    /// Read a record from its raw JSON form.
    ///
    /// The API calls the title `homework_name`; plain `name` is accepted too.
    fn try_from(value: &Value) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| AppError::schema("homework record is not an object"))?;

        let name = object
            .get("homework_name")
            .or_else(|| object.get("name"))
            .ok_or_else(|| AppError::schema("homework record has no name"))?
            .as_str()
            .ok_or_else(|| AppError::schema("homework name is not a string"))?;

        let status = object
            .get("status")
            .ok_or_else(|| AppError::schema(format!("homework {name:?} has no status")))?
            .as_str()
            .ok_or_else(|| AppError::schema(format!("status of homework {name:?} is not a string")))?
            .parse()?;

        Ok(Self {
            name: name.to_string(),
            status,
        })
    }
}

/// Validated body of a poll response.
#[derive(Debug, Clone, PartialEq)]
pub struct PollResponse {
    /// Raw homework records, in server order
    pub homeworks: Vec<Value>,

    /// Server timestamp the next poll should start from
    pub current_date: i64,
}
