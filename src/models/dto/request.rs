use serde::Deserialize;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{NewQuestion, QuestionType},
};

/// Body of `POST /quiz`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnswerForm {
    pub answer: Option<String>,
    pub question_id: Option<String>,
}

/// Body of `POST /manager/login`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagerAction {
    Add,
    Delete,
    Reorder,
}

/// Body of `POST /manager`. Which fields matter depends on `action`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ManagerForm {
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub question_text: String,
    #[serde(default)]
    pub question_type: String,
    #[serde(default)]
    pub option_a: String,
    #[serde(default)]
    pub option_b: String,
    #[serde(default)]
    pub option_c: String,
    #[serde(default)]
    pub option_d: String,
    pub correct_answer: Option<String>,
    pub question_id: Option<String>,
    pub order: Option<String>,
}

impl ManagerForm {
    pub fn action(&self) -> Option<ManagerAction> {
        match self.action.trim() {
            "add" => Some(ManagerAction::Add),
            "delete" => Some(ManagerAction::Delete),
            "reorder" => Some(ManagerAction::Reorder),
            _ => None,
        }
    }

    /// Builds the question to create. The correct answer falls back to the
    /// first accepted value for the type (`A` or `True`) when omitted.
    pub fn new_question(&self) -> NewQuestion {
        let question_type = QuestionType::from_code(&self.question_type);
        let correct_answer = self
            .correct_answer
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .unwrap_or(question_type.default_answer())
            .to_string();

        NewQuestion {
            text: self.question_text.trim().to_string(),
            question_type,
            option_a: self.option_a.trim().to_string(),
            option_b: self.option_b.trim().to_string(),
            option_c: self.option_c.trim().to_string(),
            option_d: self.option_d.trim().to_string(),
            correct_answer,
        }
    }

    pub fn question_id(&self) -> AppResult<i64> {
        parse_id(self.question_id.as_deref())
    }

    pub fn order(&self) -> AppResult<i32> {
        self.order
            .as_deref()
            .map(str::trim)
            .and_then(|o| o.parse().ok())
            .ok_or_else(|| AppError::ValidationError("order must be an integer".to_string()))
    }
}

pub fn parse_id(raw: Option<&str>) -> AppResult<i64> {
    let raw = raw
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::ValidationError("question_id is required".to_string()))?;

    raw.parse()
        .map_err(|_| AppError::ValidationError(format!("invalid question_id '{}'", raw)))
}
