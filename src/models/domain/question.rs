use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

const DISPLAY_TEXT_LIMIT: usize = 50;
const MCQ_ANSWERS: [&str; 4] = ["A", "B", "C", "D"];
const TF_ANSWERS: [&str; 2] = ["True", "False"];

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    pub id: i64,
    pub text: String,
    pub question_type: QuestionType,
    #[serde(default)]
    pub option_a: String,
    #[serde(default)]
    pub option_b: String,
    #[serde(default)]
    pub option_c: String,
    #[serde(default)]
    pub option_d: String,
    pub correct_answer: String,
    #[serde(default)]
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum QuestionType {
    #[default]
    #[serde(rename = "MCQ")]
    Mcq,
    #[serde(rename = "TF")]
    Tf,
}

/// One selectable answer as shown on the quiz page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QuestionOption {
    pub label: &'static str,
    pub value: &'static str,
    pub text: String,
}

impl QuestionType {
    pub fn code(&self) -> &'static str {
        match self {
            QuestionType::Mcq => "MCQ",
            QuestionType::Tf => "TF",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            QuestionType::Mcq => "Multiple Choice (4 options)",
            QuestionType::Tf => "True/False",
        }
    }

    /// Parses the form/database code. Anything other than `TF` is treated as MCQ.
    pub fn from_code(code: &str) -> Self {
        if code.trim().eq_ignore_ascii_case("TF") {
            QuestionType::Tf
        } else {
            QuestionType::Mcq
        }
    }

    pub fn accepted_answers(&self) -> &'static [&'static str] {
        match self {
            QuestionType::Mcq => &MCQ_ANSWERS,
            QuestionType::Tf => &TF_ANSWERS,
        }
    }

    pub fn default_answer(&self) -> &'static str {
        self.accepted_answers()[0]
    }
}

impl Question {
    pub fn options(&self) -> Vec<QuestionOption> {
        match self.question_type {
            QuestionType::Mcq => vec![
                QuestionOption { label: "أ", value: "A", text: self.option_a.clone() },
                QuestionOption { label: "ب", value: "B", text: self.option_b.clone() },
                QuestionOption { label: "ج", value: "C", text: self.option_c.clone() },
                QuestionOption { label: "د", value: "D", text: self.option_d.clone() },
            ],
            QuestionType::Tf => vec![
                QuestionOption { label: "صحيح", value: "True", text: "صحيح".to_string() },
                QuestionOption { label: "خطأ", value: "False", text: "خطأ".to_string() },
            ],
        }
    }

    /// Case-insensitive comparison of trimmed values.
    pub fn is_correct(&self, answer: &str) -> bool {
        answer.trim().to_lowercase() == self.correct_answer.trim().to_lowercase()
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.text.chars().count() > DISPLAY_TEXT_LIMIT {
            let short: String = self.text.chars().take(DISPLAY_TEXT_LIMIT).collect();
            write!(f, "{}. {}...", self.order, short)
        } else {
            write!(f, "{}. {}", self.order, self.text)
        }
    }
}

/// Fields supplied by the manager when adding a question. Values are expected
/// to be trimmed already.
#[derive(Clone, Debug, PartialEq, Eq, Validate)]
#[validate(schema(function = "validate_question_shape"))]
pub struct NewQuestion {
    #[validate(length(min = 1, message = "Question text is required"))]
    pub text: String,
    pub question_type: QuestionType,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    pub correct_answer: String,
}

impl NewQuestion {
    pub fn into_question(self, id: i64, order: i32) -> Question {
        let now = Utc::now();
        let (option_a, option_b, option_c, option_d) = match self.question_type {
            QuestionType::Mcq => (self.option_a, self.option_b, self.option_c, self.option_d),
            QuestionType::Tf => Default::default(),
        };

        Question {
            id,
            text: self.text,
            question_type: self.question_type,
            option_a,
            option_b,
            option_c,
            option_d,
            correct_answer: self.correct_answer,
            order,
            created_at: now,
            updated_at: now,
        }
    }
}

fn validate_question_shape(question: &NewQuestion) -> Result<(), ValidationError> {
    if question.question_type == QuestionType::Mcq {
        let options = [
            &question.option_a,
            &question.option_b,
            &question.option_c,
            &question.option_d,
        ];
        if options.iter().any(|o| o.trim().is_empty()) {
            return Err(ValidationError::new("missing_option")
                .with_message("All four options are required for a multiple choice question".into()));
        }
    }

    if !question
        .question_type
        .accepted_answers()
        .contains(&question.correct_answer.as_str())
    {
        return Err(ValidationError::new("invalid_correct_answer")
            .with_message("Correct answer does not match the question type".into()));
    }

    Ok(())
}
