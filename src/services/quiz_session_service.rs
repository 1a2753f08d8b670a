use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{Question, SessionState},
        dto::request::parse_id,
    },
};

/// Where a session stands relative to the current question list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizPhase {
    NotStarted,
    InProgress,
    Completed,
}

/// The question on screen, together with its position in the quiz.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurrentQuestion<'a> {
    pub question: &'a Question,
    pub index: usize,
    pub total: usize,
}

impl CurrentQuestion<'_> {
    /// 1-based position for display.
    pub fn number(&self) -> usize {
        self.index + 1
    }

    /// Share of the quiz shown so far, counting the current question.
    pub fn progress(&self) -> f64 {
        100.0 * (self.index + 1) as f64 / self.total as f64
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum QuizStep<'a> {
    NoQuestions,
    Question(CurrentQuestion<'a>),
    Completed,
}

pub struct QuizSessionService;

impl QuizSessionService {
    pub fn phase(session: &SessionState, total: usize) -> QuizPhase {
        if !session.quiz_started {
            QuizPhase::NotStarted
        } else if session.current_question >= total {
            QuizPhase::Completed
        } else {
            QuizPhase::InProgress
        }
    }

    /// Resets quiz progress, discarding any attempt in flight. Manager access
    /// is left as it was.
    pub fn start(session: &mut SessionState) {
        session.quiz_started = true;
        session.current_question = 0;
        session.answers.clear();
        session.score = 0;
    }

    pub fn current_question<'a>(session: &SessionState, questions: &'a [Question]) -> QuizStep<'a> {
        if questions.is_empty() {
            return QuizStep::NoQuestions;
        }

        match questions.get(session.current_question) {
            Some(question) => QuizStep::Question(CurrentQuestion {
                question,
                index: session.current_question,
                total: questions.len(),
            }),
            None => QuizStep::Completed,
        }
    }

    /// Records `answer` for the question on screen and advances.
    ///
    /// `question_id` must name the question at the current index; a missing,
    /// malformed or stale id, or an empty answer, is a validation error and
    /// leaves the session untouched.
    pub fn submit_answer<'a>(
        session: &mut SessionState,
        questions: &'a [Question],
        question_id: Option<&str>,
        answer: Option<&str>,
    ) -> AppResult<QuizStep<'a>> {
        let current = match Self::current_question(session, questions) {
            QuizStep::Question(current) => current,
            other => return Ok(other),
        };

        let answer = answer
            .filter(|a| !a.trim().is_empty())
            .ok_or_else(|| AppError::ValidationError("Please choose an answer".to_string()))?;

        let question_id = parse_id(question_id)?;
        if question_id != current.question.id {
            return Err(AppError::ValidationError(format!(
                "question {} is not the current question",
                question_id
            )));
        }

        // Answering without having opened the quiz page starts it implicitly.
        if Self::phase(session, questions.len()) == QuizPhase::NotStarted {
            session.quiz_started = true;
        }

        session
            .answers
            .insert(current.question.id.to_string(), answer.to_string());
        if current.question.is_correct(answer) {
            session.score += 1;
        }
        session.current_question += 1;

        Ok(Self::current_question(session, questions))
    }
}
