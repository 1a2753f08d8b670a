#[cfg(test)]
pub mod fixtures {
    use crate::models::domain::{NewQuestion, Question, QuestionType};

    /// A multiple choice question with four filled options.
    pub fn mcq_input(correct_answer: &str) -> NewQuestion {
        NewQuestion {
            text: "Which city did we visit first?".to_string(),
            question_type: QuestionType::Mcq,
            option_a: "Cairo".to_string(),
            option_b: "Alexandria".to_string(),
            option_c: "Luxor".to_string(),
            option_d: "Aswan".to_string(),
            correct_answer: correct_answer.to_string(),
        }
    }

    pub fn tf_input(correct_answer: &str) -> NewQuestion {
        NewQuestion {
            text: "I remember our first date".to_string(),
            question_type: QuestionType::Tf,
            option_a: String::new(),
            option_b: String::new(),
            option_c: String::new(),
            option_d: String::new(),
            correct_answer: correct_answer.to_string(),
        }
    }

    /// The two-question quiz: an MCQ answered `A` followed by a TF answered `True`.
    pub fn two_question_quiz() -> Vec<Question> {
        vec![
            mcq_input("A").into_question(1, 1),
            tf_input("True").into_question(2, 2),
        ]
    }
}

#[cfg(test)]
pub mod test_helpers {
    pub fn assert_redirect_to(response: &actix_web::dev::ServiceResponse, location: &str) {
        assert!(
            response.status().is_redirection(),
            "Expected redirect, got: {}",
            response.status()
        );
        assert_eq!(
            response
                .headers()
                .get(actix_web::http::header::LOCATION)
                .and_then(|v| v.to_str().ok()),
            Some(location)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use crate::models::domain::QuestionType;

    #[test]
    fn test_fixtures_two_question_quiz() {
        let questions = two_question_quiz();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].question_type, QuestionType::Mcq);
        assert_eq!(questions[1].correct_answer, "True");
    }
}
