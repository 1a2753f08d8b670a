use maud::{html, Markup};

use super::layout::{error_message, page};
use crate::services::{quiz_session_service::CurrentQuestion, result_scorer::QuizResult};

pub fn home(name: &str, total_questions: u64) -> Markup {
    page(
        "مرحباً",
        html! {
            article {
                h1 { "مرحباً " (name) " ♥️" }
                p { "هذا الاختبار الصغير صُنع خصيصاً لكِ." }
                @if total_questions > 0 {
                    p { "عدد الأسئلة: " (total_questions) }
                    a.button href="/quiz" { "ابدئي الاختبار" }
                } @else {
                    p { "لا توجد أسئلة بعد." }
                }
            }
        },
    )
}

pub fn question(current: &CurrentQuestion<'_>, error: Option<&str>) -> Markup {
    let question = current.question;
    let progress = format!("{:.0}", current.progress());

    page(
        &format!("السؤال {}", current.number()),
        html! {
            article {
                p { "السؤال " strong { (current.number()) } " من " (current.total) }
                div.progress {
                    div.progress-bar style=(format!("width: {progress}%")) {}
                }
                h2 { (question.text) }
                (error_message(error))
                form.answer-form method="post" action="/quiz" {
                    input type="hidden" name="question_id" value=(question.id);
                    @for option in question.options() {
                        label.option-label {
                            input type="radio" name="answer" value=(option.value) required;
                            " " strong { (option.label) }
                            @if option.text != option.label {
                                " " (option.text)
                            }
                        }
                    }
                    button type="submit" { "التالي" }
                }
            }
        },
    )
}

pub fn results(result: &QuizResult) -> Markup {
    page(
        "النتيجة",
        html! {
            article {
                h1 { (result.message) }
                p.message-en dir="ltr" { (result.message_en) }
                p { "النتيجة: " strong { (result.score) " / " (result.total) } }
                p { (format!("{:.0}%", result.percentage)) }
                a.button href="/quiz" { "أعيدي الاختبار" }
                " "
                a href="/" { "الصفحة الرئيسية" }
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{services::result_scorer::ResultScorer, test_utils::fixtures::two_question_quiz};

    #[test]
    fn home_links_to_quiz_only_when_questions_exist() {
        assert!(home("حبيبتي", 2).into_string().contains(r#"href="/quiz""#));
        assert!(!home("حبيبتي", 0).into_string().contains(r#"href="/quiz""#));
    }

    #[test]
    fn question_page_lists_options_and_progress() {
        let questions = two_question_quiz();
        let current = CurrentQuestion {
            question: &questions[0],
            index: 0,
            total: 2,
        };

        let rendered = question(&current, None).into_string();
        assert!(rendered.contains(r#"name="question_id" value="1""#));
        assert!(rendered.contains(r#"value="D""#));
        assert!(rendered.contains("width: 50%"));
        assert!(rendered.contains("Luxor"));
    }

    #[test]
    fn question_page_shows_validation_error() {
        let questions = two_question_quiz();
        let current = CurrentQuestion {
            question: &questions[1],
            index: 1,
            total: 2,
        };

        let rendered = question(&current, Some("Please choose an answer")).into_string();
        assert!(rendered.contains("Please choose an answer"));
        assert!(rendered.contains(r#"value="False""#));
    }

    #[test]
    fn results_page_shows_score_and_message() {
        let rendered = results(&ResultScorer::score(1, 2)).into_string();

        assert!(rendered.contains("1 / 2"));
        assert!(rendered.contains("50%"));
        assert!(rendered.contains("stronger together"));
    }
}
