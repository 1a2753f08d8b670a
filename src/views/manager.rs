use maud::{html, Markup};

use super::layout::{error_message, page};
use crate::models::domain::{Question, QuestionType};

pub fn login(error: Option<&str>) -> Markup {
    page(
        "دخول المدير",
        html! {
            article {
                h1 { "دخول المدير" }
                (error_message(error))
                form method="post" action="/manager/login" {
                    label {
                        "كلمة المرور "
                        input type="password" name="password" required autofocus;
                    }
                    button type="submit" { "دخول" }
                }
            }
        },
    )
}

fn question_row(question: &Question) -> Markup {
    html! {
        tr {
            td { (question.order) }
            td title=(question.text) { (question.to_string()) }
            td { (question.question_type.code()) }
            td { (question.correct_answer) }
            td {
                form method="post" action="/manager" {
                    input type="hidden" name="action" value="reorder";
                    input type="hidden" name="question_id" value=(question.id);
                    input type="number" name="order" value=(question.order) style="width: 4rem";
                    button type="submit" { "حفظ" }
                }
            }
            td {
                form method="post" action="/manager" {
                    input type="hidden" name="action" value="delete";
                    input type="hidden" name="question_id" value=(question.id);
                    button type="submit" { "حذف" }
                }
            }
        }
    }
}

fn add_form() -> Markup {
    html! {
        form method="post" action="/manager" {
            input type="hidden" name="action" value="add";
            label { "نص السؤال" textarea name="question_text" required {} }
            label {
                "نوع السؤال "
                select name="question_type" {
                    option value=(QuestionType::Mcq.code()) { (QuestionType::Mcq.label()) }
                    option value=(QuestionType::Tf.code()) { (QuestionType::Tf.label()) }
                }
            }
            fieldset {
                legend { "الخيارات (للأسئلة متعددة الاختيار)" }
                label { "أ " input type="text" name="option_a"; }
                label { "ب " input type="text" name="option_b"; }
                label { "ج " input type="text" name="option_c"; }
                label { "د " input type="text" name="option_d"; }
            }
            label {
                "الإجابة الصحيحة "
                select name="correct_answer" {
                    @for answer in QuestionType::Mcq.accepted_answers().iter().chain(QuestionType::Tf.accepted_answers()) {
                        option value=(answer) { (answer) }
                    }
                }
            }
            button type="submit" { "إضافة سؤال" }
        }
    }
}

pub fn dashboard(questions: &[Question], error: Option<&str>) -> Markup {
    page(
        "إدارة الأسئلة",
        html! {
            article {
                h1 { "إدارة الأسئلة" }
                p {
                    "عدد الأسئلة: " (questions.len())
                    " · "
                    a href="/manager/logout" { "تسجيل الخروج" }
                }
                (error_message(error))
                @if questions.is_empty() {
                    p { "لا توجد أسئلة بعد." }
                } @else {
                    table {
                        thead { tr {
                            th { "#" }
                            th { "السؤال" }
                            th { "النوع" }
                            th { "الإجابة" }
                            th { "الترتيب" }
                            th {}
                        } }
                        tbody {
                            @for question in questions {
                                (question_row(question))
                            }
                        }
                    }
                }
            }
            article {
                h2 { "إضافة سؤال" }
                (add_form())
            }
        },
    )
}
