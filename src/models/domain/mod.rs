pub mod question;
pub mod session_state;
pub use question::{NewQuestion, Question, QuestionOption, QuestionType};
pub use session_state::SessionState;
