pub mod question_service;
pub mod quiz_session_service;
pub mod result_scorer;
pub mod session_service;
