pub mod analyze;
pub mod generate_questions;
pub mod get_questionnaire;
