pub mod audit;
pub mod interactive;
pub mod questionnaire;
pub mod resolve;
