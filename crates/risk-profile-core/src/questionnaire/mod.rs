pub mod answers;
pub mod question;
pub mod scorer;

pub use answers::{AnswerSet, Choice};
pub use question::{AnswerOption, Question, QuestionId, Questionnaire, ScoreTable, Section};
pub use scorer::{
    AnswerScore, PlanContribution, RiskToleranceScore, Scorer, TimeHorizonScore,
    RISK_TOLERANCE_CAP,
};
