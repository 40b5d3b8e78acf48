use serde::{Deserialize, Serialize};

use super::answers::Choice;
use crate::types::Points;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// The six fixed-choice questions. The plan question is table-driven and
/// lives in [`crate::reference::PlanTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionId {
    Q1,
    Q2,
    Q3,
    Q4,
    Q5,
    Q6,
}

impl QuestionId {
    pub const ALL: [QuestionId; 6] = [
        QuestionId::Q1,
        QuestionId::Q2,
        QuestionId::Q3,
        QuestionId::Q4,
        QuestionId::Q5,
        QuestionId::Q6,
    ];

    pub fn section(self) -> Section {
        match self {
            QuestionId::Q1 | QuestionId::Q2 => Section::TimeHorizon,
            _ => Section::RiskTolerance,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            QuestionId::Q1 => 1,
            QuestionId::Q2 => 2,
            QuestionId::Q3 => 3,
            QuestionId::Q4 => 4,
            QuestionId::Q5 => 5,
            QuestionId::Q6 => 6,
        }
    }
}

impl std::fmt::Display for QuestionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "q{}", self.number())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    TimeHorizon,
    RiskTolerance,
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Section::TimeHorizon => write!(f, "Time horizon"),
            Section::RiskTolerance => write!(f, "Risk tolerance"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub label: String,
    pub points: Points,
}

/// Ordered mapping from answer label to points.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreTable {
    options: Vec<AnswerOption>,
}

impl ScoreTable {
    pub fn new<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = (S, Points)>,
        S: Into<String>,
    {
        ScoreTable {
            options: options
                .into_iter()
                .map(|(label, points)| AnswerOption {
                    label: label.into(),
                    points,
                })
                .collect(),
        }
    }

    pub fn options(&self) -> &[AnswerOption] {
        &self.options
    }

    /// Points for an exact label, `None` when the label is not an option.
    pub fn score(&self, label: &str) -> Option<Points> {
        self.options
            .iter()
            .find(|o| o.label == label)
            .map(|o| o.points)
    }

    /// Resolve a choice by label or 1-based index.
    pub fn select(&self, choice: &Choice) -> Option<&AnswerOption> {
        match choice {
            Choice::Index(idx) => idx.checked_sub(1).and_then(|i| self.options.get(i)),
            Choice::Label(label) => self.options.iter().find(|o| &o.label == label),
        }
    }

    pub fn min_points(&self) -> Points {
        self.options.iter().map(|o| o.points).min().unwrap_or(0)
    }

    pub fn max_points(&self) -> Points {
        self.options.iter().map(|o| o.points).max().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub section: Section,
    pub prompt: String,
    pub options: ScoreTable,
}

/// The fixed question set. Immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Questionnaire {
    questions: Vec<Question>,
}

// ---------------------------------------------------------------------------
// Standard questionnaire
// ---------------------------------------------------------------------------

impl Questionnaire {
    pub fn new(questions: Vec<Question>) -> Self {
        Questionnaire { questions }
    }

    pub fn standard() -> Self {
        let question = |id: QuestionId, prompt: &str, options: ScoreTable| Question {
            id,
            section: id.section(),
            prompt: prompt.to_string(),
            options,
        };

        Questionnaire::new(vec![
            question(
                QuestionId::Q1,
                "I plan to begin withdrawing money from my investments in:",
                ScoreTable::new([
                    ("Less than 3 years", 1),
                    ("3–5 years", 3),
                    ("6–10 years", 7),
                    ("11 years or more", 10),
                ]),
            ),
            question(
                QuestionId::Q2,
                "Once I begin withdrawing funds from my investments, I plan to spend all of the funds in:",
                ScoreTable::new([
                    ("Less than 2 years", 0),
                    ("2–5 years", 1),
                    ("6–10 years", 4),
                    ("11 years or more", 8),
                ]),
            ),
            question(
                QuestionId::Q3,
                "I would describe my knowledge of investments as:",
                ScoreTable::new([("None", 1), ("Limited", 3), ("Good", 7), ("Extensive", 10)]),
            ),
            question(
                QuestionId::Q4,
                "What amount of financial risk are you willing to take when you invest?",
                ScoreTable::new([
                    (
                        "Take lower than average risks expecting to earn lower than average returns",
                        0,
                    ),
                    ("Take average risks expecting to earn average returns", 4),
                    (
                        "Take above average risks expecting to earn above average returns",
                        8,
                    ),
                ]),
            ),
            question(
                QuestionId::Q5,
                "Select the investments you currently own or have owned:",
                ScoreTable::new([
                    ("Bonds and/or bond funds", 3),
                    ("Stocks and/or stock funds", 6),
                    ("International securities and/or international funds", 8),
                ]),
            ),
            question(
                QuestionId::Q6,
                "Imagine that in the past three months, the overall stock market lost 25% of its value. \
                 An individual stock investment you own also lost 25% of its value. What would you do?",
                ScoreTable::new([
                    ("Sell all of my shares", 0),
                    ("Sell some of my shares", 2),
                    ("Do nothing", 5),
                    ("Buy more shares", 8),
                ]),
            ),
        ])
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn get(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn section(&self, section: Section) -> impl Iterator<Item = &Question> {
        self.questions.iter().filter(move |q| q.section == section)
    }
}

impl Default for Questionnaire {
    fn default() -> Self {
        Questionnaire::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_has_six_questions_in_order() {
        let q = Questionnaire::standard();
        let ids: Vec<QuestionId> = q.questions().iter().map(|q| q.id).collect();
        assert_eq!(ids, QuestionId::ALL.to_vec());
    }

    #[test]
    fn test_select_by_index_is_one_based() {
        let q = Questionnaire::standard();
        let table = &q.get(QuestionId::Q1).unwrap().options;
        assert_eq!(table.select(&Choice::Index(1)).unwrap().points, 1);
        assert_eq!(table.select(&Choice::Index(4)).unwrap().points, 10);
        assert!(table.select(&Choice::Index(0)).is_none());
        assert!(table.select(&Choice::Index(5)).is_none());
    }

    #[test]
    fn test_score_exact_label_only() {
        let q = Questionnaire::standard();
        let table = &q.get(QuestionId::Q3).unwrap().options;
        assert_eq!(table.score("Good"), Some(7));
        assert_eq!(table.score("good"), None);
        assert_eq!(table.score("Expert"), None);
    }

    #[test]
    fn test_sections() {
        let q = Questionnaire::standard();
        assert_eq!(q.section(Section::TimeHorizon).count(), 2);
        assert_eq!(q.section(Section::RiskTolerance).count(), 4);
    }
}
