use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::question::QuestionId;

/// A selected answer, either by its label or by 1-based position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Choice {
    Index(usize),
    Label(String),
}

impl Choice {
    /// Numbers are positions, anything else is a label.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.parse::<usize>() {
            Ok(idx) => Choice::Index(idx),
            Err(_) => Choice::Label(trimmed.to_string()),
        }
    }

    /// The choice as the user typed it.
    pub fn raw(&self) -> String {
        match self {
            Choice::Index(idx) => idx.to_string(),
            Choice::Label(label) => label.clone(),
        }
    }
}

impl From<&str> for Choice {
    fn from(label: &str) -> Self {
        Choice::Label(label.to_string())
    }
}

impl From<usize> for Choice {
    fn from(idx: usize) -> Self {
        Choice::Index(idx)
    }
}

impl std::fmt::Display for Choice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Choice::Index(idx) => write!(f, "#{}", idx),
            Choice::Label(label) => write!(f, "'{}'", label),
        }
    }
}

/// One questionnaire session's selections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSet {
    #[serde(default)]
    pub answers: BTreeMap<QuestionId, Choice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<Choice>,
}

impl AnswerSet {
    pub fn new() -> Self {
        AnswerSet::default()
    }

    pub fn with(mut self, question: QuestionId, choice: impl Into<Choice>) -> Self {
        self.answers.insert(question, choice.into());
        self
    }

    pub fn with_plan(mut self, choice: impl Into<Choice>) -> Self {
        self.plan = Some(choice.into());
        self
    }

    pub fn get(&self, question: QuestionId) -> Option<&Choice> {
        self.answers.get(&question)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choice_parse() {
        assert_eq!(Choice::parse("2"), Choice::Index(2));
        assert_eq!(Choice::parse(" Good "), Choice::Label("Good".into()));
    }

    #[test]
    fn test_answer_set_from_json_mixes_labels_and_indices() {
        let json = r#"{"answers": {"q1": 3, "q3": "Good"}, "plan": "Plan C"}"#;
        let set: AnswerSet = serde_json::from_str(json).unwrap();
        assert_eq!(set.get(QuestionId::Q1), Some(&Choice::Index(3)));
        assert_eq!(set.get(QuestionId::Q3), Some(&Choice::Label("Good".into())));
        assert_eq!(set.plan, Some(Choice::Label("Plan C".into())));
        assert!(set.get(QuestionId::Q2).is_none());
    }
}
