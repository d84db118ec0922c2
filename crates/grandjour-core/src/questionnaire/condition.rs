//! Conditional question visibility.
//!
//! Visibility rules form a small boolean expression tree evaluated against
//! the answer set, which keeps conditional branching (such as the
//! dual-ceremony sub-questions) explicit and typed.

use serde::{Deserialize, Serialize};

use super::answers::{AnswerSet, AnswerValue};

/// A visibility condition over the answer set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Condition {
    /// The answer for `field` equals `value` exactly.
    Equals { field: String, value: AnswerValue },
    /// The answer for `field`, in textual form, is one of `values`.
    OneOf { field: String, values: Vec<String> },
    /// All nested conditions hold (empty conjunction is true).
    All(Vec<Condition>),
}

impl Condition {
    /// Build an equality condition.
    pub fn equals(field: impl Into<String>, value: impl Into<AnswerValue>) -> Self {
        Condition::Equals {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Build a membership condition over textual answer forms.
    pub fn one_of(field: impl Into<String>, values: &[&str]) -> Self {
        Condition::OneOf {
            field: field.into(),
            values: values.iter().map(|v| (*v).to_string()).collect(),
        }
    }

    /// Evaluate the condition against an answer set. An unanswered field
    /// never satisfies `Equals` or `OneOf`.
    pub fn evaluate(&self, answers: &AnswerSet) -> bool {
        match self {
            Condition::Equals { field, value } => answers.get(field) == Some(value),
            Condition::OneOf { field, values } => answers
                .get(field)
                .is_some_and(|answer| values.contains(&answer.as_text())),
            Condition::All(conditions) => {
                conditions.iter().all(|condition| condition.evaluate(answers))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers() -> AnswerSet {
        let mut set = AnswerSet::new();
        set.insert("double_ceremonie", "oui");
        set.insert("trajet_1", 20);
        set.insert("photos", true);
        set
    }

    #[test]
    fn test_equals() {
        let answers = answers();
        assert!(Condition::equals("double_ceremonie", "oui").evaluate(&answers));
        assert!(!Condition::equals("double_ceremonie", "non").evaluate(&answers));
        assert!(Condition::equals("trajet_1", 20).evaluate(&answers));
        assert!(!Condition::equals("missing", "oui").evaluate(&answers));
    }

    #[test]
    fn test_one_of_matches_textual_form() {
        let answers = answers();
        assert!(Condition::one_of("double_ceremonie", &["oui", "yes"]).evaluate(&answers));
        // Booleans compare through their textual form.
        assert!(Condition::one_of("photos", &["true"]).evaluate(&answers));
        assert!(!Condition::one_of("photos", &["false"]).evaluate(&answers));
    }

    #[test]
    fn test_all_conjunction() {
        let answers = answers();
        let both = Condition::All(vec![
            Condition::equals("double_ceremonie", "oui"),
            Condition::equals("trajet_1", 20),
        ]);
        assert!(both.evaluate(&answers));

        let mixed = Condition::All(vec![
            Condition::equals("double_ceremonie", "oui"),
            Condition::equals("trajet_1", 999),
        ]);
        assert!(!mixed.evaluate(&answers));

        assert!(Condition::All(vec![]).evaluate(&answers));
    }
}
