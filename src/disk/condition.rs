/// Declarative visibility conditions for game-disk choices.

use serde::{Deserialize, Serialize};

use crate::schema::node::Predicate;
use crate::schema::state::{StoryState, Value};

/// A condition evaluated against story state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum Condition {
    /// Always true.
    #[default]
    Always,
    /// The key holds exactly `true`.
    Flag(String),
    /// The key holds this value.
    Equals(String, Value),
    /// Logical NOT.
    Not(Box<Condition>),
    /// Logical AND.
    All(Vec<Condition>),
    /// Logical OR.
    Any(Vec<Condition>),
}

impl Condition {
    pub fn evaluate(&self, state: &StoryState) -> bool {
        match self {
            Condition::Always => true,
            Condition::Flag(key) => state.is_set(key),
            Condition::Equals(key, value) => state.get(key) == Some(value),
            Condition::Not(inner) => !inner.evaluate(state),
            Condition::All(conditions) => conditions.iter().all(|c| c.evaluate(state)),
            Condition::Any(conditions) => conditions.iter().any(|c| c.evaluate(state)),
        }
    }

    pub fn into_predicate(self) -> Predicate {
        Predicate::new(move |state| self.evaluate(state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> StoryState {
        let mut state = StoryState::new();
        state.insert("hasKey", true);
        state.insert("door", "red");
        state
    }

    #[test]
    fn leaves() {
        let state = state();
        assert!(Condition::Always.evaluate(&state));
        assert!(Condition::Flag("hasKey".to_string()).evaluate(&state));
        assert!(!Condition::Flag("door".to_string()).evaluate(&state));
        assert!(Condition::Equals("door".to_string(), Value::from("red")).evaluate(&state));
        assert!(!Condition::Equals("door".to_string(), Value::from("blue")).evaluate(&state));
    }

    #[test]
    fn combinators() {
        let state = state();
        let has_key = Condition::Flag("hasKey".to_string());
        let has_map = Condition::Flag("hasMap".to_string());

        assert!(!Condition::Not(Box::new(has_key.clone())).evaluate(&state));
        assert!(!Condition::All(vec![has_key.clone(), has_map.clone()]).evaluate(&state));
        assert!(Condition::Any(vec![has_key, has_map]).evaluate(&state));
        assert!(Condition::All(vec![]).evaluate(&state));
        assert!(!Condition::Any(vec![]).evaluate(&state));
    }

    #[test]
    fn from_ron() {
        let condition: Condition =
            ron::from_str(r#"All([Flag("hasKey"), Not(Equals("door", "blue"))])"#).unwrap();
        assert!(condition.evaluate(&state()));
        assert!(condition.into_predicate().test(&state()));
    }
}
