use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One answer value, typed by the field it belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
  Bool(bool),
  Number(f64),
  Text(String),
}

impl std::fmt::Display for Answer {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Answer::Bool(b) => write!(f, "{}", b),
      Answer::Number(n) => {
        if n.fract() == 0.0 {
          write!(f, "{}", *n as i64)
        } else {
          write!(f, "{}", n)
        }
      }
      Answer::Text(s) => write!(f, "{}", s),
    }
  }
}

/// One completed pass over a template's fields, keyed by field id.
/// Fields without an answer are simply absent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Submission {
  pub answers: BTreeMap<String, Answer>,
}

impl Submission {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn set(&mut self, field_id: impl Into<String>, answer: Answer) {
    self.answers.insert(field_id.into(), answer);
  }

  pub fn get(&self, field_id: &str) -> Option<&Answer> {
    self.answers.get(field_id)
  }

  pub fn remove(&mut self, field_id: &str) {
    self.answers.remove(field_id);
  }

  pub fn clear(&mut self) {
    self.answers.clear();
  }

  pub fn len(&self) -> usize {
    self.answers.len()
  }

  pub fn is_empty(&self) -> bool {
    self.answers.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_serializes_as_plain_mapping() {
    let mut submission = Submission::new();
    submission.set("field1", Answer::Text("hello".into()));
    submission.set("field2", Answer::Bool(true));
    submission.set("field3", Answer::Number(4.0));

    let json = serde_json::to_value(&submission).unwrap();
    assert_eq!(json["field1"], "hello");
    assert_eq!(json["field2"], true);
    assert_eq!(json["field3"], 4.0);
  }

  #[test]
  fn test_answer_types_round_trip() {
    let mut submission = Submission::new();
    submission.set("a", Answer::Bool(false));
    submission.set("b", Answer::Number(1.5));
    submission.set("c", Answer::Text("x".into()));

    let json = serde_json::to_string(&submission).unwrap();
    let back: Submission = serde_json::from_str(&json).unwrap();
    assert_eq!(back, submission);
  }

  #[test]
  fn test_display_trims_integral_numbers() {
    assert_eq!(Answer::Number(3.0).to_string(), "3");
    assert_eq!(Answer::Number(3.25).to_string(), "3.25");
    assert_eq!(Answer::Bool(true).to_string(), "true");
  }
}
