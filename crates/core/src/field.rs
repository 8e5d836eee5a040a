use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Input control kinds a field can render as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
  /// Static text, collects no answer
  Label,
  /// Free-form text input
  #[default]
  Text,
  /// Numeric input
  Number,
  /// Checkbox
  Boolean,
  /// Choice from a fixed option list
  Enum,
}

impl FieldKind {
  /// All kinds in editor cycling order
  pub const ALL: [FieldKind; 5] = [
    FieldKind::Label,
    FieldKind::Text,
    FieldKind::Number,
    FieldKind::Boolean,
    FieldKind::Enum,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      FieldKind::Label => "label",
      FieldKind::Text => "text",
      FieldKind::Number => "number",
      FieldKind::Boolean => "boolean",
      FieldKind::Enum => "enum",
    }
  }

  /// The next kind in cycling order, wrapping around
  pub fn next(self) -> Self {
    let i = Self::ALL.iter().position(|k| *k == self).unwrap_or(0);
    Self::ALL[(i + 1) % Self::ALL.len()]
  }

  /// Whether this kind collects an answer when a form is filled
  pub fn collects_answer(&self) -> bool {
    !matches!(self, FieldKind::Label)
  }
}

impl std::str::FromStr for FieldKind {
  type Err = String;

  fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "label" => Ok(FieldKind::Label),
      "text" => Ok(FieldKind::Text),
      "number" => Ok(FieldKind::Number),
      "boolean" => Ok(FieldKind::Boolean),
      "enum" => Ok(FieldKind::Enum),
      _ => Err(format!("Unknown field kind: {}", s)),
    }
  }
}

/// A single typed input descriptor within a section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
  pub id: String,
  #[serde(rename = "type")]
  pub kind: FieldKind,
  pub label: String,
  /// Choices for `Enum` fields. Retained unchanged when the kind moves away
  /// from `Enum`.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub options: Option<Vec<String>>,
}

impl Field {
  pub fn new() -> Self {
    Self {
      id: Uuid::new_v4().to_string(),
      kind: FieldKind::Text,
      label: String::new(),
      options: None,
    }
  }

  /// Option list for rendering; empty for fields without one
  pub fn options(&self) -> &[String] {
    self.options.as_deref().unwrap_or(&[])
  }
}

impl Default for Field {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_new_field_defaults() {
    let field = Field::new();
    assert_eq!(field.kind, FieldKind::Text);
    assert!(field.label.is_empty());
    assert!(field.options.is_none());
    assert!(!field.id.is_empty());
  }

  #[test]
  fn test_fresh_ids_are_unique() {
    assert_ne!(Field::new().id, Field::new().id);
  }

  #[test]
  fn test_kind_parsing() {
    assert_eq!("enum".parse::<FieldKind>().unwrap(), FieldKind::Enum);
    assert_eq!("Boolean".parse::<FieldKind>().unwrap(), FieldKind::Boolean);
    assert!("select".parse::<FieldKind>().is_err());
  }

  #[test]
  fn test_kind_cycle_covers_all() {
    let mut kind = FieldKind::Label;
    for _ in 0..FieldKind::ALL.len() {
      kind = kind.next();
    }
    assert_eq!(kind, FieldKind::Label);
  }

  #[test]
  fn test_serde_uses_type_tag() {
    let field = Field {
      id: "f1".into(),
      kind: FieldKind::Enum,
      label: "Color".into(),
      options: Some(vec!["red".into(), "blue".into()]),
    };
    let json = serde_json::to_value(&field).unwrap();
    assert_eq!(json["type"], "enum");
    assert_eq!(json["options"][1], "blue");

    let text = Field::new();
    let json = serde_json::to_value(&text).unwrap();
    assert!(json.get("options").is_none());
  }
}
