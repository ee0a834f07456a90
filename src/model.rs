// src/model.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Clave única de un quiz en la tabla de definiciones.
pub type QuizId = String;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum QuizKind {
    Single,
    Multi,
}

impl QuizKind {
    pub fn instruction(self) -> &'static str {
        match self {
            QuizKind::Multi => "Select all that apply.",
            QuizKind::Single => "Select the best answer.",
        }
    }

    /// Aviso neutro cuando se intenta corregir sin nada marcado
    pub fn selection_notice(self) -> &'static str {
        match self {
            QuizKind::Multi => "⚠️ Please select at least one option.",
            QuizKind::Single => "⚠️ Please select the best answer.",
        }
    }
}

impl fmt::Display for QuizKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizKind::Single => f.write_str("single"),
            QuizKind::Multi => f.write_str("multi"),
        }
    }
}

/// Etiqueta de opción ("A", "B", ...) en forma canónica: sin espacios y en mayúsculas.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Label(String);

impl Label {
    pub fn new(raw: &str) -> Self {
        Label(raw.trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Label {
    fn from(raw: &str) -> Self {
        Label::new(raw)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizOption {
    pub label: Label,
    pub text: String,
}

/// Clave de respuesta. El tipo de quiz se deduce de aquí,
/// así un quiz `single` nunca puede tener un conjunto de respuestas.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnswerKey {
    Single(Label),
    Multi(BTreeSet<Label>),
}

impl AnswerKey {
    pub fn kind(&self) -> QuizKind {
        match self {
            AnswerKey::Single(_) => QuizKind::Single,
            AnswerKey::Multi(_) => QuizKind::Multi,
        }
    }

    pub fn labels(&self) -> Vec<&Label> {
        match self {
            AnswerKey::Single(label) => vec![label],
            AnswerKey::Multi(labels) => labels.iter().collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizDefinition {
    pub id: QuizId,
    pub prompt: String,
    pub options: Vec<QuizOption>,
    pub answer_key: AnswerKey,
    pub explanation: Option<String>,
}

impl QuizDefinition {
    pub fn kind(&self) -> QuizKind {
        self.answer_key.kind()
    }

    pub fn has_option(&self, label: &Label) -> bool {
        self.options.iter().any(|o| &o.label == label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_is_trimmed_and_upper_cased() {
        assert_eq!(Label::new(" b "), Label::new("B"));
        assert_eq!(Label::new("d").as_str(), "D");
        assert!(Label::new("   ").is_empty());
    }

    #[test]
    fn kind_follows_answer_key() {
        let key = AnswerKey::Multi([Label::new("B"), Label::new("d")].into_iter().collect());
        assert_eq!(key.kind(), QuizKind::Multi);
        assert_eq!(key.labels().len(), 2);
        assert_eq!(AnswerKey::Single(Label::new("c")).kind(), QuizKind::Single);
    }
}
