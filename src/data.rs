// src/data.rs

use crate::error::{DefinitionError, QuizError};
use crate::model::{AnswerKey, Label, QuizDefinition, QuizId, QuizKind, QuizOption};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Forma del YAML tal y como lo escribe el autor de la documentación.
#[derive(Deserialize, Debug)]
struct RawQuiz {
    #[serde(rename = "type")]
    kind: QuizKind,
    #[serde(default)]
    question: String,
    #[serde(deserialize_with = "ordered_options")]
    options: Vec<(String, String)>,
    #[serde(default)]
    answer: Option<String>,
    #[serde(default)]
    answers: Option<Vec<String>>,
    #[serde(default)]
    explanation: Option<String>,
}

// Las opciones son un mapping pero el orden importa al pintar
fn ordered_options<'de, D>(deserializer: D) -> Result<Vec<(String, String)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct OptionsVisitor;

    impl<'de> Visitor<'de> for OptionsVisitor {
        type Value = Vec<(String, String)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a mapping from option label to option text")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut options = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(entry) = map.next_entry::<String, String>()? {
                options.push(entry);
            }
            Ok(options)
        }
    }

    deserializer.deserialize_map(OptionsVisitor)
}

fn build_definition(id: &str, raw: RawQuiz) -> Result<QuizDefinition, DefinitionError> {
    if raw.options.is_empty() {
        return Err(DefinitionError::NoOptions);
    }

    let mut seen = BTreeSet::new();
    let mut options = Vec::with_capacity(raw.options.len());
    for (label, text) in raw.options {
        let label = Label::new(&label);
        if label.is_empty() {
            return Err(DefinitionError::EmptyLabel);
        }
        if !seen.insert(label.clone()) {
            return Err(DefinitionError::DuplicateOption(label.to_string()));
        }
        options.push(QuizOption { label, text });
    }

    let answer_key = match raw.kind {
        QuizKind::Single => {
            if raw.answers.is_some() {
                return Err(DefinitionError::UnexpectedAnswerField {
                    kind: QuizKind::Single,
                    field: "answers",
                });
            }
            let answer = raw.answer.ok_or(DefinitionError::MissingAnswer {
                kind: QuizKind::Single,
                field: "answer",
            })?;
            let label = Label::new(&answer);
            if label.is_empty() {
                return Err(DefinitionError::MissingAnswer {
                    kind: QuizKind::Single,
                    field: "answer",
                });
            }
            AnswerKey::Single(label)
        }
        QuizKind::Multi => {
            if raw.answer.is_some() {
                return Err(DefinitionError::UnexpectedAnswerField {
                    kind: QuizKind::Multi,
                    field: "answer",
                });
            }
            let answers = raw.answers.ok_or(DefinitionError::MissingAnswer {
                kind: QuizKind::Multi,
                field: "answers",
            })?;
            // duplicados colapsan, mayúsculas/minúsculas da igual
            let labels: BTreeSet<Label> = answers
                .iter()
                .map(|a| Label::new(a))
                .filter(|l| !l.is_empty())
                .collect();
            if labels.is_empty() {
                return Err(DefinitionError::EmptyAnswerKey);
            }
            AnswerKey::Multi(labels)
        }
    };

    if let Some(missing) = answer_key.labels().into_iter().find(|l| !seen.contains(*l)) {
        return Err(DefinitionError::AnswerNotAnOption(missing.to_string()));
    }

    Ok(QuizDefinition {
        id: id.to_string(),
        prompt: raw.question.trim().to_string(),
        options,
        answer_key,
        explanation: raw
            .explanation
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty()),
    })
}

/// Tabla inmutable de definiciones. Se construye una vez y se comparte con `Arc`.
#[derive(Debug, Default)]
pub struct DefinitionTable {
    quizzes: BTreeMap<QuizId, Arc<QuizDefinition>>,
    rejected: BTreeMap<QuizId, DefinitionError>,
}

impl DefinitionTable {
    /// Carga tolerante: los quizzes defectuosos se apartan y se registran en el log.
    pub fn from_yaml(source: &str) -> Result<Self, QuizError> {
        let raw: BTreeMap<String, RawQuiz> = if source.trim().is_empty() {
            BTreeMap::new()
        } else {
            serde_yaml::from_str(source)?
        };

        let mut table = DefinitionTable::default();
        for (id, quiz) in raw {
            match build_definition(&id, quiz) {
                Ok(def) => {
                    table.quizzes.insert(id, Arc::new(def));
                }
                Err(err) => {
                    log::error!("Quiz definition \"{id}\" rejected: {err}");
                    table.rejected.insert(id, err);
                }
            }
        }

        log::info!(
            "Loaded {} quiz definitions ({} rejected)",
            table.quizzes.len(),
            table.rejected.len()
        );
        Ok(table)
    }

    /// Igual que `from_yaml`, pero cualquier defecto hace fallar la carga.
    pub fn from_yaml_strict(source: &str) -> Result<Self, QuizError> {
        let table = Self::from_yaml(source)?;
        table.into_strict()
    }

    pub fn from_file(path: &Path, strict: bool) -> Result<Self, QuizError> {
        let source = std::fs::read_to_string(path)?;
        let table = Self::from_yaml(&source)?;
        if strict { table.into_strict() } else { Ok(table) }
    }

    pub fn from_definitions(definitions: impl IntoIterator<Item = QuizDefinition>) -> Self {
        let quizzes = definitions
            .into_iter()
            .map(|def| (def.id.clone(), Arc::new(def)))
            .collect();
        Self {
            quizzes,
            rejected: BTreeMap::new(),
        }
    }

    fn into_strict(self) -> Result<Self, QuizError> {
        match self.rejected.into_iter().next() {
            Some((id, source)) => Err(QuizError::MalformedDefinition { id, source }),
            None => Ok(Self {
                quizzes: self.quizzes,
                rejected: BTreeMap::new(),
            }),
        }
    }

    pub fn get(&self, id: &str) -> Option<&Arc<QuizDefinition>> {
        self.quizzes.get(id)
    }

    /// Busca un quiz distinguiendo entre "no existe" y "existe pero está mal definido".
    pub fn lookup(&self, id: &str) -> Result<&Arc<QuizDefinition>, QuizError> {
        if let Some(def) = self.quizzes.get(id) {
            return Ok(def);
        }
        match self.rejected.get(id) {
            Some(err) => Err(QuizError::MalformedDefinition {
                id: id.to_string(),
                source: err.clone(),
            }),
            None => Err(QuizError::UnknownQuiz(id.to_string())),
        }
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.quizzes.keys().map(String::as_str)
    }

    pub fn defects(&self) -> impl Iterator<Item = (&str, &DefinitionError)> {
        self.rejected.iter().map(|(id, err)| (id.as_str(), err))
    }

    pub fn len(&self) -> usize {
        self.quizzes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quizzes.is_empty()
    }
}

/// Carga la tabla de quizzes embebida en el binario
pub fn read_definitions_embedded() -> Result<DefinitionTable, QuizError> {
    let file_content = include_str!("data/quizzes.yaml");
    DefinitionTable::from_yaml(file_content)
}

/// Como `read_definitions_embedded`, pero falla con el primer quiz mal definido
pub fn read_definitions_embedded_strict() -> Result<DefinitionTable, QuizError> {
    DefinitionTable::from_yaml_strict(include_str!("data/quizzes.yaml"))
}
