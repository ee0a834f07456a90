use crate::app::SlotId;
use crate::model::QuizKind;
use thiserror::Error;

/// Defectos de una definición concreta, detectados al cargar la tabla.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    #[error("quiz has no options")]
    NoOptions,

    #[error("option label is empty")]
    EmptyLabel,

    #[error("option label \"{0}\" appears more than once")]
    DuplicateOption(String),

    #[error("{kind} quiz is missing its `{field}` field")]
    MissingAnswer { kind: QuizKind, field: &'static str },

    #[error("{kind} quiz must not define `{field}`")]
    UnexpectedAnswerField { kind: QuizKind, field: &'static str },

    #[error("multi quiz has an empty answer key")]
    EmptyAnswerKey,

    #[error("answer \"{0}\" is not one of the options")]
    AnswerNotAnOption(String),
}

#[derive(Debug, Error)]
pub enum QuizError {
    #[error("quiz \"{0}\" not found")]
    UnknownQuiz(String),

    #[error("quiz \"{id}\" is misconfigured: {source}")]
    MalformedDefinition {
        id: String,
        #[source]
        source: DefinitionError,
    },

    #[error("no quiz mounted at slot {0}")]
    UnknownSlot(SlotId),

    #[error("quiz \"{quiz}\" has no option \"{label}\"")]
    UnknownOption { quiz: String, label: String },

    #[error("invalid placeholder pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
