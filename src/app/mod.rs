use crate::config::EngineConfig;
use crate::data::DefinitionTable;
use crate::document::{Document, Placeholder};
use crate::error::QuizError;
use crate::grading::{self, EmptySelection, Verdict};
use crate::model::Label;
use crate::view_models::{ErrorView, SlotView};
use std::fmt;
use std::sync::Arc;

// Submódulos
pub mod actions;
pub mod discovery;
pub mod instance;
pub mod queries;

pub use discovery::RenderSummary;
pub use instance::{QuizInstance, SubmissionState};

/// Identifica un placeholder montado. `epoch` cambia en cada render completo,
/// así un temporizador de una página anterior nunca toca la actual.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SlotId {
    pub epoch: u64,
    pub index: usize,
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.epoch, self.index)
    }
}

/// Lo que el host tiene que devolver a `cooldown_elapsed` cuando venza el temporizador.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CooldownTicket {
    pub slot: SlotId,
    pub token: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Corregido; el host programa `cooldown_elapsed(ticket)` tras `EngineConfig::cooldown()`
    Graded {
        verdict: Verdict,
        ticket: CooldownTicket,
    },
    /// Nada marcado: aviso neutro, sin veredicto
    NeedsSelection,
    /// Cooldown en marcha, el click no cuenta
    Ignored,
}

enum SlotBody {
    Quiz(QuizInstance),
    Unavailable(QuizError),
}

pub struct Slot {
    id: SlotId,
    placeholder: Placeholder,
    body: SlotBody,
}

pub struct QuizEngine {
    table: Arc<DefinitionTable>,
    config: EngineConfig,
    epoch: u64,
    slots: Vec<Slot>,
}

impl QuizEngine {
    pub fn new(table: Arc<DefinitionTable>, config: EngineConfig) -> Self {
        Self {
            table,
            config,
            epoch: 0,
            slots: Vec::new(),
        }
    }
}
