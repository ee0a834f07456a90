use crate::grading::Verdict;
use crate::model::{Label, QuizDefinition, QuizKind};
use std::collections::BTreeSet;
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmissionState {
    /// Sin corregir, o la selección cambió desde la última corrección
    Idle,
    Graded(Verdict),
}

/// Estado efímero de un quiz montado. El DOM (o egui) sólo pinta lo que hay aquí.
#[derive(Debug)]
pub struct QuizInstance {
    definition: Arc<QuizDefinition>,
    selected: BTreeSet<Label>,
    state: SubmissionState,
    needs_selection: bool,
    cooldown: Option<u64>,
    next_token: u64,
}

impl QuizInstance {
    pub fn new(definition: Arc<QuizDefinition>) -> Self {
        Self {
            definition,
            selected: BTreeSet::new(),
            state: SubmissionState::Idle,
            needs_selection: false,
            cooldown: None,
            next_token: 0,
        }
    }

    pub fn definition(&self) -> &QuizDefinition {
        &self.definition
    }

    pub fn selected(&self) -> &BTreeSet<Label> {
        &self.selected
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn needs_selection(&self) -> bool {
        self.needs_selection
    }

    pub fn is_cooling_down(&self) -> bool {
        self.cooldown.is_some()
    }

    /// El botón sólo está activo con algo marcado y sin cooldown
    pub fn can_submit(&self) -> bool {
        !self.selected.is_empty() && self.cooldown.is_none()
    }

    /// Registra el cambio y deja sin efecto la corrección anterior.
    /// En `single` marcar una opción sustituye a la anterior (grupo de radios).
    pub(crate) fn set_option(&mut self, label: Label, checked: bool) {
        match (self.definition.kind(), checked) {
            (QuizKind::Single, true) => {
                self.selected.clear();
                self.selected.insert(label);
            }
            (QuizKind::Multi, true) => {
                self.selected.insert(label);
            }
            (_, false) => {
                self.selected.remove(&label);
            }
        }
        self.state = SubmissionState::Idle;
        self.needs_selection = false;
    }

    pub(crate) fn flag_empty_selection(&mut self) {
        self.needs_selection = true;
    }

    /// Guarda el veredicto y arranca un cooldown nuevo; devuelve su token
    pub(crate) fn record(&mut self, verdict: Verdict) -> u64 {
        self.state = SubmissionState::Graded(verdict);
        self.needs_selection = false;
        self.next_token += 1;
        self.cooldown = Some(self.next_token);
        self.next_token
    }

    /// Sólo el token vigente libera el botón; uno viejo se descarta
    pub(crate) fn finish_cooldown(&mut self, token: u64) -> bool {
        if self.cooldown == Some(token) {
            self.cooldown = None;
            true
        } else {
            false
        }
    }
}
