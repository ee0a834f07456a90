use super::*;
use crate::view_models::{OptionView, QuizView, ResultView, SubmitView};

impl Slot {
    pub fn id(&self) -> SlotId {
        self.id
    }

    pub fn placeholder(&self) -> &Placeholder {
        &self.placeholder
    }

    pub fn instance(&self) -> Option<&QuizInstance> {
        match &self.body {
            SlotBody::Quiz(instance) => Some(instance),
            SlotBody::Unavailable(_) => None,
        }
    }

    /// Construye la vista a partir del estado de la instancia
    pub fn view(&self) -> SlotView {
        match &self.body {
            SlotBody::Quiz(instance) => SlotView::Quiz(quiz_view(self.id, instance)),
            SlotBody::Unavailable(err) => SlotView::Error(ErrorView {
                slot: self.id,
                quiz_id: self.placeholder.quiz_id.clone(),
                message: error_message(&self.placeholder.quiz_id, err),
            }),
        }
    }
}

fn error_message(quiz_id: &str, err: &QuizError) -> String {
    match err {
        QuizError::MalformedDefinition { .. } => format!("Quiz \"{quiz_id}\" is misconfigured."),
        _ => format!("Quiz \"{quiz_id}\" not found."),
    }
}

fn quiz_view(slot: SlotId, instance: &QuizInstance) -> QuizView {
    let definition = instance.definition();
    let kind = definition.kind();

    let result = match instance.state() {
        SubmissionState::Graded(verdict) => ResultView::Graded {
            verdict,
            message: grading::verdict_message(definition, verdict),
        },
        SubmissionState::Idle if instance.needs_selection() => {
            ResultView::Neutral(kind.selection_notice())
        }
        SubmissionState::Idle => ResultView::Hidden,
    };

    QuizView {
        slot,
        quiz_id: definition.id.clone(),
        kind,
        instruction: kind.instruction(),
        prompt: definition.prompt.clone(),
        options: definition
            .options
            .iter()
            .map(|option| OptionView {
                label: option.label.clone(),
                text: option.text.clone(),
                checked: instance.selected().contains(&option.label),
            })
            .collect(),
        submit: SubmitView {
            enabled: instance.can_submit(),
            cooling_down: instance.is_cooling_down(),
        },
        result,
    }
}

impl QuizEngine {
    pub fn table(&self) -> &Arc<DefinitionTable> {
        &self.table
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn instance(&self, slot: SlotId) -> Option<&QuizInstance> {
        self.slots
            .iter()
            .find(|s| s.id == slot)
            .and_then(Slot::instance)
    }

    pub(crate) fn instance_mut(&mut self, slot: SlotId) -> Result<&mut QuizInstance, QuizError> {
        self.slots
            .iter_mut()
            .find(|s| s.id == slot)
            .and_then(|s| match &mut s.body {
                SlotBody::Quiz(instance) => Some(instance),
                SlotBody::Unavailable(_) => None,
            })
            .ok_or(QuizError::UnknownSlot(slot))
    }

    pub fn view(&self, slot: SlotId) -> Result<SlotView, QuizError> {
        self.slots
            .iter()
            .find(|s| s.id == slot)
            .map(Slot::view)
            .ok_or(QuizError::UnknownSlot(slot))
    }

    /// Vistas de todos los slots, en orden de documento
    pub fn views(&self) -> Vec<SlotView> {
        self.slots.iter().map(Slot::view).collect()
    }
}
