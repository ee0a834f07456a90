// src/view_models.rs

use crate::app::SlotId;
use crate::grading::Verdict;
use crate::model::{Label, QuizKind};

pub const CHECK_LABEL: &str = "Check answer";
pub const CHECKING_LABEL: &str = "Checking…";

/// Lo que hay que pintar dentro de un placeholder.
#[derive(Clone, Debug, PartialEq)]
pub enum SlotView {
    Quiz(QuizView),
    Error(ErrorView),
}

impl SlotView {
    pub fn slot(&self) -> SlotId {
        match self {
            SlotView::Quiz(q) => q.slot,
            SlotView::Error(e) => e.slot,
        }
    }

    pub fn as_quiz(&self) -> Option<&QuizView> {
        match self {
            SlotView::Quiz(q) => Some(q),
            SlotView::Error(_) => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct QuizView {
    pub slot: SlotId,
    pub quiz_id: String,
    pub kind: QuizKind,
    pub instruction: &'static str,
    pub prompt: String,
    pub options: Vec<OptionView>,
    pub submit: SubmitView,
    pub result: ResultView,
}

impl QuizView {
    /// Nombre del grupo de inputs; único por slot para que dos radios no se mezclen
    pub fn input_name(&self) -> String {
        format!("{}-{}", self.quiz_id, self.slot.index)
    }

    pub fn input_type(&self) -> &'static str {
        match self.kind {
            QuizKind::Multi => "checkbox",
            QuizKind::Single => "radio",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct OptionView {
    pub label: Label,
    pub text: String,
    pub checked: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SubmitView {
    pub enabled: bool,
    pub cooling_down: bool,
}

impl SubmitView {
    pub fn label(&self) -> &'static str {
        if self.cooling_down {
            CHECKING_LABEL
        } else {
            CHECK_LABEL
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ResultView {
    Hidden,
    Graded { verdict: Verdict, message: String },
    Neutral(&'static str),
}

impl ResultView {
    pub fn is_visible(&self) -> bool {
        !matches!(self, ResultView::Hidden)
    }

    pub fn message(&self) -> &str {
        match self {
            ResultView::Hidden => "",
            ResultView::Graded { message, .. } => message,
            ResultView::Neutral(message) => message,
        }
    }

    /// Modificador CSS: correct / incorrect / neutral
    pub fn modifier(&self) -> Option<&'static str> {
        match self {
            ResultView::Hidden => None,
            ResultView::Graded {
                verdict: Verdict::Correct,
                ..
            } => Some("correct"),
            ResultView::Graded {
                verdict: Verdict::Incorrect,
                ..
            } => Some("incorrect"),
            ResultView::Neutral(_) => Some("neutral"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ErrorView {
    pub slot: SlotId,
    pub quiz_id: String,
    pub message: String,
}
