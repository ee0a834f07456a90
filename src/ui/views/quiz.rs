use crate::model::QuizKind;
use crate::ui::helpers::{instruction_label, result_label};
use crate::ui::UiAction;
use crate::view_models::QuizView;
use egui::{Button, Ui};

pub fn ui_quiz(ui: &mut Ui, view: &QuizView, actions: &mut Vec<UiAction>) {
    instruction_label(ui, view.instruction);
    if !view.prompt.is_empty() {
        ui.strong(&view.prompt);
    }
    ui.add_space(6.0);

    for option in &view.options {
        let changed = match view.kind {
            QuizKind::Multi => {
                let mut checked = option.checked;
                ui.checkbox(&mut checked, &option.text).changed()
            }
            // un radio sólo se puede marcar, igual que en el navegador
            QuizKind::Single => ui.radio(option.checked, &option.text).clicked() && !option.checked,
        };
        if changed {
            actions.push(UiAction::Toggle {
                slot: view.slot,
                label: option.label.to_string(),
                checked: !option.checked,
            });
        }
    }

    ui.add_space(6.0);
    if ui
        .add_enabled(view.submit.enabled, Button::new(view.submit.label()))
        .clicked()
    {
        actions.push(UiAction::Check(view.slot));
    }
    result_label(ui, &view.result);
}
