use crate::ui::views::quiz::ui_quiz;
use crate::ui::{PreviewApp, UiAction};
use crate::view_models::SlotView;
use egui::{CentralPanel, Color32, Context, ScrollArea};

pub fn ui_page(app: &PreviewApp, ctx: &Context, actions: &mut Vec<UiAction>) {
    CentralPanel::default().show(ctx, |ui| {
        let max_width = 720.0;
        ScrollArea::vertical().auto_shrink([false; 2]).show(ui, |ui| {
            ui.set_max_width(max_width);

            let views = app.engine.views();
            if views.is_empty() {
                ui.label("No quiz placeholders on this page.");
            }

            for view in &views {
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    match view {
                        SlotView::Quiz(quiz) => ui_quiz(ui, quiz, actions),
                        SlotView::Error(error) => {
                            ui.colored_label(Color32::RED, &error.message);
                        }
                    }
                });
                ui.add_space(12.0);
            }
        });
    });
}
