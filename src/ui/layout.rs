use super::{PreviewApp, UiAction};
use egui::Context;

pub fn top_panel(app: &PreviewApp, ctx: &Context, actions: &mut Vec<UiAction>) {
    egui::TopBottomPanel::top("menu_panel").show(ctx, |ui| {
        ui.horizontal_centered(|ui| {
            ui.strong(&app.title);
            ui.separator();
            ui.label(&app.message);

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                // Simula la navegación instantánea del tema: todo se monta de nuevo
                if ui.button("🔄 Re-render").clicked() {
                    actions.push(UiAction::Rerender);
                }
            });
        });
    });
}
