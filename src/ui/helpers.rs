// src/ui/helpers.rs
use crate::view_models::ResultView;
use egui::{Color32, RichText, Ui};

/// Mismo código de colores que la hoja de estilos del sitio
pub fn result_color(result: &ResultView) -> Color32 {
    match result.modifier() {
        Some("correct") => Color32::from_rgb(0x2e, 0x7d, 0x32),
        Some("incorrect") => Color32::from_rgb(0xc6, 0x28, 0x28),
        _ => Color32::GRAY,
    }
}

pub fn result_label(ui: &mut Ui, result: &ResultView) {
    if result.is_visible() {
        ui.label(RichText::new(result.message()).color(result_color(result)));
    }
}

pub fn instruction_label(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(text).italics().color(Color32::GRAY));
}
