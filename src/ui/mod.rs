mod helpers;
pub mod layout;
pub mod views;

use crate::app::{CooldownTicket, QuizEngine, RenderSummary, SlotId, SubmitOutcome};
use crate::document::StaticPage;
use eframe::{App, Frame};
use egui::Context;
use layout::top_panel;
use std::time::{Duration, Instant};

/// Lo que el usuario hizo en este frame; se aplica después de pintar
#[derive(Clone, Debug, PartialEq)]
pub enum UiAction {
    Toggle {
        slot: SlotId,
        label: String,
        checked: bool,
    },
    Check(SlotId),
    Rerender,
}

/// Vista previa nativa de una página con quizzes
pub struct PreviewApp {
    pub engine: QuizEngine,
    pub page: StaticPage,
    pub title: String,
    pub message: String,
    timers: Vec<(Instant, CooldownTicket)>,
}

impl PreviewApp {
    pub fn new(engine: QuizEngine, page: StaticPage, title: impl Into<String>) -> Self {
        let mut app = Self {
            engine,
            page,
            title: title.into(),
            message: String::new(),
            timers: Vec::new(),
        };
        app.rerender();
        app
    }

    pub fn rerender(&mut self) {
        // los temporizadores viejos caducarían solos, pero no hace falta guardarlos
        self.timers.clear();
        let summary = self.engine.discover_and_render(&mut self.page);
        self.message = summary_message(&summary);
    }

    pub fn apply(&mut self, action: UiAction, now: Instant) {
        match action {
            UiAction::Toggle {
                slot,
                label,
                checked,
            } => {
                if let Err(err) = self.engine.on_selection_changed(slot, &label, checked) {
                    log::error!("{err}");
                }
            }
            UiAction::Check(slot) => match self.engine.submit(slot) {
                Ok(SubmitOutcome::Graded { ticket, .. }) => {
                    self.timers.push((now + self.engine.config().cooldown(), ticket));
                }
                Ok(_) => {}
                Err(err) => log::error!("{err}"),
            },
            UiAction::Rerender => self.rerender(),
        }
    }

    /// Dispara los cooldowns vencidos; devuelve cuánto falta para el siguiente
    pub fn fire_timers(&mut self, now: Instant) -> Option<Duration> {
        let (due, pending): (Vec<_>, Vec<_>) =
            self.timers.drain(..).partition(|(deadline, _)| *deadline <= now);
        self.timers = pending;
        for (_, ticket) in due {
            self.engine.cooldown_elapsed(ticket);
        }
        self.timers
            .iter()
            .map(|(deadline, _)| deadline.saturating_duration_since(now))
            .min()
    }
}

fn summary_message(summary: &RenderSummary) -> String {
    let mut message = format!("{} rendered", summary.rendered);
    if !summary.unknown.is_empty() {
        message.push_str(&format!(" · not found: {}", summary.unknown.join(", ")));
    }
    if !summary.misconfigured.is_empty() {
        message.push_str(&format!(
            " · misconfigured: {}",
            summary.misconfigured.join(", ")
        ));
    }
    message
}

impl App for PreviewApp {
    fn update(&mut self, ctx: &Context, _frame: &mut Frame) {
        if let Some(wait) = self.fire_timers(Instant::now()) {
            ctx.request_repaint_after(wait);
        }

        let mut actions = Vec::new();
        top_panel(self, ctx, &mut actions);
        views::page::ui_page(self, ctx, &mut actions);

        let now = Instant::now();
        let had_actions = !actions.is_empty();
        for action in actions {
            self.apply(action, now);
        }
        if had_actions {
            ctx.request_repaint();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::data::read_definitions_embedded;
    use crate::view_models::SlotView;
    use std::sync::Arc;

    fn app() -> PreviewApp {
        let table = read_definitions_embedded().expect("embedded");
        let config = EngineConfig {
            cooldown_ms: 1200,
            ..EngineConfig::default()
        };
        let page = StaticPage::for_quizzes(["futoshiki_quiz2", "nope"], &config).expect("page");
        PreviewApp::new(QuizEngine::new(Arc::new(table), config), page, "test")
    }

    fn first_slot(app: &PreviewApp) -> SlotId {
        app.engine.slots()[0].id()
    }

    #[test]
    fn summary_mentions_missing_quizzes() {
        assert_eq!(app().message, "1 rendered · not found: nope");
    }

    #[test]
    fn cooldown_timer_fires_after_configured_delay() {
        let mut app = app();
        let slot = first_slot(&app);
        let start = Instant::now();

        app.apply(
            UiAction::Toggle {
                slot,
                label: "C".into(),
                checked: true,
            },
            start,
        );
        app.apply(UiAction::Check(slot), start);
        assert!(app.engine.instance(slot).expect("instance").is_cooling_down());

        let wait = app.fire_timers(start + Duration::from_millis(200));
        assert_eq!(wait, Some(Duration::from_millis(1000)));
        assert!(app.engine.instance(slot).expect("instance").is_cooling_down());

        assert_eq!(app.fire_timers(start + Duration::from_millis(1200)), None);
        assert!(!app.engine.instance(slot).expect("instance").is_cooling_down());
    }

    #[test]
    fn rerender_drops_state_and_timers() {
        let mut app = app();
        let slot = first_slot(&app);
        let now = Instant::now();
        app.apply(
            UiAction::Toggle {
                slot,
                label: "A".into(),
                checked: true,
            },
            now,
        );
        app.apply(UiAction::Check(slot), now);
        app.apply(UiAction::Rerender, now);

        assert_eq!(app.fire_timers(now + Duration::from_secs(5)), None);
        let views = app.engine.views();
        let SlotView::Quiz(quiz) = &views[0] else {
            panic!("expected a quiz");
        };
        assert!(quiz.options.iter().all(|o| !o.checked));
        assert!(matches!(views[1], SlotView::Error(_)));
    }
}
