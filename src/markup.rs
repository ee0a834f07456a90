//! HTML de los quizzes montados.
//!
//! Las clases de `class` son el contrato con la hoja de estilos del sitio:
//! el motor no sabe nada de colores ni tipografías.

use crate::view_models::{ErrorView, QuizView, ResultView, SlotView};

pub mod class {
    pub const BODY: &str = "quiz-body";
    pub const INSTRUCTION: &str = "quiz-instruction";
    pub const PROMPT: &str = "quiz-question";
    pub const OPTION: &str = "quiz-option";
    pub const CHECK_BUTTON: &str = "quiz-check-btn";
    pub const RESULT: &str = "quiz-result";
    pub const ERROR: &str = "quiz-error";
    pub const VISIBLE: &str = "visible";
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// `quiz-result`, más el modificador de estado y `visible` si hay mensaje
pub fn result_class(result: &ResultView) -> String {
    match result.modifier() {
        Some(modifier) => format!("{} {modifier} {}", class::RESULT, class::VISIBLE),
        None => class::RESULT.to_string(),
    }
}

/// Contenedor raíz completo (lo que se guarda dentro del placeholder)
pub fn render_slot(view: &SlotView) -> String {
    format!(
        "<div class=\"{}\" data-slot=\"{}\">{}</div>",
        class::BODY,
        view.slot().index,
        render_slot_inner(view)
    )
}

/// Sólo el contenido de la raíz; el navegador crea la raíz él mismo para colgarle los handlers
pub fn render_slot_inner(view: &SlotView) -> String {
    match view {
        SlotView::Quiz(quiz) => render_quiz(quiz),
        SlotView::Error(error) => render_error(error),
    }
}

fn render_error(view: &ErrorView) -> String {
    format!(
        "<p class=\"{}\">{}</p>",
        class::ERROR,
        escape_html(&view.message)
    )
}

fn render_quiz(view: &QuizView) -> String {
    let mut html = String::new();
    let name = escape_html(&view.input_name());

    html.push_str(&format!(
        "<p class=\"{}\">{}</p>",
        class::INSTRUCTION,
        view.instruction
    ));
    if !view.prompt.is_empty() {
        html.push_str(&format!(
            "<p class=\"{}\">{}</p>",
            class::PROMPT,
            escape_html(&view.prompt)
        ));
    }

    for option in &view.options {
        let label = escape_html(option.label.as_str());
        html.push_str(&format!(
            "<label class=\"{}\"><input type=\"{}\" name=\"{name}\" value=\"{label}\"{}> {}</label>",
            class::OPTION,
            view.input_type(),
            if option.checked { " checked" } else { "" },
            escape_html(&option.text)
        ));
    }

    html.push_str(&format!(
        "<button type=\"button\" class=\"{}\"{}>{}</button>",
        class::CHECK_BUTTON,
        if view.submit.enabled { "" } else { " disabled" },
        view.submit.label()
    ));
    html.push_str(&format!(
        "<p class=\"{}\">{}</p>",
        result_class(&view.result),
        escape_html(view.result.message())
    ));
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::SlotId;
    use crate::grading::Verdict;
    use crate::model::{Label, QuizKind};
    use crate::view_models::{OptionView, SubmitView};

    fn view() -> QuizView {
        QuizView {
            slot: SlotId { epoch: 1, index: 3 },
            quiz_id: "q".into(),
            kind: QuizKind::Single,
            instruction: QuizKind::Single.instruction(),
            prompt: "Is a < b?".into(),
            options: vec![
                OptionView {
                    label: Label::new("A"),
                    text: "yes".into(),
                    checked: true,
                },
                OptionView {
                    label: Label::new("B"),
                    text: "no".into(),
                    checked: false,
                },
            ],
            submit: SubmitView {
                enabled: true,
                cooling_down: false,
            },
            result: ResultView::Hidden,
        }
    }

    #[test]
    fn renders_radio_group_with_escaped_text() {
        let html = render_slot(&SlotView::Quiz(view()));
        assert!(html.starts_with("<div class=\"quiz-body\" data-slot=\"3\">"));
        assert!(html.contains("<p class=\"quiz-question\">Is a &lt; b?</p>"));
        assert_eq!(html.matches("type=\"radio\" name=\"q-3\"").count(), 2);
        assert!(html.contains("value=\"A\" checked>"));
        assert!(html.contains("value=\"B\">"));
        assert!(html.contains("<button type=\"button\" class=\"quiz-check-btn\">Check answer</button>"));
        assert!(html.contains("<p class=\"quiz-result\"></p>"));
    }

    #[test]
    fn cooling_down_button_is_disabled() {
        let mut v = view();
        v.submit = SubmitView {
            enabled: false,
            cooling_down: true,
        };
        v.result = ResultView::Graded {
            verdict: Verdict::Correct,
            message: "✅ Correct!".into(),
        };
        let html = render_slot_inner(&SlotView::Quiz(v));
        assert!(html.contains("class=\"quiz-check-btn\" disabled>Checking…</button>"));
        assert!(html.contains("<p class=\"quiz-result correct visible\">✅ Correct!</p>"));
    }

    #[test]
    fn empty_prompt_is_omitted() {
        let mut v = view();
        v.prompt.clear();
        let html = render_slot_inner(&SlotView::Quiz(v));
        assert!(!html.contains(class::PROMPT));
    }

    #[test]
    fn neutral_result_class() {
        assert_eq!(
            result_class(&ResultView::Neutral("⚠️ Please select the best answer.")),
            "quiz-result neutral visible"
        );
    }
}
