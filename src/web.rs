//! Entrada WASM: monta los quizzes en la página real del sitio.

use crate::app::{CooldownTicket, QuizEngine, SlotId, SubmitOutcome};
use crate::config::EngineConfig;
use crate::data::{DefinitionTable, read_definitions_embedded};
use crate::document::{Document, Placeholder};
use crate::markup::{self, class};
use crate::view_models::SlotView;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event, HtmlButtonElement, HtmlInputElement};

const COOLDOWN_META: &str = "meta[name='docs-quiz-cooldown-ms']";
/// Evento del tema Material al cambiar de página sin recargar
const CONTENT_SWITCH_EVENT: &str = "DOMContentSwitch";

type SharedEngine = Rc<RefCell<QuizEngine>>;

/// Handlers de un slot montado. Se sueltan al volver a montar la página.
struct SlotListeners {
    _change: Closure<dyn FnMut(Event)>,
    _click: Closure<dyn FnMut(Event)>,
}

struct PageDocument {
    document: web_sys::Document,
    config: EngineConfig,
    engine: SharedEngine,
    containers: Vec<Element>,
    listeners: Vec<SlotListeners>,
}

impl Document for PageDocument {
    fn placeholders(&mut self) -> Vec<Placeholder> {
        // pasada nueva: primero se vacían los contenedores anteriores, también
        // los que ya no son placeholders, y después se sueltan sus handlers
        for container in self.containers.drain(..) {
            container.set_inner_html("");
        }
        self.listeners.clear();

        let nodes = match self
            .document
            .query_selector_all(&self.config.placeholder_selector())
        {
            Ok(nodes) => nodes,
            Err(err) => {
                log::error!("Placeholder query failed: {err:?}");
                return Vec::new();
            }
        };

        let mut placeholders = Vec::new();
        for i in 0..nodes.length() {
            let Some(element) = nodes.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            placeholders.push(Placeholder {
                index: self.containers.len(),
                quiz_id: element
                    .get_attribute(&self.config.id_attribute)
                    .unwrap_or_default()
                    .trim()
                    .to_string(),
            });
            self.containers.push(element);
        }
        placeholders
    }

    fn mount(&mut self, placeholder: &Placeholder, view: &SlotView) {
        let Some(container) = self.containers.get(placeholder.index) else {
            log::error!("No container for placeholder #{}", placeholder.index);
            return;
        };

        let root = match self.document.create_element("div") {
            Ok(root) => root,
            Err(err) => {
                log::error!("Could not create quiz root: {err:?}");
                return;
            }
        };
        root.set_class_name(class::BODY);
        if let Err(err) = root.set_attribute("data-slot", &placeholder.index.to_string()) {
            log::error!("Could not tag quiz root #{}: {err:?}", placeholder.index);
        }
        root.set_inner_html(&markup::render_slot_inner(view));

        // reemplazo completo: la raíz vieja se va con sus handlers
        container.set_inner_html("");
        if let Err(err) = container.append_child(&root) {
            log::error!("Could not mount quiz root: {err:?}");
            return;
        }

        if let SlotView::Quiz(_) = view {
            match self.wire(&root, view.slot()) {
                Ok(listeners) => self.listeners.push(listeners),
                Err(err) => log::error!("Could not attach quiz handlers: {err:?}"),
            }
        }
    }
}

impl PageDocument {
    fn wire(&self, root: &Element, slot: SlotId) -> Result<SlotListeners, JsValue> {
        let engine = Rc::clone(&self.engine);
        let paint_root = root.clone();
        let change = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let Some(input) = event
                .target()
                .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
            else {
                return;
            };
            let result = engine
                .borrow_mut()
                .on_selection_changed(slot, &input.value(), input.checked());
            match result {
                Ok(view) => paint(&paint_root, &view),
                Err(err) => log::error!("{err}"),
            }
        });
        root.add_event_listener_with_callback("change", change.as_ref().unchecked_ref())?;

        let engine = Rc::clone(&self.engine);
        let paint_root = root.clone();
        let cooldown_ms = self.config.cooldown_ms;
        let click = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let on_button = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|el| el.closest(&format!(".{}", class::CHECK_BUTTON)).ok().flatten())
                .is_some();
            if !on_button {
                return;
            }

            let outcome = engine.borrow_mut().submit(slot);
            match outcome {
                Ok(SubmitOutcome::Graded { ticket, .. }) => {
                    schedule_cooldown(Rc::clone(&engine), paint_root.clone(), ticket, cooldown_ms)
                }
                Ok(_) => {}
                Err(err) => log::error!("{err}"),
            }
            let view = engine.borrow().view(slot);
            if let Ok(view) = view {
                paint(&paint_root, &view);
            }
        });
        root.add_event_listener_with_callback("click", click.as_ref().unchecked_ref())?;

        Ok(SlotListeners {
            _change: change,
            _click: click,
        })
    }
}

fn schedule_cooldown(engine: SharedEngine, root: Element, ticket: CooldownTicket, cooldown_ms: u64) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let callback = Closure::once_into_js(move || {
        let view = engine.borrow_mut().cooldown_elapsed(ticket);
        if let Some(view) = view {
            paint(&root, &view);
        }
    });
    let timeout = i32::try_from(cooldown_ms).unwrap_or(i32::MAX);
    if let Err(err) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        callback.unchecked_ref(),
        timeout,
    ) {
        log::error!("Could not schedule cooldown: {err:?}");
    }
}

/// Actualiza la raíz ya montada con la vista nueva sin recrear los inputs
fn paint(root: &Element, view: &SlotView) {
    let SlotView::Quiz(quiz) = view else {
        return;
    };

    if let Ok(inputs) = root.query_selector_all("input") {
        for i in 0..inputs.length() {
            if let Some(input) = inputs.item(i).and_then(|n| n.dyn_into::<HtmlInputElement>().ok()) {
                let value = input.value();
                let checked = quiz
                    .options
                    .iter()
                    .any(|o| o.checked && o.label.as_str() == value);
                input.set_checked(checked);
            }
        }
    }

    if let Some(button) = root
        .query_selector(&format!(".{}", class::CHECK_BUTTON))
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok())
    {
        button.set_disabled(!quiz.submit.enabled);
        button.set_text_content(Some(quiz.submit.label()));
    }

    if let Some(result) = root
        .query_selector(&format!(".{}", class::RESULT))
        .ok()
        .flatten()
    {
        result.set_class_name(&markup::result_class(&quiz.result));
        result.set_text_content(Some(quiz.result.message()));
    }
}

fn meta_content(document: &web_sys::Document, selector: &str) -> Option<String> {
    document
        .query_selector(selector)
        .ok()??
        .get_attribute("content")
}

fn render_page(engine: &SharedEngine, page: &Rc<RefCell<PageDocument>>) {
    let mut page = page.borrow_mut();
    engine.borrow_mut().discover_and_render(&mut *page);
}

fn boot() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let config = EngineConfig::default()
        .with_cooldown_override(meta_content(&document, COOLDOWN_META).as_deref());
    let table = read_definitions_embedded().unwrap_or_else(|err| {
        log::error!("Quiz definitions unavailable: {err}");
        DefinitionTable::default()
    });

    let engine: SharedEngine = Rc::new(RefCell::new(QuizEngine::new(Arc::new(table), config.clone())));
    let page = Rc::new(RefCell::new(PageDocument {
        document: document.clone(),
        config,
        engine: Rc::clone(&engine),
        containers: Vec::new(),
        listeners: Vec::new(),
    }));

    if document.ready_state() == "loading" {
        let (engine, page) = (Rc::clone(&engine), Rc::clone(&page));
        let on_ready = Closure::<dyn FnMut()>::new(move || render_page(&engine, &page));
        document.add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())?;
        // vive lo mismo que la página
        on_ready.forget();
    } else {
        render_page(&engine, &page);
    }

    let on_switch = Closure::<dyn FnMut()>::new(move || render_page(&engine, &page));
    document.add_event_listener_with_callback(CONTENT_SWITCH_EVENT, on_switch.as_ref().unchecked_ref())?;
    on_switch.forget();

    Ok(())
}

#[wasm_bindgen(start)]
pub fn start() {
    // Mensajes de pánico en la consola del navegador
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    if let Err(err) = boot() {
        log::error!("docs_quiz failed to start: {err:?}");
    }
}
