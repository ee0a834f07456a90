use super::*;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderSummary {
    pub epoch: u64,
    pub rendered: usize,
    pub unknown: Vec<String>,
    pub misconfigured: Vec<String>,
}

impl QuizEngine {
    /// Busca los placeholders del documento y monta un quiz en cada uno.
    ///
    /// Cada llamada desmonta todo lo anterior y lo reconstruye: las instancias
    /// viejas se descartan y el documento reemplaza el contenido entero de cada
    /// contenedor, así que volver a llamarla nunca duplica controles ni handlers.
    pub fn discover_and_render<D: Document + ?Sized>(&mut self, doc: &mut D) -> RenderSummary {
        let placeholders = doc.placeholders();

        self.epoch += 1;
        self.slots.clear();

        let mut summary = RenderSummary {
            epoch: self.epoch,
            ..RenderSummary::default()
        };

        for placeholder in placeholders {
            let slot_id = SlotId {
                epoch: self.epoch,
                index: placeholder.index,
            };

            let body = match self.table.lookup(&placeholder.quiz_id) {
                Ok(definition) => {
                    summary.rendered += 1;
                    SlotBody::Quiz(QuizInstance::new(Arc::clone(definition)))
                }
                Err(err) => {
                    log::warn!("Placeholder #{}: {err}", placeholder.index);
                    match &err {
                        QuizError::MalformedDefinition { id, .. } => {
                            summary.misconfigured.push(id.clone())
                        }
                        _ => summary.unknown.push(placeholder.quiz_id.clone()),
                    }
                    SlotBody::Unavailable(err)
                }
            };

            let slot = Slot {
                id: slot_id,
                placeholder,
                body,
            };
            doc.mount(&slot.placeholder, &slot.view());
            self.slots.push(slot);
        }

        log::info!(
            "Rendered {} quizzes (epoch {}, {} unknown, {} misconfigured)",
            summary.rendered,
            summary.epoch,
            summary.unknown.len(),
            summary.misconfigured.len()
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::StaticPage;
    use crate::markup::class;

    const TABLE: &str = r#"
pick_two:
  type: multi
  question: "Which two?"
  options: { A: "a", B: "b", C: "c", D: "d" }
  answers: [B, D]
broken:
  type: single
  options: { A: "a" }
  answer: Z
"#;

    fn engine() -> QuizEngine {
        let table = DefinitionTable::from_yaml(TABLE).expect("fixture");
        QuizEngine::new(Arc::new(table), EngineConfig::default())
    }

    #[test]
    fn unknown_and_broken_placeholders_do_not_affect_others() {
        let config = EngineConfig::default();
        let mut page = StaticPage::parse(
            r#"<div class="quiz" data-id="missing"></div>
<div class="quiz" data-id="pick_two"></div>
<div class="quiz" data-id="broken"></div>"#,
            &config,
        )
        .expect("page");
        let mut engine = engine();

        let summary = engine.discover_and_render(&mut page);
        assert_eq!(summary.rendered, 1);
        assert_eq!(summary.unknown, vec!["missing".to_string()]);
        assert_eq!(summary.misconfigured, vec!["broken".to_string()]);

        let first = page.mounted(0).expect("mounted");
        assert!(first.contains(class::ERROR));
        assert!(first.contains("Quiz &quot;missing&quot; not found."));
        let second = page.mounted(1).expect("mounted");
        assert!(second.contains(class::CHECK_BUTTON));
        assert!(page.mounted(2).expect("mounted").contains("is misconfigured"));
    }

    #[test]
    fn rendering_twice_replaces_instead_of_duplicating() {
        let config = EngineConfig::default();
        let mut page =
            StaticPage::parse(r#"<div class="quiz" data-id="pick_two"></div>"#, &config)
                .expect("page");
        let mut engine = engine();

        let first = engine.discover_and_render(&mut page);
        let old_slot = SlotId {
            epoch: first.epoch,
            index: 0,
        };
        engine
            .on_selection_changed(old_slot, "B", true)
            .expect("select");

        let second = engine.discover_and_render(&mut page);
        assert_eq!(second.epoch, first.epoch + 1);
        assert_eq!(engine.slots().len(), 1);

        let html = page.mounted(0).expect("mounted");
        assert_eq!(html.matches(class::CHECK_BUTTON).count(), 1);
        assert_eq!(html.matches("type=\"checkbox\"").count(), 4);
        assert!(!html.contains("checked"));

        // el slot de la pasada anterior ya no existe
        assert!(matches!(
            engine.on_selection_changed(old_slot, "B", true),
            Err(QuizError::UnknownSlot(_))
        ));
    }
}
