use crate::config::EngineConfig;
use crate::error::QuizError;
use crate::markup;
use crate::view_models::SlotView;
use regex::Regex;
use std::ops::Range;

/// Un contenedor del documento anfitrión marcado como quiz.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placeholder {
    /// Posición en orden de documento
    pub index: usize,
    /// Valor del atributo identificador (`data-id`)
    pub quiz_id: String,
}

/// Documento anfitrión donde se montan los quizzes: la página real en el
/// navegador o una página estática en memoria.
pub trait Document {
    /// Placeholders en orden de documento. Empieza una pasada de render nueva.
    fn placeholders(&mut self) -> Vec<Placeholder>;

    /// Sustituye todo el contenido del contenedor por `view`.
    fn mount(&mut self, placeholder: &Placeholder, view: &SlotView);
}

#[derive(Debug)]
struct Span {
    quiz_id: String,
    /// Contenido original entre `<div ...>` y `</div>`
    content: Range<usize>,
}

/// Página HTML/Markdown en memoria. La usan los tests, la vista previa nativa
/// y `--emit` para generar HTML estático.
#[derive(Debug)]
pub struct StaticPage {
    source: String,
    spans: Vec<Span>,
    mounted: Vec<Option<String>>,
}

impl StaticPage {
    pub fn parse(source: impl Into<String>, config: &EngineConfig) -> Result<Self, QuizError> {
        let source = source.into();
        let spans = scan(&source, config)?;
        log::debug!("Found {} quiz placeholders", spans.len());
        Ok(Self {
            mounted: vec![None; spans.len()],
            source,
            spans,
        })
    }

    /// Página sintética con un placeholder por quiz
    pub fn for_quizzes<'a>(
        ids: impl IntoIterator<Item = &'a str>,
        config: &EngineConfig,
    ) -> Result<Self, QuizError> {
        let source = ids
            .into_iter()
            .map(|id| {
                format!(
                    "<div class=\"{}\" {}=\"{}\"></div>\n",
                    markup::escape_html(&config.placeholder_class),
                    config.id_attribute,
                    markup::escape_html(id)
                )
            })
            .collect::<String>();
        Self::parse(source, config)
    }

    /// Navegación en cliente: el documento entero se reemplaza
    pub fn navigate(&mut self, source: impl Into<String>, config: &EngineConfig) -> Result<(), QuizError> {
        *self = Self::parse(source, config)?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn mounted(&self, index: usize) -> Option<&str> {
        self.mounted.get(index).and_then(|m| m.as_deref())
    }

    /// El documento con el HTML montado dentro de cada placeholder
    pub fn to_html(&self) -> String {
        let mut out = String::with_capacity(self.source.len());
        let mut cursor = 0;
        for (span, mounted) in self.spans.iter().zip(&self.mounted) {
            out.push_str(&self.source[cursor..span.content.start]);
            match mounted {
                Some(html) => out.push_str(html),
                None => out.push_str(&self.source[span.content.clone()]),
            }
            cursor = span.content.end;
        }
        out.push_str(&self.source[cursor..]);
        out
    }
}

impl Document for StaticPage {
    fn placeholders(&mut self) -> Vec<Placeholder> {
        self.spans
            .iter()
            .enumerate()
            .map(|(index, span)| Placeholder {
                index,
                quiz_id: span.quiz_id.clone(),
            })
            .collect()
    }

    fn mount(&mut self, placeholder: &Placeholder, view: &SlotView) {
        match self.mounted.get_mut(placeholder.index) {
            Some(slot) => *slot = Some(markup::render_slot(view)),
            None => log::error!("No placeholder at index {}", placeholder.index),
        }
    }
}

fn attribute_pattern(name: &str) -> Result<Regex, QuizError> {
    Ok(Regex::new(&format!(
        r#"(?i)(?:^|\s){}\s*=\s*(?:"([^"]*)"|'([^']*)')"#,
        regex::escape(name)
    ))?)
}

fn attribute(pattern: &Regex, attrs: &str) -> Option<String> {
    let caps = pattern.captures(attrs)?;
    caps.get(1)
        .or_else(|| caps.get(2))
        .map(|m| m.as_str().trim().to_string())
}

/// Inicio del `</div>` que cierra el div abierto justo antes de `from`.
/// Sin cierre, el contenido llega hasta el final del documento.
fn matching_close(div_tag: &Regex, source: &str, from: usize) -> usize {
    let mut depth = 1usize;
    for tag in div_tag.find_iter(&source[from..]) {
        if tag.as_str().starts_with("</") {
            depth -= 1;
            if depth == 0 {
                return from + tag.start();
            }
        } else {
            depth += 1;
        }
    }
    source.len()
}

// El motor es dueño de todo lo que hay dentro del placeholder, incluidos los
// divs anidados; los placeholders dentro de otro no se montan aparte.
fn scan(source: &str, config: &EngineConfig) -> Result<Vec<Span>, QuizError> {
    let open_tag = Regex::new(r"(?i)<div\b([^>]*)>")?;
    let div_tag = Regex::new(r"(?i)<div\b[^>]*>|</div\s*>")?;
    let class_attr = attribute_pattern("class")?;
    let id_attr = attribute_pattern(&config.id_attribute)?;

    let mut spans = Vec::new();
    let mut resume = 0;
    for open in open_tag.captures_iter(source) {
        let (Some(tag), Some(attrs)) = (open.get(0), open.get(1)) else {
            continue;
        };
        if tag.start() < resume {
            continue;
        }

        let is_placeholder = attribute(&class_attr, attrs.as_str())
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == config.placeholder_class));
        if !is_placeholder {
            continue;
        }
        let Some(quiz_id) = attribute(&id_attr, attrs.as_str()) else {
            log::warn!("Quiz placeholder without {} attribute", config.id_attribute);
            continue;
        };

        let end = matching_close(&div_tag, source, tag.end());
        spans.push(Span {
            quiz_id,
            content: tag.end()..end,
        });
        resume = end;
    }
    Ok(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_placeholders_in_markdown_in_document_order() {
        let config = EngineConfig::default();
        let mut page = StaticPage::parse(
            r#"# Futoshiki

<div class="admonition"><div class="quiz" data-id="futoshiki_quiz1"></div></div>

Some text.

<div data-id='futoshiki_quiz2' class="quiz wide"></div>
<div class="quizzes" data-id="not_a_quiz"></div>
<div class="quiz"></div>
"#,
            &config,
        )
        .expect("page");

        let ids: Vec<String> = page.placeholders().into_iter().map(|p| p.quiz_id).collect();
        assert_eq!(ids, ["futoshiki_quiz1", "futoshiki_quiz2"]);
    }

    #[test]
    fn custom_class_and_attribute() {
        let config = EngineConfig {
            placeholder_class: "mcq".into(),
            id_attribute: "data-quiz".into(),
            ..EngineConfig::default()
        };
        let mut page =
            StaticPage::parse(r#"<div class="mcq" data-quiz="q1">loading…</div>"#, &config)
                .expect("page");
        assert_eq!(page.placeholders()[0].quiz_id, "q1");
        // sin montar, el contenido original se conserva
        assert_eq!(page.to_html(), r#"<div class="mcq" data-quiz="q1">loading…</div>"#);
    }

    #[test]
    fn nested_divs_belong_to_the_placeholder() {
        let config = EngineConfig::default();
        let mut page = StaticPage::parse(
            r#"<main><div class="quiz" data-id="futoshiki_quiz2"><div class="loading">Loading…</div></div></main>"#,
            &config,
        )
        .expect("page");
        let placeholder = page.placeholders().remove(0);
        page.mounted[placeholder.index] = Some("<p>quiz</p>".into());

        let html = page.to_html();
        assert_eq!(
            html,
            r#"<main><div class="quiz" data-id="futoshiki_quiz2"><p>quiz</p></div></main>"#
        );
        assert_eq!(html.matches("<div").count(), html.matches("</div>").count());
    }

    #[test]
    fn unclosed_placeholder_runs_to_end_of_document() {
        let config = EngineConfig::default();
        let page = StaticPage::parse(r#"<div class="quiz" data-id="a"><div>x</div>"#, &config)
            .expect("page");
        assert_eq!(page.len(), 1);
        assert_eq!(&page.source[page.spans[0].content.clone()], "<div>x</div>");
    }

    #[test]
    fn synthetic_page_has_one_placeholder_per_quiz() {
        let config = EngineConfig::default();
        let page = StaticPage::for_quizzes(["a", "b", "c"], &config).expect("page");
        assert_eq!(page.len(), 3);
        assert!(page.mounted(0).is_none());
    }

    #[test]
    fn navigate_forgets_mounted_content() {
        let config = EngineConfig::default();
        let mut page = StaticPage::for_quizzes(["a"], &config).expect("page");
        page.mounted[0] = Some("<p>old</p>".into());
        page.navigate(r#"<p>new page</p><div class="quiz" data-id="b"></div>"#, &config)
            .expect("navigate");
        assert_eq!(page.len(), 1);
        assert!(page.mounted(0).is_none());
        assert!(page.to_html().starts_with("<p>new page</p>"));
    }
}
