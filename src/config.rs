use crate::error::QuizError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_COOLDOWN_MS: u64 = 1000;
pub const COOLDOWN_ENV: &str = "DOCS_QUIZ_COOLDOWN_MS";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Tiempo que el botón queda bloqueado ("Checking…") tras corregir
    pub cooldown_ms: u64,
    /// Clase CSS que marca un placeholder de quiz
    pub placeholder_class: String,
    /// Atributo con la clave del quiz
    pub id_attribute: String,
    /// Si es true, cualquier definición defectuosa aborta la carga
    pub strict_definitions: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cooldown_ms: DEFAULT_COOLDOWN_MS,
            placeholder_class: "quiz".into(),
            id_attribute: "data-id".into(),
            strict_definitions: false,
        }
    }
}

impl EngineConfig {
    pub fn from_yaml(source: &str) -> Result<Self, QuizError> {
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, QuizError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_yaml(&source)
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }

    /// Aplica un valor de cooldown que viene de fuera (variable de entorno, meta tag).
    /// Los valores vacíos o no numéricos se ignoran.
    pub fn with_cooldown_override(mut self, raw: Option<&str>) -> Self {
        if let Some(value) = raw.map(str::trim).filter(|v| !v.is_empty()) {
            match value.parse::<u64>() {
                Ok(ms) => self.cooldown_ms = ms,
                Err(_) => log::warn!("Ignoring invalid cooldown value {value:?}"),
            }
        }
        self
    }

    /// Selector CSS de los placeholders, p. ej. `.quiz[data-id]`
    pub fn placeholder_selector(&self) -> String {
        format!(".{}[{}]", self.placeholder_class, self.id_attribute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_site_markup() {
        let config = EngineConfig::default();
        assert_eq!(config.cooldown(), Duration::from_millis(1000));
        assert_eq!(config.placeholder_selector(), ".quiz[data-id]");
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config = EngineConfig::from_yaml("cooldown_ms: 1500\n").expect("yaml ok");
        assert_eq!(config.cooldown_ms, 1500);
        assert_eq!(config.placeholder_class, "quiz");
        assert!(!config.strict_definitions);
    }

    #[test]
    fn cooldown_override_ignores_garbage() {
        let config = EngineConfig::default().with_cooldown_override(Some(" 250 "));
        assert_eq!(config.cooldown_ms, 250);
        let config = config.with_cooldown_override(Some("soon"));
        assert_eq!(config.cooldown_ms, 250);
        let config = config.with_cooldown_override(None);
        assert_eq!(config.cooldown_ms, 250);
    }
}
