#[cfg(not(target_arch = "wasm32"))]
mod cli;

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    use clap::Parser;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = cli::Cli::parse();
    match native::run(cli) {
        Ok(code) => code,
        Err(err) => {
            log::error!("{err}");
            std::process::ExitCode::FAILURE
        }
    }
}

// En WASM la entrada es `web::start`
#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use crate::cli::Cli;
    use docs_quiz::QuizEngine;
    use docs_quiz::config::EngineConfig;
    use docs_quiz::data::{
        DefinitionTable, read_definitions_embedded, read_definitions_embedded_strict,
    };
    use docs_quiz::document::StaticPage;
    use docs_quiz::error::QuizError;
    use docs_quiz::ui::PreviewApp;
    use std::process::ExitCode;
    use std::sync::Arc;

    pub fn run(cli: Cli) -> Result<ExitCode, QuizError> {
        let mut config = match &cli.config {
            Some(path) => EngineConfig::from_file(path)?,
            None => EngineConfig::default(),
        };
        if let Some(ms) = cli.cooldown_ms {
            config.cooldown_ms = ms;
        }

        if cli.check {
            return check(&cli);
        }

        let table = load_table(&cli, config.strict_definitions)?;

        let (page, title) = match &cli.page {
            Some(path) => (
                StaticPage::parse(std::fs::read_to_string(path)?, &config)?,
                path.display().to_string(),
            ),
            None => (
                StaticPage::for_quizzes(table.ids(), &config)?,
                "All quizzes".to_string(),
            ),
        };
        let engine = QuizEngine::new(Arc::new(table), config);

        if let Some(out) = &cli.emit {
            let mut engine = engine;
            let mut page = page;
            engine.discover_and_render(&mut page);
            std::fs::write(out, page.to_html())?;
            log::info!("Wrote {}", out.display());
            return Ok(ExitCode::SUCCESS);
        }

        let options = eframe::NativeOptions::default();
        let result = eframe::run_native(
            "docs_quiz",
            options,
            Box::new(move |_cc| Ok(Box::new(PreviewApp::new(engine, page, title)))),
        );
        match result {
            Ok(()) => Ok(ExitCode::SUCCESS),
            Err(err) => {
                log::error!("Preview window failed: {err}");
                Ok(ExitCode::FAILURE)
            }
        }
    }

    fn load_table(cli: &Cli, strict: bool) -> Result<DefinitionTable, QuizError> {
        match &cli.definitions {
            Some(path) => DefinitionTable::from_file(path, strict),
            None if strict => read_definitions_embedded_strict(),
            None => read_definitions_embedded(),
        }
    }

    /// Lista todos los defectos; código 1 si hay alguno
    fn check(cli: &Cli) -> Result<ExitCode, QuizError> {
        let table = load_table(cli, false)?;
        let defects: Vec<_> = table.defects().collect();
        if defects.is_empty() {
            println!("{} quiz definitions OK", table.len());
            return Ok(ExitCode::SUCCESS);
        }
        for (id, err) in &defects {
            println!("{id}: {err}");
        }
        println!("{} of {} definitions rejected", defects.len(), defects.len() + table.len());
        Ok(ExitCode::FAILURE)
    }
}
