use clap::Parser;
use docs_quiz::config::COOLDOWN_ENV;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Preview and check the quizzes of the documentation site", long_about = None)]
pub struct Cli {
    /// YAML file with the quiz definitions (defaults to the embedded table)
    #[arg(short, long)]
    pub definitions: Option<PathBuf>,
    /// HTML or Markdown page whose quiz placeholders are rendered
    #[arg(short, long)]
    pub page: Option<PathBuf>,
    /// YAML file with the engine configuration
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Cooldown after each check, in milliseconds
    #[arg(long, env = COOLDOWN_ENV)]
    pub cooldown_ms: Option<u64>,
    /// Validate the definitions and exit
    #[arg(long)]
    pub check: bool,
    /// Write the rendered page as static HTML instead of opening a window
    #[arg(long, value_name = "FILE")]
    pub emit: Option<PathBuf>,
}
