//! Resume matcher: score a resume against a job description

use clap::Parser;
use log::{error, info, warn};
use resume_matcher::cli::{self, Cli, Commands, ConfigAction, InputSource};
use resume_matcher::config::Config;
use resume_matcher::error::{MatcherError, Result};
use resume_matcher::input::InputManager;
use resume_matcher::output::{formatter_for, save_report, MatchReport};
use resume_matcher::processing::embeddings::Model2VecEncoder;
use resume_matcher::processing::sanitizer::truncate;
use resume_matcher::{KeywordAnalyzer, MatchEngine};
use std::path::Path;
use std::process;
use std::sync::Arc;
use tokio::io::AsyncReadExt;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match load_config(&config_path, cli.config.is_some()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, &config_path).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn load_config(path: &Path, explicit: bool) -> Result<Config> {
    if explicit {
        Config::load_from(path)
    } else {
        Config::load()
    }
}

async fn run_command(command: Commands, mut config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Match {
            resume,
            job,
            resume_text,
            job_text,
            max_length,
            suggestions,
            output,
            save,
            detailed,
            highlights,
        } => {
            let resume = cli::input_source(resume, resume_text, "resume").map_err(MatcherError::InvalidInput)?;
            let job = cli::input_source(job, job_text, "job description").map_err(MatcherError::InvalidInput)?;

            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(MatcherError::InvalidInput)?,
                None => config.output.format,
            };

            if let Some(max_length) = max_length {
                config.matching.max_text_length = max_length;
            }
            if let Some(suggestions) = suggestions {
                config.matching.max_suggestions = suggestions;
            }
            config.validate()?;

            let mut input_manager = InputManager::new().with_max_pdf_bytes(config.matching.max_pdf_bytes);
            let resume_content = read_source(&mut input_manager, &resume).await?;
            let job_content = read_source(&mut input_manager, &job).await?;

            let encoder = Arc::new(Model2VecEncoder::load(&config.embedding_model_location())?);
            let engine = MatchEngine::from_config(encoder, &config);

            info!("Matching {} against {}", resume.label(), job.label());
            let analysis = engine.analyze(&resume_content, &job_content)?;
            let report = MatchReport::new(analysis, &resume.label(), &job.label());

            let formatter = formatter_for(
                output_format,
                config.output.color_output && save.is_none(),
                detailed,
                highlights || config.output.show_highlights,
            );
            let rendered = formatter.format_report(&report)?;

            match save {
                Some(path) => {
                    save_report(&rendered, &path)?;
                    println!("✅ Report saved to {}", path.display());
                }
                None => println!("{}", rendered),
            }
        }

        Commands::Keywords { file, important } => {
            let mut input_manager = InputManager::new().with_max_pdf_bytes(config.matching.max_pdf_bytes);
            let text = input_manager.extract_text(&file).await?;
            let truncated = truncate(&text, config.matching.max_text_length);
            if truncated.len() < text.len() {
                warn!(
                    "{} exceeds {} characters and was truncated",
                    file.display(),
                    config.matching.max_text_length
                );
            }

            let analyzer = KeywordAnalyzer::from_config(&config);

            let keywords = analyzer.keywords(truncated);
            println!("🔤 {} keywords in {}", keywords.len(), file.display());
            for keyword in &keywords {
                println!("  • {}", keyword);
            }

            if important {
                let important_terms = analyzer.important_terms(truncated);
                println!("\n⭐ {} important terms", important_terms.len());
                for term in &important_terms {
                    println!("  • {}", term);
                }
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration ({})\n", config_path.display());
                let content = toml::to_string_pretty(&config)
                    .map_err(|e| MatcherError::Configuration(format!("Failed to serialize config: {}", e)))?;
                println!("{}", content);
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                Config::default().save_to(config_path)?;
                println!("✅ Configuration reset successfully!");
            }

            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
            }
        },
    }

    Ok(())
}

async fn read_source(input_manager: &mut InputManager, source: &InputSource) -> Result<String> {
    match source {
        InputSource::File(path) if path.as_os_str() == "-" => {
            let mut text = String::new();
            tokio::io::stdin().read_to_string(&mut text).await?;
            Ok(text)
        }
        InputSource::File(path) => input_manager.extract_text(path).await,
        InputSource::Inline(text) => Ok(text.clone()),
    }
}
