//! resume-chunk-ranker: pick the resume chunks worth sending to a language model

use clap::Parser;
use log::{error, info};
use resume_chunk_ranker::cli::{self, Cli, Commands, ConfigAction};
use resume_chunk_ranker::config::{ChunkingConfig, Config};
use resume_chunk_ranker::error::{RankerError, Result};
use resume_chunk_ranker::input::InputManager;
use resume_chunk_ranker::output::formatter::save_report_to_file;
use resume_chunk_ranker::output::{ReportGenerator, SelectionMode, SelectionReport};
use resume_chunk_ranker::{ChunkRanker, JobRequirements};
use std::path::{Path, PathBuf};
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, cli.config).await {
        error!("Command failed: {}", e);
        process::exit(if e.is_user_facing() { 2 } else { 1 });
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

async fn run_command(command: Commands, config: Config, config_path: Option<PathBuf>) -> Result<()> {
    match command {
        Commands::Select {
            resume,
            requirements,
            skills,
            verbs,
            min_chars,
            max_chars,
            max_selected,
            output,
            coverage,
            detailed,
            save,
        } => {
            cli::validate_file_extension(&resume, &["txt", "md", "markdown"])
                .map_err(|e| RankerError::InvalidInput(format!("Resume file: {}", e)))?;

            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(RankerError::InvalidInput)?,
                None => config.output.format,
            };

            let settings = ChunkingConfig::new(
                min_chars.unwrap_or(config.chunking.min_chars),
                max_chars.unwrap_or(config.chunking.max_chars),
                max_selected.unwrap_or(config.chunking.max_selected),
            );
            let ranker = ChunkRanker::new(settings, config.scoring.clone())?;

            let mut input_manager = InputManager::new();
            let resume_text = input_manager.extract_text(&resume).await?;

            let mut job = match &requirements {
                Some(path) => input_manager.load_requirements(path).await?,
                None => JobRequirements::default(),
            };
            job.must_have_hard_skills.extend(skills);
            job.action_verbs.extend(verbs);
            let index = job.keyword_index()?;
            if index.keywords().is_empty() && !coverage {
                info!("No job keywords given; ranking by section bonus only");
            }

            let (mode, selection) = if coverage {
                (SelectionMode::Coverage, ranker.cover(&resume_text, &index)?)
            } else {
                (SelectionMode::Relevance, ranker.rank(&resume_text, &index)?)
            };

            let report = SelectionReport::new(
                resume.display().to_string(),
                mode,
                settings,
                index.keywords().len(),
                selection,
            );
            let generator = ReportGenerator::with_options(
                config.output.color_output && save.is_none(),
                detailed || config.output.detailed,
                true,
                true,
            );
            let rendered = generator.generate_report(&report, output_format)?;

            match save {
                Some(path) => {
                    save_report_to_file(&rendered, &path)?;
                    info!("Saved selection to {}", path.display());
                }
                None => println!("{}", rendered),
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                let content = toml::to_string_pretty(&config)?;
                println!("{}", content);
            }

            Some(ConfigAction::Path) => {
                let path = config_path.unwrap_or_else(Config::config_path);
                println!("{}", path.display());
            }

            Some(ConfigAction::Reset) => {
                let default_config = Config::default();
                match &config_path {
                    Some(path) => default_config.save_to(path)?,
                    None => default_config.save()?,
                }
                println!("Configuration reset to defaults");
            }
        },
    }

    Ok(())
}
