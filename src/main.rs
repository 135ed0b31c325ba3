//! ATS analyzer: submit a resume and job description for ATS analysis

use ats_analyzer::cli::{self, Cli, Commands, ConfigAction};
use ats_analyzer::client::{AnalysisResponse, HttpTransport};
use ats_analyzer::config::{Config, OutputFormat};
use ats_analyzer::controller::AnalyzeController;
use ats_analyzer::error::{AtsError, Result};
use ats_analyzer::output::formatter::{resolve_save_path, save_report_to_file};
use ats_analyzer::output::{ConsoleNotifier, ReportContext, ReportGenerator, SpinnerControl};
use ats_analyzer::report::{AnalysisReport, ReportInterpreter};
use clap::Parser;
use log::{error, info};
use std::path::{Path, PathBuf};
use std::process;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);

    // Load configuration
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, &config_path, cli.verbose).await {
        // Submission errors were already shown by the notifier
        if !e.is_submission_error() {
            error!("Command failed: {}", e);
        }
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: &Path, verbose: bool) -> Result<()> {
    match command {
        Commands::Analyze {
            resume,
            job,
            job_text,
            content_type,
            endpoint,
            output,
            detailed,
            save,
        } => {
            let format = resolve_format(output.as_deref(), &config)?;
            let mut output_config = config.output.clone();
            output_config.detailed |= detailed;
            if !output_config.color_output {
                colored::control::set_override(false);
            }

            let endpoint = endpoint.unwrap_or_else(|| config.endpoint.url.clone());
            info!("Using analysis endpoint {}", endpoint);
            let transport = HttpTransport::new(endpoint, config.endpoint.timeout())?;

            let control = match format {
                OutputFormat::Console => SpinnerControl::new(),
                _ => SpinnerControl::hidden(),
            };
            let controller = AnalyzeController::new(
                transport,
                control,
                ConsoleNotifier::new(verbose),
                config.upload.max_file_bytes,
            );

            controller.select_path(&resume, content_type.as_deref()).await?;
            let resume_name = controller
                .selected_file()
                .map(|file| file.name().to_string())
                .unwrap_or_default();

            let job_description = read_job_description(job.as_deref(), job_text).await?;
            let outcome = controller.submit(&job_description).await?;

            let mut context = ReportContext::new(Some(resume_name.clone()));
            context.parsed_resume = outcome.parsed_resume;
            context.parsed_job_description = outcome.parsed_job_description;

            let generator = ReportGenerator::from_config(&output_config);
            emit_report(&generator, &outcome.report, &context, format, save, &resume_name)?;
        }

        Commands::Render { input, output, save } => {
            let format = resolve_format(output.as_deref(), &config)?;
            if !config.output.color_output {
                colored::control::set_override(false);
            }

            let content = tokio::fs::read_to_string(&input).await?;
            let (raw, parsed_resume, parsed_job_description) =
                match serde_json::from_str::<AnalysisResponse>(&content) {
                    Ok(response) => (
                        response.ats_result,
                        response.parsed_resume,
                        response.parsed_job_description,
                    ),
                    Err(_) => (content, None, None),
                };

            let report = ReportInterpreter::new().interpret(&raw);
            let source_name = input
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();

            let mut context = ReportContext::new(None);
            context.parsed_resume = parsed_resume;
            context.parsed_job_description = parsed_job_description;

            let generator = ReportGenerator::from_config(&config.output);
            emit_report(&generator, &report, &context, format, save, &source_name)?;
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration\n");
                println!("Endpoint: {}", config.endpoint.url);
                match config.endpoint.timeout() {
                    Some(timeout) => println!("Timeout: {}s", timeout.as_secs()),
                    None => println!("Timeout: none"),
                }
                println!("Max upload size: {} bytes", config.upload.max_file_bytes);
                println!("Output format: {:?}", config.output.format);
                println!("Colors: {}", config.output.color_output);
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

fn resolve_format(requested: Option<&str>, config: &Config) -> Result<OutputFormat> {
    match requested {
        Some(format) => cli::parse_output_format(format).map_err(AtsError::InvalidInput),
        None => Ok(config.output.format),
    }
}

/// Job description from a file or inline text. Missing input becomes an
/// empty description, which the controller rejects.
async fn read_job_description(job: Option<&Path>, job_text: Option<String>) -> Result<String> {
    match (job, job_text) {
        (Some(path), _) => {
            cli::validate_file_extension(path, &["txt", "md"])
                .map_err(|e| AtsError::InvalidInput(format!("Job description file: {}", e)))?;
            Ok(tokio::fs::read_to_string(path).await?)
        }
        (None, Some(text)) => Ok(text),
        (None, None) => Ok(String::new()),
    }
}

fn emit_report(
    generator: &ReportGenerator,
    report: &AnalysisReport,
    context: &ReportContext,
    format: OutputFormat,
    save: Option<PathBuf>,
    resume_name: &str,
) -> Result<()> {
    if save.is_some() {
        // Keep escape codes out of saved files
        colored::control::set_override(false);
    }
    let rendered = generator.generate_report(report, context, format)?;

    match save {
        Some(target) => {
            let path = resolve_save_path(&target, format, resume_name);
            save_report_to_file(&rendered, &path)?;
            println!("💾 Report saved to {}", path.display());
        }
        None => println!("{}", rendered),
    }

    Ok(())
}
