use std::fs::File;
use std::path::PathBuf;

use clap::Parser;
use simplelog::{ConfigBuilder, WriteLogger};

use study_assistant::core::config::{self, AssistantConfig, CliOverrides, LoadedConfig, Notice};
use study_assistant::tui;

#[derive(Parser)]
#[command(name = "study-assistant", about = "AI study assistant for students")]
struct Args {
    /// Read configuration from this file instead of ~/.study-assistant/config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the log here (overrides STUDY_ASSISTANT_LOG and the config file)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    debug: bool,
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let loaded = match &args.config {
        Some(path) => config::load_config_from(path, false),
        None => config::load_config(),
    };
    let LoadedConfig {
        config: file_config,
        mut notices,
    } = loaded.unwrap_or_else(|e| LoadedConfig {
        config: AssistantConfig::default(),
        notices: vec![Notice {
            level: log::Level::Warn,
            message: format!("Ignoring config file: {e}"),
        }],
    });
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            log_file: args.log_file,
            debug: args.debug,
        },
        &mut notices,
    );

    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    match File::create(&resolved.log_file) {
        Ok(log_file) => {
            let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
        }
        Err(e) => eprintln!(
            "Cannot open log file {}: {e}",
            resolved.log_file.display()
        ),
    }
    for notice in &notices {
        notice.log();
    }

    log::info!(
        "Study assistant starting up (profile: {}, history preview: {})",
        resolved.email,
        resolved.history_preview
    );

    tui::run(resolved)
}
