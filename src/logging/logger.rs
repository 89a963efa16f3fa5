use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_FILE_NAME: &str = "auto_equip.log";

/// Colour escapes (`|cAARRGGBB`, `|r`) and hyperlink wrappers (`|H...|h`, `|h`)
static LINK_MARKUP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\|c[0-9a-fA-F]{8}|\|r|\|H[^|]*\|h|\|h").expect("link markup pattern")
});

pub fn init_logger() -> Result<()> {
    let log_path = get_log_path();

    // Create log directory if it doesn't exist
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let log_dir = log_path
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));
    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, LOG_FILE_NAME);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // Set up subscriber with both console and file output
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stdout)
                .with_ansi(true)
                .with_target(false)
        )
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
        )
        .init();

    tracing::info!("Logger initialized, writing to {:?}", log_path);
    Ok(())
}

fn get_log_path() -> PathBuf {
    // Log next to the executable so each character folder keeps its own log
    let exe_dir = match std::env::current_exe() {
        Ok(exe_path) => {
            exe_path.parent()
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| {
                    eprintln!("Warning: Could not get parent directory of executable, using current directory");
                    PathBuf::from(".")
                })
        }
        Err(e) => {
            eprintln!("Warning: Could not get executable path ({}), using current directory", e);
            PathBuf::from(".")
        }
    };

    exe_dir.join(LOG_FILE_NAME)
}

/// Remove in-game colour and hyperlink codes from an item link
pub fn strip_link_markup(text: &str) -> String {
    LINK_MARKUP.replace_all(text, "").to_string()
}
