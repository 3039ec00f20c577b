use std::{path::PathBuf, sync::Arc};

mod report;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use composer_core::{
    chrome::{JsonFilePreferenceStore, ThemeController},
    config::{load_settings, AppPaths},
    load_thumbnail, AttachmentPreviewManager, AttachmentSource, PathSource,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Headless driver for the chat composer")]
struct Cli {
    #[arg(long)]
    data_dir: Option<PathBuf>,
    #[arg(long)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Select files, load thumbnails and print the preview.
    Preview {
        files: Vec<PathBuf>,
        /// Index to remove after selection; applied in order against the
        /// list as it stands at that point.
        #[arg(long = "remove")]
        remove: Vec<usize>,
        /// Submit the remaining attachments with this text.
        #[arg(long)]
        send: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Print the stored theme, optionally flipping it first.
    Theme {
        #[arg(long)]
        toggle: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut settings = load_settings(cli.config.as_deref());
    if let Some(dir) = cli.data_dir {
        settings.data_dir = Some(dir);
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.log_filter.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Preview {
            files,
            remove,
            send,
            json,
        } => {
            let mut handles: Vec<Arc<dyn AttachmentSource>> = Vec::with_capacity(files.len());
            for path in &files {
                let source = PathSource::open(path)
                    .with_context(|| format!("failed to open {}", path.display()))?;
                handles.push(Arc::new(source));
            }

            let mut manager = AttachmentPreviewManager::new();
            manager.add_files(handles);
            let requests = manager.take_thumbnail_requests();
            for index in remove {
                if manager.remove_file(index).is_none() {
                    tracing::warn!(index, "no attachment at index; ignoring");
                }
            }

            let max = settings.thumbnail_max_dimension;
            let outcomes = futures::future::join_all(
                requests
                    .into_iter()
                    .map(|request| load_thumbnail(request, max)),
            )
            .await;
            for outcome in outcomes {
                manager.apply_thumbnail(outcome);
            }

            let snapshot = manager.render();
            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                print!("{}", report::render_text(&snapshot));
            }

            if let Some(text) = send {
                match manager.submit(&text) {
                    Some(submission) => print!(
                        "{}",
                        report::render_submission(&submission.text, &submission.summaries())
                    ),
                    None => println!("nothing to send"),
                }
            }
        }
        Command::Theme { toggle } => {
            let paths =
                AppPaths::resolve(&settings).context("failed to resolve app data directory")?;
            let mut theme =
                ThemeController::load(JsonFilePreferenceStore::load(&paths.settings_path));
            if toggle {
                theme
                    .toggle()
                    .with_context(|| format!("failed to save {}", paths.settings_path.display()))?;
            }
            println!("theme={}", theme.mode().as_preference());
        }
    }

    Ok(())
}
