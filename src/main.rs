use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use slidedeck::command::{CommandOutcome, EditCommand};
use slidedeck::config::EditorConfig;
use slidedeck::doc::LayoutKind;
use slidedeck::error::DeckError;
use slidedeck::persistence::{FileSink, PresentationSink, SharedStore, export_slides_json, load_saved, spawn_autosave};
use slidedeck::store::PresentationStore;
use tokio::sync::RwLock;
use tracing::{debug, info};


#[derive(Parser, Debug)]
#[command(name = "slidedeck", about = "Create, edit and export presentation documents")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a new presentation file.
    New {
        path: PathBuf,
        #[arg(long)]
        title: Option<String>,
        /// Number of slides to create (at least one).
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
        slides: u16,
        /// Layout applied to every slide.
        #[arg(long, default_value = "title-content")]
        layout: String,
    },
    /// Print a slide summary with resolved header and footer text.
    Show { path: PathBuf },
    /// Run a JSON Lines edit script against a presentation.
    Apply {
        path: PathBuf,
        script: PathBuf,
        /// Write the result here instead of back to `path`.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Export the slide array as JSON.
    Export {
        path: PathBuf,
        /// Output file; stdout when omitted.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), DeckError> {
    tracing_subscriber::fmt::init();
    if let Err(e) = dotenvy::dotenv() {
        debug!(error = %e, "no .env loaded");
    }

    let cli = Cli::parse();
    let config = EditorConfig::from_env();

    match cli.command {
        Command::New { path, title, slides, layout } => {
            run_new(&config, &path, title, slides, LayoutKind::from(layout.as_str())).await
        }
        Command::Show { path } => run_show(&config, &path).await,
        Command::Apply { path, script, out } => run_apply(&config, &path, &script, out).await,
        Command::Export { path, out } => run_export(&path, out).await,
    }
}

async fn open(config: &EditorConfig, path: &Path) -> Result<PresentationStore, DeckError> {
    let saved = load_saved(path).await?;
    Ok(PresentationStore::from_saved(saved, config))
}

async fn run_new(
    config: &EditorConfig,
    path: &Path,
    title: Option<String>,
    slides: u16,
    layout: LayoutKind,
) -> Result<(), DeckError> {
    let mut store = PresentationStore::new(config);
    if let Some(title) = title {
        store.presentation_meta_mut().title = title;
    }
    store.apply_layout(0, layout.clone());
    for _ in 1..slides {
        store.add_slide(layout.clone());
    }

    FileSink::new(path).save(&store.to_saved()).await?;
    println!("created {} ({} slides)", path.display(), store.slide_count());
    Ok(())
}

async fn run_show(config: &EditorConfig, path: &Path) -> Result<(), DeckError> {
    let store = open(config, path).await?;
    let meta = store.presentation_meta();
    let total = store.slide_count();

    println!("{} by {}", meta.title, if meta.author.is_empty() { "unknown" } else { meta.author.as_str() });
    println!("size {}  theme {}  updated {}", meta.slide_size.as_str(), meta.theme_preset, meta.updated_at);
    for (index, slide) in store.slides().iter().enumerate() {
        println!(
            "{:>3}  #{:<5} {:<14} {} elements, {} animations",
            index + 1,
            slide.id.0,
            slide.layout.as_str(),
            slide.elements.len(),
            slide.animations.len()
        );
        let header = meta.header_text(index, total);
        let footer = meta.footer_text(index, total);
        if !header.is_empty() {
            println!("       header: {header}");
        }
        if !footer.is_empty() {
            println!("       footer: {footer}");
        }
    }
    Ok(())
}

async fn run_apply(config: &EditorConfig, path: &Path, script: &Path, out: Option<PathBuf>) -> Result<(), DeckError> {
    let commands = EditCommand::parse_script(&tokio::fs::read_to_string(script).await?)?;
    let store: SharedStore = Arc::new(RwLock::new(open(config, path).await?));
    let sink = Arc::new(FileSink::new(out.unwrap_or_else(|| path.to_path_buf())));
    let autosave = spawn_autosave(store.clone(), sink.clone(), config.autosave_interval);

    let (mut applied, mut created, mut skipped) = (0usize, 0usize, 0usize);
    for command in commands {
        match command.apply(&mut *store.write().await) {
            CommandOutcome::Applied => applied += 1,
            CommandOutcome::Created(id) => {
                debug!(%id, "entity created");
                created += 1;
            }
            CommandOutcome::NoOp => skipped += 1,
        }
    }
    info!(applied, created, skipped, "script finished");

    autosave.shutdown().await?;

    println!("{applied} applied, {created} created, {skipped} no-op -> {}", sink.path().display());
    Ok(())
}

async fn run_export(path: &Path, out: Option<PathBuf>) -> Result<(), DeckError> {
    let saved = load_saved(path).await?;
    let json = export_slides_json(&saved.slides)?;
    match out {
        Some(out) => {
            tokio::fs::write(&out, json).await?;
            println!("exported {} slides to {}", saved.slides.len(), out.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
