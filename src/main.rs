// Terminal viewer entry point.
// - Parses the CLI, installs file logging, loads config and the JSON document.
// - Runs the draw/poll loop and hands key, mouse and resize events to `App`.
use std::{io, path::PathBuf, time::Duration};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
};
use vispanel::{
    app::{App, Flow},
    config::{self, PanelConfig},
    logging, ui,
    visualizer::VisualizerRegistry,
};

/// Show a JSON document as a tabbed visual panel
#[derive(Parser, Debug)]
#[command(name = "vispanel", version, about = "Show a JSON document as a tabbed visual panel")]
struct Cli {
    /// JSON document to show (object, array of objects, or anything else for an empty panel)
    #[arg(value_name = "DOCUMENT")]
    document: Option<PathBuf>,

    /// YAML config file (defaults to ~/.config/vispanel/config.yaml when present)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Directory for vispanel.log
    #[arg(long, value_name = "PATH")]
    log_dir: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let _log_guard = match cli.log_dir.clone().or_else(config::default_logs_dir) {
        Some(dir) => match logging::init(&dir) {
            Ok(guard) => Some(guard),
            Err(err) => {
                eprintln!("warning: file logging disabled ({}): {err}", dir.display());
                None
            }
        },
        None => None,
    };
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "vispanel starting");

    let config = PanelConfig::load_or_default(cli.config.as_deref()).context("loading config")?;
    let app = App::new(cli.document.clone(), config, VisualizerRegistry::with_defaults())
        .context("loading document")?;

    let mut terminal = ratatui::init();
    let result = execute!(io::stdout(), EnableMouseCapture)
        .map_err(anyhow::Error::from)
        .and_then(|()| run(&mut terminal, app));
    if let Err(err) = execute!(io::stdout(), DisableMouseCapture) {
        tracing::warn!(error = %err, "Failed to disable mouse capture");
    }
    ratatui::restore();

    if let Err(err) = &result {
        tracing::error!(error = %err, "vispanel exited with an error");
    }
    result
}

fn run(terminal: &mut ratatui::DefaultTerminal, mut app: App) -> anyhow::Result<()> {
    loop {
        terminal.draw(|frame| ui::render(frame, &app))?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        match event::read()? {
            Event::Key(key) => {
                if app.handle_key(key) == Flow::Quit {
                    tracing::info!("Quit requested");
                    return Ok(());
                }
            }
            Event::Mouse(mouse) => app.handle_mouse(mouse),
            Event::Resize(width, height) => {
                tracing::debug!(width, height, "Terminal resized");
                app.on_resize();
            }
            _ => {}
        }
    }
}
