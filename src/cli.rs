use std::{io, path::PathBuf};

use clap::ArgAction;
use roster::{storage::load_or_empty, terminal::Terminal, Config, Editor, JsonStore};

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// The configuration file to use (defaults to ./roster.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// The JSON file people are stored in (overrides the configuration)
    #[arg(short, long)]
    file: Option<PathBuf>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let mut config = Config::discover(self.config.as_deref()).map_err(anyhow::Error::msg)?;
        if let Some(file) = self.file {
            config.set_data_file(file);
        }

        let mut console = Terminal::stdio();
        let store = JsonStore::new(config.data_file().to_path_buf());
        let directory = load_or_empty(&store, &mut console)?;

        let mut editor = Editor::new(directory, store);
        roster::menu::run(&mut editor, &mut console, config.pause)?;
        Ok(())
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        // stderr, so log lines never land in the middle of the menu
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}
