use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use surface_common::AppConfig;
use surface_render::{Renderer, SvgSurfaceRenderer};
use surface_serve::SurfaceServer;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "surface",
    about = "Render z = sin(r)/r as an isometric SVG surface"
)]
struct Cli {
    /// `web` serves the image over HTTP; anything else prints it to stdout
    #[arg(allow_hyphen_values = true)]
    mode: Option<String>,

    /// Ignored
    #[arg(hide = true, allow_hyphen_values = true)]
    rest: Vec<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// JSON file overriding canvas, grid or bind settings
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Stdout,
    Web,
}

impl Mode {
    fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            Some("web") => Mode::Web,
            _ => Mode::Stdout,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries only the SVG document.
    let filter = if cli.verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => AppConfig::default(),
    };

    let mode = Mode::from_arg(cli.mode.as_deref());
    debug!(?mode, cells = config.surface.cells, ignored = ?cli.rest, "starting");

    match mode {
        Mode::Web => {
            let server = SurfaceServer::bind(&config.server.bind_addr, config.surface)
                .context("starting web server")?;
            server.run()?;
        }
        Mode::Stdout => {
            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            SvgSurfaceRenderer::new(config.surface).render(&mut out)?;
            out.flush()?;
        }
    }

    Ok(())
}
