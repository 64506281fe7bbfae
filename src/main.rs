use clap::Parser;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wk_cli::api::WaniKaniClient;
use wk_cli::config::Settings;
use wk_cli::console::LineConsole;
use wk_cli::session::Session;
use wk_cli::{db, paths};

#[derive(Parser)]
#[command(name = "wk", about = "WaniKani lessons and reviews in the terminal", version)]
struct Cli {
  /// Items quizzed together in one batch
  #[arg(long, short = 'b')]
  batch_size: Option<usize>,

  /// Config file to read
  #[arg(long, default_value = paths::CONFIG_FILE)]
  config: PathBuf,

  /// File containing the API token
  #[arg(long)]
  token_file: Option<PathBuf>,

  /// Print available lessons and reviews, then exit
  #[arg(long)]
  summary: bool,
}

fn init_logging() {
  // Logs go to a file so they never interleave with the prompts
  let file_layer = std::fs::create_dir_all(paths::data_dir())
    .and_then(|_| OpenOptions::new().create(true).append(true).open(paths::log_path()))
    .map(|file| {
      tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(Mutex::new(file))
    });
  let file_layer = match file_layer {
    Ok(layer) => Some(layer),
    Err(e) => {
      eprintln!("Warning: logging disabled, cannot open {}: {}", paths::log_path().display(), e);
      None
    }
  };

  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "wk_cli=info".into()),
    )
    .with(file_layer)
    .init();
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  init_logging();

  let mut settings = match Settings::load(&cli.config) {
    Ok(settings) => settings,
    Err(e) => {
      tracing::error!("Failed to load settings: {}", e);
      eprintln!("Unable to load settings: {}", e);
      return ExitCode::FAILURE;
    }
  };
  if let Some(size) = cli.batch_size {
    settings.batch_size = size.max(1);
  }
  if let Some(path) = cli.token_file {
    settings.token_file = path;
    settings.token = None;
  }

  let client = match settings
    .api_token()
    .and_then(|token| WaniKaniClient::new(&settings.base_url, &token))
  {
    Ok(client) => client,
    Err(e) => {
      tracing::error!("Failed to set up API client: {}", e);
      eprintln!("{}\nSet WK_API_TOKEN or put your API token in {}.", e, settings.token_file.display());
      return ExitCode::FAILURE;
    }
  };

  let conn = match db::open(&paths::db_path()) {
    Ok(conn) => Some(conn),
    Err(e) => {
      tracing::warn!("Local store unavailable, continuing without it: {}", e);
      None
    }
  };

  let mut console = LineConsole::stdio();
  let mut session = Session::new(&client, &mut console, conn.as_ref(), settings.batch_size);

  let result = session.greet().and_then(|_| if cli.summary { Ok(()) } else { session.run() });
  session.finish();

  match result {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      tracing::error!("Terminal I/O failed: {}", e);
      eprintln!("Terminal I/O failed: {}", e);
      ExitCode::FAILURE
    }
  }
}
