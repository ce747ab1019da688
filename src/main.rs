use std::{
    fs::{self, OpenOptions},
    process::ExitCode,
    sync::{Mutex, mpsc},
};

use anyhow::Result;
use pnotes_core::{
    config::Config,
    logger::{LogMessage, LoggerSink},
};
use tracing::Level;
use tracing_subscriber::{Registry, filter, fmt, layer::Layer, prelude::*};

fn run_tui(rx: mpsc::Receiver<LogMessage>) -> Result<()> {
    if let Err(err) = pnotes_term::run(rx) {
        tracing::error!("{err}");
        return Err(err);
    }
    Ok(())
}

fn main() -> Result<ExitCode> {
    let Some(dirs) = directories::ProjectDirs::from("", "", "pnotes") else {
        eprintln!("Unable to get project directory");
        return Ok(ExitCode::from(1));
    };
    let log_file_path = dirs.data_dir().join(".log.txt");

    let args = pnotes_cli::parse();

    if args.init {
        Config::create_default_config(args.overwrite)?;
        eprintln!(
            "Created default config at: `{}`",
            Config::get_default_location()?.to_string_lossy()
        );
        return Ok(ExitCode::SUCCESS);
    }

    if args.log {
        let mut cmd = std::process::Command::new("tail");
        cmd.args(["-fn", "1000", &log_file_path.to_string_lossy()]);

        #[cfg(not(target_family = "unix"))]
        {
            let mut child = cmd.spawn()?;
            let exit_status = child.wait()?;
            return Ok(ExitCode::from(exit_status.code().unwrap_or(0) as u8));
        }

        #[cfg(target_family = "unix")]
        {
            use std::os::unix::process::CommandExt;
            Err(cmd.exec())?;
        }
    }

    fs::create_dir_all(dirs.data_dir())?;
    let log_file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(&log_file_path)?;

    const GB: u64 = 1_000_000_000;
    let truncated = log_file.metadata()?.len() > GB;
    if truncated {
        log_file.set_len(0)?;
    }

    let var = args
        .log_level
        .clone()
        .unwrap_or_else(|| std::env::var("PNOTES_LOG").unwrap_or_default());
    let log_level = match var.to_ascii_lowercase().as_str() {
        "error" => Level::ERROR,
        "warn" => Level::WARN,
        "info" => Level::INFO,
        "debug" => Level::DEBUG,
        "trace" => Level::TRACE,
        #[cfg(debug_assertions)]
        _ => Level::TRACE,
        #[cfg(not(debug_assertions))]
        _ => Level::INFO,
    };

    let (tx, rx) = mpsc::channel();
    let logger = LoggerSink::new(tx);

    let subscriber = Registry::default()
        .with(
            fmt::layer()
                .compact()
                .without_time()
                .with_ansi(true)
                .with_writer(log_file)
                .with_filter(filter::LevelFilter::from_level(log_level)),
        )
        .with(
            fmt::layer()
                .json()
                .with_writer(Mutex::new(logger))
                .with_filter(filter::LevelFilter::from_level(log_level)),
        );

    tracing::subscriber::set_global_default(subscriber)?;
    tracing_log::LogTracer::init()?;

    if truncated {
        tracing::warn!("Log file was truncated as it reached 1Gb in size");
    }

    run_tui(rx)?;

    Ok(ExitCode::SUCCESS)
}
