use anyhow::Result;
use clap::{ArgGroup, Parser};
use lazy_static::lazy_static;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{filter::filter_fn, prelude::*};
use tracing_subscriber::{
    Registry,
    fmt::format::{Format, PrettyFields},
    layer::SubscriberExt,
};

#[derive(Parser, Debug)]
#[clap(group = ArgGroup::new("logging"))]
pub struct LoggingOpts {
    /// A level of verbosity, and can be used multiple times
    #[arg(short, long, action = clap::ArgAction::Count, global(true))]
    pub verbose: u8,

    /// Directory detailed log files are written to.
    #[arg(long, global(true), env = "SSRS_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    #[arg(skip = LevelFilter::WARN)]
    default_level: LevelFilter,
}

lazy_static! {
    pub static ref STDOUT_WRITER: Arc<RwLock<Box<dyn Write + Sync + Send>>> =
        Arc::new(RwLock::new(Box::new(std::io::stdout())));
}

impl LoggingOpts {
    pub fn to_level_filter(&self) -> LevelFilter {
        match self.verbose {
            0 => self.default_level,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }

    fn log_dir(&self) -> PathBuf {
        self.log_dir
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("ssrs-render"))
    }

    /// Console output only carries the `user` and `always` targets; everything goes to the
    /// log file.
    pub fn configure_logging(
        &self,
        run_id: &str,
    ) -> Result<(tracing_appender::non_blocking::WorkerGuard, String)> {
        let log_dir = self.log_dir();
        std::fs::create_dir_all(&log_dir)?;

        let file_path = log_dir.join(format!("ssrs-render-{}.log", run_id));
        let (non_blocking, guard) = tracing_appender::non_blocking(
            strip_ansi_escapes::Writer::new(File::create(&file_path)?),
        );

        let file_output = tracing_subscriber::fmt::layer()
            .event_format(Format::default().pretty())
            .with_ansi(false)
            .with_writer(non_blocking);

        let level_filter = self.to_level_filter();
        let console_output = tracing_subscriber::fmt::layer()
            .event_format(
                Format::default()
                    .with_target(false)
                    .without_time()
                    .compact(),
            )
            .with_writer(std::io::stderr)
            .fmt_fields(PrettyFields::new())
            .with_filter(filter_fn(move |metadata| match metadata.target() {
                "user" => level_filter >= *metadata.level(),
                "always" => true,
                _ => false,
            }));

        let subscriber = Registry::default().with(console_output).with(file_output);

        tracing::subscriber::set_global_default(subscriber)?;

        Ok((guard, file_path.display().to_string()))
    }
}
