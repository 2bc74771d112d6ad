use super::format::extension_for;
use super::parameters::ReportParameters;
use super::renderer::{RenderReport, ReportRenderer};
use super::url::RenderUrl;
use crate::report_stdout;
use crate::shared::prelude::{FoundConfig, STDOUT_WRITER};
use anyhow::{Result, anyhow};
use clap::Args;
use colored::Colorize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

#[derive(Debug, Args)]
pub struct RenderArgs {
    #[clap(flatten)]
    request: RequestArgs,

    /// Where the rendered report is written. Use `-` for stdout. Defaults to the last
    /// segment of the report path with an extension matching the format.
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct UrlArgs {
    #[clap(flatten)]
    request: RequestArgs,
}

#[derive(Debug, Args)]
struct RequestArgs {
    /// Path of the report on the server, e.g. /Reports/Sales
    report_path: String,

    /// Report parameter as NAME=VALUE. Repeat a name to send several values.
    #[arg(long = "param", short = 'p', value_parser = parse_parameter)]
    parameters: Vec<(String, String)>,

    /// Render format passed to the server, e.g. PDF, EXCEL, WORDOPENXML.
    /// Defaults to the profile's defaultFormat, then PDF.
    #[arg(long, short = 'f')]
    format: Option<String>,
}

impl RequestArgs {
    fn parameters(&self) -> ReportParameters {
        self.parameters.iter().cloned().collect()
    }

    fn format<'a>(&'a self, found_config: &'a FoundConfig) -> &'a str {
        self.format
            .as_deref()
            .unwrap_or(&found_config.default_format)
    }
}

fn parse_parameter(value: &str) -> Result<(String, String)> {
    match value.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(anyhow!("expected NAME=VALUE, got `{}`", value)),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum OutputTarget {
    Stdout,
    File(PathBuf),
}

impl OutputTarget {
    fn resolve(output: Option<&Path>, report_path: &str, format: &str) -> Self {
        match output {
            Some(path) if path == Path::new("-") => OutputTarget::Stdout,
            Some(path) => OutputTarget::File(path.to_path_buf()),
            None => OutputTarget::File(default_file_name(report_path, format)),
        }
    }
}

fn default_file_name(report_path: &str, format: &str) -> PathBuf {
    let name = report_path
        .rsplit('/')
        .map(str::trim)
        .find(|segment| !segment.is_empty())
        .unwrap_or("report");
    PathBuf::from(format!("{}.{}", name, extension_for(format)))
}

fn announce_profile(found_config: &FoundConfig) {
    if let Some(path) = &found_config.profile_path {
        info!(target: "user", "Using profile {}", path.display());
    }
}

pub async fn render_root(found_config: &FoundConfig, args: &RenderArgs) -> Result<i32> {
    announce_profile(found_config);
    let renderer = match ReportRenderer::from_config(&found_config.renderer) {
        Ok(renderer) => renderer,
        Err(e) => {
            error!(target: "user", "Failed to load configuration: {}", e);
            return Ok(2);
        }
    };
    render_with(&renderer, found_config, args).await
}

async fn render_with(
    renderer: &dyn RenderReport,
    found_config: &FoundConfig,
    args: &RenderArgs,
) -> Result<i32> {
    let request = &args.request;
    let format = request.format(found_config);
    let target = OutputTarget::resolve(args.output.as_deref(), &request.report_path, format);
    debug!("Writing {} to {:?}", request.report_path, target);

    let body = match renderer
        .render_report(&request.report_path, &request.parameters(), format)
        .await
    {
        Ok(body) => body,
        Err(e) => {
            error!(target: "user", "{}. {}", e, e.detail);
            return Ok(1);
        }
    };

    match target {
        OutputTarget::Stdout => {
            let mut stdout = STDOUT_WRITER.write().await;
            stdout.write_all(&body)?;
            stdout.flush()?;
        }
        OutputTarget::File(path) => {
            tokio::fs::write(&path, &body).await?;
            info!(target: "always", "Report was written to {} ({} bytes)", path.display().to_string().bold(), body.len());
        }
    }

    Ok(0)
}

pub async fn url_root(found_config: &FoundConfig, args: &UrlArgs) -> Result<i32> {
    announce_profile(found_config);
    let request = &args.request;
    let url = RenderUrl::new(&found_config.renderer.server_url, &request.report_path)
        .extend_from(&request.parameters())
        .format(request.format(found_config))
        .as_string();

    report_stdout!("{}", url);
    Ok(0)
}
