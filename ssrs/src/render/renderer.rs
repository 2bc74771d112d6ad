use super::error::FetchFailure;
use super::parameters::ReportParameters;
use super::request::RenderRequest;
use super::transport::{HttpReportTransport, ReportTransport};
use super::url::{DEFAULT_FORMAT, RenderUrl};
use crate::shared::prelude::{ConfigError, RendererConfig};
use async_trait::async_trait;
use mockall::automock;
use tracing::{debug, info, instrument};

/// Render a report into a byte buffer that can be written straight to a file.
#[automock]
#[async_trait]
pub trait RenderReport: Send + Sync {
    async fn render_report(
        &self,
        report_path: &str,
        parameters: &ReportParameters,
        output_format: &str,
    ) -> Result<Vec<u8>, FetchFailure>;

    /// Same as `render_report` with the PDF format.
    async fn render(
        &self,
        report_path: &str,
        parameters: &ReportParameters,
    ) -> Result<Vec<u8>, FetchFailure> {
        self.render_report(report_path, parameters, DEFAULT_FORMAT)
            .await
    }

    async fn render_request(&self, request: &RenderRequest) -> Result<Vec<u8>, FetchFailure> {
        self.render_report(
            &request.report_path,
            &request.parameters,
            &request.output_format,
        )
        .await
    }
}

/// Renders reports through the report server's URL access endpoint rather than the SOAP
/// web service. The server URL is stored as given and only ever concatenated.
#[derive(Debug, Clone)]
pub struct ReportRenderer<T = HttpReportTransport> {
    server_url: String,
    transport: T,
}

impl ReportRenderer<HttpReportTransport> {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self::with_transport(server_url, HttpReportTransport::default())
    }

    pub fn from_config(config: &RendererConfig) -> Result<Self, ConfigError> {
        let transport = HttpReportTransport::with_options(config.timeout, &config.user_agent)
            .map_err(|error| ConfigError::TransportError { error })?;
        Ok(Self::with_transport(config.server_url.clone(), transport))
    }
}

impl<T: ReportTransport> ReportRenderer<T> {
    pub fn with_transport(server_url: impl Into<String>, transport: T) -> Self {
        Self {
            server_url: server_url.into(),
            transport,
        }
    }

    pub fn render_url(
        &self,
        report_path: &str,
        parameters: &ReportParameters,
        output_format: &str,
    ) -> String {
        RenderUrl::new(&self.server_url, report_path)
            .extend_from(parameters)
            .format(output_format)
            .as_string()
    }
}

#[async_trait]
impl<T: ReportTransport> RenderReport for ReportRenderer<T> {
    #[instrument(skip(self, parameters))]
    async fn render_report(
        &self,
        report_path: &str,
        parameters: &ReportParameters,
        output_format: &str,
    ) -> Result<Vec<u8>, FetchFailure> {
        let url = self.render_url(report_path, parameters, output_format);
        debug!("Requesting {}", url);

        let body = self.transport.get_bytes(&url).await?;
        info!(bytes = body.len(), "Rendered {} as {}", report_path, output_format);

        Ok(body)
    }
}
