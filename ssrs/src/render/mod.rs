mod cli;
mod error;
mod format;
mod parameters;
mod renderer;
mod request;
mod transport;
mod url;

pub mod prelude {
    pub use super::cli::{RenderArgs, UrlArgs, render_root, url_root};
    pub use super::error::{FetchDetail, FetchFailure};
    pub use super::format::{OutputFormat, extension_for};
    pub use super::parameters::ReportParameters;
    pub use super::renderer::{MockRenderReport, RenderReport, ReportRenderer};
    pub use super::request::{RenderRequest, RenderRequestBuilder};
    pub use super::transport::{
        DEFAULT_USER_AGENT, HttpReportTransport, MockReportTransport, ReportTransport,
    };
    pub use super::url::{DEFAULT_FORMAT, RenderUrl};
}
