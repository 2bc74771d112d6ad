use super::parameters::ReportParameters;
use std::fmt;
use tracing::warn;

pub const RENDER_COMMAND: (&str, &str) = ("rs:Command", "Render");
pub const FORMAT_KEY: &str = "rs:Format";
pub const DEFAULT_FORMAT: &str = "PDF";

/// URL-access render address: `{server}?{report_path}&rs:Command=Render[&k=v]*&rs:Format={format}`.
///
/// Values are inserted as given. Nothing is percent-encoded, so callers must hand in
/// names, values and report paths that are already valid in a query string.
///
/// `rs:Command` is always the first pair and `rs:Format` always the last, each exactly
/// once. Parameters named either of these are dropped; set the format with `format`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderUrl {
    server_url: String,
    report_path: String,
    query: Vec<(String, String)>,
    format: String,
}

impl RenderUrl {
    pub fn new(server_url: impl Into<String>, report_path: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            report_path: report_path.into(),
            query: Vec::new(),
            format: DEFAULT_FORMAT.to_string(),
        }
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let key = key.into();
        if is_reserved(&key) {
            warn!(target: "user", "Ignoring report parameter {}, it is set by the renderer", key);
            return self;
        }
        self.query.push((key, value.into()));
        self
    }

    pub fn extend_from(&mut self, params: &ReportParameters) -> &mut Self {
        for (key, value) in params.pairs() {
            self.push(key, value);
        }
        self
    }

    pub fn format(&mut self, format: impl Into<String>) -> &mut Self {
        self.format = format.into();
        self
    }

    /// Query pairs after the report path, in the order they will be written.
    pub fn pairs(&self) -> Vec<(&str, &str)> {
        std::iter::once(RENDER_COMMAND)
            .chain(self.query.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .chain(std::iter::once((FORMAT_KEY, self.format.as_str())))
            .collect()
    }

    pub fn as_string(&self) -> String {
        self.to_string()
    }
}

fn is_reserved(key: &str) -> bool {
    key.eq_ignore_ascii_case(RENDER_COMMAND.0) || key.eq_ignore_ascii_case(FORMAT_KEY)
}

impl fmt::Display for RenderUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}?{}", self.server_url, self.report_path)?;
        for (key, value) in self.pairs() {
            write!(f, "&{}={}", key, value)?;
        }
        Ok(())
    }
}
