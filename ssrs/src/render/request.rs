use super::parameters::ReportParameters;
use super::url::DEFAULT_FORMAT;
use derive_builder::Builder;

#[derive(Debug, Clone, Builder)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct RenderRequest {
    pub report_path: String,
    #[builder(default)]
    pub parameters: ReportParameters,
    #[builder(default = "DEFAULT_FORMAT.to_string()")]
    pub output_format: String,
}

impl RenderRequestBuilder {
    pub fn parameter(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.parameters
            .get_or_insert_with(ReportParameters::default)
            .add(name, value);
        self
    }

    fn validate(&self) -> Result<(), String> {
        match &self.report_path {
            Some(path) if path.is_empty() => Err("report_path must not be empty".to_string()),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_pdf_with_no_parameters() {
        let request = RenderRequestBuilder::default()
            .report_path("/Reports/Sales")
            .build()
            .unwrap();

        assert_eq!("PDF", request.output_format);
        assert!(request.parameters.is_empty());
    }

    #[test]
    fn test_parameter_accumulates() {
        let request = RenderRequestBuilder::default()
            .report_path("/Reports/Sales")
            .parameter("Region", "West")
            .parameter("Region", "East")
            .output_format("EXCEL")
            .build()
            .unwrap();

        assert_eq!(
            Some(&["West".to_string(), "East".to_string()][..]),
            request.parameters.get_values("Region")
        );
        assert_eq!("EXCEL", request.output_format);
    }

    #[test]
    fn test_report_path_is_required_and_non_empty() {
        assert!(RenderRequestBuilder::default().build().is_err());
        assert!(
            RenderRequestBuilder::default()
                .report_path("")
                .build()
                .is_err()
        );
    }
}
