use strum::{AsRefStr, Display, EnumString};

/// Render formats a stock report server understands.
///
/// Only used to pick file names; the render call itself passes any format string through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum OutputFormat {
    Pdf,
    Excel,
    ExcelOpenXml,
    Word,
    WordOpenXml,
    Csv,
    Xml,
    Image,
    Mhtml,
    Atom,
    Pptx,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Pdf => "pdf",
            OutputFormat::Excel => "xls",
            OutputFormat::ExcelOpenXml => "xlsx",
            OutputFormat::Word => "doc",
            OutputFormat::WordOpenXml => "docx",
            OutputFormat::Csv => "csv",
            OutputFormat::Xml => "xml",
            OutputFormat::Image => "tif",
            OutputFormat::Mhtml => "mhtml",
            OutputFormat::Atom => "atomsvc",
            OutputFormat::Pptx => "pptx",
        }
    }
}

/// File extension for a format token, `bin` when the token is not a known format.
pub fn extension_for(format: &str) -> &'static str {
    format
        .parse::<OutputFormat>()
        .map(|f| f.extension())
        .unwrap_or("bin")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_are_uppercase() {
        assert_eq!("PDF", OutputFormat::Pdf.to_string());
        assert_eq!("EXCELOPENXML", OutputFormat::ExcelOpenXml.as_ref());
        assert_eq!(OutputFormat::WordOpenXml, "wordopenxml".parse::<OutputFormat>().unwrap());
    }

    #[test]
    fn test_extension_lookup() {
        assert_eq!("pdf", extension_for("PDF"));
        assert_eq!("xlsx", extension_for("excelopenxml"));
        assert_eq!("bin", extension_for("HTML4.0"));
    }
}
