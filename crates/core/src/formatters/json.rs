use crate::Result;
use crate::article::Article;

/// Configuration for JSON output
#[derive(Debug, Clone, Default)]
pub struct JsonExportConfig {
    /// Pretty print JSON output
    pub pretty: bool,
}

/// Serialize every article field to JSON
pub fn convert_to_json(article: &Article, config: &JsonExportConfig) -> Result<String> {
    if config.pretty {
        Ok(serde_json::to_string_pretty(article)?)
    } else {
        Ok(serde_json::to_string(article)?)
    }
}

/// JSON formatter with configurable options
pub struct JsonFormatter {
    config: JsonExportConfig,
}

impl JsonFormatter {
    pub fn new(config: JsonExportConfig) -> Self {
        Self { config }
    }

    pub fn format(&self, article: &Article) -> Result<String> {
        convert_to_json(article, &self.config)
    }
}
