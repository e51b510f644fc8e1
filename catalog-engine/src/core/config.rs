/// Catalog engine configuration
///
/// # Environment variables
///
/// [`Config::from_env`] reads these (a `.env` file in the working
/// directory is loaded first); [`Config::default`] uses the defaults only.
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | CATALOG_MAX_NAME_LEN | 200 | Maximum category / field name length |
/// | CATALOG_VALUE_SEPARATOR | `,` | Separator of raw assignment values |
/// | LOG_LEVEL | info | Tracing filter |
/// | LOG_DIR | (unset) | Daily log file directory |
///
/// # Example
///
/// ```ignore
/// CATALOG_VALUE_SEPARATOR='|' LOG_LEVEL=debug cargo test
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Upper bound for category and field names
    pub max_name_len: usize,
    /// Separator between values in an assignment's raw string
    pub value_separator: char,
    /// Tracing filter directive
    pub log_level: String,
    /// Optional directory for daily rolling log files
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from the environment
    ///
    /// Unset or unparsable variables fall back to their defaults.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        let defaults = Self::default();

        Self {
            max_name_len: std::env::var("CATALOG_MAX_NAME_LEN")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|len: &usize| *len > 0)
                .unwrap_or(defaults.max_name_len),
            value_separator: std::env::var("CATALOG_VALUE_SEPARATOR")
                .ok()
                .and_then(|v| v.chars().next())
                .unwrap_or(defaults.value_separator),
            log_level: std::env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
        }
    }

    /// Same configuration with another value separator
    pub fn with_value_separator(mut self, separator: char) -> Self {
        self.value_separator = separator;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_name_len: crate::utils::validation::MAX_NAME_LEN,
            value_separator: ',',
            log_level: "info".to_string(),
            log_dir: None,
        }
    }
}
