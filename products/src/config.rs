use std::env;

const TABLE_NAME: &str = "TABLE_NAME";
const DYNAMODB_ENDPOINT: &str = "DYNAMODB_ENDPOINT";
const TRACE_DEBUG: &str = "TRACE_DEBUG";

pub const DEFAULT_TABLE_NAME: &str = "Products";

/// Process settings, read once at cold start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub table_name: String,
    /// Overrides the DynamoDB endpoint, e.g. for DynamoDB Local.
    pub dynamodb_endpoint: Option<String>,
    pub debug: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            table_name: lookup(TABLE_NAME)
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| DEFAULT_TABLE_NAME.to_string()),
            dynamodb_endpoint: lookup(DYNAMODB_ENDPOINT).filter(|endpoint| !endpoint.is_empty()),
            debug: lookup(TRACE_DEBUG).is_some(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_to_products_table() {
        let config = Config::default();
        assert_eq!(config.table_name, "Products");
        assert_eq!(config.dynamodb_endpoint, None);
        assert!(!config.debug);
    }

    #[test]
    fn reads_overrides() {
        let vars = HashMap::from([
            (TABLE_NAME, "ProductsStaging"),
            (DYNAMODB_ENDPOINT, "http://localhost:8000"),
            (TRACE_DEBUG, "1"),
        ]);
        let config = Config::from_lookup(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.table_name, "ProductsStaging");
        assert_eq!(config.dynamodb_endpoint.as_deref(), Some("http://localhost:8000"));
        assert!(config.debug);
    }

    #[test]
    fn empty_values_fall_back() {
        let config = Config::from_lookup(|_| Some(String::new()));
        assert_eq!(config.table_name, DEFAULT_TABLE_NAME);
        assert_eq!(config.dynamodb_endpoint, None);
        assert!(config.debug);
    }
}
