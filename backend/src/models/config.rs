use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub listen_addr: String,
    pub allowed_origins: Vec<String>,
    pub max_upload_bytes: u64,
    pub jpeg_quality: u8,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset or unparseable values
    /// fall back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port: u16 = lookup("PORT")
            .and_then(|v| v.parse().ok())
            .unwrap_or(5000);

        Self {
            listen_addr: lookup("LISTEN_ADDR").unwrap_or_else(|| format!("0.0.0.0:{}", port)),
            allowed_origins: lookup("ALLOWED_ORIGINS")
                .unwrap_or_else(|| "http://localhost:5000,http://localhost:3000".to_string())
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            max_upload_bytes: lookup("MAX_UPLOAD_BYTES")
                .and_then(|v| v.parse().ok())
                .unwrap_or(33_554_432),
            jpeg_quality: lookup("JPEG_QUALITY")
                .and_then(|v| v.parse::<u8>().ok())
                .map(|q| q.clamp(1, 100))
                .unwrap_or(95),
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.listen_addr, "0.0.0.0:5000");
        assert_eq!(cfg.jpeg_quality, 95);
        assert_eq!(cfg.max_upload_bytes, 32 * 1024 * 1024);
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.allowed_origins.len(), 2);
    }

    #[test]
    fn port_is_used_when_listen_addr_is_unset() {
        assert_eq!(config(&[("PORT", "10000")]).listen_addr, "0.0.0.0:10000");
        assert_eq!(
            config(&[("PORT", "10000"), ("LISTEN_ADDR", "127.0.0.1:9000")]).listen_addr,
            "127.0.0.1:9000"
        );
    }

    #[test]
    fn bad_numbers_fall_back_and_quality_is_clamped() {
        let cfg = config(&[("MAX_UPLOAD_BYTES", "lots"), ("JPEG_QUALITY", "0")]);
        assert_eq!(cfg.max_upload_bytes, 33_554_432);
        assert_eq!(cfg.jpeg_quality, 1);
        assert_eq!(config(&[("JPEG_QUALITY", "300")]).jpeg_quality, 95);
    }

    #[test]
    fn origins_are_trimmed() {
        let cfg = config(&[("ALLOWED_ORIGINS", " https://a.example , ,https://b.example")]);
        assert_eq!(cfg.allowed_origins, vec!["https://a.example", "https://b.example"]);
    }
}
