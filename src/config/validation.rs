use crate::config::types::Settings;
use crate::ConfigError;

/// Validates a settings structure
///
/// # Rules
///
/// - The user agent must not be empty
/// - The request timeout must be positive
/// - The delay window must be ordered (`delay-min-ms <= delay-max-ms`)
/// - The per-category page cap must be positive
/// - The export directory must not be empty
pub fn validate(settings: &Settings) -> Result<(), ConfigError> {
    if settings.scrape.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent must not be empty".to_string(),
        ));
    }

    if settings.scrape.request_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "request-timeout-secs must be greater than 0".to_string(),
        ));
    }

    if settings.scrape.delay_min_ms > settings.scrape.delay_max_ms {
        return Err(ConfigError::Validation(format!(
            "delay window is reversed: delay-min-ms ({}) > delay-max-ms ({})",
            settings.scrape.delay_min_ms, settings.scrape.delay_max_ms
        )));
    }

    if settings.scrape.max_pages_per_category == 0 {
        return Err(ConfigError::Validation(
            "max-pages-per-category must be greater than 0".to_string(),
        ));
    }

    if settings.output.export_dir.trim().is_empty() {
        return Err(ConfigError::Validation(
            "export-dir must not be empty".to_string(),
        ));
    }

    Ok(())
}
