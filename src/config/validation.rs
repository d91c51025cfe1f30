use crate::client::MAX_POST_IDS_PER_CALL;
use crate::config::types::{ApiConfig, Config, CrawlerConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_api_config(&config.api)?;
    validate_crawler_config(&config.crawler)?;
    if config.output.database_path.is_empty() {
        return Err(ConfigError::Validation(
            "database-path cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Validates API configuration
fn validate_api_config(config: &ApiConfig) -> Result<(), ConfigError> {
    if Url::parse(&config.base_url).is_err() {
        return Err(ConfigError::Validation(format!(
            "base-url is not a valid URL: '{}'",
            config.base_url
        )));
    }

    if config.posts_function.is_empty() || config.comments_function.is_empty() {
        return Err(ConfigError::Validation(
            "posts-function and comments-function cannot be empty".to_string(),
        ));
    }

    if config.request_timeout < 1 {
        return Err(ConfigError::Validation(format!(
            "request-timeout must be >= 1s, got {}s",
            config.request_timeout
        )));
    }

    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.first_chunk_size < 1 || config.first_chunk_size > 100 {
        return Err(ConfigError::Validation(format!(
            "first-chunk-size must be between 1 and 100, got {}",
            config.first_chunk_size
        )));
    }

    if config.rest_chunk_size < 1 || config.rest_chunk_size > 100 {
        return Err(ConfigError::Validation(format!(
            "rest-chunk-size must be between 1 and 100, got {}",
            config.rest_chunk_size
        )));
    }

    // The comment API rejects more than 25 post ids per call
    if config.comment_chunk_size < 1 || config.comment_chunk_size as usize > MAX_POST_IDS_PER_CALL {
        return Err(ConfigError::Validation(format!(
            "comment-chunk-size must be between 1 and {}, got {}",
            MAX_POST_IDS_PER_CALL, config.comment_chunk_size
        )));
    }

    if config.retry_attempts < 1 {
        return Err(ConfigError::Validation(format!(
            "retry-attempts must be >= 1, got {}",
            config.retry_attempts
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::OutputConfig;

    fn valid_config() -> Config {
        Config {
            api: ApiConfig {
                base_url: "https://api.example.com/".to_string(),
                access_token: "token".to_string(),
                api_version: "5.131".to_string(),
                posts_function: "getPosts".to_string(),
                comments_function: "getComments".to_string(),
                request_timeout: 30,
            },
            crawler: CrawlerConfig {
                min_request_interval: 1000,
                first_chunk_size: 100,
                rest_chunk_size: 25,
                comment_chunk_size: 25,
                retry_attempts: 3,
                retry_delay: 60,
                alias_retry_delay: 5,
            },
            output: OutputConfig {
                database_path: "./wall.db".to_string(),
            },
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_invalid_base_url() {
        let mut config = valid_config();
        config.api.base_url = "not a url".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_comment_chunk_size_over_api_ceiling() {
        let mut config = valid_config();
        config.crawler.comment_chunk_size = 26;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_chunk_sizes_rejected() {
        let mut config = valid_config();
        config.crawler.first_chunk_size = 0;
        assert!(validate(&config).is_err());

        let mut config = valid_config();
        config.crawler.rest_chunk_size = 0;
        assert!(validate(&config).is_err());

        let mut config = valid_config();
        config.crawler.comment_chunk_size = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_retry_attempts_rejected() {
        let mut config = valid_config();
        config.crawler.retry_attempts = 0;
        assert!(validate(&config).is_err());
    }
}
