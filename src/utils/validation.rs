use crate::utils::error::{AgentError, Result};
use std::collections::HashSet;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(AgentError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(AgentError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(AgentError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(AgentError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(AgentError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(AgentError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AgentError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_allowed_values(
    field_name: &str,
    values: &[String],
    allowed: &[&str],
) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed.iter().copied().collect();

    for value in values {
        if !allowed_set.contains(value.as_str()) {
            return Err(AgentError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: value.clone(),
                reason: format!("Unsupported value. Valid values: {}", allowed.join(", ")),
            });
        }
    }

    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| AgentError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(AgentError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("linkedin_url", "https://www.linkedin.com/jobs/search").is_ok());
        assert!(validate_url("linkedin_url", "http://localhost:8080/jobs").is_ok());
        assert!(validate_url("linkedin_url", "").is_err());
        assert!(validate_url("linkedin_url", "not-a-url").is_err());
        assert!(validate_url("linkedin_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("limit_per_site", 50, 1).is_ok());
        assert!(validate_positive_number("limit_per_site", 0, 1).is_err());
    }

    #[test]
    fn test_validate_allowed_values() {
        let formats = vec!["json".to_string(), "csv".to_string()];
        assert!(validate_allowed_values("output_formats", &formats, &["json", "csv"]).is_ok());

        let invalid = vec!["parquet".to_string()];
        assert!(validate_allowed_values("output_formats", &invalid, &["json", "csv"]).is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some("sk-test".to_string());
        assert_eq!(validate_required_field("llm.api_key", &present).unwrap(), "sk-test");

        let absent: Option<String> = None;
        assert!(validate_required_field("llm.api_key", &absent).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("top_n", 10, 1, 100).is_ok());
        assert!(validate_range("top_n", 0, 1, 100).is_err());
        assert!(validate_range("top_n", 101, 1, 100).is_err());
    }
}
