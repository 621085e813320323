use serde::{Deserialize, Deserializer};

#[derive(Debug, Deserialize, Clone)]
#[allow(unused)]
#[readonly::make]
pub struct ApiServer {
    pub bind_address: String,
    /// Upper bound for JSON request bodies, accepts suffixes like `512K` or `1M`
    #[serde(deserialize_with = "deserialize_bytes", default = "default_max_body_size")]
    pub max_body_size: usize,
    /// Origin of the admin panel, allowed to send credentialed requests
    pub cors_allowed_origin: Option<String>,
}

fn default_max_body_size() -> usize {
    1024 * 1024
}

impl Default for ApiServer {
    fn default() -> Self {
        ApiServer {
            bind_address: "0.0.0.0:8787".to_string(),
            max_body_size: default_max_body_size(),
            cors_allowed_origin: None,
        }
    }
}

fn deserialize_bytes<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_byte_size(&s).map_err(serde::de::Error::custom)
}

pub fn parse_byte_size(s: &str) -> Result<usize, std::num::ParseIntError> {
    let s = s.trim().to_uppercase();

    let (num_part, suffix) = s.split_at(s.len().saturating_sub(1));
    let (num_part, multiplier) = match suffix {
        "G" => (num_part, 1_024 * 1_024 * 1_024),
        "M" => (num_part, 1_024 * 1_024),
        "K" => (num_part, 1_024),
        _ => (s.as_str(), 1),
    };

    let num: usize = num_part.trim().parse()?;
    Ok(num * multiplier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_byte_size() {
        assert_eq!(parse_byte_size("512").unwrap(), 512);
        assert_eq!(parse_byte_size("64K").unwrap(), 64 * 1024);
        assert_eq!(parse_byte_size("2m").unwrap(), 2 * 1024 * 1024);
        assert!(parse_byte_size("lots").is_err());
    }
}
