// Scan orchestration — routes an input through the detector pipeline and
// folds everything into one aggregated report.

pub mod entities;
pub mod scan;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use entities::extract_entities;
pub use scan::{scan, ScanOptions, ScanReport};

/// What the user says they're scanning. Drives detector routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    Website,
    Message,
    Phone,
    Email,
    Crypto,
    Other,
}

impl InputType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputType::Website => "website",
            InputType::Message => "message",
            InputType::Phone => "phone",
            InputType::Email => "email",
            InputType::Crypto => "crypto",
            InputType::Other => "other",
        }
    }
}

impl std::fmt::Display for InputType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InputType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "website" | "url" => Ok(InputType::Website),
            "message" | "text" => Ok(InputType::Message),
            "phone" => Ok(InputType::Phone),
            "email" => Ok(InputType::Email),
            "crypto" | "wallet" => Ok(InputType::Crypto),
            "other" => Ok(InputType::Other),
            other => Err(format!(
                "unknown input type {other:?} (expected website, message, phone, email, crypto, or other)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_type_parses_aliases() {
        assert_eq!("URL".parse::<InputType>().unwrap(), InputType::Website);
        assert_eq!("text".parse::<InputType>().unwrap(), InputType::Message);
        assert!("carrier-pigeon".parse::<InputType>().is_err());
    }
}
