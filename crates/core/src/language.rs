//! The closed set of supported content languages.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Language codes accepted on the wire.
pub const VALID_LANGUAGE_CODES: &[&str] = &["ja", "en", "zh"];

/// A supported content language.
///
/// Ordered `ja`, `en`, `zh` so explanation maps serialize in a stable order.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Ja,
    #[default]
    En,
    Zh,
}

impl Language {
    /// Every supported language, in canonical order.
    pub const ALL: [Language; 3] = [Language::Ja, Language::En, Language::Zh];

    /// Language used when a request does not name one, and the fallback
    /// when a stored explanation is missing a translation.
    pub const DEFAULT: Language = Language::En;

    pub fn as_str(self) -> &'static str {
        match self {
            Language::Ja => "ja",
            Language::En => "en",
            Language::Zh => "zh",
        }
    }

    /// Lenient parse for the client side: absent or unknown codes become
    /// [`Language::DEFAULT`].
    pub fn from_param_or_default(raw: Option<&str>) -> Language {
        raw.and_then(|s| s.parse().ok()).unwrap_or(Language::DEFAULT)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ja" => Ok(Language::Ja),
            "en" => Ok(Language::En),
            "zh" => Ok(Language::Zh),
            other => Err(CoreError::InvalidLanguage(format!(
                "'{other}' is not supported. Must be one of: {}",
                VALID_LANGUAGE_CODES.join(", ")
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn parses_every_supported_code() {
        for code in VALID_LANGUAGE_CODES {
            let lang: Language = code.parse().unwrap();
            assert_eq!(lang.as_str(), *code);
        }
    }

    #[test]
    fn rejects_unknown_and_differently_cased_codes() {
        assert_matches!("fr".parse::<Language>(), Err(CoreError::InvalidLanguage(_)));
        assert_matches!("EN".parse::<Language>(), Err(CoreError::InvalidLanguage(_)));
        assert_matches!("".parse::<Language>(), Err(CoreError::InvalidLanguage(_)));
    }

    #[test]
    fn client_default_is_english() {
        assert_eq!(Language::from_param_or_default(None), Language::En);
        assert_eq!(Language::from_param_or_default(Some("xx")), Language::En);
        assert_eq!(Language::from_param_or_default(Some("zh")), Language::Zh);
    }

    #[test]
    fn serializes_as_lowercase_code() {
        assert_eq!(serde_json::to_string(&Language::Ja).unwrap(), "\"ja\"");
        let lang: Language = serde_json::from_str("\"zh\"").unwrap();
        assert_eq!(lang, Language::Zh);
    }
}
