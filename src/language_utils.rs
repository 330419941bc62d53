/*!
 * Language utilities for translation targets.
 *
 * Targets are ISO 639-1 (2-letter) codes, which is what the translation
 * service accepts for its `tl` parameter.
 */

use anyhow::{anyhow, Result};
use isolang::Language;

/// A language offered to users as a translation target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetLanguage {
    /// ISO 639-1 code
    pub code: &'static str,
    /// English display name
    pub name: &'static str,
}

/// Translation targets offered by default, in display order
pub const TRANSLATION_TARGETS: &[TargetLanguage] = &[
    TargetLanguage { code: "en", name: "English" },
    TargetLanguage { code: "kn", name: "Kannada" },
    TargetLanguage { code: "hi", name: "Hindi" },
    TargetLanguage { code: "ta", name: "Tamil" },
    TargetLanguage { code: "te", name: "Telugu" },
    TargetLanguage { code: "ml", name: "Malayalam" },
    TargetLanguage { code: "fr", name: "French" },
    TargetLanguage { code: "es", name: "Spanish" },
    TargetLanguage { code: "de", name: "German" },
    TargetLanguage { code: "ja", name: "Japanese" },
];

/// Validate an ISO 639-1 code and return it normalized to lowercase
pub fn validate_language_code(code: &str) -> Result<String> {
    let normalized_code = code.trim().to_lowercase();

    if normalized_code.len() == 2 && Language::from_639_1(&normalized_code).is_some() {
        return Ok(normalized_code);
    }

    Err(anyhow!("Invalid language code: {}", code))
}

/// Get the English language name from a code
pub fn get_language_name(code: &str) -> Result<String> {
    let normalized = validate_language_code(code)?;
    let lang = Language::from_639_1(&normalized)
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", normalized))?;

    Ok(lang.to_name().to_string())
}

/// Whether the code is one of the default translation targets
pub fn is_offered_target(code: &str) -> bool {
    let normalized = code.trim().to_lowercase();
    TRANSLATION_TARGETS.iter().any(|t| t.code == normalized)
}
