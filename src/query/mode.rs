//! Search modes, their inputs and the mode dispatch table

use super::builder;
use super::request::{FieldBoost, QueryRequest, TermFilter};
use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fields matched by the full-text modes
pub const SEARCH_FIELDS: &[FieldBoost] = &[
    FieldBoost::plain("title"),
    FieldBoost::plain("content"),
    FieldBoost::plain("description"),
    FieldBoost::plain("keywords"),
];

/// Fields matched by autocomplete
pub const PREFIX_FIELDS: &[FieldBoost] = &[FieldBoost::plain("title"), FieldBoost::plain("keywords")];

/// Boosted fields used for spelling correction
pub const SPELLING_FIELDS: &[FieldBoost] = &[
    FieldBoost::boosted("title", 3),
    FieldBoost::boosted("keywords", 2),
    FieldBoost::plain("content"),
    FieldBoost::plain("description"),
];

/// User-facing search modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    Basic,
    Fuzzy,
    LanguageFiltered,
    BrandFiltered,
    PrefixAutocomplete,
    Multilingual,
    SpellingCorrection,
}

impl SearchMode {
    pub const ALL: [SearchMode; 7] = [
        SearchMode::Basic,
        SearchMode::Fuzzy,
        SearchMode::LanguageFiltered,
        SearchMode::BrandFiltered,
        SearchMode::PrefixAutocomplete,
        SearchMode::Multilingual,
        SearchMode::SpellingCorrection,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Fuzzy => "fuzzy",
            Self::LanguageFiltered => "language",
            Self::BrandFiltered => "brand",
            Self::PrefixAutocomplete => "prefix",
            Self::Multilingual => "multilingual",
            Self::SpellingCorrection => "spelling",
        }
    }

    /// Fields (and boosts) this mode searches. Static per mode.
    pub fn fields(self) -> &'static [FieldBoost] {
        match self {
            Self::PrefixAutocomplete => PREFIX_FIELDS,
            Self::SpellingCorrection => SPELLING_FIELDS,
            _ => SEARCH_FIELDS,
        }
    }

    /// Whether responses for this mode carry a suggested correction
    pub fn suggests(self) -> bool {
        self == Self::SpellingCorrection
    }

    /// Validator and builder for this mode
    pub fn handler(self) -> ModeHandler {
        match self {
            Self::Basic => ModeHandler::new(require_text, builder::basic),
            Self::Fuzzy => ModeHandler::new(require_text, builder::fuzzy),
            Self::LanguageFiltered => ModeHandler::new(require_language, builder::filtered),
            Self::BrandFiltered => ModeHandler::new(require_brand, builder::filtered),
            Self::PrefixAutocomplete => ModeHandler::new(require_prefix, builder::prefix),
            Self::Multilingual => ModeHandler::new(require_text, builder::multilingual),
            Self::SpellingCorrection => {
                ModeHandler::new(require_text, builder::spelling_correction)
            }
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Raw caller inputs; which ones are required depends on the mode
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchInputs {
    /// Query text, or the prefix for autocomplete
    pub text: Option<String>,
    pub language: Option<String>,
    pub brand: Option<String>,
}

impl SearchInputs {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }
}

/// Inputs that passed a mode's validator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedInputs {
    pub text: String,
    pub filter: Option<TermFilter>,
}

pub type Validator = fn(&SearchInputs) -> Result<ValidatedInputs, ValidationError>;
pub type Builder = fn(&ValidatedInputs) -> QueryRequest;

/// One row of the dispatch table
#[derive(Clone, Copy)]
pub struct ModeHandler {
    pub validate: Validator,
    pub build: Builder,
}

impl ModeHandler {
    const fn new(validate: Validator, build: Builder) -> Self {
        Self { validate, build }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn require_text(inputs: &SearchInputs) -> Result<ValidatedInputs, ValidationError> {
    let text = non_blank(&inputs.text).ok_or(ValidationError::MissingQuery)?;
    Ok(ValidatedInputs {
        text: text.to_string(),
        filter: None,
    })
}

fn require_prefix(inputs: &SearchInputs) -> Result<ValidatedInputs, ValidationError> {
    let prefix = non_blank(&inputs.text).ok_or(ValidationError::MissingPrefix)?;
    Ok(ValidatedInputs {
        text: prefix.to_string(),
        filter: None,
    })
}

fn require_language(inputs: &SearchInputs) -> Result<ValidatedInputs, ValidationError> {
    let text = non_blank(&inputs.text).ok_or(ValidationError::MissingLanguage)?;
    let language = non_blank(&inputs.language).ok_or(ValidationError::MissingLanguage)?;
    Ok(ValidatedInputs {
        text: text.to_string(),
        filter: Some(TermFilter::new("language", language)),
    })
}

fn require_brand(inputs: &SearchInputs) -> Result<ValidatedInputs, ValidationError> {
    let text = non_blank(&inputs.text).ok_or(ValidationError::MissingBrand)?;
    let brand = non_blank(&inputs.brand).ok_or(ValidationError::MissingBrand)?;
    Ok(ValidatedInputs {
        text: text.to_string(),
        filter: Some(TermFilter::new("brand", brand)),
    })
}
