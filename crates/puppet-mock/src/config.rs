//! Mocker configuration.

use std::env::{self, VarError};
use std::ops::RangeInclusive;

/// Default capacity of the puppet event channel.
const DEFAULT_EVENT_CAPACITY: usize = 64;

/// Default bounds for generated sentence length, in words.
const DEFAULT_SENTENCE_MIN_WORDS: usize = 3;
const DEFAULT_SENTENCE_MAX_WORDS: usize = 12;

/// Configuration for a [`Mocker`](crate::Mocker).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockerConfig {
    /// RNG seed. With a seed, ids, generated text and random picks are
    /// reproducible. Without one the RNG is seeded from the OS.
    pub seed: Option<u64>,

    /// Capacity of the broadcast channel carrying puppet events.
    /// Subscribers that fall further behind than this lose events.
    pub event_capacity: usize,

    /// Minimum number of words in a generated sentence.
    pub sentence_min_words: usize,

    /// Maximum number of words in a generated sentence.
    pub sentence_max_words: usize,
}

impl Default for MockerConfig {
    fn default() -> Self {
        Self {
            seed: None,
            event_capacity: DEFAULT_EVENT_CAPACITY,
            sentence_min_words: DEFAULT_SENTENCE_MIN_WORDS,
            sentence_max_words: DEFAULT_SENTENCE_MAX_WORDS,
        }
    }
}

impl MockerConfig {
    /// Create a default configuration with a fixed seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Default::default()
        }
    }

    /// Set the sentence length bounds.
    pub fn with_sentence_words(mut self, min: usize, max: usize) -> Self {
        self.sentence_min_words = min;
        self.sentence_max_words = max;
        self
    }

    /// Sentence length bounds as an inclusive range, normalized so it is
    /// never empty and never allows a zero-word sentence.
    pub fn sentence_words(&self) -> RangeInclusive<usize> {
        let min = self.sentence_min_words.max(1);
        let max = self.sentence_max_words.max(min);
        min..=max
    }

    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `MOCKER_SEED` | RNG seed | (random) |
    /// | `MOCKER_EVENT_CAPACITY` | Event channel capacity | `64` |
    /// | `MOCKER_SENTENCE_MIN_WORDS` | Shortest generated sentence | `3` |
    /// | `MOCKER_SENTENCE_MAX_WORDS` | Longest generated sentence | `12` |
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let seed = match read_var("MOCKER_SEED")? {
            Some(value) => Some(parse_var("MOCKER_SEED", &value)?),
            None => None,
        };

        let event_capacity = parse_var_or("MOCKER_EVENT_CAPACITY", defaults.event_capacity)?;
        if event_capacity == 0 {
            return Err(ConfigError::ZeroEventCapacity);
        }

        let sentence_min_words =
            parse_var_or("MOCKER_SENTENCE_MIN_WORDS", defaults.sentence_min_words)?;
        let sentence_max_words =
            parse_var_or("MOCKER_SENTENCE_MAX_WORDS", defaults.sentence_max_words)?;
        if sentence_min_words == 0 || sentence_min_words > sentence_max_words {
            return Err(ConfigError::InvalidSentenceRange {
                min: sentence_min_words,
                max: sentence_max_words,
            });
        }

        Ok(Self {
            seed,
            event_capacity,
            sentence_min_words,
            sentence_max_words,
        })
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        name,
        value: value.to_string(),
    })
}

fn parse_var_or<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match read_var(name)? {
        Some(value) => parse_var(name, &value),
        None => Ok(default),
    }
}

fn read_var(name: &'static str) -> Result<Option<String>, ConfigError> {
    var_value(name, env::var(name))
}

/// Unset is `None`; a value that is not valid UTF-8 is an error.
fn var_value(
    name: &'static str,
    result: Result<String, VarError>,
) -> Result<Option<String>, ConfigError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(raw)) => Err(ConfigError::InvalidValue {
            name,
            value: raw.to_string_lossy().into_owned(),
        }),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },

    #[error("MOCKER_EVENT_CAPACITY must be greater than zero")]
    ZeroEventCapacity,

    #[error("Invalid sentence length range {min}..={max}")]
    InvalidSentenceRange { min: usize, max: usize },
}
