//! Configuration for a traversal pass.
//!
//! A pass is configured by six values, none of which have defaults. The
//! configuration is validated in full when it is built, so a bad direction or a
//! missing label fails the pass before any vertex is read. Once built, a
//! `TraverseConfig` is immutable and is shared between workers behind an `Arc`.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::graph::Direction;

/// Key naming the role of the first frontier vertex.
pub const FIRST_DIRECTION: &str = "traverse.firstDirection";
/// Key naming the label of the first hop.
pub const FIRST_LABEL: &str = "traverse.firstLabel";
/// Key naming the role of the second frontier vertex.
pub const SECOND_DIRECTION: &str = "traverse.secondDirection";
/// Key naming the label of the second hop.
pub const SECOND_LABEL: &str = "traverse.secondLabel";
/// Key naming the label of derived edges.
pub const NEW_LABEL: &str = "traverse.newLabel";
/// Key naming the retention action.
pub const ACTION: &str = "traverse.action";

/// What happens to the edges a derived edge summarizes.
#[derive(Debug, Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum Action {
    /// Every pre-existing edge is kept.
    Keep,
    /// Pre-existing edges labeled with either pattern label are dropped.
    Prune,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Keep => f.write_str("KEEP"),
            Action::Prune => f.write_str("PRUNE"),
        }
    }
}

impl FromStr for Action {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "KEEP" => Ok(Action::Keep),
            "PRUNE" => Ok(Action::Prune),
            _ => Err(Error::InvalidAction(s.to_string())),
        }
    }
}

// `BOTH` is a direction elsewhere, but it has no meaning for a frontier.
impl FromStr for Direction {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "IN" => Ok(Direction::In),
            "OUT" => Ok(Direction::Out),
            _ => Err(Error::InvalidDirection(s.to_string())),
        }
    }
}

/// The pattern `first -[first_label]- vertex -[second_label]- second` and what to do with it.
///
/// The directions describe the role of the frontier vertex relative to the
/// vertex being processed. With `first_direction == Out` the first frontier
/// vertex points *into* the processed vertex; with `second_direction == Out`
/// the processed vertex points into the second frontier vertex. Derived edges
/// always run from the first frontier to the second.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TraverseConfig {
    /// The role of the first frontier vertex.
    pub first_direction: Direction,
    /// The label of edges to the first frontier.
    pub first_label: String,
    /// The role of the second frontier vertex.
    pub second_direction: Direction,
    /// The label of edges to the second frontier.
    pub second_label: String,
    /// The label given to derived edges.
    pub new_label: String,
    /// Whether edges matching either pattern label survive.
    pub action: Action,
}

impl TraverseConfig {

    /// Starts building a configuration programmatically.
    pub fn builder() -> Builder { Builder::default() }

    /// Reads a configuration from namespaced key-value pairs.
    ///
    /// Keys outside the `traverse.` namespace are ignored, so a job may hand
    /// over its entire configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use differential_traverse::config::{TraverseConfig, Action};
    ///
    /// let config = TraverseConfig::from_properties(vec![
    ///     ("traverse.firstDirection", "OUT"),
    ///     ("traverse.firstLabel", "knows"),
    ///     ("traverse.secondDirection", "OUT"),
    ///     ("traverse.secondLabel", "likes"),
    ///     ("traverse.newLabel", "knows_likes"),
    ///     ("traverse.action", "PRUNE"),
    /// ]).unwrap();
    ///
    /// assert_eq!(config.action, Action::Prune);
    /// ```
    pub fn from_properties<I, K, V>(properties: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut raw = RawConfig::default();
        for (key, value) in properties {
            let slot = match key.as_ref() {
                FIRST_DIRECTION => &mut raw.first_direction,
                FIRST_LABEL => &mut raw.first_label,
                SECOND_DIRECTION => &mut raw.second_direction,
                SECOND_LABEL => &mut raw.second_label,
                NEW_LABEL => &mut raw.new_label,
                ACTION => &mut raw.action,
                _ => continue,
            };
            *slot = Some(value.into());
        }
        raw.validate()
    }

    /// Reads a configuration from the `[traverse]` table of a TOML document.
    ///
    /// ```toml
    /// [traverse]
    /// first_direction = "OUT"
    /// first_label = "knows"
    /// second_direction = "OUT"
    /// second_label = "likes"
    /// new_label = "knows_likes"
    /// action = "PRUNE"
    /// ```
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(text)?;
        file.traverse.validate()
    }

    /// Reads a TOML configuration file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// True when `label` is one of the two pattern labels.
    pub fn is_pattern_label(&self, label: &str) -> bool {
        label == self.first_label || label == self.second_label
    }

    /// True when a pre-existing edge labeled `label` survives the pass.
    pub fn retains(&self, label: &str) -> bool {
        match self.action {
            Action::Keep => true,
            Action::Prune => !self.is_pattern_label(label),
        }
    }
}

impl fmt::Display for TraverseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} . {}:{} => {} ({})",
            self.first_direction,
            self.first_label,
            self.second_direction,
            self.second_label,
            self.new_label,
            self.action,
        )
    }
}

/// Accumulates configuration values before validation.
#[derive(Debug, Default, Clone)]
pub struct Builder {
    raw: RawConfig,
}

impl Builder {
    /// Sets the first hop.
    pub fn first(mut self, direction: Direction, label: impl Into<String>) -> Self {
        self.raw.first_direction = Some(direction.to_string());
        self.raw.first_label = Some(label.into());
        self
    }
    /// Sets the second hop.
    pub fn second(mut self, direction: Direction, label: impl Into<String>) -> Self {
        self.raw.second_direction = Some(direction.to_string());
        self.raw.second_label = Some(label.into());
        self
    }
    /// Sets the label of derived edges.
    pub fn new_label(mut self, label: impl Into<String>) -> Self {
        self.raw.new_label = Some(label.into());
        self
    }
    /// Sets the retention action.
    pub fn action(mut self, action: Action) -> Self {
        self.raw.action = Some(action.to_string());
        self
    }
    /// Validates the accumulated values.
    pub fn build(self) -> Result<TraverseConfig> {
        self.raw.validate()
    }
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    traverse: RawConfig,
}

/// Configuration values as supplied, before validation.
#[derive(Debug, Default, Clone, Deserialize)]
struct RawConfig {
    first_direction: Option<String>,
    first_label: Option<String>,
    second_direction: Option<String>,
    second_label: Option<String>,
    new_label: Option<String>,
    action: Option<String>,
}

impl RawConfig {
    fn validate(self) -> Result<TraverseConfig> {
        let config = TraverseConfig {
            first_direction: required(self.first_direction, FIRST_DIRECTION)?.parse()?,
            first_label: label(self.first_label, FIRST_LABEL)?,
            second_direction: required(self.second_direction, SECOND_DIRECTION)?.parse()?,
            second_label: label(self.second_label, SECOND_LABEL)?,
            new_label: label(self.new_label, NEW_LABEL)?,
            action: required(self.action, ACTION)?.parse()?,
        };
        tracing::debug!(%config, "validated traverse configuration");
        Ok(config)
    }
}

fn required(value: Option<String>, key: &'static str) -> Result<String> {
    value.ok_or(Error::MissingKey(key))
}

fn label(value: Option<String>, key: &'static str) -> Result<String> {
    let value = required(value, key)?;
    if value.is_empty() { Err(Error::EmptyLabel(key)) } else { Ok(value) }
}
