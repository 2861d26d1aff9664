//! Variant axes, option choices and canonical combinations.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A named axis of product customisation (e.g. "color").
///
/// Input as typed by the user: names and options may carry surrounding
/// whitespace or be blank. Use [`Variant::is_valid`] and
/// [`Variant::valid_options`] to see what generation will actually use.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    /// Axis name.
    pub name: String,
    /// Permissible values on this axis, in display order.
    #[serde(default)]
    pub options: Vec<String>,
}

impl Variant {
    /// Create a variant from a name and its options.
    #[must_use]
    pub fn new<N, I, O>(name: N, options: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = O>,
        O: Into<String>,
    {
        Self {
            name: name.into(),
            options: options.into_iter().map(Into::into).collect(),
        }
    }

    /// An empty variant with a single empty option, the shape a fresh form row starts with.
    #[must_use]
    pub fn blank() -> Self {
        Self {
            name: String::new(),
            options: vec![String::new()],
        }
    }

    /// The trimmed axis name.
    #[must_use]
    pub fn trimmed_name(&self) -> &str {
        self.name.trim()
    }

    /// Trimmed, non-blank options in input order.
    ///
    /// Options that are equal after trimming appear once, at their first
    /// position.
    #[must_use]
    pub fn valid_options(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.options
            .iter()
            .map(|option| option.trim())
            .filter(|option| !option.is_empty() && seen.insert(*option))
            .collect()
    }

    /// A variant takes part in generation only with a non-blank name and at
    /// least one non-blank option.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.trimmed_name().is_empty() && self.options.iter().any(|o| !o.trim().is_empty())
    }
}

/// One concrete choice on one axis.
///
/// Field order matters: the derived `Ord` sorts by variant name, then option,
/// which is the canonical order of a [`Combination`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OptionChoice {
    /// Axis name (trimmed).
    pub variant_name: String,
    /// Chosen option (trimmed).
    pub option: String,
}

impl OptionChoice {
    /// Create a choice, trimming both parts.
    #[must_use]
    pub fn new(variant_name: impl AsRef<str>, option: impl AsRef<str>) -> Self {
        Self {
            variant_name: variant_name.as_ref().trim().to_owned(),
            option: option.as_ref().trim().to_owned(),
        }
    }

    /// The `"variantName:option"` form used in canonical keys.
    #[must_use]
    pub fn key_entry(&self) -> String {
        format!("{}:{}", self.variant_name, self.option)
    }
}

impl fmt::Display for OptionChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.variant_name, self.option)
    }
}

/// One option per variant, kept sorted by `(variant_name, option)`.
///
/// The sort happens on construction and on deserialization, so two
/// combinations holding the same choices are equal no matter what order the
/// choices were supplied in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<OptionChoice>", into = "Vec<OptionChoice>")]
pub struct Combination(Vec<OptionChoice>);

impl Combination {
    /// Build a combination from choices in any order.
    #[must_use]
    pub fn from_choices(choices: impl IntoIterator<Item = OptionChoice>) -> Self {
        let mut choices: Vec<OptionChoice> = choices.into_iter().collect();
        choices.sort();
        Self(choices)
    }

    /// Choices in canonical order.
    #[must_use]
    pub fn choices(&self) -> &[OptionChoice] {
        &self.0
    }

    /// Number of choices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no axis contributed a choice.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Option labels in canonical order, e.g. `["Red", "S"]`.
    #[must_use]
    pub fn option_labels(&self) -> Vec<String> {
        self.0.iter().map(|choice| choice.option.clone()).collect()
    }

    /// Option labels joined for display, e.g. `"Red, S"`.
    #[must_use]
    pub fn label(&self) -> String {
        self.0
            .iter()
            .map(|choice| choice.option.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// The identity of this combination across regenerations.
    #[must_use]
    pub fn key(&self) -> CanonicalKey {
        CanonicalKey(self.0.iter().map(OptionChoice::key_entry).collect())
    }
}

impl From<Vec<OptionChoice>> for Combination {
    fn from(choices: Vec<OptionChoice>) -> Self {
        Self::from_choices(choices)
    }
}

impl From<Combination> for Vec<OptionChoice> {
    fn from(combination: Combination) -> Self {
        combination.0
    }
}

impl fmt::Display for Combination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Sorted `"variantName:option"` entries identifying a combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalKey(Vec<String>);

impl CanonicalKey {
    /// The key entries in canonical order.
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.join(","))
    }
}
