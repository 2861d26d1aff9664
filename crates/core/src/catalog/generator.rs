//! SKU generation with stable stock merge.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::variant::{CanonicalKey, Combination, OptionChoice, Variant};
use crate::types::StockQuantity;

/// A generated SKU and the stock the user entered for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedSku {
    /// The option combination, in canonical order.
    pub options: Combination,
    /// Initial stock for this SKU.
    #[serde(default)]
    pub stock: StockQuantity,
}

impl GeneratedSku {
    /// A SKU with zero stock.
    #[must_use]
    pub const fn new(options: Combination) -> Self {
        Self {
            options,
            stock: StockQuantity::ZERO,
        }
    }

    /// Identity used when merging generations.
    #[must_use]
    pub fn key(&self) -> CanonicalKey {
        self.options.key()
    }
}

/// Compute every combination of one option per valid variant.
///
/// Variants with a blank name or no non-blank option are skipped; if none
/// remain the result is empty. Enumeration follows the variant order given,
/// the first variant varying slowest. Stock is carried over from `previous`
/// for every combination whose canonical key appears there, and defaults to
/// zero otherwise. Combinations that can no longer be produced are dropped.
///
/// A variant name repeated after trimming only counts at its first valid
/// occurrence, so canonical keys stay unique.
///
/// # Example
///
/// ```
/// use stockroom_core::{Variant, generate};
///
/// let variants = [
///     Variant::new("size", ["S", "M"]),
///     Variant::new("color", ["Red", "Blue"]),
/// ];
/// let skus = generate(&variants, &[]);
///
/// let labels: Vec<String> = skus.iter().map(|sku| sku.options.label()).collect();
/// assert_eq!(labels, ["Red, S", "Blue, S", "Red, M", "Blue, M"]);
/// ```
#[must_use]
pub fn generate(variants: &[Variant], previous: &[GeneratedSku]) -> Vec<GeneratedSku> {
    let choice_sets = choice_sets(variants);
    if choice_sets.is_empty() {
        return Vec::new();
    }

    let mut carried: HashMap<CanonicalKey, StockQuantity> = HashMap::with_capacity(previous.len());
    for sku in previous {
        carried.entry(sku.key()).or_insert(sku.stock);
    }

    cartesian_product(&choice_sets)
        .into_iter()
        .map(|choices| {
            let options = Combination::from_choices(choices);
            let stock = carried
                .get(&options.key())
                .copied()
                .unwrap_or(StockQuantity::ZERO);
            GeneratedSku { options, stock }
        })
        .collect()
}

/// Variants that take part in generation, in input order.
///
/// Invalid variants are skipped, and a name repeated after trimming is kept
/// only at its first valid occurrence.
pub fn valid_variants(variants: &[Variant]) -> impl Iterator<Item = &Variant> {
    let mut seen_names = HashSet::new();
    variants
        .iter()
        .filter(|variant| variant.is_valid())
        .filter(move |variant| seen_names.insert(variant.trimmed_name()))
}

/// Per valid variant, its trimmed option choices in input order.
fn choice_sets(variants: &[Variant]) -> Vec<Vec<OptionChoice>> {
    valid_variants(variants)
        .map(|variant| {
            let name = variant.trimmed_name();
            variant
                .valid_options()
                .into_iter()
                .map(|option| OptionChoice::new(name, option))
                .collect()
        })
        .collect()
}

/// Left-to-right product expansion: the first set varies slowest.
fn cartesian_product(sets: &[Vec<OptionChoice>]) -> Vec<Vec<OptionChoice>> {
    sets.iter().fold(vec![Vec::new()], |prefixes, set| {
        prefixes
            .iter()
            .flat_map(|prefix| {
                set.iter().map(move |choice| {
                    let mut next = Vec::with_capacity(prefix.len() + 1);
                    next.extend_from_slice(prefix);
                    next.push(choice.clone());
                    next
                })
            })
            .collect()
    })
}
