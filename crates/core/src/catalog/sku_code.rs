//! SKU code preview.

use super::variant::Combination;

/// Preview the SKU code the backend will assign to a combination.
///
/// The backend builds `"{product_code}-{OPTION}-{OPTION}..."` from the
/// options in canonical order, with spaces removed and letters upper-cased.
/// If the code is already taken it appends `-1`, `-2`, ... which cannot be
/// known ahead of submission, so this is only a preview.
///
/// ```
/// use stockroom_core::{Combination, OptionChoice, sku_code_preview};
///
/// let combination = Combination::from_choices([
///     OptionChoice::new("size", "x large"),
///     OptionChoice::new("color", "Navy Blue"),
/// ]);
/// assert_eq!(sku_code_preview("TS-01", &combination), "TS-01-NAVYBLUE-XLARGE");
/// ```
#[must_use]
pub fn sku_code_preview(product_code: &str, combination: &Combination) -> String {
    let slug = combination
        .choices()
        .iter()
        .map(|choice| choice.option.replace(' ', "").to_uppercase())
        .collect::<Vec<_>>()
        .join("-");

    format!("{}-{slug}", product_code.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::OptionChoice;

    #[test]
    fn test_preview_uses_canonical_order() {
        let combination = Combination::from_choices([
            OptionChoice::new("size", "m"),
            OptionChoice::new("color", "red"),
        ]);
        assert_eq!(sku_code_preview(" SHIRT ", &combination), "SHIRT-RED-M");
    }

    #[test]
    fn test_preview_without_options() {
        assert_eq!(sku_code_preview("MUG", &Combination::default()), "MUG-");
    }
}
