use std::sync::OnceLock;

use regex::Regex;
use rust_decimal::Decimal;
use thiserror::Error;

/// Error returned when a string cannot be parsed as a [`Decimal`].
#[derive(Debug, Error)]
#[error("invalid decimal '{input}': {source}")]
pub struct ParseDecimalError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Normalizes input for decimal parsing: trims whitespace and removes commas (thousands separator).
fn normalize_decimal_input(s: &str) -> String {
    s.trim().replace(',', "")
}

/// Parses a string into a [`Decimal`].
///
/// Handles comma as thousands separator (e.g. `"1,234.56"`).
/// Empty or whitespace-only input is treated as 0.
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| {
        tracing::error!(input = %s, "invalid decimal: {}", e);
        ParseDecimalError {
            input: s.to_string(),
            source: e,
        }
    })
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LineSpecError {
    #[error("expected CATEGORY/ITEM=QUANTITY[:DESCRIPTION], got '{0}'")]
    Format(String),

    #[error("invalid quantity '{0}'")]
    Quantity(String),
}

/// One `--line` argument of the estimate command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSpec {
    pub category: String,
    pub item: String,
    pub quantity: Decimal,
    pub description: String,
}

fn line_spec_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // Category names never contain '/', item names may.
    PATTERN.get_or_init(|| {
        Regex::new(r"^\s*(?P<category>[^/]+?)\s*/\s*(?P<item>.+?)\s*=\s*(?P<qty>[^:]+?)\s*(?::(?P<desc>.*))?$")
            .expect("line spec pattern is valid")
    })
}

impl LineSpec {
    /// Parses `Category/Item=QTY[:description]`.
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use site_ui::utils::LineSpec;
    ///
    /// let spec = LineSpec::parse("Bricks and Blocks/Standard Clay Brick=100").unwrap();
    /// assert_eq!(spec.item, "Standard Clay Brick");
    /// assert_eq!(spec.quantity, dec!(100));
    /// assert_eq!(spec.description, "");
    /// ```
    pub fn parse(s: &str) -> Result<Self, LineSpecError> {
        let captures = line_spec_pattern()
            .captures(s)
            .ok_or_else(|| LineSpecError::Format(s.to_string()))?;

        let qty = &captures["qty"];
        let quantity =
            parse_decimal(qty).map_err(|_| LineSpecError::Quantity(qty.to_string()))?;

        Ok(Self {
            category: captures["category"].to_string(),
            item: captures["item"].to_string(),
            quantity,
            description: captures
                .name("desc")
                .map(|m| m.as_str().trim().to_string())
                .unwrap_or_default(),
        })
    }
}

/// Pads or truncates `text` to exactly `width` characters.
pub fn fit(
    text: &str,
    width: usize,
) -> String {
    let count = text.chars().count();
    if count <= width {
        format!("{text:<width$}")
    } else if width == 0 {
        String::new()
    } else {
        let mut cut: String = text.chars().take(width - 1).collect();
        cut.push('…');
        cut
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn parse_decimal_accepts_comma_thousands_separator() {
        assert_eq!(parse_decimal("1,234.56").unwrap(), dec!(1234.56));
        assert_eq!(parse_decimal("1,234,567.89").unwrap(), dec!(1234567.89));
    }

    #[test]
    fn parse_decimal_empty_treated_as_zero() {
        assert_eq!(parse_decimal("").unwrap(), Decimal::ZERO);
        assert_eq!(parse_decimal("   ").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn parse_decimal_invalid_returns_error() {
        assert!(parse_decimal("abc").is_err());
    }

    #[test]
    fn line_spec_with_description() {
        let spec = LineSpec::parse("Concrete and Cement / Portland Cement = 1,200 : Ground slab").unwrap();

        assert_eq!(
            spec,
            LineSpec {
                category: "Concrete and Cement".to_string(),
                item: "Portland Cement".to_string(),
                quantity: dec!(1200),
                description: "Ground slab".to_string(),
            }
        );
    }

    #[test]
    fn line_spec_item_may_contain_slash_and_parens() {
        let spec = LineSpec::parse("Wood and Timber/Plywood (4x8) 1/2in=3.5").unwrap();

        assert_eq!(spec.item, "Plywood (4x8) 1/2in");
        assert_eq!(spec.quantity, dec!(3.5));
    }

    #[test]
    fn line_spec_keeps_negative_quantity_for_core_validation() {
        let spec = LineSpec::parse("General Labor/Skilled Labor=-2").unwrap();

        assert_eq!(spec.quantity, dec!(-2));
    }

    #[test]
    fn line_spec_rejects_missing_parts() {
        assert!(matches!(
            LineSpec::parse("Portland Cement=3"),
            Err(LineSpecError::Format(_))
        ));
        assert_eq!(
            LineSpec::parse("Finishes/Ceramic Tile=lots"),
            Err(LineSpecError::Quantity("lots".to_string()))
        );
    }

    #[test]
    fn fit_pads_and_truncates() {
        assert_eq!(fit("Sand", 6), "Sand  ");
        assert_eq!(fit("Portland Cement", 8), "Portlan…");
    }
}
