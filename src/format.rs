//! Presentation formatting helpers
//!
//! Product pricing arrives as comma-delimited strings that line up
//! positionally with the billing-cycle list ("30,81,162" against "1,3,6").
//! These helpers split them into display-ready labels for the CLI output.

/// Splits a comma-delimited price list into currency-tagged labels
///
/// Prices are quoted in CNY by the provider, so entries are prefixed with
/// "¥". Empty segments are skipped.
pub fn format_prices(prices: &str) -> Vec<String> {
    prices
        .split(',')
        .map(str::trim)
        .filter(|price| !price.is_empty())
        .map(|price| format!("¥{}", price))
        .collect()
}

/// Maps a comma-delimited billing-cycle list (in months) to human labels
///
/// Known cycles get their idiomatic label; anything else falls back to
/// "N months".
pub fn format_cycles(cycles: &str) -> Vec<String> {
    cycles
        .split(',')
        .map(str::trim)
        .filter(|cycle| !cycle.is_empty())
        .map(|cycle| match cycle {
            "1" => "1 month".to_string(),
            "3" => "3 months".to_string(),
            "6" => "6 months".to_string(),
            "12" => "1 year".to_string(),
            other => format!("{} months", other),
        })
        .collect()
}

/// Pairs each price with its billing-cycle label ("¥30 / 1 month")
pub fn format_price_table(prices: &str, cycles: &str) -> Vec<String> {
    format_prices(prices)
        .into_iter()
        .zip(format_cycles(cycles))
        .map(|(price, cycle)| format!("{} / {}", price, cycle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_prices_tags_currency() {
        assert_eq!(format_prices("30,81,162"), vec!["¥30", "¥81", "¥162"]);
    }

    #[test]
    fn test_format_prices_single_entry() {
        assert_eq!(format_prices("25"), vec!["¥25"]);
    }

    #[test]
    fn test_format_prices_skips_empty_segments() {
        assert!(format_prices("").is_empty());
        assert_eq!(format_prices("30,,81"), vec!["¥30", "¥81"]);
    }

    #[test]
    fn test_format_cycles_known_labels() {
        assert_eq!(
            format_cycles("1,3,6,12"),
            vec!["1 month", "3 months", "6 months", "1 year"]
        );
    }

    #[test]
    fn test_format_cycles_unknown_falls_back() {
        assert_eq!(format_cycles("24"), vec!["24 months"]);
    }

    #[test]
    fn test_format_price_table_pairs_positionally() {
        assert_eq!(
            format_price_table("30,81", "1,3"),
            vec!["¥30 / 1 month", "¥81 / 3 months"]
        );
    }

    #[test]
    fn test_format_price_table_truncates_to_shorter_list() {
        assert_eq!(format_price_table("30,81,162", "1"), vec!["¥30 / 1 month"]);
    }
}
