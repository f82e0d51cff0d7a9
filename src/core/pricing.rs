/// Per-currency price bands for classifying an average main-course price
/// into a price level.
///
/// Bounds are ascending upper limits for levels 1 through 4; anything above
/// the last bound is level 5. The tables are app heuristics carried over
/// as-is.
struct PriceBands {
    currency: &'static str,
    symbol: &'static str,
    bounds: [f64; 4],
}

const PRICE_BANDS: &[PriceBands] = &[
    PriceBands { currency: "EUR", symbol: "€", bounds: [15.0, 30.0, 50.0, 75.0] },
    PriceBands { currency: "USD", symbol: "$", bounds: [18.0, 35.0, 60.0, 90.0] },
    PriceBands { currency: "GBP", symbol: "£", bounds: [12.0, 28.0, 45.0, 70.0] },
    PriceBands { currency: "TRY", symbol: "₺", bounds: [250.0, 500.0, 900.0, 1500.0] },
];

fn bands_for(currency: &str) -> &'static PriceBands {
    PRICE_BANDS
        .iter()
        .find(|b| b.currency.eq_ignore_ascii_case(currency))
        // Unknown currencies fall back to the EUR bands
        .unwrap_or(&PRICE_BANDS[0])
}

/// Classify an average main-course price into a price level (1-5).
pub fn classify_price(avg_main_price: f64, currency: &str) -> u8 {
    let bands = bands_for(currency);
    let mut level = 1u8;
    for bound in bands.bounds {
        if avg_main_price <= bound {
            return level;
        }
        level += 1;
    }
    5
}

/// Render a price level as a repeated currency sign, e.g. level 3 EUR -> "€€€".
///
/// Levels outside 1-5 are clamped into range.
pub fn price_sign(level: u8, currency: &str) -> String {
    let bands = bands_for(currency);
    let level = level.clamp(1, 5) as usize;
    bands.symbol.repeat(level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_price_eur_bands() {
        assert_eq!(classify_price(9.50, "EUR"), 1);
        assert_eq!(classify_price(15.0, "EUR"), 1);
        assert_eq!(classify_price(22.0, "EUR"), 2);
        assert_eq!(classify_price(45.0, "EUR"), 3);
        assert_eq!(classify_price(60.0, "EUR"), 4);
        assert_eq!(classify_price(120.0, "EUR"), 5);
    }

    #[test]
    fn test_classify_price_try_bands() {
        assert_eq!(classify_price(180.0, "TRY"), 1);
        assert_eq!(classify_price(700.0, "TRY"), 3);
        assert_eq!(classify_price(2000.0, "TRY"), 5);
    }

    #[test]
    fn test_classify_price_unknown_currency_uses_eur() {
        assert_eq!(classify_price(22.0, "CHF"), classify_price(22.0, "EUR"));
    }

    #[test]
    fn test_price_sign() {
        assert_eq!(price_sign(1, "EUR"), "€");
        assert_eq!(price_sign(3, "EUR"), "€€€");
        assert_eq!(price_sign(5, "USD"), "$$$$$");
        assert_eq!(price_sign(2, "GBP"), "££");
    }

    #[test]
    fn test_price_sign_clamps_level() {
        assert_eq!(price_sign(0, "EUR"), "€");
        assert_eq!(price_sign(9, "EUR"), "€€€€€");
    }
}
