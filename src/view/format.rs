pub const NOT_AVAILABLE: &str = "N/A";
pub const NO_REGRET_BADGE: &str = "Lowest in 1 year — No Regret!";

pub fn money(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("${v:.2}"),
        _ => NOT_AVAILABLE.to_string(),
    }
}

pub fn decimal(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.2}"),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Whole percent, truncated toward zero.
pub fn percent(rate: f64) -> String {
    format!("{}%", (rate * 100.0) as i64)
}

/// Ratings keep one decimal for whole numbers ("4.0") and otherwise print
/// as scraped ("4.5").
pub fn rating(stars: Option<f64>) -> String {
    match stars {
        Some(s) if s.fract() == 0.0 => format!("{s:.1}"),
        Some(s) => format!("{s}"),
        None => NOT_AVAILABLE.to_string(),
    }
}

pub fn subtitle(brand: &str, stars: Option<f64>, reviews: Option<f64>) -> String {
    let reviews = reviews.map_or(0, |r| r as i64);
    format!("Brand: {brand} · Rating: {} · Reviews: {reviews}", rating(stars))
}

/// "Save $x.xx" against a notional was-price of `price * markup`; empty
/// when the price is absent.
pub fn savings(price: Option<f64>, markup: f64) -> String {
    match price {
        Some(p) => format!("Save ${:.2}", p * markup - p),
        None => String::new(),
    }
}

pub fn competitor(channel: &str, price: Option<f64>) -> String {
    format!("{channel}  {}", money(price))
}

pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_and_missing_values() {
        assert_eq!(money(Some(19.999)), "$20.00");
        assert_eq!(money(None), "N/A");
        assert_eq!(money(Some(f64::NAN)), "N/A");
        assert_eq!(decimal(Some(1.234)), "1.23");
    }

    #[test]
    fn test_percent_truncates() {
        assert_eq!(percent(0.25), "25%");
        assert_eq!(percent(0.1), "10%");
        assert_eq!(percent(0.159), "15%");
    }

    #[test]
    fn test_subtitle_and_savings() {
        assert_eq!(
            subtitle("Ninja", Some(4.0), Some(1532.0)),
            "Brand: Ninja · Rating: 4.0 · Reviews: 1532"
        );
        assert_eq!(
            subtitle("", Some(4.5), None),
            "Brand:  · Rating: 4.5 · Reviews: 0"
        );
        assert_eq!(savings(Some(50.0), 1.2), "Save $10.00");
        assert_eq!(savings(None, 1.2), "");
    }

    #[test]
    fn test_competitor_label() {
        assert_eq!(competitor("JD.com", Some(107.0)), "JD.com  $107.00");
        assert_eq!(competitor("Suning", None), "Suning  N/A");
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("Crème brûlée torch", 5), "Crème");
    }
}
