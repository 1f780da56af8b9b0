//! Indian rupee formatting

/// Format an amount as whole rupees with Indian digit grouping.
///
/// The last three digits form one group and every group before that has two
/// digits: `12345678.4` becomes `₹1,23,45,678`.
pub fn format_inr(amount: f64) -> String {
    if !amount.is_finite() {
        return "₹—".to_string();
    }

    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}₹{}", group_indian(&digits))
}

/// Price per square foot, e.g. `₹8,064 / sqft`
pub fn format_inr_per_sqft(amount: f64) -> String {
    format!("{} / sqft", format_inr(amount))
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{tail}", groups.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_amounts() {
        assert_eq!(format_inr(0.0), "₹0");
        assert_eq!(format_inr(7.0), "₹7");
        assert_eq!(format_inr(999.4), "₹999");
        assert_eq!(format_inr(999.5), "₹1,000");
    }

    #[test]
    fn test_indian_grouping() {
        assert_eq!(format_inr(1_000.0), "₹1,000");
        assert_eq!(format_inr(12_345.0), "₹12,345");
        assert_eq!(format_inr(123_456.0), "₹1,23,456");
        assert_eq!(format_inr(12_345_678.4), "₹1,23,45,678");
        assert_eq!(format_inr(10_000_000.0), "₹1,00,00,000");
        assert_eq!(format_inr(1_234_567_890.0), "₹1,23,45,67,890");
    }

    #[test]
    fn test_negative_and_non_finite() {
        assert_eq!(format_inr(-86_789.0), "-₹86,789");
        assert_eq!(format_inr(-0.2), "₹0");
        assert_eq!(format_inr(f64::INFINITY), "₹—");
        assert_eq!(format_inr(f64::NAN), "₹—");
    }

    #[test]
    fn test_per_sqft() {
        assert_eq!(format_inr_per_sqft(8_064.4), "₹8,064 / sqft");
    }
}
