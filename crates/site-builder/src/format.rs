//! Display formatting shared by the page templates.

/// One- or two-letter initials for the avatar badge next to a company name.
pub fn initials(name: &str) -> String {
    let cleaned = name.replace('.', "");
    let words: Vec<&str> = cleaned.split_whitespace().collect();
    if words.len() >= 2 {
        let mut out = String::new();
        if let Some(c) = words[0].chars().next() {
            out.push(c);
        }
        if let Some(c) = words[1].chars().next() {
            out.push(c);
        }
        out.to_uppercase()
    } else {
        name.chars().take(2).collect::<String>().to_uppercase()
    }
}

/// Human-readable market cap: $2.9T, $10.4B, $350M, $850,000 or N/A.
pub fn market_cap(value: f64) -> String {
    if value == 0.0 {
        return "N/A".to_string();
    }
    if value >= 1e12 {
        return format!("${:.1}T", value / 1e12);
    }
    if value >= 1e9 {
        return format!("${:.1}B", value / 1e9);
    }
    if value >= 1e6 {
        return format!("${:.0}M", value / 1e6);
    }
    format!("${}", group_digits(&format!("{:.0}", value)))
}

/// Dollar price with cents and thousands separators.
pub fn price(value: f64) -> String {
    if value == 0.0 {
        return "$0.00".to_string();
    }
    let formatted = format!("{:.2}", value);
    match formatted.split_once('.') {
        Some((whole, cents)) => format!("${}.{}", group_digits(whole), cents),
        None => format!("${}", group_digits(&formatted)),
    }
}

/// P/E ratio as "24.7x", or N/A when missing or zero.
pub fn pe(value: Option<f64>) -> String {
    match value {
        Some(v) if v != 0.0 => format!("{:.1}x", v),
        _ => "N/A".to_string(),
    }
}

/// Plain count with thousands separators, for volumes and byte totals.
pub fn count(value: u64) -> String {
    group_digits(&value.to_string())
}

fn group_digits(digits: &str) -> String {
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };

    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    format!("{sign}{out}")
}
