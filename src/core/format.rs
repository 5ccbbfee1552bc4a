use smallvec::SmallVec;

/// Formats `value` as a thousands-grouped integer (`1234567.8` -> `1,234,568`).
/// Halves round up.
#[must_use]
pub fn format_thousands(value: f64) -> String {
    if !value.is_finite() {
        return format_non_finite(value);
    }
    let rounded = (value + 0.5).floor();
    let digits = format!("{:.0}", rounded.abs());
    let grouped = group_digits(&digits);
    if rounded < 0.0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// `en-US` number formatting: thousands-grouped with at most three fraction
/// digits, trailing zeros trimmed.
#[must_use]
pub fn format_en_us(value: f64) -> String {
    if !value.is_finite() {
        return format_non_finite(value);
    }
    let scaled = (value.abs() * 1_000.0).round();
    let integer = (scaled / 1_000.0).trunc();
    let fraction = (scaled - integer * 1_000.0).round() as u32;

    let mut out = String::new();
    if value < 0.0 && scaled > 0.0 {
        out.push('-');
    }
    out.push_str(&group_digits(&format!("{integer:.0}")));
    if fraction > 0 {
        let fraction = format!("{fraction:03}");
        out.push('.');
        out.push_str(fraction.trim_end_matches('0'));
    }
    out
}

fn format_non_finite(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_owned()
    } else if value > 0.0 {
        "∞".to_owned()
    } else {
        "-∞".to_owned()
    }
}

fn group_digits(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (len - index) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Splits a tile name into label lines.
///
/// Lines break on whitespace and before every capitalized word (an ASCII
/// uppercase letter followed by a lowercase one), so `"TheDark Knight"`
/// becomes `["The", "Dark", "Knight"]`.
#[must_use]
pub fn tokenize_label(name: &str) -> SmallVec<[String; 4]> {
    let mut tokens = SmallVec::new();
    let mut current = String::new();
    let chars: Vec<char> = name.chars().collect();

    for (index, &ch) in chars.iter().enumerate() {
        if ch.is_whitespace() {
            flush_token(&mut tokens, &mut current);
            continue;
        }
        let starts_word = ch.is_ascii_uppercase()
            && chars
                .get(index + 1)
                .is_some_and(|next| next.is_ascii_lowercase());
        if starts_word {
            flush_token(&mut tokens, &mut current);
        }
        current.push(ch);
    }
    flush_token(&mut tokens, &mut current);
    tokens
}

fn flush_token(tokens: &mut SmallVec<[String; 4]>, current: &mut String) {
    if !current.is_empty() {
        tokens.push(std::mem::take(current));
    }
}
