//! Number formatting for displayed values.

/// Format a number without grouping: integral values drop the fraction.
pub fn plain(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{}", v)
    }
}

/// Format a number with `,` thousands separators: `1234` → `"1,234"`,
/// `-1234567.5` → `"-1,234,567.5"`.
pub fn grouped(v: f64) -> String {
    let text = plain(v);
    if !v.is_finite() {
        return text;
    }

    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let digits = int_part.len();
    let mut out = String::with_capacity(text.len() + digits / 3);
    out.push_str(sign);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (digits - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Compact tick label: at most one decimal place.
pub fn tick(v: f64) -> String {
    if (v - v.round()).abs() < 1e-9 {
        grouped(v.round())
    } else {
        format!("{:.1}", v)
    }
}
