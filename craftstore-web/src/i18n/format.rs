/// Group thousands with a narrow space, as Russian price tags do.
#[must_use]
pub fn fmt_number(num: u64) -> String {
    let digits = num.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('\u{202f}');
        }
        out.push(ch);
    }
    out
}

/// Price in roubles, e.g. `1 299 ₽`.
#[must_use]
pub fn fmt_rub(amount: u64) -> String {
    format!("{} ₽", fmt_number(amount))
}

#[must_use]
pub fn fmt_pct(pct: u8) -> String {
    format!("{pct}%")
}
