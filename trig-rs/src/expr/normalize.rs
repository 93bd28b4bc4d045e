use core::f64::consts::PI;

/// Canonical spelling of the power operator.
///
/// The supported grammar has no exponents, so the token only exists to be
/// rejected with a clear message instead of being misread as a numeral.
pub const POWER_TOKEN: &str = "**";

/// Canonicalize raw user text before extraction.
///
/// Lowercases, drops all whitespace, rewrites the Portuguese `sen` to `sin`,
/// `^` to [`POWER_TOKEN`], and `π`/`pi` to the numeric value of pi. The
/// constant is printed with Rust's shortest round-trip formatting so parsing
/// it back yields exactly [`PI`]. A `*` is inserted where the constant touches
/// a numeral, `x` or a parenthesis, so `2π` stays a product.
///
/// Never fails; characters outside the grammar pass through untouched.
pub fn normalize(text: &str) -> String {
    let compact: String = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();
    let compact = compact.replace("sen", "sin").replace('^', POWER_TOKEN);

    let pi = PI.to_string();
    let mut out = String::with_capacity(compact.len() + pi.len());
    let mut rest = compact.as_str();
    while !rest.is_empty() {
        let skip = if rest.starts_with('π') {
            'π'.len_utf8()
        } else if rest.starts_with("pi") {
            2
        } else {
            let mut chars = rest.chars();
            if let Some(c) = chars.next() {
                out.push(c);
            }
            rest = chars.as_str();
            continue;
        };

        if out.ends_with(|c: char| c.is_ascii_digit() || matches!(c, '.' | 'x' | ')')) {
            out.push('*');
        }
        out.push_str(&pi);
        rest = &rest[skip..];
        if rest.starts_with(|c: char| c.is_ascii_digit() || matches!(c, '.' | 'x' | '(' | 'π'))
            || rest.starts_with("pi")
        {
            out.push('*');
        }
    }
    out
}
