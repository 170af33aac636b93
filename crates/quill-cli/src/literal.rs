use anyhow::{bail, Context, Result};
use quill_types::Constant;

/// Parse a constant literal as written on the command line.
///
/// Supported forms: `true`/`false`, integers with an optional `b`/`s`/`L` suffix, decimals with an
/// optional `f`/`d` suffix, `'c'` chars and `"text"` strings. Unsuffixed integers are `int`;
/// unsuffixed numbers with a `.` or exponent are `double`.
pub fn parse_literal(text: &str) -> Result<Constant> {
    let text = text.trim();

    match text {
        "true" => return Ok(Constant::Bool(true)),
        "false" => return Ok(Constant::Bool(false)),
        _ => {}
    }

    if let Some(inner) = quoted(text, '\'') {
        let mut chars = inner.chars();
        return match (chars.next(), chars.next()) {
            (Some(c), None) => Constant::char(c)
                .with_context(|| format!("char literal {text} is not a single UTF-16 unit")),
            _ => bail!("char literal {text} must contain exactly one character"),
        };
    }
    if let Some(inner) = quoted(text, '"') {
        return Ok(Constant::String(inner.to_owned()));
    }

    let invalid = || format!("invalid literal `{text}`");
    let (body, suffix) = match text.char_indices().last() {
        Some((idx, c)) if c.is_ascii_alphabetic() => (&text[..idx], Some(c)),
        _ => (text, None),
    };

    let constant = match suffix {
        Some('b' | 'B') => Constant::Byte(body.parse().with_context(invalid)?),
        Some('s' | 'S') => Constant::Short(body.parse().with_context(invalid)?),
        Some('l' | 'L') => Constant::Long(body.parse().with_context(invalid)?),
        Some('f' | 'F') => Constant::Float(body.parse().with_context(invalid)?),
        Some('d' | 'D') => Constant::Double(body.parse().with_context(invalid)?),
        Some(_) => bail!(invalid()),
        None if body.contains(['.', 'e', 'E']) => {
            Constant::Double(body.parse().with_context(invalid)?)
        }
        None => Constant::Int(body.parse().with_context(invalid)?),
    };
    Ok(constant)
}

fn quoted(text: &str, quote: char) -> Option<&str> {
    text.strip_prefix(quote)?.strip_suffix(quote)
}
