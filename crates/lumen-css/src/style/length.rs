/// The longest numeric prefix of `value`, after leading whitespace, and the
/// text that follows it.
///
/// Accepts an optional sign, digits with an optional fraction, and an
/// optional exponent. Returns `None` when no digits lead the value.
#[must_use]
pub fn leading_number(value: &str) -> Option<(f32, &str)> {
    let value = value.trim_start();
    let bytes = value.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let integer_digits = count_digits(&bytes[end..]);
    end += integer_digits;

    let mut fraction_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        fraction_digits = count_digits(&bytes[end + 1..]);
        if fraction_digits > 0 || integer_digits > 0 {
            end += 1 + fraction_digits;
        }
    }
    if integer_digits == 0 && fraction_digits == 0 {
        return None;
    }

    // An exponent only counts when digits follow it.
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent_end = end + 1;
        if matches!(bytes.get(exponent_end), Some(b'+' | b'-')) {
            exponent_end += 1;
        }
        let exponent_digits = count_digits(&bytes[exponent_end..]);
        if exponent_digits > 0 {
            end = exponent_end + exponent_digits;
        }
    }

    let number = value[..end].parse::<f32>().ok()?;
    Some((number, &value[end..]))
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// [§ 5 Distance Units](https://www.w3.org/TR/css-values-4/#lengths)
///
/// Resolve a length value to pixels.
///
/// - `12px` and `12` are 12.
/// - `50%` is half of `container_width`. Only an unsigned `digits[.digits]`
///   number is a percentage; `-50%` and `.5%` keep their leading number.
/// - Any other unit keeps its leading number (`2em` is 2).
/// - A value with no leading number (`auto`, empty) is 0.
#[must_use]
pub fn parse_length(value: &str, container_width: f32) -> f32 {
    let value = value.trim_start();
    match leading_number(value) {
        Some((number, rest))
            if rest.trim() == "%" && is_plain_decimal(&value[..value.len() - rest.len()]) =>
        {
            number / 100.0 * container_width
        }
        Some((number, _)) => number,
        None => 0.0,
    }
}

/// `[0-9]+(\.[0-9]+)?`
fn is_plain_decimal(text: &str) -> bool {
    let (integer, fraction) = text.split_once('.').unwrap_or((text, "1"));
    !integer.is_empty()
        && !fraction.is_empty()
        && integer.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit())
}
