//! Two-phase numeric decoding.
//!
//! Phase one attempts exact integer parsing with an overflow guard so that
//! every decimal literal in `-2^63 ..= 2^64-1` round-trips losslessly. Any
//! non-digit byte or an accumulator about to overflow falls back to phase
//! two, `f64` parsing via `str::parse` (ASCII input with `.` as the decimal
//! separator, so locale never enters the picture).

use crate::value::ValueData;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Number {
    Int(i64),
    UInt(u64),
    Double(f64),
}

impl From<Number> for ValueData {
    fn from(n: Number) -> Self {
        match n {
            Number::Int(i) => ValueData::Int(i),
            Number::UInt(u) => ValueData::UInt(u),
            Number::Double(d) => ValueData::Double(d),
        }
    }
}

impl Number {
    pub fn to_key(self) -> alloc::string::String {
        use alloc::string::ToString;
        match self {
            Self::Int(i) => i.to_string(),
            Self::UInt(u) => u.to_string(),
            Self::Double(d) => d.to_string(),
        }
    }
}

/// Decodes a number token's text. `None` means the text is not a number at
/// all (e.g. `1e`), which the reader reports with the token's position.
pub(crate) fn decode(text: &[u8]) -> Option<Number> {
    let negative = text.first() == Some(&b'-');
    let digits = if negative { &text[1..] } else { text };

    // The representable magnitude: |i64::MIN| when negative, u64::MAX
    // otherwise.
    let max_magnitude: u64 = if negative {
        i64::MIN.unsigned_abs()
    } else {
        u64::MAX
    };
    let threshold = max_magnitude / 10;
    let last_digit_cap = max_magnitude % 10;

    let mut value: u64 = 0;
    for (i, &b) in digits.iter().enumerate() {
        if !b.is_ascii_digit() {
            return decode_double(text);
        }
        let digit = u64::from(b - b'0');
        if value >= threshold
            && (value > threshold || i + 1 != digits.len() || digit > last_digit_cap)
        {
            return decode_double(text);
        }
        value = value * 10 + digit;
    }

    Some(if negative {
        // value <= 2^63 here, so the cast-and-negate cannot wrap except for
        // i64::MIN itself, which it produces exactly.
        Number::Int((value as i64).wrapping_neg())
    } else if let Ok(i) = i64::try_from(value) {
        Number::Int(i)
    } else {
        Number::UInt(value)
    })
}

fn decode_double(text: &[u8]) -> Option<Number> {
    // Number token spans are ASCII by construction.
    let text = core::str::from_utf8(text).ok()?;
    text.parse::<f64>().ok().map(Number::Double)
}
