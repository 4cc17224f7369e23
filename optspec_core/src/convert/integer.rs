use crate::error::ConversionError;

/// Sign and magnitude of an integer literal, before any range check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Literal {
    negative: bool,
    magnitude: u64,
}

/// Read `[+-]?(0x[0-9a-fA-F]+|[0-9]+)` into an unsigned magnitude.
fn parse_literal(text: &str) -> Option<Literal> {
    let (negative, body) = if let Some(body) = text.strip_prefix('-') {
        (true, body)
    } else if let Some(body) = text.strip_prefix('+') {
        (false, body)
    } else {
        (false, text)
    };

    let (radix, digits) = match body.strip_prefix("0x") {
        Some(hex) => (16, hex),
        None => (10, body),
    };

    if digits.is_empty() {
        return None;
    }

    let mut magnitude: u64 = 0;

    for c in digits.chars() {
        let digit = c.to_digit(radix)? as u64;
        let next = magnitude.checked_mul(radix as u64)?.wrapping_add(digit);

        // Wrapped around.
        if next < magnitude {
            return None;
        }

        magnitude = next;
    }

    Some(Literal {
        negative,
        magnitude,
    })
}

/// An integer width that a [`Literal`] can be narrowed into.
pub(crate) trait Integer: Sized {
    const NAME: &'static str;

    fn narrow(literal: Literal) -> Option<Self>;
}

macro_rules! unsigned_integer {
    ($($t:ty),*) => {
        $(
            impl Integer for $t {
                const NAME: &'static str = stringify!($t);

                fn narrow(literal: Literal) -> Option<Self> {
                    if literal.negative {
                        return None;
                    }

                    <$t>::try_from(literal.magnitude).ok()
                }
            }
        )*
    };
}

macro_rules! signed_integer {
    ($($t:ty => $u:ty),*) => {
        $(
            impl Integer for $t {
                const NAME: &'static str = stringify!($t);

                fn narrow(literal: Literal) -> Option<Self> {
                    let magnitude = <$u>::try_from(literal.magnitude).ok()?;

                    if literal.negative {
                        // The most negative value has no positive counterpart, so negate in the unsigned domain.
                        if magnitude > <$t>::MIN.unsigned_abs() {
                            return None;
                        }

                        Some((magnitude as $t).wrapping_neg())
                    } else {
                        <$t>::try_from(magnitude).ok()
                    }
                }
            }
        )*
    };
}

unsigned_integer!(u8, u16, u32, u64, usize);
signed_integer!(i8 => u8, i16 => u16, i32 => u32, i64 => u64, isize => usize);

pub(crate) fn parse_integer<T: Integer>(text: &str) -> Result<T, ConversionError> {
    parse_literal(text)
        .and_then(T::narrow)
        .ok_or_else(|| ConversionError::new(text, T::NAME))
}
