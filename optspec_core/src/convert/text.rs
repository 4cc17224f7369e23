use std::str::FromStr;

use crate::error::ConversionError;

pub(crate) fn parse_bool(text: &str) -> Result<bool, ConversionError> {
    match text {
        "1" | "t" | "T" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "false" | "False" => Ok(false),
        _ => Err(ConversionError::new(text, "bool")),
    }
}

pub(crate) fn parse_char(text: &str) -> Result<char, ConversionError> {
    let mut chars = text.chars();

    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ConversionError::new(text, "char")),
    }
}

pub(crate) fn parse_from_str<T: FromStr>(
    text: &str,
    expected: &'static str,
) -> Result<T, ConversionError> {
    T::from_str(text).map_err(|_| ConversionError::new(text, expected))
}
