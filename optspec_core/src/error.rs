use thiserror::Error;

/// Raised while declaring options.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SpecError {
    /// A short or long name is already claimed by another option.
    #[error("Option '{0}' already exists.")]
    OptionExists(String),

    /// The option names do not follow the option grammar.
    #[error("Invalid option format '{0}'.")]
    InvalidOptionFormat(String),

    /// A custom value type was declared before its converter was registered.
    #[error("Type '{0}' has no registered converter.")]
    UnknownType(String),
}

/// Raised while parsing an argument vector, or when querying a [`ParseResult`](crate::ParseResult) by name.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The token starts with '-' but is neither a long option nor a short option.
    #[error("Argument '{0}' starts with a - but has incorrect syntax.")]
    OptionSyntax(String),

    /// The option, or positional binding, was never declared.
    #[error("Option '{0}' does not exist.")]
    OptionNotExists(String),

    /// The option requires a value, but none was available.
    #[error("Option '{0}' is missing an argument.")]
    MissingArgument(String),

    /// The queried name is not a declared option.
    #[error("Option '{0}' not present.")]
    OptionNotPresent(String),

    /// The value could not be converted to the declared type.
    #[error("Argument '{text}' failed to parse as {expected}.")]
    ArgumentIncorrectType {
        /// The offending text.
        text: String,
        /// The name of the target type.
        expected: String,
    },
}

/// Raised on typed reads of an [`OptionValue`](crate::OptionValue).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// No occurrence, default, or environment variable supplied a value.
    #[error("Option '{0}' has no value.")]
    OptionHasNoValue(String),

    /// The requested type is not the declared type.
    #[error("Option '{name}' holds {declared}, not {requested}.")]
    TypeMismatch {
        /// The option name.
        name: String,
        /// The declared value type.
        declared: String,
        /// The requested value type.
        requested: String,
    },
}

/// Raised when a text cannot be converted into the target type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("cannot convert '{text}' to {expected}.")]
pub struct ConversionError {
    text: String,
    expected: String,
}

impl ConversionError {
    /// Indicate that `text` is not a valid `expected`.
    pub fn new(text: impl Into<String>, expected: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            expected: expected.into(),
        }
    }

    /// The offending text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The name of the target type.
    pub fn expected(&self) -> &str {
        &self.expected
    }
}

impl From<ConversionError> for ParseError {
    fn from(error: ConversionError) -> Self {
        ParseError::ArgumentIncorrectType {
            text: error.text,
            expected: error.expected,
        }
    }
}

/// Any error raised by this crate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Declaring an option failed.
    #[error(transparent)]
    Spec(#[from] SpecError),

    /// Parsing or querying a result failed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Reading a typed value failed.
    #[error(transparent)]
    Value(#[from] ValueError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::assert_contains;

    #[test]
    fn conversion_into_parse_error() {
        // Setup
        let error = ConversionError::new("abc", "i32");

        // Execute
        let parse_error = ParseError::from(error.clone());

        // Verify
        assert_eq!(error.to_string(), "cannot convert 'abc' to i32.");
        assert_eq!(
            parse_error,
            ParseError::ArgumentIncorrectType {
                text: "abc".to_string(),
                expected: "i32".to_string(),
            }
        );
        assert_eq!(
            parse_error.to_string(),
            "Argument 'abc' failed to parse as i32."
        );
    }

    #[test]
    fn umbrella_transparent() {
        // Setup
        let error: Error = ValueError::OptionHasNoValue("name".to_string()).into();

        // Execute & verify
        assert_eq!(error.to_string(), "Option 'name' has no value.");
        assert_matches!(error, Error::Value(ValueError::OptionHasNoValue(_)));
    }

    #[test]
    fn messages_quote_names() {
        let errors: Vec<Error> = vec![
            SpecError::OptionExists("abc".to_string()).into(),
            SpecError::InvalidOptionFormat("abc".to_string()).into(),
            SpecError::UnknownType("abc".to_string()).into(),
            ParseError::OptionSyntax("abc".to_string()).into(),
            ParseError::OptionNotExists("abc".to_string()).into(),
            ParseError::MissingArgument("abc".to_string()).into(),
            ParseError::OptionNotPresent("abc".to_string()).into(),
            ValueError::OptionHasNoValue("abc".to_string()).into(),
            ValueError::TypeMismatch {
                name: "abc".to_string(),
                declared: "i32".to_string(),
                requested: "u8".to_string(),
            }
            .into(),
        ];

        for error in errors {
            assert_contains!(error.to_string(), "'abc'");
        }
    }
}
