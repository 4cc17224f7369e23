pub(crate) const TERMINATOR: &str = "--";
pub(crate) const DEFAULT_DELIMITER: char = ',';
pub(crate) const BOOLEAN_DEFAULT: &str = "false";
pub(crate) const BOOLEAN_IMPLICIT: &str = "true";
