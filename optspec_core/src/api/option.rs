use crate::api::ValuePrototype;

/// The identity of a declared option, stable for the life of its registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OptionKey(usize);

impl OptionKey {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    pub(crate) fn index(&self) -> usize {
        self.0
    }
}

/// One declared option.
#[derive(Debug, Clone)]
pub struct OptionDescriptor {
    key: OptionKey,
    short: Option<char>,
    long: Option<String>,
    description: String,
    value: ValuePrototype,
    arg_help: String,
}

impl OptionDescriptor {
    pub(crate) fn new(
        key: OptionKey,
        short: Option<char>,
        long: Option<String>,
        description: String,
        value: ValuePrototype,
        arg_help: String,
    ) -> Self {
        Self {
            key,
            short,
            long,
            description,
            value,
            arg_help,
        }
    }

    /// The identity of this option within its registry.
    pub fn key(&self) -> OptionKey {
        self.key
    }

    /// The single character name, if any.
    pub fn short(&self) -> Option<char> {
        self.short
    }

    /// The long name, if any.
    pub fn long(&self) -> Option<&str> {
        self.long.as_deref()
    }

    /// The description given at declaration.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The value prototype this option was declared with.
    pub fn value(&self) -> &ValuePrototype {
        &self.value
    }

    /// The label for the value in usage text; empty when not given.
    pub fn arg_help(&self) -> &str {
        &self.arg_help
    }

    /// The long name, or the short name when there is no long name.
    pub fn name(&self) -> String {
        match (&self.long, self.short) {
            (Some(long), _) => long.clone(),
            (None, Some(short)) => short.to_string(),
            (None, None) => unreachable!("internal error - an option always has at least one name"),
        }
    }

    pub(crate) fn names(&self) -> Vec<String> {
        self.short
            .map(|s| s.to_string())
            .into_iter()
            .chain(self.long.clone())
            .collect()
    }
}

/// Presentation metadata for one option, captured when it is declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpOptionDetails {
    /// The single character name, if any.
    pub short: Option<char>,
    /// The long name, if any.
    pub long: Option<String>,
    /// The description given at declaration.
    pub description: String,
    /// The default text, if any.
    pub default_value: Option<String>,
    /// The implicit text, if any.
    pub implicit_value: Option<String>,
    /// The placeholder shown for the value.
    pub arg_help: String,
    /// Whether an implicit value is declared.
    pub has_implicit: bool,
    /// Whether a default is declared.
    pub has_default: bool,
    /// Whether the value accumulates across occurrences.
    pub is_container: bool,
    /// Whether the value is a `bool`.
    pub is_boolean: bool,
}

impl From<&OptionDescriptor> for HelpOptionDetails {
    fn from(descriptor: &OptionDescriptor) -> Self {
        let value = descriptor.value();

        Self {
            short: descriptor.short(),
            long: descriptor.long().map(str::to_string),
            description: descriptor.description().to_string(),
            default_value: value.default_text().map(str::to_string),
            implicit_value: value.implicit_text().map(str::to_string),
            arg_help: descriptor.arg_help().to_string(),
            has_implicit: value.has_implicit(),
            has_default: value.has_default(),
            is_container: value.is_container(),
            is_boolean: value.is_boolean(),
        }
    }
}

/// Presentation metadata for the options of one group, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpGroupDetails {
    /// The group name; `""` for the default group.
    pub name: String,
    /// Free text shown under the group heading.
    pub description: String,
    /// The options of the group.
    pub options: Vec<HelpOptionDetails>,
}
