use std::any::Any;
use std::collections::{BTreeMap, HashMap};
use std::env;
use std::str::FromStr;

use crate::api::{
    HelpGroupDetails, HelpOptionDetails, OptionAdder, OptionDescriptor, OptionKey, OptionSpec,
    ValuePrototype,
};
use crate::convert::Converters;
use crate::error::{ConversionError, ParseError, SpecError};
use crate::matcher::{is_long_name, is_short_name};
use crate::model::Value;
use crate::parser::{ParseEngine, ParseResult};

/// The option registry.
///
/// Options are declared up front, after which the same registry may parse any number of argument vectors.
///
/// ### Example
/// ```
/// # use optspec_core as optspec;
/// use optspec::{value, Options};
///
/// let mut options = Options::new("program");
/// options
///     .add_options("")
///     .flag("v,verbose", "Print more.")?
///     .option("n,number", "How many.", value::<u32>().default_value("1"))?;
///
/// let result = options.parse_args(&["program", "-v", "--number", "3"])?;
/// assert_eq!(result.count("verbose"), 1);
/// assert_eq!(result.value::<u32>("n")?, 3);
/// # Ok::<(), optspec::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    program: String,
    about: Option<String>,
    custom_help: Option<String>,
    positional_help: Option<String>,
    show_positional_help: bool,
    descriptors: Vec<OptionDescriptor>,
    names: HashMap<String, OptionKey>,
    positional: Vec<String>,
    groups: BTreeMap<String, HelpGroupDetails>,
    converters: Converters,
    allow_unrecognised: bool,
    stop_on_positional: bool,
}

impl Options {
    /// Create an empty registry.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            about: None,
            custom_help: None,
            positional_help: None,
            show_positional_help: false,
            descriptors: Vec::default(),
            names: HashMap::default(),
            positional: Vec::default(),
            groups: BTreeMap::default(),
            converters: Converters::default(),
            allow_unrecognised: false,
            stop_on_positional: false,
        }
    }

    /// Document the about message for this program.
    /// If repeated, only the final message will apply.
    pub fn about(&mut self, description: impl Into<String>) -> &mut Self {
        self.about.replace(description.into());
        self
    }

    /// Replace the options portion of the usage line.
    pub fn custom_help(&mut self, help: impl Into<String>) -> &mut Self {
        self.custom_help.replace(help.into());
        self
    }

    /// Describe the positional arguments on the usage line.
    pub fn positional_help(&mut self, help: impl Into<String>) -> &mut Self {
        self.positional_help.replace(help.into());
        self
    }

    /// Whether options bound to positional arguments are listed in help output.
    pub fn show_positional_help(&mut self, show: bool) -> &mut Self {
        self.show_positional_help = show;
        self
    }

    /// Set the free text shown under the heading of `group`.
    pub fn group_description(
        &mut self,
        group: &str,
        description: impl Into<String>,
    ) -> &mut Self {
        self.group_entry(group).description = description.into();
        self
    }

    /// Collect unknown options into [`ParseResult::unmatched`] instead of failing.
    pub fn allow_unrecognised_options(&mut self, allow: bool) -> &mut Self {
        self.allow_unrecognised = allow;
        self
    }

    /// Halt at the first positional token (or `--`), leaving the rest for a sub-command.
    /// See [`ParseResult::consumed`].
    pub fn stop_on_positional(&mut self, stop: bool) -> &mut Self {
        self.stop_on_positional = stop;
        self
    }

    /// Register a user type converted through its [`FromStr`] implementation.
    pub fn register_type<T>(&mut self) -> &mut Self
    where
        T: Any + Default + FromStr + Send + Sync,
    {
        self.converters.register(|text: &str| text.parse::<T>().ok());
        self
    }

    /// Register a user type converted by `converter`.
    /// Re-registering a type replaces its converter.
    pub fn register_converter<T, F>(&mut self, converter: F) -> &mut Self
    where
        T: Any + Default + Send + Sync,
        F: Fn(&str) -> Option<T> + Send + Sync + 'static,
    {
        self.converters.register(converter);
        self
    }

    /// Declare an option under `group`.
    ///
    /// Fails when either name is malformed, when either name is already declared, or when the value
    /// is a custom type without a registered converter.
    /// A failed declaration leaves the registry unchanged.
    pub fn declare(
        &mut self,
        group: &str,
        short: Option<char>,
        long: Option<&str>,
        description: impl Into<String>,
        value: ValuePrototype,
        arg_help: Option<&str>,
    ) -> Result<&OptionDescriptor, SpecError> {
        let valid = match (short, long) {
            (None, None) => false,
            (short, long) => {
                short.map_or(true, is_short_name) && long.map_or(true, is_long_name)
            }
        };

        if !valid {
            let text = match (short, long) {
                (Some(s), Some(l)) => format!("{s},{l}"),
                (Some(s), None) => s.to_string(),
                (None, Some(l)) => l.to_string(),
                (None, None) => String::default(),
            };
            return Err(SpecError::InvalidOptionFormat(text));
        }

        let scalar = value.value_type().scalar();

        if !self.converters.supports(scalar) {
            return Err(SpecError::UnknownType(scalar.to_string()));
        }

        let key = OptionKey::new(self.descriptors.len());
        let descriptor = OptionDescriptor::new(
            key,
            short,
            long.map(str::to_string),
            description.into(),
            value,
            arg_help.unwrap_or_default().to_string(),
        );
        let names = descriptor.names();

        if let Some(name) = names.iter().find(|name| self.names.contains_key(*name)) {
            return Err(SpecError::OptionExists(name.clone()));
        }

        for name in names {
            self.names.insert(name, key);
        }

        self.group_entry(group)
            .options
            .push(HelpOptionDetails::from(&descriptor));
        self.descriptors.push(descriptor);
        Ok(&self.descriptors[key.index()])
    }

    fn group_entry(&mut self, group: &str) -> &mut HelpGroupDetails {
        self.groups
            .entry(group.to_string())
            .or_insert_with(|| HelpGroupDetails {
                name: group.to_string(),
                description: String::default(),
                options: Vec::default(),
            })
    }

    /// Start declaring options under `group` with the `"s,long"` shorthand.
    pub fn add_options(&mut self, group: impl Into<String>) -> OptionAdder<'_> {
        OptionAdder::new(self, group.into())
    }

    /// Declare one option under `group`.
    pub fn add_option(&mut self, group: &str, spec: OptionSpec) -> Result<&mut Self, SpecError> {
        self.add_options(group).add(spec)?;
        Ok(self)
    }

    /// Declare each option under `group`, stopping at the first failure.
    pub fn add_options_from(
        &mut self,
        group: &str,
        specs: impl IntoIterator<Item = OptionSpec>,
    ) -> Result<&mut Self, SpecError> {
        let mut adder = self.add_options(group);

        for spec in specs {
            adder.add(spec)?;
        }

        Ok(self)
    }

    /// Bind positional tokens, in order, to the named options.
    /// Replaces any previous binding; names are looked up at parse time.
    pub fn parse_positional<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.positional = names.into_iter().map(Into::into).collect();
        self
    }

    /// Parse the process arguments.
    pub fn parse(&self) -> Result<ParseResult, ParseError> {
        let arguments: Vec<String> = env::args_os()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        self.parse_args(&arguments)
    }

    /// Parse an explicit argument vector; index 0 is the program name and is skipped.
    pub fn parse_args<S: AsRef<str>>(&self, arguments: &[S]) -> Result<ParseResult, ParseError> {
        ParseEngine::new(self).parse(arguments)
    }

    /// The names of the groups holding at least one option, sorted.
    pub fn groups(&self) -> Vec<&str> {
        self.groups
            .values()
            .filter(|group| !group.options.is_empty())
            .map(|group| group.name.as_str())
            .collect()
    }

    /// The presentation metadata of a group.
    pub fn group_help(&self, group: &str) -> Option<&HelpGroupDetails> {
        self.groups.get(group)
    }

    /// The program name given to [`Options::new`].
    pub fn program(&self) -> &str {
        &self.program
    }

    /// The text set by [`Options::about`].
    pub fn about_text(&self) -> Option<&str> {
        self.about.as_deref()
    }

    /// The usage text set by [`Options::custom_help`].
    pub fn custom_help_text(&self) -> Option<&str> {
        self.custom_help.as_deref()
    }

    /// The positional usage text set by [`Options::positional_help`].
    pub fn positional_help_text(&self) -> Option<&str> {
        self.positional_help.as_deref()
    }

    /// Whether positional options appear in help output.
    pub fn shows_positional_help(&self) -> bool {
        self.show_positional_help
    }

    /// The positional bindings, in order.
    pub fn positional(&self) -> &[String] {
        &self.positional
    }

    /// Look up a declared option by its short or long name.
    pub fn lookup(&self, name: &str) -> Option<&OptionDescriptor> {
        self.names
            .get(name)
            .map(|key| &self.descriptors[key.index()])
    }

    pub(crate) fn lookup_short(&self, short: char) -> Option<&OptionDescriptor> {
        let mut buffer = [0; 4];
        self.lookup(short.encode_utf8(&mut buffer))
    }

    /// Every declared option, in declaration order.
    pub fn descriptors(&self) -> &[OptionDescriptor] {
        &self.descriptors
    }

    pub(crate) fn allows_unrecognised(&self) -> bool {
        self.allow_unrecognised
    }

    pub(crate) fn stops_on_positional(&self) -> bool {
        self.stop_on_positional
    }

    pub(crate) fn convert(
        &self,
        descriptor: &OptionDescriptor,
        text: &str,
    ) -> Result<Value, ConversionError> {
        let prototype = descriptor.value();
        self.converters
            .convert(prototype.value_type(), prototype.list_delimiter(), text)
    }
}
