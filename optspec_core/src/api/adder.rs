use crate::api::{value, Options, ValuePrototype};
use crate::error::SpecError;

/// Declares options under one group using the `"s,long"` shorthand.
///
/// The shorthand is an optional single short name (alphanumeric or `?`) followed by a comma,
/// optional spaces, and an optional long name: `"v,verbose"`, `"v, verbose"`, `"v"`, `"v,"`, `"verbose"`.
///
/// ### Example
/// ```
/// # use optspec_core as optspec;
/// use optspec::{value, Options};
///
/// let mut options = Options::new("program");
/// options
///     .add_options("Output")
///     .flag("q,quiet", "Print less.")?
///     .option_with_help("o, output", "Output file.", value::<String>(), "FILE")?;
///
/// assert_eq!(options.lookup("o").unwrap().arg_help(), "FILE");
/// # Ok::<(), optspec::SpecError>(())
/// ```
pub struct OptionAdder<'o> {
    options: &'o mut Options,
    group: String,
}

impl<'o> OptionAdder<'o> {
    pub(crate) fn new(options: &'o mut Options, group: String) -> Self {
        Self { options, group }
    }

    /// Declare an option taking `value`.
    pub fn option(
        &mut self,
        spec: &str,
        description: impl Into<String>,
        value: ValuePrototype,
    ) -> Result<&mut Self, SpecError> {
        self.declare(spec, description.into(), value, None)
    }

    /// Declare an option taking `value`, labelled `arg_help` in usage text.
    pub fn option_with_help(
        &mut self,
        spec: &str,
        description: impl Into<String>,
        value: ValuePrototype,
        arg_help: &str,
    ) -> Result<&mut Self, SpecError> {
        self.declare(spec, description.into(), value, Some(arg_help))
    }

    /// Declare a `bool` option.
    ///
    /// Like any option with a value, a flag takes a following token that is not itself an option
    /// (`-v false`); declare it with `value::<bool>().no_value()` when it should always stand alone.
    pub fn flag(
        &mut self,
        spec: &str,
        description: impl Into<String>,
    ) -> Result<&mut Self, SpecError> {
        self.declare(spec, description.into(), value::<bool>(), None)
    }

    /// Declare an option from an [`OptionSpec`].
    pub fn add(&mut self, spec: OptionSpec) -> Result<&mut Self, SpecError> {
        let OptionSpec {
            spec,
            description,
            value,
            arg_help,
        } = spec;
        self.declare(&spec, description, value, arg_help.as_deref())
    }

    fn declare(
        &mut self,
        spec: &str,
        description: String,
        value: ValuePrototype,
        arg_help: Option<&str>,
    ) -> Result<&mut Self, SpecError> {
        let (short, long) = split_specifier(spec)?;
        self.options
            .declare(&self.group, short, long, description, value, arg_help)?;
        Ok(self)
    }
}

/// One option declaration, for adding options in bulk.
#[derive(Debug, Clone)]
pub struct OptionSpec {
    spec: String,
    description: String,
    value: ValuePrototype,
    arg_help: Option<String>,
}

impl OptionSpec {
    /// A `bool` option; change the value with [`OptionSpec::value`].
    pub fn new(spec: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            spec: spec.into(),
            description: description.into(),
            value: value::<bool>(),
            arg_help: None,
        }
    }

    /// Replace the value prototype (a `bool` by default).
    pub fn value(mut self, value: ValuePrototype) -> Self {
        self.value = value;
        self
    }

    /// Set the placeholder shown for the value.
    pub fn arg_help(mut self, arg_help: impl Into<String>) -> Self {
        self.arg_help.replace(arg_help.into());
        self
    }
}

/// Split `"s,long"` into its names; validation of each name is left to the registry.
fn split_specifier(spec: &str) -> Result<(Option<char>, Option<&str>), SpecError> {
    let mut chars = spec.char_indices();

    let (short, rest) = match (chars.next(), chars.next()) {
        (None, _) => return Err(SpecError::InvalidOptionFormat(spec.to_string())),
        (Some((_, c)), None) => (Some(c), ""),
        (Some((_, c)), Some((i, ','))) => (Some(c), &spec[i + 1..]),
        _ => (None, spec),
    };

    let rest = rest.trim_start_matches(' ');
    let long = if rest.is_empty() { None } else { Some(rest) };

    match (short, long) {
        // The long name may be missing ("s,"), but not the short name.
        (Some(','), _) => Err(SpecError::InvalidOptionFormat(spec.to_string())),
        (short, long) => Ok((short, long)),
    }
}
