use std::collections::HashMap;
use std::env;

use crate::api::{OptionDescriptor, OptionKey, Options};
use crate::error::ParseError;
use crate::matcher::{classify, Token};
use crate::parser::{KeyValue, OptionValue, ParseResult};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// The state of one walk over an argument vector.
///
/// The registry is only read; everything mutable lives here and is moved into the [`ParseResult`].
pub(crate) struct ParseEngine<'o> {
    options: &'o Options,
    values: HashMap<OptionKey, OptionValue>,
    sequential: Vec<KeyValue>,
    unmatched: Vec<String>,
    next_positional: usize,
}

impl<'o> ParseEngine<'o> {
    pub(crate) fn new(options: &'o Options) -> Self {
        let values = options
            .descriptors()
            .iter()
            .map(|d| (d.key(), OptionValue::new(d.name(), d.value().value_type())))
            .collect();

        Self {
            options,
            values,
            sequential: Vec::default(),
            unmatched: Vec::default(),
            next_positional: 0,
        }
    }

    pub(crate) fn parse<S: AsRef<str>>(mut self, arguments: &[S]) -> Result<ParseResult, ParseError> {
        let arguments: Vec<&str> = arguments.iter().map(|a| a.as_ref()).collect();
        let options = self.options;
        let mut current = 1;

        while current < arguments.len() {
            let token = arguments[current];
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Token {current} '{token}' classified as {:?}.", classify(token));
            }

            match classify(token) {
                Token::Terminator => {
                    current += 1;

                    if options.stops_on_positional() {
                        break;
                    }

                    while current < arguments.len() && self.consume_positional(arguments[current])? {
                        current += 1;
                    }

                    self.unmatched
                        .extend(arguments[current..].iter().map(|a| a.to_string()));
                    current = arguments.len();
                    break;
                }
                Token::Malformed(_) if !options.allows_unrecognised() => {
                    return Err(ParseError::OptionSyntax(token.to_string()));
                }
                Token::Plain(_) | Token::Malformed(_) => {
                    if options.stops_on_positional() {
                        break;
                    }

                    if !self.consume_positional(token)? {
                        self.unmatched.push(token.to_string());
                    }
                }
                Token::Short(cluster) => {
                    self.match_cluster(cluster, &arguments, &mut current)?;
                }
                Token::Long { name, value } => match options.lookup(name) {
                    Some(descriptor) => match value {
                        Some(value) => self.bind(descriptor, value)?,
                        None => self.bind_next(descriptor, name, &arguments, &mut current)?,
                    },
                    None if options.allows_unrecognised() => {
                        self.unmatched.push(token.to_string());
                    }
                    None => return Err(ParseError::OptionNotExists(name.to_string())),
                },
            }

            current += 1;
        }

        self.finish(current)
    }

    /// Work through `-abc` left to right.
    ///
    /// A character followed by more of the cluster binds its implicit value when it has one;
    /// otherwise the remainder of the cluster is its value.
    fn match_cluster(
        &mut self,
        cluster: &str,
        arguments: &[&str],
        current: &mut usize,
    ) -> Result<(), ParseError> {
        let options = self.options;

        for (index, short) in cluster.char_indices() {
            let name = short.to_string();
            let descriptor = match options.lookup_short(short) {
                Some(descriptor) => descriptor,
                None if options.allows_unrecognised() => {
                    self.unmatched.push(format!("-{short}"));
                    continue;
                }
                None => return Err(ParseError::OptionNotExists(name)),
            };
            let rest = &cluster[index + short.len_utf8()..];

            if rest.is_empty() {
                self.bind_next(descriptor, &name, arguments, current)?;
            } else if let Some(implicit) = descriptor.value().implicit_text() {
                self.bind(descriptor, implicit)?;
            } else {
                self.bind(descriptor, rest)?;
                break;
            }
        }

        Ok(())
    }

    /// Bind the following token as the value, unless it is missing or is itself an option.
    fn bind_next(
        &mut self,
        descriptor: &OptionDescriptor,
        name: &str,
        arguments: &[&str],
        current: &mut usize,
    ) -> Result<(), ParseError> {
        let prototype = descriptor.value();

        match arguments.get(*current + 1) {
            Some(next) if !prototype.takes_no_value() && !self.is_reserved(next) => {
                self.bind(descriptor, next)?;
                *current += 1;
                Ok(())
            }
            _ => match prototype.implicit_text() {
                Some(implicit) => self.bind(descriptor, implicit),
                None => Err(ParseError::MissingArgument(name.to_string())),
            },
        }
    }

    /// Whether `token` must not be taken as the value of another option.
    fn is_reserved(&self, token: &str) -> bool {
        match classify(token) {
            Token::Terminator => true,
            Token::Long { name, .. } => self.options.lookup(name).is_some(),
            Token::Short(cluster) => cluster
                .chars()
                .next()
                .map_or(false, |short| self.options.lookup_short(short).is_some()),
            Token::Plain(_) | Token::Malformed(_) => false,
        }
    }

    /// Feed `token` to the current positional binding.
    /// Returns false when the bindings are exhausted.
    fn consume_positional(&mut self, token: &str) -> Result<bool, ParseError> {
        let options = self.options;

        while let Some(name) = options.positional().get(self.next_positional) {
            let descriptor = options
                .lookup(name)
                .ok_or_else(|| ParseError::OptionNotExists(name.clone()))?;

            if descriptor.value().is_container() {
                self.bind(descriptor, token)?;
                return Ok(true);
            }

            if self.slot(descriptor).count() == 0 {
                self.bind(descriptor, token)?;
                self.next_positional += 1;
                return Ok(true);
            }

            self.next_positional += 1;
        }

        Ok(false)
    }

    fn bind(&mut self, descriptor: &OptionDescriptor, text: &str) -> Result<(), ParseError> {
        #[cfg(feature = "tracing_debug")]
        {
            debug!("Binding '{text}' to '{}'.", descriptor.name());
        }

        let value = self.options.convert(descriptor, text)?;
        self.slot(descriptor).occur(value);
        self.sequential.push(KeyValue::new(descriptor.name(), text));
        Ok(())
    }

    fn slot(&mut self, descriptor: &OptionDescriptor) -> &mut OptionValue {
        match self.values.get_mut(&descriptor.key()) {
            Some(slot) => slot,
            None => unreachable!("internal error - every declared option has a slot"),
        }
    }

    /// Apply defaults and environment variable fallbacks, then publish the result.
    fn finish(mut self, consumed: usize) -> Result<ParseResult, ParseError> {
        let options = self.options;

        for descriptor in options.descriptors() {
            if self.slot(descriptor).count() != 0 {
                continue;
            }

            let prototype = descriptor.value();

            if let Some(text) = prototype.default_text() {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Binding default '{text}' to '{}'.", descriptor.name());
                }
                let value = options.convert(descriptor, text)?;
                self.slot(descriptor).apply_default(value);
            }

            if let Some(text) = prototype.env_var().and_then(env::var_os) {
                let text = text.to_string_lossy();
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Binding environment '{text}' to '{}'.", descriptor.name());
                }
                let value = options.convert(descriptor, &text)?;
                self.slot(descriptor).occur_over_default(value);
            }
        }

        let keys = options
            .descriptors()
            .iter()
            .flat_map(|d| d.names().into_iter().map(move |name| (name, d.key())))
            .collect();

        Ok(ParseResult::new(
            keys,
            self.values,
            self.sequential,
            self.unmatched,
            consumed,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::value;
    use rstest::rstest;

    fn parse(options: &Options, tokens: &[&str]) -> Result<ParseResult, ParseError> {
        let arguments: Vec<&str> = std::iter::once("program")
            .chain(tokens.iter().copied())
            .collect();
        ParseEngine::new(options).parse(&arguments)
    }

    fn sequence(result: &ParseResult) -> Vec<(&str, &str)> {
        result
            .arguments()
            .iter()
            .map(|kv| (kv.key(), kv.value()))
            .collect()
    }

    fn options() -> Options {
        let mut options = Options::new("program");
        options
            .add_options("")
            .flag("x", "")
            .unwrap()
            .flag("b,bool", "")
            .unwrap()
            .option("a,alpha", "", value::<String>())
            .unwrap()
            .option("n,number", "", value::<i32>())
            .unwrap()
            .option("i,implicit", "", value::<String>().implicit_value("imp"))
            .unwrap()
            .option("list", "", value::<Vec<String>>())
            .unwrap();
        options
    }

    #[test]
    fn empty() {
        // Setup
        let options = options();

        // Execute
        let arguments: [&str; 0] = [];
        let result = ParseEngine::new(&options).parse(&arguments).unwrap();

        // Verify
        assert_eq!(result.consumed(), 1);
        assert!(result.arguments().is_empty());
        assert!(result.unmatched().is_empty());
        assert_eq!(result.count("x"), 0);
        assert_eq!(result.value::<bool>("x").unwrap(), false);
        assert!(result.get("x").unwrap().has_default());
        assert!(!result.get("alpha").unwrap().has_value());
    }

    #[test]
    fn program_only() {
        // Setup
        let options = options();

        // Execute
        let result = parse(&options, &[]).unwrap();

        // Verify
        assert_eq!(result.consumed(), 1);
        assert!(result.arguments().is_empty());
    }

    #[rstest]
    #[case(vec!["--alpha", "value"], "value")]
    #[case(vec!["--alpha=value"], "value")]
    #[case(vec!["--alpha="], "")]
    #[case(vec!["--alpha=--"], "--")]
    #[case(vec!["--alpha=a=b"], "a=b")]
    #[case(vec!["-a", "value"], "value")]
    #[case(vec!["-avalue"], "value")]
    #[case(vec!["-a", "-"], "-")]
    #[case(vec!["-a", "-z"], "-z")]
    #[case(vec!["-a", "--zeta"], "--zeta")]
    #[case(vec!["-a", "-some_bad_short"], "-some_bad_short")]
    #[case(vec!["--alpha", "first", "-a", "second"], "second")]
    fn bind_value(#[case] tokens: Vec<&str>, #[case] expected: &str) {
        // Setup
        let options = options();

        // Execute
        let result = parse(&options, &tokens).unwrap();

        // Verify
        assert_eq!(result.value::<String>("alpha").unwrap(), expected);
        assert_eq!(result.consumed(), tokens.len() + 1);
    }

    #[rstest]
    #[case(vec!["--alpha"], "alpha")]
    #[case(vec!["-a"], "a")]
    #[case(vec!["--alpha", "-x"], "alpha")]
    #[case(vec!["--alpha", "--bool"], "alpha")]
    #[case(vec!["--alpha", "--"], "alpha")]
    #[case(vec!["-xa", "-b"], "a")]
    fn missing_argument(#[case] tokens: Vec<&str>, #[case] expected: &str) {
        // Setup
        let options = options();

        // Execute
        let result = parse(&options, &tokens);

        // Verify
        assert_eq!(result.unwrap_err(), ParseError::MissingArgument(expected.to_string()));
    }

    #[rstest]
    #[case(vec!["--implicit"], "imp", vec![("implicit", "imp")])]
    #[case(vec!["--implicit", "given"], "given", vec![("implicit", "given")])]
    #[case(vec!["--implicit", "-x"], "imp", vec![("implicit", "imp"), ("x", "true")])]
    #[case(vec!["-i"], "imp", vec![("implicit", "imp")])]
    #[case(vec!["-ix"], "imp", vec![("implicit", "imp"), ("x", "true")])]
    #[case(vec!["-xi", "given"], "given", vec![("x", "true"), ("implicit", "given")])]
    fn implicit_value(
        #[case] tokens: Vec<&str>,
        #[case] expected: &str,
        #[case] expected_sequence: Vec<(&str, &str)>,
    ) {
        // Setup
        let options = options();

        // Execute
        let result = parse(&options, &tokens).unwrap();

        // Verify
        assert_eq!(result.value::<String>("i").unwrap(), expected);
        assert_eq!(sequence(&result), expected_sequence);
    }

    #[test]
    fn cluster() {
        // Setup
        let options = options();

        // Execute
        let result = parse(&options, &["-xxavalue"]).unwrap();

        // Verify
        assert_eq!(result.count("x"), 2);
        assert_eq!(result.value::<String>("a").unwrap(), "value");
        assert_eq!(
            sequence(&result),
            vec![("x", "true"), ("x", "true"), ("alpha", "value")]
        );
    }

    #[test]
    fn cluster_value_stops_scan() {
        // Setup
        let options = options();

        // Execute
        let result = parse(&options, &["-axb"]).unwrap();

        // Verify
        assert_eq!(result.value::<String>("a").unwrap(), "xb");
        assert_eq!(result.count("x"), 0);
        assert_eq!(result.count("b"), 0);
    }

    #[test]
    fn boolean_consumes_text() {
        // Setup
        let options = options();

        // Execute
        let explicit = parse(&options, &["--bool", "false"]).unwrap();
        let invalid = parse(&options, &["--bool", "maybe"]);

        // Verify
        assert_eq!(explicit.value::<bool>("bool").unwrap(), false);
        assert_eq!(explicit.count("bool"), 1);
        assert_matches!(invalid, Err(ParseError::ArgumentIncorrectType { text, .. }) => {
            assert_eq!(text, "maybe");
        });
    }

    #[test]
    fn no_value() {
        // Setup
        let mut options = Options::new("program");
        options
            .add_options("")
            .option("q,quiet", "", value::<bool>().no_value())
            .unwrap()
            .option("r", "", value::<String>().no_value())
            .unwrap()
            .option("rest", "", value::<Vec<String>>())
            .unwrap();
        options.parse_positional(["rest"]);

        // Execute
        let result = parse(&options, &["--quiet", "false"]).unwrap();
        let missing = parse(&options, &["-r", "text"]);

        // Verify
        assert_eq!(result.value::<bool>("quiet").unwrap(), true);
        assert_eq!(result.value::<Vec<String>>("rest").unwrap(), vec!["false"]);
        assert_eq!(missing.unwrap_err(), ParseError::MissingArgument("r".to_string()));
    }

    #[rstest]
    #[case(vec!["--unknown"], ParseError::OptionNotExists("unknown".to_string()))]
    #[case(vec!["-z"], ParseError::OptionNotExists("z".to_string()))]
    #[case(vec!["-xz"], ParseError::OptionNotExists("z".to_string()))]
    #[case(vec!["--a"], ParseError::OptionSyntax("--a".to_string()))]
    #[case(vec!["-some_bad_short"], ParseError::OptionSyntax("-some_bad_short".to_string()))]
    #[case(vec!["--number", "abc"], ParseError::ArgumentIncorrectType { text: "abc".to_string(), expected: "i32".to_string() })]
    #[case(vec!["-n0x"], ParseError::ArgumentIncorrectType { text: "0x".to_string(), expected: "i32".to_string() })]
    fn parse_error(#[case] tokens: Vec<&str>, #[case] expected: ParseError) {
        // Setup
        let options = options();

        // Execute
        let result = parse(&options, &tokens);

        // Verify
        assert_eq!(result.unwrap_err(), expected);
    }

    #[test]
    fn unrecognised() {
        // Setup
        let mut options = options();
        options.allow_unrecognised_options(true);

        // Execute
        let result = parse(
            &options,
            &[
                "--unknown",
                "-u",
                "--alpha",
                "a",
                "--another_unknown",
                "-some_bad_short",
                "plain",
                "-zx",
            ],
        )
        .unwrap();

        // Verify
        assert_eq!(
            result.unmatched(),
            &[
                "--unknown",
                "-u",
                "--another_unknown",
                "-some_bad_short",
                "plain",
                "-z"
            ]
        );
        assert_eq!(result.count("x"), 1);
        assert_eq!(result.value::<String>("alpha").unwrap(), "a");
    }

    #[test]
    fn positional() {
        // Setup
        let mut options = options();
        options.parse_positional(["alpha", "number", "list"]);

        // Execute
        let result = parse(
            &options,
            &["first", "1", "--bool=1", "2", "3", "--", "-x", "--alpha"],
        )
        .unwrap();

        // Verify
        assert_eq!(result.value::<String>("alpha").unwrap(), "first");
        assert_eq!(result.value::<i32>("number").unwrap(), 1);
        assert_eq!(
            result.value::<Vec<String>>("list").unwrap(),
            vec!["2", "3", "-x", "--alpha"]
        );
        assert_eq!(result.count("list"), 4);
        assert_eq!(result.count("bool"), 1);
        assert_eq!(result.count("x"), 0);
        assert!(result.unmatched().is_empty());
    }

    #[test]
    fn positional_skips_given() {
        // Setup
        let mut options = options();
        options.parse_positional(["alpha", "number"]);

        // Execute
        let result = parse(&options, &["--alpha", "given", "5", "extra"]).unwrap();

        // Verify
        assert_eq!(result.value::<String>("alpha").unwrap(), "given");
        assert_eq!(result.value::<i32>("number").unwrap(), 5);
        assert_eq!(result.unmatched(), &["extra"]);
    }

    #[test]
    fn positional_terminator_overflow() {
        // Setup
        let mut options = options();
        options.parse_positional(["alpha"]);

        // Execute
        let result = parse(&options, &["--", "one", "-x", "--"]).unwrap();

        // Verify
        assert_eq!(result.value::<String>("alpha").unwrap(), "one");
        assert_eq!(result.unmatched(), &["-x", "--"]);
        assert_eq!(result.count("x"), 0);
        assert_eq!(result.consumed(), 5);
    }

    #[test]
    fn positional_undeclared() {
        // Setup
        let mut options = options();
        options.parse_positional(["missing"]);

        // Execute
        let plain = parse(&options, &["one"]);
        let none = parse(&options, &["-x"]).unwrap();

        // Verify
        assert_eq!(plain.unwrap_err(), ParseError::OptionNotExists("missing".to_string()));
        assert_eq!(none.count("x"), 1);
    }

    #[rstest]
    #[case(vec!["-a", "value", "sub", "-x", "-z"], 3)]
    #[case(vec!["-x", "--", "-a"], 3)]
    #[case(vec!["sub"], 1)]
    #[case(vec!["-x"], 2)]
    fn stop_on_positional(#[case] tokens: Vec<&str>, #[case] expected_consumed: usize) {
        // Setup
        let mut options = options();
        options.stop_on_positional(true).parse_positional(["list"]);

        // Execute
        let result = parse(&options, &tokens).unwrap();

        // Verify
        assert_eq!(result.consumed(), expected_consumed);
        assert_eq!(result.count("list"), 0);
        assert!(result.unmatched().is_empty());
    }

    #[test]
    fn defaults() {
        // Setup
        let mut options = Options::new("program");
        options
            .add_options("")
            .option("n", "", value::<u8>().default_value("7"))
            .unwrap()
            .option("l", "", value::<Vec<u8>>().default_value("1,2"))
            .unwrap()
            .option("bad", "", value::<u8>().default_value("300"))
            .unwrap();

        // Execute
        let invalid = parse(&options, &[]);
        let result = parse(&options, &["--bad", "1", "-l", "3"]).unwrap();

        // Verify
        assert_eq!(
            invalid.unwrap_err(),
            ParseError::ArgumentIncorrectType {
                text: "300".to_string(),
                expected: "u8".to_string()
            }
        );
        assert_eq!(result.value::<u8>("n").unwrap(), 7);
        assert_eq!(result.count("n"), 0);
        assert!(result.get("n").unwrap().has_default());
        assert_eq!(result.value::<Vec<u8>>("l").unwrap(), vec![3]);
        assert!(!result.get("l").unwrap().has_default());
        assert_eq!(sequence(&result), vec![("bad", "1"), ("l", "3")]);
    }
}
