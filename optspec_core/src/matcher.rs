use crate::constant::TERMINATOR;

/// The lexical shape of one argument token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token<'t> {
    /// Exactly `--`.
    Terminator,
    /// `--name` or `--name=value`.
    Long {
        name: &'t str,
        value: Option<&'t str>,
    },
    /// `-c` or the cluster `-abc`, without the leading '-'.
    Short(&'t str),
    /// Anything that does not begin with '-', as well as a lone `-`.
    Plain(&'t str),
    /// Begins with '-' yet is neither a long nor a short option.
    Malformed(&'t str),
}

pub(crate) fn classify(token: &str) -> Token<'_> {
    // 1. The terminator:
    //  --
    // 2. A 'long' option, such as:
    //  --initial
    //  --initial=..
    // 3. A 'short' option or cluster, such as:
    //  -i
    //  -?
    //  -iv..
    // 4. Anything else.
    if token == TERMINATOR {
        Token::Terminator
    } else if let Some(body) = token.strip_prefix(TERMINATOR) {
        let (name, value) = split_equals_delimiter(body);

        if is_long_name(name) {
            Token::Long { name, value }
        } else {
            Token::Malformed(token)
        }
    } else if let Some(body) = token.strip_prefix('-') {
        if body.is_empty() {
            Token::Plain(token)
        } else if is_short_cluster(body) {
            Token::Short(body)
        } else {
            Token::Malformed(token)
        }
    } else {
        Token::Plain(token)
    }
}

pub(crate) fn is_short_name(c: char) -> bool {
    c == '?' || c.is_ascii_alphanumeric()
}

pub(crate) fn is_long_name(name: &str) -> bool {
    let mut chars = name.chars();

    match chars.next() {
        Some(first) if first.is_ascii_alphanumeric() => {
            name.len() > 1 && chars.all(|c| c == '-' || c == '_' || c.is_ascii_alphanumeric())
        }
        _ => false,
    }
}

fn is_short_cluster(body: &str) -> bool {
    if body == "?" {
        true
    } else {
        body.chars().all(|c| c.is_ascii_alphanumeric())
    }
}

fn split_equals_delimiter(token: &str) -> (&str, Option<&str>) {
    match token.split_once('=') {
        Some((n, v)) => (n, Some(v)),
        None => (token, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("--", Token::Terminator)]
    #[case("--ab", Token::Long { name: "ab", value: None })]
    #[case("--dry-run", Token::Long { name: "dry-run", value: None })]
    #[case("--dry_run", Token::Long { name: "dry_run", value: None })]
    #[case("--a1", Token::Long { name: "a1", value: None })]
    #[case("--ab=", Token::Long { name: "ab", value: Some("") })]
    #[case("--ab=cd", Token::Long { name: "ab", value: Some("cd") })]
    #[case("--ab=c=d", Token::Long { name: "ab", value: Some("c=d") })]
    #[case("--ab=--", Token::Long { name: "ab", value: Some("--") })]
    #[case("--a", Token::Malformed("--a"))]
    #[case("--a=b", Token::Malformed("--a=b"))]
    #[case("--=ab", Token::Malformed("--=ab"))]
    #[case("---ab", Token::Malformed("---ab"))]
    #[case("--_ab", Token::Malformed("--_ab"))]
    #[case("--a.b", Token::Malformed("--a.b"))]
    #[case("-a", Token::Short("a"))]
    #[case("-?", Token::Short("?"))]
    #[case("-7", Token::Short("7"))]
    #[case("-abc", Token::Short("abc"))]
    #[case("-xxavalue", Token::Short("xxavalue"))]
    #[case("-a?", Token::Malformed("-a?"))]
    #[case("-a=b", Token::Malformed("-a=b"))]
    #[case("-some_bad_short", Token::Malformed("-some_bad_short"))]
    #[case("-é", Token::Malformed("-é"))]
    #[case("-", Token::Plain("-"))]
    #[case("", Token::Plain(""))]
    #[case("abc", Token::Plain("abc"))]
    #[case("a-b", Token::Plain("a-b"))]
    fn classify_token(#[case] token: &str, #[case] expected: Token) {
        // Execute
        let result = classify(token);

        // Verify
        assert_eq!(result, expected);
    }

    #[rstest]
    #[case('a', true)]
    #[case('Z', true)]
    #[case('0', true)]
    #[case('?', true)]
    #[case('-', false)]
    #[case('_', false)]
    #[case(',', false)]
    #[case('é', false)]
    fn short_name(#[case] c: char, #[case] expected: bool) {
        assert_eq!(is_short_name(c), expected);
    }

    #[rstest]
    #[case("ab", true)]
    #[case("a-b_c", true)]
    #[case("9lives", true)]
    #[case("a", false)]
    #[case("", false)]
    #[case("-ab", false)]
    #[case("ab cd", false)]
    #[case("ab,", false)]
    fn long_name(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(is_long_name(name), expected);
    }
}
