use logos::{Lexer, Logos};

#[derive(Clone)]
pub struct Extras<'a> {
    pub arena: &'a bumpalo::Bump,
}

/// Tokens of the GraphQL language, shared by the executable document parser and the SDL parser.
#[derive(Logos, Debug, PartialEq)]
#[logos(extras = Extras<'s>)]
pub enum Token<'a> {
    #[token("[")]
    BracketOpen,

    #[token("]")]
    BracketClose,

    #[token("{")]
    BraceOpen,

    #[token("}")]
    BraceClose,

    #[token("(")]
    ParenOpen,

    #[token(")")]
    ParenClose,

    #[token(":")]
    Colon,

    #[token("=")]
    Equal,

    #[token("!")]
    Exclam,

    #[token("&")]
    Ampersand,

    #[token("|")]
    Pipe,

    #[token("...")]
    Ellipsis,

    #[regex(r"@[_a-zA-Z][_0-9a-zA-Z]*", |lex| &lex.slice()[1..])]
    DirectiveName(&'a str),

    #[regex(r"\$[_a-zA-Z][_0-9a-zA-Z]*", |lex| &lex.slice()[1..])]
    VariableName(&'a str),

    #[regex(r"[_a-zA-Z][_0-9a-zA-Z]*", |lex| lex.slice())]
    Name(&'a str),

    #[regex(r"-?([1-9][0-9]*|0)[.][0-9]+([eE][+-]?[0-9]+)?", |lex| lex.slice())]
    #[regex("-?([1-9][0-9]*|0)[eE][+-]?[0-9]+", |lex| lex.slice())]
    Float(&'a str),

    #[regex(r"-?([1-9][0-9]*|0)", |lex| lex.slice())]
    Integer(&'a str),

    #[regex(r#"""?"?"#, lex_string)]
    String(&'a str),

    #[error]
    #[regex(r"([ ,\t\n\r\f]+|#[^\n\r]*)+", logos::skip)]
    Error,

    /// Token indicates the end of the input
    End,
}

#[derive(Logos, Debug, PartialEq)]
enum Escaped {
    #[regex(r#"[^\n\r\\"]+"#)]
    Text,

    #[regex(r"\\u[0-9a-fA-F][0-9a-fA-F][0-9a-fA-F][0-9a-fA-F]")]
    Codepoint,

    #[regex(r#"\\["\\/bfnrt]"#)]
    Character,

    #[token("\"")]
    Quote,

    #[error]
    Error,
}

/// Decodes a single-line string whose remainder contains escape sequences, starting after the
/// opening quote, and returns the unescaped value.
fn lex_escaped_string<'a>(lex: &mut Lexer<'a, Token<'a>>) -> Option<&'a str> {
    let mut output = String::new();
    let mut sublex = Escaped::lexer(lex.remainder());
    while let Some(part) = sublex.next() {
        match part {
            Escaped::Text => output.push_str(sublex.slice()),
            Escaped::Character => output.push(match &sublex.slice()[1..] {
                "b" => '\u{0008}',
                "f" => '\u{000C}',
                "n" => '\n',
                "r" => '\r',
                "t" => '\t',
                other => other.chars().next()?,
            }),
            Escaped::Codepoint => {
                use lexical_core::*;
                const FORMAT: u128 = NumberFormatBuilder::hexadecimal();
                const OPTIONS: ParseIntegerOptions = ParseIntegerOptions::new();
                let codepoint =
                    parse_with_options::<u32, FORMAT>(sublex.slice()[2..].as_bytes(), &OPTIONS)
                        .ok()?;
                output.push(std::char::from_u32(codepoint)?);
            }
            Escaped::Quote => {
                lex.bump(sublex.span().end);
                return Some(lex.extras.arena.alloc_str(&output));
            }
            Escaped::Error => return None,
        }
    }
    None
}

/// Reads a block string up to its closing triple quote and returns its dedented value.
fn lex_block_string<'a>(lex: &mut Lexer<'a, Token<'a>>) -> Option<&'a str> {
    let remainder = lex.remainder();
    let mut raw = String::new();
    let mut index = 0;
    while index < remainder.len() {
        let rest = &remainder[index..];
        if rest.starts_with("\\\"\"\"") {
            raw.push_str("\"\"\"");
            index += 4;
        } else if rest.starts_with("\"\"\"") {
            lex.bump(index + 3);
            return Some(lex.extras.arena.alloc_str(&block_string_value(&raw)));
        } else {
            let ch = rest.chars().next()?;
            raw.push(ch);
            index += ch.len_utf8();
        }
    }
    None
}

/// Removes the common indentation of a block string and its leading and trailing blank lines.
///
/// [Reference](https://spec.graphql.org/October2021/#BlockStringValue())
fn block_string_value(raw: &str) -> String {
    let lines: Vec<&str> = raw.lines().collect();
    let indent_of = |line: &str| line.len() - line.trim_start_matches([' ', '\t']).len();

    let common_indent = lines
        .iter()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .map(|line| indent_of(line))
        .min()
        .unwrap_or(0);

    let mut dedented: Vec<&str> = lines
        .iter()
        .enumerate()
        .map(|(index, line)| match index {
            0 => *line,
            _ => line
                .get(common_indent..)
                .unwrap_or_else(|| line.trim_start()),
        })
        .collect();

    while dedented.first().map_or(false, |line| line.trim().is_empty()) {
        dedented.remove(0);
    }
    while dedented.last().map_or(false, |line| line.trim().is_empty()) {
        dedented.pop();
    }

    dedented.join("\n")
}

fn lex_string<'a>(lex: &mut Lexer<'a, Token<'a>>) -> Option<&'a str> {
    match lex.slice() {
        r#""""# => Some(""),
        r#"""""# => lex_block_string(lex),
        "\"" => {
            // Strings without escape sequences are borrowed from the source as-is
            let remainder = lex.remainder();
            for (i, c) in remainder.char_indices() {
                match c {
                    '\n' | '\r' => return None,
                    '\\' => return lex_escaped_string(lex),
                    '"' => {
                        lex.bump(i + 1);
                        return Some(&remainder[..i]);
                    }
                    _ => {}
                }
            }
            None
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{Extras, Token};
    use bumpalo::Bump;
    use logos::Logos;

    fn tokens<'a>(arena: &'a Bump, source: &'a str) -> Vec<Token<'a>> {
        Token::lexer_with_extras(source, Extras { arena }).collect()
    }

    #[test]
    fn empty() {
        let arena = Bump::new();
        assert!(tokens(&arena, "").is_empty());
        assert!(tokens(&arena, ",,       # comment\n").is_empty());
    }

    #[test]
    fn punctuation() {
        let arena = Bump::new();
        assert_eq!(
            tokens(&arena, "[]{}()=:!&|..."),
            vec![
                Token::BracketOpen,
                Token::BracketClose,
                Token::BraceOpen,
                Token::BraceClose,
                Token::ParenOpen,
                Token::ParenClose,
                Token::Equal,
                Token::Colon,
                Token::Exclam,
                Token::Ampersand,
                Token::Pipe,
                Token::Ellipsis,
            ]
        );
    }

    #[test]
    fn spreads_and_names() {
        let arena = Bump::new();
        assert_eq!(
            tokens(&arena, "...UserFields ... on User"),
            vec![
                Token::Ellipsis,
                Token::Name("UserFields"),
                Token::Ellipsis,
                Token::Name("on"),
                Token::Name("User"),
            ]
        );
    }

    #[test]
    fn variables_and_directives() {
        let arena = Bump::new();
        assert_eq!(
            tokens(&arena, "$id @client"),
            vec![Token::VariableName("id"), Token::DirectiveName("client")]
        );
    }

    #[test]
    fn numbers() {
        let arena = Bump::new();
        assert_eq!(
            tokens(&arena, "1 -1 0 1.5 -10.10E10 1e1"),
            vec![
                Token::Integer("1"),
                Token::Integer("-1"),
                Token::Integer("0"),
                Token::Float("1.5"),
                Token::Float("-10.10E10"),
                Token::Float("1e1"),
            ]
        );
    }

    #[test]
    fn strings() {
        let arena = Bump::new();
        assert_eq!(tokens(&arena, "\"hello\""), vec![Token::String("hello")]);
        assert_eq!(tokens(&arena, "\"\""), vec![Token::String("")]);
        assert_eq!(
            tokens(&arena, "\"use \\\"newField\\\" \\u0041\""),
            vec![Token::String("use \"newField\" A")]
        );
    }

    #[test]
    fn block_strings() {
        let arena = Bump::new();
        assert_eq!(
            tokens(&arena, "\"\"\"single line\"\"\""),
            vec![Token::String("single line")]
        );
        assert_eq!(
            tokens(&arena, "\"\"\"\n    Use the\n      new field\n  \"\"\""),
            vec![Token::String("Use the\n  new field")]
        );
        assert_eq!(
            tokens(&arena, "\"\"\"quote \\\"\"\" inside\"\"\""),
            vec![Token::String("quote \"\"\" inside")]
        );
    }

    #[test]
    fn bad_strings() {
        let arena = Bump::new();
        assert_eq!(tokens(&arena, "\"\\ \"").first(), Some(&Token::Error));
        assert_eq!(tokens(&arena, "\"\n\"").first(), Some(&Token::Error));
    }
}
