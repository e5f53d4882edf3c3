//! Indentation-sensitive tokenizer for the checker language.
//!
//! Mirrors Python's own lexing strategy: a stack of indentation widths is
//! maintained line by line and `Indent`/`Dedent`/`Newline` tokens are
//! synthesized around the flat token stream the parser actually consumes.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Def,
    If,
    Else,
    Return,
    And,
    Or,
    Not,
    True,
    False,
    None_,
    Ident(String),
    Int(i64),
    Float(f64),
    Str(String),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    EqEq,
    NotEq,
    Lt,
    Le,
    Gt,
    Ge,
    Assign,
    LParen,
    RParen,
    Comma,
    Colon,
    Dot,
    Arrow,
    Newline,
    Indent,
    Dedent,
    Eof,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub span: Span,
}

#[derive(Debug, thiserror::Error)]
pub enum LexError {
    #[error("line {line}: unexpected character {ch:?}")]
    UnexpectedChar { line: usize, ch: char },

    #[error("line {line}: unterminated string literal")]
    UnterminatedString { line: usize },

    #[error("line {line}: inconsistent indentation")]
    BadIndent { line: usize },
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

pub fn lex(source: &str) -> Result<Vec<Spanned>, LexError> {
    let mut tokens = Vec::new();
    let mut indents = vec![0usize];

    for (idx, raw_line) in source.lines().enumerate() {
        let line_no = idx + 1;

        let without_comment = match raw_line.find('#') {
            Some(pos) => &raw_line[..pos],
            None => raw_line,
        };

        if without_comment.trim().is_empty() {
            continue;
        }

        let indent_width = without_comment.len() - without_comment.trim_start().len();
        let current = *indents.last().unwrap();

        if indent_width > current {
            indents.push(indent_width);
            tokens.push(Spanned {
                token: Token::Indent,
                span: Span { line: line_no },
            });
        } else if indent_width < current {
            while *indents.last().unwrap() > indent_width {
                indents.pop();
                tokens.push(Spanned {
                    token: Token::Dedent,
                    span: Span { line: line_no },
                });
            }
            if *indents.last().unwrap() != indent_width {
                return Err(LexError::BadIndent { line: line_no });
            }
        }

        lex_line(without_comment.trim_start(), line_no, &mut tokens)?;
        tokens.push(Spanned {
            token: Token::Newline,
            span: Span { line: line_no },
        });
    }

    while indents.len() > 1 {
        indents.pop();
        tokens.push(Spanned {
            token: Token::Dedent,
            span: Span {
                line: source.lines().count() + 1,
            },
        });
    }

    tokens.push(Spanned {
        token: Token::Eof,
        span: Span {
            line: source.lines().count() + 1,
        },
    });

    Ok(tokens)
}

fn lex_line(line: &str, line_no: usize, out: &mut Vec<Spanned>) -> Result<(), LexError> {
    let chars: Vec<char> = line.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        if c == '"' || c == '\'' {
            let quote = c;
            let start = i + 1;
            let mut j = start;
            let mut value = String::new();
            let mut closed = false;
            while j < chars.len() {
                if chars[j] == '\\' && j + 1 < chars.len() {
                    value.push(chars[j + 1]);
                    j += 2;
                    continue;
                }
                if chars[j] == quote {
                    closed = true;
                    break;
                }
                value.push(chars[j]);
                j += 1;
            }
            if !closed {
                return Err(LexError::UnterminatedString { line: line_no });
            }
            push(out, Token::Str(value), line_no);
            i = j + 1;
            continue;
        }

        if c.is_ascii_digit() {
            let start = i;
            let mut is_float = false;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                if chars[i] == '.' {
                    is_float = true;
                }
                i += 1;
            }
            let text: String = chars[start..i].iter().collect();
            if is_float {
                let value: f64 = text.parse().map_err(|_| LexError::UnexpectedChar {
                    line: line_no,
                    ch: c,
                })?;
                push(out, Token::Float(value), line_no);
            } else {
                let value: i64 = text.parse().map_err(|_| LexError::UnexpectedChar {
                    line: line_no,
                    ch: c,
                })?;
                push(out, Token::Int(value), line_no);
            }
            continue;
        }

        if c.is_alphabetic() || c == '_' {
            let start = i;
            while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let text: String = chars[start..i].iter().collect();
            let token = match text.as_str() {
                "def" => Token::Def,
                "if" => Token::If,
                "else" => Token::Else,
                "return" => Token::Return,
                "and" => Token::And,
                "or" => Token::Or,
                "not" => Token::Not,
                "True" => Token::True,
                "False" => Token::False,
                "None" => Token::None_,
                _ => Token::Ident(text),
            };
            push(out, token, line_no);
            continue;
        }

        macro_rules! two_char {
            ($next:expr, $tok_two:expr, $tok_one:expr) => {{
                if i + 1 < chars.len() && chars[i + 1] == $next {
                    push(out, $tok_two, line_no);
                    i += 2;
                } else {
                    push(out, $tok_one, line_no);
                    i += 1;
                }
            }};
        }

        match c {
            '+' => {
                push(out, Token::Plus, line_no);
                i += 1;
            }
            '-' => {
                if i + 1 < chars.len() && chars[i + 1] == '>' {
                    push(out, Token::Arrow, line_no);
                    i += 2;
                } else {
                    push(out, Token::Minus, line_no);
                    i += 1;
                }
            }
            '*' => {
                push(out, Token::Star, line_no);
                i += 1;
            }
            '/' => {
                push(out, Token::Slash, line_no);
                i += 1;
            }
            '%' => {
                push(out, Token::Percent, line_no);
                i += 1;
            }
            '=' => two_char!('=', Token::EqEq, Token::Assign),
            '!' => {
                if i + 1 < chars.len() && chars[i + 1] == '=' {
                    push(out, Token::NotEq, line_no);
                    i += 2;
                } else {
                    return Err(LexError::UnexpectedChar { line: line_no, ch: c });
                }
            }
            '<' => two_char!('=', Token::Le, Token::Lt),
            '>' => two_char!('=', Token::Ge, Token::Gt),
            '(' => {
                push(out, Token::LParen, line_no);
                i += 1;
            }
            ')' => {
                push(out, Token::RParen, line_no);
                i += 1;
            }
            ',' => {
                push(out, Token::Comma, line_no);
                i += 1;
            }
            ':' => {
                push(out, Token::Colon, line_no);
                i += 1;
            }
            '.' => {
                push(out, Token::Dot, line_no);
                i += 1;
            }
            _ => return Err(LexError::UnexpectedChar { line: line_no, ch: c }),
        }
    }

    Ok(())
}

fn push(out: &mut Vec<Spanned>, token: Token, line: usize) {
    out.push(Spanned {
        token,
        span: Span { line },
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(source: &str) -> Vec<Token> {
        lex(source).unwrap().into_iter().map(|s| s.token).collect()
    }

    #[test]
    fn lexes_def_signature() {
        let got = toks("def checker(right_value, value) -> bool:\n    return True\n");
        assert_eq!(
            got,
            vec![
                Token::Def,
                Token::Ident("checker".into()),
                Token::LParen,
                Token::Ident("right_value".into()),
                Token::Comma,
                Token::Ident("value".into()),
                Token::RParen,
                Token::Arrow,
                Token::Ident("bool".into()),
                Token::Colon,
                Token::Newline,
                Token::Indent,
                Token::Return,
                Token::True,
                Token::Newline,
                Token::Dedent,
                Token::Eof,
            ]
        );
    }

    #[test]
    fn tracks_indent_and_dedent() {
        let got = toks("if True:\n    x = 1\nelse:\n    x = 2\n");
        assert!(got.contains(&Token::Indent));
        assert!(got.contains(&Token::Dedent));
    }

    #[test]
    fn rejects_inconsistent_indentation() {
        let err = lex("if True:\n    x = 1\n  y = 2\n");
        assert!(matches!(err, Err(LexError::BadIndent { .. })));
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let got = toks("# a comment\n\ndef checker(r, v) -> bool:\n    return r == v\n");
        assert!(got.iter().any(|t| *t == Token::Def));
    }
}
