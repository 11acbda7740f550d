//! Just enough of a Rego lexer to find statement boundaries.
//!
//! Comments are dropped, string and raw-string literals become single tokens,
//! and newlines are kept because they end top-level statements.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    Ident,
    /// `"..."` literal, quotes included.
    Str,
    /// `` `...` `` literal, backticks included.
    RawStr,
    Number,
    Punct(char),
    Newline,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: Kind,
    /// Byte range in the source.
    pub start: usize,
    pub end: usize,
    /// 1-based line of the first byte.
    pub line: u32,
}

impl Token {
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }

    pub fn is_punct(&self, c: char) -> bool {
        self.kind == Kind::Punct(c)
    }

    pub fn is_ident(&self, source: &str, word: &str) -> bool {
        self.kind == Kind::Ident && self.text(source) == word
    }
}

pub fn tokenize(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = source.char_indices().peekable();
    let mut line: u32 = 1;

    while let Some((start, c)) = chars.next() {
        match c {
            '\n' => {
                tokens.push(Token {
                    kind: Kind::Newline,
                    start,
                    end: start + 1,
                    line,
                });
                line += 1;
            }
            c if c.is_whitespace() => {}
            '#' => {
                while let Some(&(_, next)) = chars.peek() {
                    if next == '\n' {
                        break;
                    }
                    chars.next();
                }
            }
            '"' => {
                let mut end = source.len();
                let mut escaped = false;
                while let Some(&(i, next)) = chars.peek() {
                    // An unterminated string stops at the end of its line.
                    if next == '\n' {
                        end = i;
                        break;
                    }
                    chars.next();
                    if escaped {
                        escaped = false;
                    } else if next == '\\' {
                        escaped = true;
                    } else if next == '"' {
                        end = i + 1;
                        break;
                    }
                }
                tokens.push(Token {
                    kind: Kind::Str,
                    start,
                    end,
                    line,
                });
            }
            '`' => {
                let first_line = line;
                let mut end = source.len();
                for (i, next) in chars.by_ref() {
                    if next == '\n' {
                        line += 1;
                    } else if next == '`' {
                        end = i + 1;
                        break;
                    }
                }
                tokens.push(Token {
                    kind: Kind::RawStr,
                    start,
                    end,
                    line: first_line,
                });
            }
            c if c.is_alphabetic() || c == '_' => {
                let end = take_while(&mut chars, start + c.len_utf8(), |n| {
                    n.is_alphanumeric() || n == '_'
                });
                tokens.push(Token {
                    kind: Kind::Ident,
                    start,
                    end,
                    line,
                });
            }
            c if c.is_ascii_digit() => {
                let end = take_while(&mut chars, start + 1, |n| {
                    n.is_ascii_alphanumeric() || n == '.' || n == '_'
                });
                tokens.push(Token {
                    kind: Kind::Number,
                    start,
                    end,
                    line,
                });
            }
            c => tokens.push(Token {
                kind: Kind::Punct(c),
                start,
                end: start + c.len_utf8(),
                line,
            }),
        }
    }

    tokens
}

fn take_while(
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
    mut end: usize,
    keep: impl Fn(char) -> bool,
) -> usize {
    while let Some(&(i, next)) = chars.peek() {
        if !keep(next) {
            break;
        }
        chars.next();
        end = i + next.len_utf8();
    }
    end
}
