use crate::lexer::{Kind, Token};
use hcunit_domain::model::{RuleHead, RuleTable};

/// Walk top-level statements and record every rule head.
pub fn collect(source: &str, tokens: &[Token]) -> RuleTable {
    let mut table = RuleTable::default();
    let mut i = 0;

    while i < tokens.len() {
        let tok = tokens[i];
        if tok.kind == Kind::Newline {
            i += 1;
            continue;
        }
        if tok.kind != Kind::Ident {
            i = skip_statement(source, tokens, i, None);
            continue;
        }

        match tok.text(source) {
            "package" => {
                let end = statement_end(tokens, i + 1);
                if end > i + 1 {
                    let (first, last) = (tokens[i + 1], tokens[end - 1]);
                    table.package = Some(source[first.start..last.end].trim().to_string());
                }
                i = end;
            }
            "import" | "default" => i = statement_end(tokens, i + 1),
            _ => {
                let (head, next) = parse_head(source, tokens, i);
                let before = table.rules.len();
                i = skip_statement(source, tokens, next, Some((&head, &mut table.rules)));
                // `skip_statement` records extra bodies; the first one is recorded here.
                table.rules.insert(before, head);
            }
        }
    }

    table
}

/// Parse `name(.part)*` followed by an optional `[key]` or `contains key`.
fn parse_head(source: &str, tokens: &[Token], start: usize) -> (RuleHead, usize) {
    let first = tokens[start];
    let mut name = first.text(source).to_string();
    let mut j = start + 1;

    while j + 1 < tokens.len() && tokens[j].is_punct('.') && tokens[j + 1].kind == Kind::Ident {
        name.push('.');
        name.push_str(tokens[j + 1].text(source));
        j += 2;
    }

    let mut key = None;
    if j < tokens.len() && tokens[j].is_punct('[') {
        if let Some(close) = matching_close(tokens, j) {
            key = Some(normalize_key(&source[tokens[j].end..tokens[close].start]));
            j = close + 1;
        }
    } else if j < tokens.len() && tokens[j].is_ident(source, "contains") {
        let key_start = j + 1;
        let mut k = key_start;
        let mut depth = 0usize;
        while k < tokens.len() {
            let t = tokens[k];
            if depth == 0
                && (t.kind == Kind::Newline || t.is_punct('{') || t.is_ident(source, "if"))
            {
                break;
            }
            depth = adjust_depth(depth, t);
            k += 1;
        }
        if k > key_start {
            key = Some(normalize_key(&source[tokens[key_start].start..tokens[k - 1].end]));
        }
        j = k;
    }

    (
        RuleHead {
            name,
            key,
            line: first.line,
        },
        j,
    )
}

/// Skip to the end of the current statement, returning the index after it.
///
/// When `extra` is set, every additional body (`} {`) records another copy of
/// the head, since each body is a separate rule.
fn skip_statement(
    source: &str,
    tokens: &[Token],
    from: usize,
    mut extra: Option<(&RuleHead, &mut Vec<RuleHead>)>,
) -> usize {
    let mut depth = 0usize;
    let mut last: Option<Token> = None;
    let mut i = from;

    while i < tokens.len() {
        let t = tokens[i];
        if depth == 0 && t.kind == Kind::Newline {
            let next = tokens[i..].iter().find(|n| n.kind != Kind::Newline);
            let continues = match next {
                Some(n) if n.is_ident(source, "else") => true,
                Some(n) if n.is_punct('{') => last.is_some_and(|l| l.is_punct('}')),
                _ => false,
            };
            if !continues {
                return i;
            }
            i += 1;
            continue;
        }
        if depth == 0
            && t.is_punct('{')
            && last.is_some_and(|l| l.is_punct('}'))
            && let Some((head, rules)) = extra.as_mut()
        {
            rules.push((*head).clone());
        }
        depth = adjust_depth(depth, t);
        if t.kind != Kind::Newline {
            last = Some(t);
        }
        i += 1;
    }

    i
}

/// Index of the first top-level newline at or after `from`.
fn statement_end(tokens: &[Token], from: usize) -> usize {
    let mut depth = 0usize;
    for (offset, t) in tokens[from.min(tokens.len())..].iter().enumerate() {
        if depth == 0 && t.kind == Kind::Newline {
            return from + offset;
        }
        depth = adjust_depth(depth, *t);
    }
    tokens.len()
}

fn matching_close(tokens: &[Token], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (offset, t) in tokens[open..].iter().enumerate() {
        depth = adjust_depth(depth, *t);
        if depth == 0 {
            return Some(open + offset);
        }
    }
    None
}

fn adjust_depth(depth: usize, t: Token) -> usize {
    match t.kind {
        Kind::Punct('(' | '[' | '{') => depth + 1,
        Kind::Punct(')' | ']' | '}') => depth.saturating_sub(1),
        _ => depth,
    }
}

/// Trim the key and print a raw-string key the way string terms are printed.
fn normalize_key(raw: &str) -> String {
    let key = raw.trim();
    if key.len() >= 2 && key.starts_with('`') && key.ends_with('`') {
        let inner = &key[1..key.len() - 1];
        let mut quoted = String::with_capacity(inner.len() + 2);
        quoted.push('"');
        for c in inner.chars() {
            match c {
                '"' => quoted.push_str("\\\""),
                '\\' => quoted.push_str("\\\\"),
                '\n' => quoted.push_str("\\n"),
                '\t' => quoted.push_str("\\t"),
                c => quoted.push(c),
            }
        }
        quoted.push('"');
        return quoted;
    }
    key.to_string()
}
