/// One rule head found by static analysis of a policy program.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleHead {
    /// Head name, without any bracketed key (`expect` for `expect["x"]`).
    pub name: String,
    /// Key source text for partial set/object rules; `None` for plain rules.
    pub key: Option<String>,
    /// 1-based line of the head in the policy source.
    pub line: u32,
}

impl RuleHead {
    pub fn keyed(name: &str, key: &str, line: u32) -> Self {
        Self {
            name: name.to_string(),
            key: Some(key.to_string()),
            line,
        }
    }

    pub fn plain(name: &str, line: u32) -> Self {
        Self {
            name: name.to_string(),
            key: None,
            line,
        }
    }
}

/// Rule table of one policy program, in source order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuleTable {
    /// Package declared by the program (`package main` -> `main`).
    pub package: Option<String>,
    pub rules: Vec<RuleHead>,
}

/// One values document, already read from its location.
#[derive(Clone, Debug)]
pub struct ValuesSource {
    /// Path or stdin token the text came from; used in error messages.
    pub origin: String,
    pub text: String,
}
