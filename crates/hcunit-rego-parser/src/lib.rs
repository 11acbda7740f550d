//! Static analysis of Rego programs.
//!
//! The scanner finds top-level rule heads (name and key) without evaluating
//! or type-checking anything. It is lenient: malformed input yields whatever
//! heads can be recognized, never an error or a panic.

#![forbid(unsafe_code)]

mod heads;
mod lexer;

use hcunit_domain::model::RuleTable;

/// Scan `source` and return its package and rule heads in source order.
pub fn parse_rule_table(source: &str) -> RuleTable {
    let tokens = lexer::tokenize(source);
    heads::collect(source, &tokens)
}
