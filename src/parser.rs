//! Parsing of `# @kind args...` filter directives.
//!
//! A directive line starts with `#`. Its second whitespace-separated field
//! names the filter (`@replace`, `@skip`, ...) and the remaining fields are
//! positional arguments. Lines that do not follow this shape are ordinary
//! comments.

use crate::filter::Filter;
use tracing::debug;

/// Outcome of reading one `#` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// The line is a plain comment, not a filter directive.
    Comment,
    Filter(Filter),
    /// The line names a filter kind but could not be turned into a filter.
    Malformed { kind: String, reason: String },
}

impl Directive {
    pub fn into_filter(self) -> Option<Filter> {
        match self {
            Directive::Filter(filter) => Some(filter),
            _ => None,
        }
    }
}

/// Parses a trimmed `#` line, returning `None` when no filter is produced.
pub fn parse_filter(line: &str) -> Option<Filter> {
    parse_directive(line).into_filter()
}

pub fn parse_directive(line: &str) -> Directive {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 2 {
        return Directive::Comment;
    }

    let Some(kind) = fields[1].strip_prefix('@') else {
        return Directive::Comment;
    };
    let args = &fields[2..];

    match kind {
        "replace" => match args {
            [from, to] if !from.is_empty() => Directive::Filter(Filter::Replace {
                from: (*from).to_string(),
                to: (*to).to_string(),
            }),
            [_, _] => malformed(kind, "pattern to replace must not be empty"),
            _ => malformed(kind, format!("expected 2 arguments, found {}", args.len())),
        },
        "skip" => match args {
            [chars] => match chars.chars().next() {
                Some(c) => Directive::Filter(Filter::Skip(c)),
                None => malformed(kind, "character to skip must not be empty"),
            },
            _ => malformed(kind, format!("expected 1 argument, found {}", args.len())),
        },
        "substring" => match args {
            [start] => Directive::Filter(Filter::Substring {
                start: parse_start(start),
                length: None,
            }),
            [start, length] => Directive::Filter(Filter::Substring {
                start: parse_start(start),
                length: parse_length(length),
            }),
            _ => malformed(
                kind,
                format!("expected 1 or 2 arguments, found {}", args.len()),
            ),
        },
        "digit" => no_args(Filter::DigitMap, args),
        "uppercase" => no_args(Filter::Uppercase, args),
        "lowercase" => no_args(Filter::Lowercase, args),
        _ => malformed(kind, "unknown filter"),
    }
}

fn malformed(kind: &str, reason: impl Into<String>) -> Directive {
    Directive::Malformed {
        kind: kind.to_string(),
        reason: reason.into(),
    }
}

fn no_args(filter: Filter, args: &[&str]) -> Directive {
    if !args.is_empty() {
        debug!(
            filter = filter.kind(),
            ignored = args.len(),
            "Ignoring extra filter arguments"
        );
    }
    Directive::Filter(filter)
}

// Unparsable starts fall back to 0.
fn parse_start(arg: &str) -> i64 {
    arg.parse().unwrap_or(0)
}

// Unparsable or negative lengths mean "to the end".
fn parse_length(arg: &str) -> Option<usize> {
    arg.parse::<i64>()
        .ok()
        .and_then(|length| usize::try_from(length).ok())
}
