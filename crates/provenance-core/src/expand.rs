//! Environment-variable expansion for script and document paths.
//!
//! Supports `$NAME` and `${NAME}`. References to unset variables are left in
//! place unchanged, so a path such as `$UNSET/run.sh` surfaces later as a
//! missing path rather than silently collapsing to `/run.sh`.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::{Captures, Regex};

fn var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$(\w+|\{[^}]*\})").expect("static pattern compiles"))
}

/// Expand `$NAME` / `${NAME}` references from the process environment.
pub fn expand_vars(input: &str) -> Cow<'_, str> {
    expand_vars_with(input, |name| std::env::var(name).ok())
}

/// Expand references using `lookup` to resolve variable names.
pub fn expand_vars_with<F>(input: &str, lookup: F) -> Cow<'_, str>
where
    F: Fn(&str) -> Option<String>,
{
    if !input.contains('$') {
        return Cow::Borrowed(input);
    }

    var_pattern().replace_all(input, |caps: &Captures<'_>| {
        let raw = &caps[1];
        let name = raw
            .strip_prefix('{')
            .and_then(|s| s.strip_suffix('}'))
            .unwrap_or(raw);
        lookup(name).unwrap_or_else(|| caps[0].to_string())
    })
}
