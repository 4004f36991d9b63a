use std::collections::HashMap;

use crate::lexer::scanner::strip_comment;
use crate::parser::value::unquote_key;

/// Find the source line that defines `path`, for error messages.
///
/// Headers are tracked the same way the parser routes them, so
/// `items.1.meta.size` points at the `size` line under the second
/// `[[items]]` block's `[items.meta]`. Returns `(0, "<key not found>")`
/// when the path cannot be located.
pub(super) fn find_config_line(path: &str, raw_content: &str) -> (usize, String) {
    let mut scope = String::new();
    let mut counts: HashMap<String, usize> = HashMap::new();
    // (array header name, scoped path of its latest item)
    let mut array: Option<(String, String)> = None;

    for (idx, raw) in raw_content.lines().enumerate() {
        let line = strip_comment(raw).trim();
        if line.is_empty() {
            continue;
        }

        if let Some(name) = line.strip_prefix("[[").and_then(|l| l.strip_suffix("]]")) {
            let name = normalize(name);
            let relative = relative_scope(&array, &name);
            let base = relative.clone().unwrap_or_else(|| name.clone());
            let counter = counts.entry(base.clone()).or_insert(0);
            let item = format!("{}.{}", base, counter);
            *counter += 1;

            if relative.is_none() {
                array = Some((name, item.clone()));
            }
            scope = item;
        } else if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            let name = normalize(name);
            scope = match relative_scope(&array, &name) {
                Some(scoped) => scoped,
                None => {
                    array = None;
                    name
                }
            };
        } else if let Some((key, _)) = line.split_once('=') {
            let key = unquote_key(key);
            let full = if scope.is_empty() {
                key
            } else {
                format!("{}.{}", scope, key)
            };
            if full == path {
                return (idx + 1, line.to_string());
            }
            continue;
        } else {
            continue;
        }

        if scope == path {
            return (idx + 1, line.to_string());
        }
    }

    (0, "<key not found>".into())
}

fn normalize(name: &str) -> String {
    name.split('.')
        .map(unquote_key)
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join(".")
}

fn relative_scope(array: &Option<(String, String)>, name: &str) -> Option<String> {
    let (prefix, item) = array.as_ref()?;
    let suffix = name.strip_prefix(prefix.as_str())?.strip_prefix('.')?;
    Some(format!("{}.{}", item, suffix))
}
