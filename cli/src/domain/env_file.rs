//! Key-based rewriting of flat `KEY=value` files.

use crate::domain::error::ProvisionError;

/// Outcome of rewriting a single key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyRewrite {
    /// At least one line changed; carries the new file content.
    Changed(String),
    /// The key is present and already holds the value.
    Unchanged,
    /// No line declares the key. The file must be left as-is.
    Missing,
}

/// Replace every line starting with `key=` by `key=value`.
///
/// Line terminators (`\n` or `\r\n`) are preserved, as is every other line.
/// A key that is not declared is reported as [`KeyRewrite::Missing`] and is
/// never appended.
///
/// # Errors
///
/// Returns `InvalidValue` if `value` contains a line break, which would
/// inject extra lines into the file.
pub fn rewrite_key(content: &str, key: &str, value: &str) -> Result<KeyRewrite, ProvisionError> {
    if value.contains(['\n', '\r']) {
        return Err(ProvisionError::InvalidValue {
            key: key.to_string(),
        });
    }

    let prefix = format!("{key}=");
    let replacement = format!("{key}={value}");
    let mut found = false;
    let mut out = String::with_capacity(content.len() + value.len());

    for line in content.split_inclusive('\n') {
        let (body, ending) = split_line_ending(line);
        if body.starts_with(&prefix) {
            found = true;
            out.push_str(&replacement);
        } else {
            out.push_str(body);
        }
        out.push_str(ending);
    }

    Ok(if !found {
        KeyRewrite::Missing
    } else if out == content {
        KeyRewrite::Unchanged
    } else {
        KeyRewrite::Changed(out)
    })
}

fn split_line_ending(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, "\n")
    } else {
        (line, "")
    }
}

/// Apply a rewrite result to `content`, returning the resulting text.
#[must_use]
pub fn apply(content: &str, rewrite: &KeyRewrite) -> String {
    match rewrite {
        KeyRewrite::Changed(new) => new.clone(),
        KeyRewrite::Unchanged | KeyRewrite::Missing => content.to_string(),
    }
}
