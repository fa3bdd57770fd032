//! Shell script generation
//!
//! Produces POSIX-shell statements that reproduce each value exactly when
//! evaluated. Values that a shell would split, expand or reinterpret are
//! double-quoted, with the four characters that stay special inside double
//! quotes escaped.

use super::EnvVar;

/// Interpreter line at the top of every generated script
pub const SHEBANG: &str = "#!/bin/bash";

/// Characters that force a value into double quotes
const SHELL_METACHARACTERS: &[char] = &[
    ' ', '\t', '\n', '\r', '"', '\'', '`', '$', '&', '|', ';', '<', '>', '(', ')', '{', '}', '[',
    ']', '\\', '*', '?', '~', '#', '!',
];

/// Check whether a value needs quoting
fn needs_quoting(value: &str) -> bool {
    value.contains(SHELL_METACHARACTERS)
}

/// Escape a value for use inside double quotes
///
/// Backslash goes first so the escapes added afterwards are not doubled.
fn escape_value(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('`', "\\`")
        .replace('$', "\\$")
}

/// Format `KEY=value`, quoting and escaping the value when needed
pub fn format_export_line(key: &str, value: &str) -> String {
    if needs_quoting(value) {
        format!("{}=\"{}\"", key, escape_value(value))
    } else {
        format!("{}={}", key, value)
    }
}

/// Format `unset KEY`
pub fn format_unset_line(key: &str) -> String {
    format!("unset {}", key)
}

/// Build an export script for the enabled entries, in order
pub fn export_script(vars: &[EnvVar]) -> String {
    let mut script = String::from(SHEBANG);
    script.push_str("\n\n");

    for var in vars.iter().filter(|v| v.enabled) {
        script.push_str("export ");
        script.push_str(&format_export_line(&var.key, &var.value));
        script.push('\n');
    }

    script
}

/// Build an unset script for the enabled entries, in order
pub fn unset_script(vars: &[EnvVar]) -> String {
    let mut script = String::from(SHEBANG);
    script.push_str("\n\n");

    for var in vars.iter().filter(|v| v.enabled) {
        script.push_str(&format_unset_line(&var.key));
        script.push('\n');
    }

    script
}
