// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// Split a substituted command string into an argument vector.
///
/// Whitespace separates arguments. A single- or double-quoted segment becomes one argument
/// with the quotes removed and inner whitespace kept. A quote that is never closed is
/// dropped and scanning continues after it.
///
/// ```
/// use pipewrap::utils::split_command_line;
///
/// let args = split_command_line(r#"run tool.Main "two words" 'x y' plain"#);
/// assert_eq!(args, vec!["run", "tool.Main", "two words", "x y", "plain"]);
/// ```
pub fn split_command_line(line: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut rest = line;

    loop {
        rest = rest.trim_start();
        let Some(first) = rest.chars().next() else {
            break;
        };

        if first == '"' || first == '\'' {
            let body = &rest[1..];
            match body.find(first) {
                Some(end) => {
                    args.push(body[..end].to_string());
                    rest = &body[end + 1..];
                }
                None => rest = body,
            }
            continue;
        }

        let end = rest
            .find(|c: char| c.is_whitespace() || c == '"' || c == '\'')
            .unwrap_or(rest.len());
        args.push(rest[..end].to_string());
        rest = &rest[end..];
    }

    args
}
