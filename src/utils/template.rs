// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! `${name}` placeholders in operation command templates.

use crate::config::consts::{PLACEHOLDER_CLOSE, PLACEHOLDER_OPEN};
use crate::utils::ParameterMap;

/// Names of all placeholders in `template`, in order of appearance (duplicates kept).
pub fn placeholders(template: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let mut rest = template;
    while let Some(start) = rest.find(PLACEHOLDER_OPEN) {
        let after = &rest[start + PLACEHOLDER_OPEN.len()..];
        match after.find(PLACEHOLDER_CLOSE) {
            Some(end) => {
                names.push(&after[..end]);
                rest = &after[end + PLACEHOLDER_CLOSE.len()..];
            }
            None => break,
        }
    }
    names
}

/// Replace each `${key}` in `template` with the value from the first layer holding `key`.
///
/// The template is scanned once, so substituted values are never re-scanned. Placeholders
/// no layer knows about are left as they are.
pub fn substitute(template: &str, layers: &[&ParameterMap]) -> String {
    let mut command = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find(PLACEHOLDER_OPEN) {
        let after = &rest[start + PLACEHOLDER_OPEN.len()..];
        let Some(end) = after.find(PLACEHOLDER_CLOSE) else {
            break;
        };
        let key = &after[..end];
        let placeholder_len = PLACEHOLDER_OPEN.len() + end + PLACEHOLDER_CLOSE.len();

        command.push_str(&rest[..start]);
        match layers.iter().find_map(|layer| layer.get(key)) {
            Some(value) => command.push_str(value),
            None => command.push_str(&rest[start..start + placeholder_len]),
        }
        rest = &rest[start + placeholder_len..];
    }
    command.push_str(rest);
    command
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders_in_order() {
        let names = placeholders("convert ${input} -q ${quality} ${output} ${input}");
        assert_eq!(names, vec!["input", "quality", "output", "input"]);
    }

    #[test]
    fn test_unterminated_placeholder_ignored() {
        assert_eq!(placeholders("echo ${broken"), Vec::<&str>::new());
    }

    #[test]
    fn test_substitute_all_occurrences() {
        let params: ParameterMap = [("input", "a b.txt"), ("output", "out.txt")]
            .into_iter()
            .collect();
        let command = substitute("cp ${input} ${output}; ls ${input}", &[&params]);
        assert_eq!(command, "cp a b.txt out.txt; ls a b.txt");
    }

    #[test]
    fn test_substitute_leaves_unknown_placeholders() {
        let params: ParameterMap = [("a", "1")].into_iter().collect();
        assert_eq!(substitute("${a} ${b} ${c", &[&params]), "1 ${b} ${c");
    }

    #[test]
    fn test_first_layer_wins_and_values_are_not_rescanned() {
        let first: ParameterMap = [("a", "${b}")].into_iter().collect();
        let second: ParameterMap = [("a", "ignored"), ("b", "2")].into_iter().collect();
        assert_eq!(substitute("${a}-${b}", &[&first, &second]), "${b}-2");
    }
}
