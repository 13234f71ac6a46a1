//! Text helpers for generated source.

use super::constants::INDENT;

/// Indent every non-empty line of `text` by `levels` indentation units.
///
/// Empty lines stay empty so generated files carry no trailing whitespace.
pub fn indent(text: &str, levels: usize) -> String {
    let prefix = INDENT.repeat(levels);
    text.split('\n')
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{prefix}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Lower-case the first character: `FirstName` → `firstName`.
pub fn to_camel_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent_skips_empty_lines() {
        assert_eq!(indent("a\n\nb", 1), "    a\n\n    b");
        assert_eq!(indent("x", 2), "        x");
    }

    #[test]
    fn test_to_camel_case() {
        assert_eq!(to_camel_case("FirstName"), "firstName");
        assert_eq!(to_camel_case("X"), "x");
        assert_eq!(to_camel_case(""), "");
    }
}
