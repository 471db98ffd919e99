//! The format stage's whitespace normalization (spec §4.5 "Format"):
//! realign attribute equals signs within a body, collapse runs of blank
//! lines to at most one, and ensure the file ends with a single newline.
//!
//! This operates on the serialized text rather than `hcl-edit`'s decor
//! model directly — re-indentation as a dedicated, serializer-side text
//! pass is the design spec §4.1 calls for, and it keeps the pass testable
//! in isolation from the token tree.

use regex::Regex;

/// Runs the full format pass used by the config pipeline's Format stage.
pub fn format_source(src: &str) -> String {
    let collapsed = collapse_blank_lines(src);
    let aligned = align_equals_signs(&collapsed);
    ensure_trailing_newline(&aligned)
}

/// Collapses runs of two or more consecutive blank lines to exactly one.
fn collapse_blank_lines(src: &str) -> String {
    let mut out = String::with_capacity(src.len());
    let mut blank_run = 0;
    for line in src.lines() {
        if line.trim().is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        out.push_str(line);
        out.push('\n');
    }
    out
}

fn attribute_line_re() -> Regex {
    Regex::new(r"^(?P<indent>[ \t]*)(?P<key>[A-Za-z_][A-Za-z0-9_\-]*)[ \t]*=[ \t]*(?P<rest>.*)$")
        .expect("static regex is valid")
}

/// Pads attribute names within each contiguous, same-indentation run of
/// simple `key = value` lines to the longest key, so `=` signs line up —
/// the same visual normalization `terraform fmt` performs.
fn align_equals_signs(src: &str) -> String {
    let re = attribute_line_re();
    let lines: Vec<&str> = src.lines().collect();
    let mut out_lines: Vec<String> = Vec::with_capacity(lines.len());

    let mut i = 0;
    while i < lines.len() {
        let Some(caps) = re.captures(lines[i]) else {
            out_lines.push(lines[i].to_string());
            i += 1;
            continue;
        };
        let indent = caps["indent"].to_string();

        let mut run_end = i;
        let mut max_key_len = 0;
        while run_end < lines.len() {
            match re.captures(lines[run_end]) {
                Some(c) if c["indent"] == indent => {
                    max_key_len = max_key_len.max(c["key"].len());
                    run_end += 1;
                }
                _ => break,
            }
        }

        for line in &lines[i..run_end] {
            let caps = re.captures(line).expect("line matched in first pass");
            let key = &caps["key"];
            let rest = &caps["rest"];
            let padding = " ".repeat(max_key_len - key.len());
            out_lines.push(format!("{indent}{key}{padding} = {rest}"));
        }

        i = run_end;
    }

    out_lines.join("\n")
}

fn ensure_trailing_newline(src: &str) -> String {
    format!("{}\n", src.trim_end_matches('\n'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_multiple_blank_lines() {
        let src = "a = 1\n\n\n\nb = 2\n";
        assert_eq!(collapse_blank_lines(src), "a = 1\n\nb = 2\n");
    }

    #[test]
    fn aligns_equals_within_a_run() {
        let src = "resource \"x\" \"y\" {\n  short = 1\n  a_longer_name = 2\n}\n";
        let formatted = format_source(src);
        assert!(formatted.contains("  short         = 1\n"));
        assert!(formatted.contains("  a_longer_name = 2\n"));
    }

    #[test]
    fn ensures_single_trailing_newline() {
        assert_eq!(ensure_trailing_newline("a = 1"), "a = 1\n");
        assert_eq!(ensure_trailing_newline("a = 1\n\n\n"), "a = 1\n");
    }
}
