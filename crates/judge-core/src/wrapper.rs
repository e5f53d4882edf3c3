//! Synthesizes an entry point for submitted code that has none.
//!
//! A lightweight syntactic preprocessor, not a parser: it partitions lines
//! into top-level declarations (`use`, `struct`, `fn`, …) and everything
//! else, and wraps the "everything else" into a synthesized `fn main`. It is
//! deliberately permissive — ambiguous input is passed through unchanged and
//! left for the real compiler to reject.

const GLOBAL_PREFIXES: &[&str] = &[
    "use ",
    "extern crate",
    "struct ",
    "enum ",
    "trait ",
    "impl ",
    "mod ",
    "type ",
    "const ",
    "static ",
    "#[",
    "fn ",
];

fn is_global_start(line: &str) -> bool {
    let trimmed = line.trim_start();
    GLOBAL_PREFIXES.iter().any(|p| trimmed.starts_with(p))
}

fn brace_delta(line: &str) -> i64 {
    let opens = line.matches('{').count() as i64;
    let closes = line.matches('}').count() as i64;
    opens - closes
}

/// Wraps `code` in a synthesized `fn main` if it contains statement-level
/// lines outside of any top-level declaration.
pub fn wrap_if_needed(code: &str) -> String {
    let mut global = Vec::new();
    let mut body = Vec::new();

    let mut in_global_block = false;
    let mut depth: i64 = 0;

    for line in code.lines() {
        if in_global_block {
            global.push(line);
            depth += brace_delta(line);
            if depth <= 0 {
                in_global_block = false;
                depth = 0;
            }
            continue;
        }

        if is_global_start(line) {
            global.push(line);
            depth = brace_delta(line);
            if depth > 0 {
                in_global_block = true;
            }
            continue;
        }

        body.push(line);
    }

    while body.first().is_some_and(|l| l.trim().is_empty()) {
        body.remove(0);
    }
    while body.last().is_some_and(|l| l.trim().is_empty()) {
        body.pop();
    }

    let mut out = String::new();
    for line in &global {
        out.push_str(line);
        out.push('\n');
    }
    if !global.is_empty() {
        out.push('\n');
    }

    out.push_str("fn main() {\n");
    for line in &body {
        out.push_str("    ");
        out.push_str(line);
        out.push('\n');
    }
    out.push_str("}\n");

    out
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;

    #[test]
    fn wraps_plain_statements() {
        let out = wrap_if_needed("let x = 1;\nprintln!(\"{}\", x);");
        assert!(out.contains("fn main() {"));
        assert!(out.contains("    let x = 1;"));
        assert!(out.contains("    println!(\"{}\", x);"));
    }

    #[test]
    fn empty_body_yields_empty_main() {
        let out = wrap_if_needed("");
        assert!(out.contains("fn main() {\n}"));
    }

    #[test]
    fn keeps_use_declarations_outside_main() {
        let out = wrap_if_needed("use std::io::Read;\nlet mut s = String::new();");
        assert!(out.starts_with("use std::io::Read;"));
        assert!(out.contains("fn main() {\n    let mut s = String::new();\n}"));
    }

    #[test]
    fn keeps_multiline_struct_outside_main() {
        let code = indoc! {"
            struct Point {
                x: i32,
                y: i32,
            }
            let p = Point { x: 1, y: 2 };"
        };
        let out = wrap_if_needed(code);
        assert!(out.contains("struct Point {\n    x: i32,\n    y: i32,\n}"));
        assert!(out.contains("fn main() {\n    let p = Point { x: 1, y: 2 };\n}"));
    }
}
