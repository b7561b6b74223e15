use std::fmt::Write;

use crate::core::tree::{Entries, Tree, Unit};

const GENERATOR: &str = "locsync";

/// Render a unit as a PHP document returning a (possibly nested) array literal.
pub fn render_unit(unit: &Unit, locale: &str, comments: bool, indent: usize) -> String {
    let mut out = String::from("<?php\n\n");

    if comments {
        out.push_str("/**\n");
        let _ = writeln!(out, " * Translation file: {}", unit.name());
        let _ = writeln!(out, " * Locale: {}", locale);
        let _ = writeln!(out, " * Generated by {}", GENERATOR);
        out.push_str(" */\n\n");
    }

    out.push_str("return [\n");
    render_entries(&unit.entries, 1, indent, &mut out);
    out.push_str("];\n");
    out
}

fn render_entries(entries: &Entries, level: usize, indent: usize, out: &mut String) {
    let pad = " ".repeat(indent * level);

    for (key, tree) in entries {
        match tree {
            Tree::Leaf(value) => {
                let _ = writeln!(out, "{}'{}' => '{}',", pad, escape(key), escape(value));
            }
            Tree::Node(children) => {
                let _ = writeln!(out, "{}'{}' => [", pad, escape(key));
                render_entries(children, level + 1, indent, out);
                let _ = writeln!(out, "{}],", pad);
            }
        }
    }
}

/// Escape text for a single-quoted PHP string.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if c == '\\' || c == '\'' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
