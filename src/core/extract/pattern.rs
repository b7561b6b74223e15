//! Invocation patterns: which call syntaxes carry a translation key.

use anyhow::{Context, Result};
use regex::{Captures, Regex};

/// A single- or double-quoted literal. Group 1 holds a single-quoted body,
/// group 2 a double-quoted one. Escaped characters are allowed inside.
const LITERAL: &str = r#"(?:'((?:[^'\\]|\\(?s:.))*)'|"((?:[^"\\]|\\(?s:.))*)")"#;

/// The invocation name must not continue an identifier or a `Class::` path.
const NAME_BOUNDARY: &str = r"(?:^|[^\w$@:])";

/// Syntactic family of an invocation name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternFamily {
    /// `__('key')`, `trans('key')`
    FunctionCall,
    /// `@lang('key')`
    Directive,
    /// `Lang::get('key')`
    StaticMethod,
    /// `$t('key')` and `{{ $t('key') }}`
    TemplateVariable,
}

impl PatternFamily {
    /// Classify a configured name by its shape.
    pub fn classify(name: &str) -> Self {
        if name.starts_with('@') {
            PatternFamily::Directive
        } else if name.contains("::") {
            PatternFamily::StaticMethod
        } else if name.starts_with('$') {
            PatternFamily::TemplateVariable
        } else {
            PatternFamily::FunctionCall
        }
    }
}

/// A named invocation together with the regexes that match it.
#[derive(Debug, Clone)]
pub struct InvocationPattern {
    pub name: String,
    pub family: PatternFamily,
    regexes: Vec<Regex>,
}

impl InvocationPattern {
    pub fn new(name: &str) -> Result<Self> {
        let family = PatternFamily::classify(name);
        let escaped = regex::escape(name);

        let sources = match family {
            PatternFamily::FunctionCall
            | PatternFamily::Directive
            | PatternFamily::StaticMethod => {
                vec![format!(r"{NAME_BOUNDARY}{escaped}\s*\(\s*{LITERAL}")]
            }
            // Script calls must close right after the literal; the interpolated
            // form may carry extra arguments.
            PatternFamily::TemplateVariable => vec![
                format!(r"{NAME_BOUNDARY}{escaped}\s*\(\s*{LITERAL}\s*\)"),
                format!(r"\{{\{{\s*{escaped}\s*\(\s*{LITERAL}\s*(?:,.*?)?\s*\)\s*\}}\}}"),
            ],
        };

        let regexes = sources
            .iter()
            .map(|source| {
                Regex::new(source)
                    .with_context(|| format!("Failed to build pattern for \"{}\"", name))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            name: name.to_string(),
            family,
            regexes,
        })
    }

    /// Raw literal bodies of every invocation found in `text`, escapes intact.
    pub fn raw_matches<'t>(&'t self, text: &'t str) -> impl Iterator<Item = &'t str> + 't {
        self.regexes
            .iter()
            .flat_map(move |regex| regex.captures_iter(text))
            .filter_map(|caps| literal_body(&caps))
    }
}

fn literal_body<'t>(caps: &Captures<'t>) -> Option<&'t str> {
    caps.get(1).or_else(|| caps.get(2)).map(|m| m.as_str())
}
