//! Removal of commented-out regions before key extraction.
//!
//! Four conventions are stripped, one after another:
//!
//! 1. block comments: `/* ... */` (may span lines)
//! 2. line comments: `// ...` up to the end of the line
//! 3. template comments: `{{-- ... --}}` (may span lines)
//! 4. markup comments: `<!-- ... -->` (may span lines)
//!
//! Stripping is purely textual. A `//` or `*/` inside a string literal is treated
//! like any other occurrence, so text such as `"http://example.com"` truncates the
//! rest of its line. This is an accepted limit of lexical matching.

use std::sync::LazyLock;

use regex::Regex;

static BLOCK_COMMENT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").unwrap());

static LINE_COMMENT_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"//[^\n]*").unwrap());

static TEMPLATE_COMMENT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{\{--.*?--\}\}").unwrap());

static MARKUP_COMMENT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());

/// Remove every commented-out region from `text`.
pub fn strip_comments(text: &str) -> String {
    [
        &*BLOCK_COMMENT_REGEX,
        &*LINE_COMMENT_REGEX,
        &*TEMPLATE_COMMENT_REGEX,
        &*MARKUP_COMMENT_REGEX,
    ]
    .iter()
    .fold(text.to_string(), |content, regex| {
        regex.replace_all(&content, "").into_owned()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_block_comment() {
        assert_eq!(strip_comments("a /* b */ c"), "a  c");
    }

    #[test]
    fn test_strip_multiline_block_comment() {
        let text = "keep\n/*\n__('gone')\n*/\nalso";
        assert_eq!(strip_comments(text), "keep\n\nalso");
    }

    #[test]
    fn test_strip_line_comment_keeps_newline() {
        let text = "one // two\nthree";
        assert_eq!(strip_comments(text), "one \nthree");
    }

    #[test]
    fn test_strip_template_comment() {
        let text = "{{-- {{ __('hidden') }} --}}<p>{{ __('shown') }}</p>";
        assert_eq!(strip_comments(text), "<p>{{ __('shown') }}</p>");
    }

    #[test]
    fn test_strip_markup_comment() {
        let text = "<!--\n@lang('hidden')\n-->@lang('shown')";
        assert_eq!(strip_comments(text), "@lang('shown')");
    }

    #[test]
    fn test_block_comments_are_non_greedy() {
        assert_eq!(strip_comments("/* a */ keep /* b */"), " keep ");
    }

    #[test]
    fn test_unterminated_block_comment_is_left_alone() {
        assert_eq!(strip_comments("x /* y"), "x /* y");
    }

    #[test]
    fn test_line_comment_inside_string_truncates_line() {
        // Textual stripping does not know about string literals.
        let text = "$url = 'http://example.com'; __('lost.key');\n__('kept.key');";
        assert_eq!(strip_comments(text), "$url = 'http:\n__('kept.key');");
    }
}
