use std::sync::LazyLock;

use regex::Regex;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->|<[^\s>][^>]*>").unwrap());

/// Remove markup tags, leaving text and entities as they are.
pub fn strip_tags(html: &str) -> String {
    TAG_RE.replace_all(html, "").into_owned()
}

/// Fold `\r\n` and lone `\r` into `\n`.
pub fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Working buffer the field rules run against.
pub fn plain_text(html: &str) -> String {
    normalize_newlines(&strip_tags(html))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tags_and_comments() {
        let html = "<p>發文日期：<b>2024年1月1日</b></p><!-- x\ny -->主旨";
        assert_eq!(strip_tags(html), "發文日期：2024年1月1日主旨");
    }

    #[test]
    fn keeps_entities() {
        assert_eq!(strip_tags("a&nbsp;<br/>b"), "a&nbsp;b");
    }

    #[test]
    fn bare_angle_brackets_are_text() {
        assert_eq!(strip_tags("金額 < 100 萬元 > 50 萬元"), "金額 < 100 萬元 > 50 萬元");
        assert_eq!(strip_tags("a < b<br>c"), "a < bc");
    }

    #[test]
    fn plain_text_normalizes_line_endings() {
        assert_eq!(plain_text("a<br>\r\nb\rc"), "a\nb\nc");
    }
}
