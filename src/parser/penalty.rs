use std::sync::LazyLock;

use regex::Regex;

const UNIT: &str = "萬元";

/// Phrasings of a fine stated in units of NT$10,000, tried in order.
static PENALTY_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"處[以予]\s*新臺幣\s*([0-9,]+)\s*萬元",
        r"罰鍰新臺幣[（(]?下同[）)]?\s*([0-9,]+)\s*萬元",
        r"罰鍰新臺幣\s*([0-9,]+)\s*萬元",
        r"罰鍰\s*([0-9,]+)\s*萬元",
        r"核處新臺幣[（(]?下同[）)]?\s*([0-9,]+)\s*萬元",
        r"核處罰鍰新臺幣[（(]?下同[）)]?\s*([0-9,]+)\s*萬元",
        r"新臺幣\s*([0-9,]+)\s*萬元\s*罰鍰",
        r"核處\s*([0-9,]+)\s*萬元\s*罰鍰",
        r"核處\s*新臺幣[（(]?以下同[）)]?\s*([0-9,]+)\s*萬元\s*罰鍰",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// First fine amount stated in the text, e.g. `"1200萬元"`.
pub fn find_amount(text: &str) -> Option<String> {
    PENALTY_RES.iter().find_map(|re| {
        let digits = re.captures(text)?.get(1)?.as_str().replace(',', "");
        Some(format!("{digits}{UNIT}"))
    })
}
