use std::path::Path;

use anyhow::Result;
use tracing::warn;

use crate::parser::fields::FIELD_KEYS;
use crate::store;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct FieldStats {
    pub documents: usize,
    pub unreadable: usize,
    /// Populated count per entry of [`FIELD_KEYS`].
    pub populated: [usize; FIELD_KEYS.len()],
}

pub fn collect(dir: &Path) -> Result<FieldStats> {
    let mut stats = FieldStats::default();
    for path in store::list(dir)? {
        match store::load(&path) {
            Ok(case) => {
                stats.documents += 1;
                for (count, value) in stats
                    .populated
                    .iter_mut()
                    .zip(case.extracted_fields.values())
                {
                    if value.is_some() {
                        *count += 1;
                    }
                }
            }
            Err(e) => {
                warn!("{:#}", e);
                stats.unreadable += 1;
            }
        }
    }
    Ok(stats)
}

pub fn print(stats: &FieldStats) {
    println!("Documents:  {}", stats.documents);
    if stats.unreadable > 0 {
        println!("Unreadable: {}", stats.unreadable);
    }
    if stats.documents == 0 {
        return;
    }
    println!();
    for (key, count) in FIELD_KEYS.iter().zip(stats.populated) {
        println!(
            "  {:<10} {:>5} ({:.1}%)",
            key,
            count,
            percent(count, stats.documents)
        );
    }
}

fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 * 100.0 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::parse_feed;
    use crate::pipeline::save_entries;

    #[test]
    fn counts_populated_fields() {
        let dir = tempfile::tempdir().unwrap();
        let xml = std::fs::read_to_string("tests/fixtures/feed.xml").unwrap();
        save_entries(&parse_feed(xml.as_bytes()).unwrap(), dir.path());
        std::fs::write(dir.path().join("broken.json"), "{").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let stats = collect(dir.path()).unwrap();
        assert_eq!(stats.documents, 2);
        assert_eq!(stats.unreadable, 1);
        // 受處分人 and 罰鍰金額 in both, 營利事業統一編號 only in one.
        assert_eq!(stats.populated[2], 2);
        assert_eq!(stats.populated[3], 1);
        assert_eq!(stats.populated[6], 0);
        assert_eq!(stats.populated[8], 2);
    }

    #[test]
    fn percent_of_empty_is_zero() {
        assert_eq!(percent(0, 0), 0.0);
        assert_eq!(percent(1, 4), 25.0);
    }
}
