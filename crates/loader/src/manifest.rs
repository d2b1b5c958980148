//! The category manifest (`categories.xml`).
//!
//! The manifest is the source of truth for the fixed category set and its
//! display order:
//!
//! ```xml
//! <categories>
//!   <category><name>Electronics</name></category>
//!   <category><name>Home &amp; Kitchen</name></category>
//! </categories>
//! ```
//!
//! The format is fixed and tiny, so extraction is a pair of anchored
//! regexes rather than a full XML dependency (nothing else in the system
//! reads XML).

use std::path::Path;
use std::sync::OnceLock;

use anyhow::Context;
use regex::Regex;

use lumina_catalog::CategoryName;

fn category_block_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<category>(.*?)</category>").unwrap())
}

fn name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<name>(.*?)</name>").unwrap())
}

/// Read the manifest file and return its categories in document order.
pub fn read_manifest(path: &Path) -> anyhow::Result<Vec<CategoryName>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read category manifest at {path:?}"))?;
    Ok(parse_manifest(&raw))
}

/// Parse manifest text. Entries without a `<name>` are skipped.
pub fn parse_manifest(raw: &str) -> Vec<CategoryName> {
    category_block_re()
        .captures_iter(raw)
        .filter_map(|block| {
            let body = block.get(1)?.as_str();
            let name = name_re().captures(body)?.get(1)?.as_str();
            let name = unescape(name.trim());
            (!name.is_empty()).then(|| CategoryName::new(name))
        })
        .collect()
}

/// Undo the handful of entity escapes the manifest actually uses.
fn unescape(text: &str) -> String {
    text.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_categories_in_document_order() {
        let xml = r#"<?xml version="1.0"?>
            <categories>
              <category><name>Electronics</name></category>
              <category>
                <name>Home &amp; Kitchen</name>
              </category>
              <category><name>Pet Supplies</name></category>
            </categories>"#;

        let names: Vec<String> = parse_manifest(xml)
            .into_iter()
            .map(|c| c.as_str().to_string())
            .collect();
        assert_eq!(names, vec!["Electronics", "Home & Kitchen", "Pet Supplies"]);
    }

    #[test]
    fn skips_entries_without_a_name() {
        let xml = "<categories><category></category><category><name>Clothing</name></category></categories>";
        let names = parse_manifest(xml);
        assert_eq!(names.len(), 1);
        assert_eq!(names[0].as_str(), "Clothing");
    }

    #[test]
    fn empty_or_unrelated_text_yields_no_categories() {
        assert!(parse_manifest("").is_empty());
        assert!(parse_manifest("not xml at all").is_empty());
    }
}
