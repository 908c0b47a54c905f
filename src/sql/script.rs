//! SQL Script Extractor - Fenced-block scanning over model output
//!
//! Statements are returned verbatim, trimmed, in the order they appear.
//! No SQL validation or normalization is performed.

/// Opening delimiter of a fenced SQL block
const FENCE_OPEN: &str = "```sql";

/// Closing delimiter
const FENCE_CLOSE: &str = "```";

/// Extract every fenced SQL block from free-form text. A missing delimiter
/// yields an empty vector, which callers treat as "no SQL present".
pub fn extract_scripts(text: &str) -> Vec<String> {
    let mut scripts = Vec::new();

    let mut parts = text.split(FENCE_OPEN);
    parts.next(); // prose before the first fence

    for part in parts {
        // content runs to the next closing fence, or to the end of the
        // text when the model forgot to close the block
        let content = part.split(FENCE_CLOSE).next().unwrap_or("").trim();
        if !content.is_empty() {
            scripts.push(content.to_string());
        }
    }

    scripts
}

/// Extract only the first fenced statement; later blocks are ignored
pub fn extract_first_script(text: &str) -> Option<String> {
    extract_scripts(text).into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_blocks_in_order() {
        let text = "First:\n```sql\nCREATE TABLE a (id INT);\n```\nthen\n```sql\nINSERT INTO a VALUES (1);\n```\ndone";
        let scripts = extract_scripts(text);
        assert_eq!(scripts.len(), 2);
        assert_eq!(scripts[0], "CREATE TABLE a (id INT);");
        assert_eq!(scripts[1], "INSERT INTO a VALUES (1);");
    }

    #[test]
    fn test_no_fence_yields_empty() {
        assert!(extract_scripts("no sql here, just prose").is_empty());
    }

    #[test]
    fn test_empty_blocks_are_discarded() {
        let text = "```sql\n\n```\n```sql\nSELECT 1;\n```";
        let scripts = extract_scripts(text);
        assert_eq!(scripts, vec!["SELECT 1;"]);
    }

    #[test]
    fn test_roundtrip_preserves_statement_verbatim() {
        let text = "Here you go:\n```sql\nSELECT 1;\n```\n";
        assert_eq!(extract_scripts(text), vec!["SELECT 1;"]);
    }

    #[test]
    fn test_unclosed_fence_takes_remainder() {
        let text = "```sql\nSELECT * FROM t";
        assert_eq!(extract_scripts(text), vec!["SELECT * FROM t"]);
    }

    #[test]
    fn test_first_script_ignores_later_blocks() {
        let text = "```sql\nSELECT 1;\n```\n```sql\nSELECT 2;\n```";
        assert_eq!(extract_first_script(text).unwrap(), "SELECT 1;");
        assert_eq!(extract_first_script("nothing"), None);
    }
}
