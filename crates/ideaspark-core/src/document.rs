//! Line-based rendering of generated documents.
//!
//! Generated documents follow a markdown-like convention: `# `, `## ` and
//! `### ` open headings of level 1 to 3, every other line is a paragraph.
//! Deeper heading markers are kept as paragraph text.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DocumentBlock {
    Heading { level: u8, text: String },
    Paragraph { text: String },
    Blank,
}

/// Splits `content` into one block per line.
pub fn parse_blocks(content: &str) -> Vec<DocumentBlock> {
    content.lines().map(parse_line).collect()
}

fn parse_line(line: &str) -> DocumentBlock {
    let line = line.trim_end_matches('\r');
    // Longest marker first so "### " is not read as "# ".
    for (marker, level) in [("### ", 3u8), ("## ", 2), ("# ", 1)] {
        if let Some(text) = line.strip_prefix(marker) {
            return DocumentBlock::Heading {
                level,
                text: text.trim().to_string(),
            };
        }
    }
    if line.trim().is_empty() {
        DocumentBlock::Blank
    } else {
        DocumentBlock::Paragraph {
            text: line.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings_and_paragraphs() {
        let blocks = parse_blocks("# Title\n## Scope\n### Detail\n#### Deep\n\nplain text");
        assert_eq!(
            blocks,
            vec![
                DocumentBlock::Heading { level: 1, text: "Title".into() },
                DocumentBlock::Heading { level: 2, text: "Scope".into() },
                DocumentBlock::Heading { level: 3, text: "Detail".into() },
                DocumentBlock::Paragraph { text: "#### Deep".into() },
                DocumentBlock::Blank,
                DocumentBlock::Paragraph { text: "plain text".into() },
            ]
        );
    }

    #[test]
    fn test_marker_without_space_is_paragraph() {
        assert_eq!(
            parse_blocks("#hashtag"),
            vec![DocumentBlock::Paragraph { text: "#hashtag".into() }]
        );
    }
}
