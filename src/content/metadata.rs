use anyhow::{anyhow, Result};

use crate::content::document::{Document, NodeKind};
use crate::content::PostMetadata;
use crate::text_utils::parse_date;

/// Example of post
/// Date: 2024-05-01
/// Tags: rust, web
///
/// # What I learned building this site
///
/// Everything before the first heading is read as `key: value` lines, the
/// heading itself is the title.
pub fn extract_metadata(document: &Document) -> Result<PostMetadata> {
    let mut metadata = PostMetadata::default();

    for node in document.nodes() {
        if node.kind == NodeKind::Heading {
            metadata.title = node.text_children().next().map(|s| s.to_string());
            break;
        }

        for text in node.text_children() {
            for line in text.lines() {
                read_metadata_line(&mut metadata, line)?;
            }
        }
    }

    Ok(metadata)
}

/// Same as [`extract_metadata`], then drops the preamble so the heading is
/// the first block left to render.
pub fn extract_metadata_and_strip(document: &mut Document) -> Result<PostMetadata> {
    let metadata = extract_metadata(document)?;
    document.strip_preamble();
    Ok(metadata)
}

fn read_metadata_line(metadata: &mut PostMetadata, line: &str) -> Result<()> {
    let Some((key, value)) = line.split_once(':') else {
        return Ok(());
    };

    match key.trim().to_lowercase().as_str() {
        "date" => {
            let date = parse_date(value).map_err(|e| anyhow!("Invalid post date: {}", e))?;
            metadata.date = Some(date);
        }
        "tags" => metadata.tags = Some(extract_tags(value)),
        _ => {}
    }

    Ok(())
}

fn extract_tags(tags_str: &str) -> Vec<String> {
    tags_str.split(',')
        .map(|tag| tag.trim().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::content::document::Node;

    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_full_post() {
        let doc = Document::parse("Date: 2024-05-01\nTags: test, demo\n# My Title\nBody text.\n").unwrap();
        let metadata = extract_metadata(&doc).unwrap();
        assert_eq!(metadata, PostMetadata {
            title: Some("My Title".to_string()),
            date: Some(ymd(2024, 5, 1)),
            tags: Some(vec!["test".to_string(), "demo".to_string()]),
        });
    }

    #[test]
    fn test_extract_tags() {
        let tags = extract_tags(" ruby, web,blog ");
        assert_eq!(tags, ["ruby", "web", "blog"]);
    }

    #[test]
    fn test_keys_are_case_insensitive() {
        let doc = Document::from_nodes(vec![
            Node::paragraph(vec![Node::text("  DATE : 2024-03-01")]),
            Node::paragraph(vec![Node::text("tAgS: ruby, web, blog")]),
            Node::heading(vec![Node::text("Title")]),
        ]);
        let metadata = extract_metadata(&doc).unwrap();
        assert_eq!(metadata.date, Some(ymd(2024, 3, 1)));
        assert_eq!(metadata.tags, Some(vec!["ruby".to_string(), "web".to_string(), "blog".to_string()]));
    }

    #[test]
    fn test_value_keeps_text_after_first_colon() {
        let doc = Document::from_nodes(vec![
            Node::paragraph(vec![Node::text("Tags: c++, a:b")]),
        ]);
        let metadata = extract_metadata(&doc).unwrap();
        assert_eq!(metadata.tags, Some(vec!["c++".to_string(), "a:b".to_string()]));
    }

    #[test]
    fn test_unknown_keys_and_plain_lines_are_ignored() {
        let doc = Document::from_nodes(vec![
            Node::paragraph(vec![Node::text("Author: somebody\nno colon here\nDate: 2024-03-01")]),
            Node::heading(vec![Node::text("Title")]),
        ]);
        let metadata = extract_metadata(&doc).unwrap();
        assert_eq!(metadata, PostMetadata {
            title: Some("Title".to_string()),
            date: Some(ymd(2024, 3, 1)),
            tags: None,
        });
    }

    #[test]
    fn test_only_text_children_are_read() {
        let doc = Document::from_nodes(vec![
            Node::paragraph(vec![Node::other(vec![Node::text("Date: 2024-03-01")])]),
            Node::heading(vec![Node::text("Title")]),
        ]);
        let metadata = extract_metadata(&doc).unwrap();
        assert_eq!(metadata.date, None);
    }

    #[test]
    fn test_scan_stops_at_first_heading() {
        let doc = Document::from_nodes(vec![
            Node::heading(vec![Node::other(vec![]), Node::text("First"), Node::text("Second")]),
            Node::paragraph(vec![Node::text("Date: 2024-03-01")]),
            Node::heading(vec![Node::text("Other")]),
        ]);
        let metadata = extract_metadata(&doc).unwrap();
        assert_eq!(metadata, PostMetadata {
            title: Some("First".to_string()),
            date: None,
            tags: None,
        });
    }

    #[test]
    fn test_no_heading_scans_everything() {
        let doc = Document::parse("Date: 2024-03-01\n\nSome paragraph\n\nTags: a, b\n").unwrap();
        let metadata = extract_metadata(&doc).unwrap();
        assert_eq!(metadata.title, None);
        assert_eq!(metadata.date, Some(ymd(2024, 3, 1)));
        assert_eq!(metadata.tags, Some(vec!["a".to_string(), "b".to_string()]));
    }

    #[test]
    fn test_invalid_date() {
        let doc = Document::parse("Date: yesterday-ish\n# Title\n").unwrap();
        let err = extract_metadata(&doc).unwrap_err();
        assert_eq!(err.to_string(), "Invalid post date: Unable to parse date [yesterday-ish]");
    }

    #[test]
    fn test_extract_does_not_touch_document() {
        let doc = Document::parse("Date: 2024-03-01\n# Title\n").unwrap();
        extract_metadata(&doc).unwrap();
        assert_eq!(doc.nodes().len(), 2);
    }

    #[test]
    fn test_strip_then_extract_again() {
        let mut doc = Document::parse("Date: 2024-05-01\nTags: test, demo\n# My Title\nBody text.\n").unwrap();
        let first = extract_metadata_and_strip(&mut doc).unwrap();
        assert_eq!(doc.nodes()[0].kind, NodeKind::Heading);

        let second = extract_metadata_and_strip(&mut doc).unwrap();
        assert_eq!(second.title, first.title);
        assert_eq!(second.date, None);
        assert_eq!(doc.nodes().len(), 2);

        let html = doc.to_html().unwrap();
        assert!(html.starts_with("<h1>My Title</h1>"));
        assert!(html.contains("<p>Body text.</p>"));
        assert!(!html.contains("Date"));
    }
}
