//! Display rows for the resource list.

use std::fmt::Display;

use crate::model::{Resource, ResourceId};

/// Characters per line when the comment preview is wrapped.
pub const COMMENT_LINE_WIDTH: usize = 80;

/// Lines the comment preview is clamped to.
pub const COMMENT_MAX_LINES: usize = 2;

/// One rendered entry of the list: title, author, type, star rating and an optional
/// two-line comment preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRow {
    pub id: ResourceId,
    pub title: String,
    pub author: String,
    pub kind: String,
    pub rating_label: String,
    pub comment_preview: Option<String>,
}

impl From<&Resource> for ResourceRow {
    fn from(resource: &Resource) -> Self {
        let comment_preview = resource
            .has_comment()
            .then(|| clamp_lines(resource.comment.trim(), COMMENT_LINE_WIDTH, COMMENT_MAX_LINES));
        Self {
            id: resource.id,
            title: resource.title.clone(),
            author: resource.author.clone(),
            kind: resource.kind.clone(),
            rating_label: format!("★ {}", resource.rating),
            comment_preview,
        }
    }
}

impl Display for ResourceRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {}\n    {} • {} • {}",
            self.id, self.title, self.author, self.kind, self.rating_label
        )?;
        if let Some(preview) = &self.comment_preview {
            for line in preview.lines() {
                write!(f, "\n    {line}")?;
            }
        }
        Ok(())
    }
}

/// Word-wraps `text` at `width` characters and keeps at most `max_lines` lines, ending
/// with `…` when anything was cut.
///
/// All whitespace, line breaks included, collapses to single spaces before wrapping, so
/// a comment's own newlines do not start new lines. Words longer than `width` are split.
fn clamp_lines(text: &str, width: usize, max_lines: usize) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut truncated = false;

    'words: for word in text.split_whitespace() {
        let mut word = word;
        loop {
            let used = current.chars().count();
            let needed = word.chars().count() + usize::from(used > 0);
            if used + needed <= width {
                if used > 0 {
                    current.push(' ');
                }
                current.push_str(word);
                break;
            }
            if used > 0 {
                lines.push(std::mem::take(&mut current));
            } else {
                // A single word longer than a line is split.
                let split = word
                    .char_indices()
                    .nth(width)
                    .map(|(i, _)| i)
                    .unwrap_or(word.len());
                lines.push(word[..split].to_string());
                word = &word[split..];
            }
            if lines.len() == max_lines {
                truncated = true;
                break 'words;
            }
            if word.is_empty() {
                break;
            }
        }
    }

    if !truncated && !current.is_empty() {
        lines.push(current);
    }
    if truncated {
        if let Some(last) = lines.last_mut() {
            while last.chars().count() + 1 > width {
                last.pop();
            }
            last.push('…');
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resource(comment: &str) -> Resource {
        Resource {
            id: ResourceId(3),
            title: "The Pragmatic Programmer".into(),
            author: "Hunt & Thomas".into(),
            kind: "Book".into(),
            rating: 4,
            comment: comment.into(),
            date: "2024-01-10".into(),
        }
    }

    #[test]
    fn test_row_fields() {
        let row = ResourceRow::from(&resource(""));
        assert_eq!(row.rating_label, "★ 4");
        assert_eq!(row.comment_preview, None);
        assert_eq!(
            row.to_string(),
            "[3] The Pragmatic Programmer\n    Hunt & Thomas • Book • ★ 4"
        );
    }

    #[test]
    fn test_short_comment_is_kept_whole() {
        let row = ResourceRow::from(&resource("  Worth a re-read. "));
        assert_eq!(row.comment_preview.as_deref(), Some("Worth a re-read."));
    }

    #[test]
    fn test_long_comment_clamped_to_two_lines() {
        assert_eq!(clamp_lines("aaa bbb ccc ddd", 7, 2), "aaa bbb\nccc ddd");
        assert_eq!(clamp_lines("aaa bbb ccc ddd eee", 7, 2), "aaa bbb\nccc dd…");
    }

    #[test]
    fn test_newlines_collapse_before_wrapping() {
        assert_eq!(clamp_lines("one\n\ntwo\nthree", 80, 2), "one two three");
    }

    #[test]
    fn test_overlong_word_is_split() {
        assert_eq!(clamp_lines("abcdefghij", 4, 2), "abcd\nefg…");
        assert_eq!(clamp_lines("abcdefgh", 4, 2), "abcd\nefgh");
    }
}
