//! Frontmatter detection and synthesis.

use serde::{Deserialize, Serialize};

/// Frontmatter fields docmirror writes when synthesizing a block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frontmatter {
    /// Page title
    pub title: String,

    /// Page description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Position in the generated sidebar (lower = first)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sidebar_position: Option<i32>,
}

impl Frontmatter {
    /// Frontmatter carrying only a title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            sidebar_position: None,
        }
    }

    /// Render as a delimited block, trailing newline included.
    pub fn to_block(&self) -> String {
        // Serialization of this struct cannot fail; the fallback keeps the
        // signature infallible.
        let yaml = serde_yaml::to_string(self).unwrap_or_default();
        format!("---\n{yaml}---\n")
    }
}

/// Whether content already opens with a delimited frontmatter block.
///
/// An opening `---` without a closing delimiter is treated as ordinary
/// content, not frontmatter.
pub fn has_frontmatter(source: &str) -> bool {
    let trimmed = source.trim_start();
    if !trimmed.starts_with("---") {
        return false;
    }
    trimmed[3..].contains("\n---")
}

/// Derive a title from a file stem: separators become spaces.
pub fn title_from_stem(stem: &str) -> String {
    stem.replace(['-', '_'], " ")
}

/// Ensure `source` opens with frontmatter, synthesizing a titled block
/// from `stem` when it does not.
pub fn ensure_frontmatter(source: &str, stem: &str) -> String {
    if has_frontmatter(source) {
        return source.to_string();
    }
    let block = Frontmatter::titled(title_from_stem(stem)).to_block();
    format!("{block}\n{source}")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn detects_existing_frontmatter() {
        let source = "---\ntitle: Button\n---\n\n# Button\n";

        assert!(has_frontmatter(source));
    }

    #[test]
    fn treats_unclosed_delimiter_as_missing() {
        assert!(!has_frontmatter("---\ntitle: Test\n# No closing"));
        assert!(!has_frontmatter("# Just Markdown\n"));
    }

    #[test]
    fn synthesizes_title_from_stem() {
        assert_eq!(title_from_stem("intro"), "intro");
        assert_eq!(title_from_stem("getting-started"), "getting started");
        assert_eq!(title_from_stem("release_notes"), "release notes");
    }

    #[test]
    fn injects_block_when_missing() {
        let injected = ensure_frontmatter("# Hello", "intro");

        assert_eq!(injected, "---\ntitle: intro\n---\n\n# Hello");
    }

    #[test]
    fn leaves_existing_block_untouched() {
        let source = "---\ntitle: Custom\ndescription: Kept\n---\n\n# Body\n";

        assert_eq!(ensure_frontmatter(source, "body"), source);
    }

    #[test]
    fn renders_optional_fields_only_when_set() {
        let mut fm = Frontmatter::titled("guide");
        assert_eq!(fm.to_block(), "---\ntitle: guide\n---\n");

        fm.sidebar_position = Some(2);
        assert_eq!(fm.to_block(), "---\ntitle: guide\nsidebar_position: 2\n---\n");
    }
}
