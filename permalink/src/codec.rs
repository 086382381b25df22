//! Identifier parsing and permalink rendering.

use std::fmt;

use crate::error::{PermalinkError, Result};

/// Width of the `YYYY-MM-DD-` header, trailing hyphen included.
const HEADER_LEN: usize = 11;

/// Widths of the year, month and day tokens.
const DATE_WIDTHS: [(usize, &str); 3] = [(4, "year"), (2, "month"), (2, "day")];

/// Kind of file an identifier names, inferred from its suffix.
///
/// The two kinds use different suffix widths and must not be unified:
/// posts end in `.md`, the remaining files carry a nine character tail
/// such as `.markdown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostKind {
    /// Identifier ends in `md`; three trailing characters are dropped.
    Markdown,

    /// Any other identifier; nine trailing characters are dropped.
    DataFile,
}

impl PostKind {
    /// Infer the kind from the raw identifier.
    pub fn of(id: &str) -> Self {
        if id.ends_with("md") {
            Self::Markdown
        } else {
            Self::DataFile
        }
    }

    /// Number of trailing characters that are not part of the slug.
    pub fn suffix_len(self) -> usize {
        match self {
            Self::Markdown => 3,
            Self::DataFile => 9,
        }
    }
}

/// A parsed post identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostId {
    pub year: String,
    pub month: String,
    pub day: String,
    pub slug: String,
    pub kind: PostKind,
}

impl PostId {
    /// Parse an identifier of the form `YYYY-MM-DD-<slug>.<ext>`.
    pub fn parse(id: &str) -> Result<Self> {
        let mut tokens = id.split('-');
        let mut date = Vec::with_capacity(DATE_WIDTHS.len());
        for (width, field) in DATE_WIDTHS {
            let token = tokens
                .next()
                .ok_or_else(|| PermalinkError::malformed(id, format!("missing {field}")))?;
            if token.len() != width || !token.bytes().all(|b| b.is_ascii_digit()) {
                return Err(PermalinkError::malformed(
                    id,
                    format!("{field} must be {width} digits, got {token:?}"),
                ));
            }
            date.push(token.to_string());
        }

        let kind = PostKind::of(id);
        let end = id
            .len()
            .checked_sub(kind.suffix_len())
            .filter(|end| *end > HEADER_LEN)
            .ok_or_else(|| PermalinkError::malformed(id, "empty slug"))?;
        let slug = id
            .get(HEADER_LEN..end)
            .ok_or_else(|| PermalinkError::malformed(id, "suffix splits a character"))?;

        let [year, month, day]: [String; 3] = date
            .try_into()
            .map_err(|_| PermalinkError::malformed(id, "incomplete date header"))?;

        Ok(Self {
            year,
            month,
            day,
            slug: slug.to_string(),
            kind,
        })
    }

    /// Render the public permalink, `/{year}/{month}/{day}/{slug}.html`.
    pub fn locator(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "/{}/{}/{}/{}.html",
            self.year, self.month, self.day, self.slug
        )
    }
}

/// Maps document identifiers to externally addressable locators.
pub trait LocatorCodec: Send + Sync {
    /// Translate `id` into its locator.
    fn to_locator(&self, id: &str) -> Result<String>;
}

/// The blog's file-name-to-permalink convention.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostPermalink;

impl LocatorCodec for PostPermalink {
    fn to_locator(&self, id: &str) -> Result<String> {
        to_locator(id)
    }
}

/// Translate a post identifier into its permalink.
pub fn to_locator(id: &str) -> Result<String> {
    Ok(PostId::parse(id)?.locator())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_markdown_post() {
        assert_eq!(
            to_locator("2021-07-04-my-post.md").unwrap(),
            "/2021/07/04/my-post.html"
        );
    }

    #[test]
    fn test_nine_char_suffix() {
        assert_eq!(
            to_locator("2021-07-04-my-post.markdown").unwrap(),
            "/2021/07/04/my-post.html"
        );
        assert_eq!(
            to_locator("2021-07-04-my-post.md.jsonl").unwrap(),
            "/2021/07/04/my-post.html"
        );
    }

    #[test]
    fn test_both_kinds_agree() {
        let post = PostId::parse("2019-12-31-embeddings-for-fun.md").unwrap();
        let data = PostId::parse("2019-12-31-embeddings-for-fun.markdown").unwrap();

        assert_eq!(post.kind, PostKind::Markdown);
        assert_eq!(data.kind, PostKind::DataFile);
        assert_eq!(post.locator(), data.locator());
    }

    #[test]
    fn test_non_md_suffix_always_strips_nine() {
        // `.md.json` is eight characters, so one slug character goes with it.
        let id = PostId::parse("2021-07-04-my-post.md.json").unwrap();
        assert_eq!(id.kind, PostKind::DataFile);
        assert_eq!(id.slug, "my-pos");
    }

    #[test]
    fn test_parsed_fields() {
        let id = PostId::parse("2008-01-09-hello-world-again.md").unwrap();
        assert_eq!(id.year, "2008");
        assert_eq!(id.month, "01");
        assert_eq!(id.day, "09");
        assert_eq!(id.slug, "hello-world-again");
    }

    #[test]
    fn test_codec_trait() {
        let codec = PostPermalink;
        assert_eq!(
            codec.to_locator("2020-02-29-leap.md").unwrap(),
            "/2020/02/29/leap.html"
        );
    }

    #[test]
    fn test_malformed_date() {
        for id in [
            "my-post.md",
            "2021-7-04-my-post.md",
            "2021-07-4x-my-post.md",
            "20a1-07-04-my-post.md",
            "2021",
            "",
        ] {
            assert!(
                matches!(
                    to_locator(id),
                    Err(PermalinkError::MalformedIdentifier { .. })
                ),
                "expected {id:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_empty_slug() {
        assert!(to_locator("2021-07-04-.md").is_err());
        assert!(to_locator("2021-07-04").is_err());
        assert!(to_locator("2021-07-04-x.json").is_err());
    }
}
