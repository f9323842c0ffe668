use std::fmt::Display;
use std::str::FromStr;

use chrono::NaiveDate;
use pulldown_cmark::html;
use pulldown_cmark::Options;
use pulldown_cmark::Parser;
use serde::Deserialize;
use unicode_segmentation::UnicodeSegmentation;

use super::generate_slug;

const DEFAULT_AUTHOR: &str = "TestInternals Team";
const EXCERPT_GRAPHEMES: usize = 150;
const WORDS_PER_MINUTE: usize = 200;

/// The fixed set of blog categories. Serialized as the display name, since
/// that is what both the front matter and the `/blog?category=` filter use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum Category {
    #[serde(rename = "AI & Automation")]
    AiAutomation,
    Automation,
    Performance,
}

impl Category {
    pub const ALL: [Category; 3] = [
        Category::AiAutomation,
        Category::Automation,
        Category::Performance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::AiAutomation => "AI & Automation",
            Category::Automation => "Automation",
            Category::Performance => "Performance",
        }
    }
}

impl Display for Category {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s.trim())
            .ok_or(format!("Unknown category: {s:?}"))
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ContentError {
    #[error("{0}: post must start with a `+++` front matter block")]
    MissingFrontMatter(String),
    #[error("{slug}: invalid front matter")]
    FrontMatter {
        slug: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("{0}: title must not be empty")]
    EmptyTitle(String),
    #[error("{0:?} is not a valid slug")]
    InvalidSlug(String),
    #[error("Duplicate slug: {0:?}")]
    DuplicateSlug(String),
}

/// Raw front matter, as written in `content/posts/*.md`. Only `title`, `date`
/// and `category` are mandatory.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct FrontMatter {
    title: String,
    excerpt: Option<String>,
    date: NaiveDate,
    author: Option<String>,
    category: Category,
    #[serde(default)]
    tags: Vec<String>,
    read_time: Option<String>,
    featured_image: Option<String>,
}

/// A blog post. Constructed via `Post::parse`, which is the only place where
/// the front matter is validated.
#[derive(Debug, Clone)]
pub struct Post {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub author: String,
    /// Markdown body, without the front matter
    pub content: String,
    pub category: Category,
    pub tags: Vec<String>,
    pub date: NaiveDate,
    pub read_time: String,
    pub featured_image: Option<String>,
}

impl Post {
    pub fn parse(
        slug: &str,
        raw: &str,
    ) -> Result<Self, ContentError> {
        if slug.is_empty() || generate_slug(slug) != slug {
            return Err(ContentError::InvalidSlug(slug.to_string()));
        }

        let (front, body) = split_front_matter(raw)
            .ok_or_else(|| ContentError::MissingFrontMatter(slug.to_string()))?;
        let front: FrontMatter =
            toml::from_str(front).map_err(|source| ContentError::FrontMatter {
                slug: slug.to_string(),
                source,
            })?;

        let title = front.title.trim().to_string();
        if title.is_empty() {
            return Err(ContentError::EmptyTitle(slug.to_string()));
        }

        let mut tags: Vec<String> = vec![];
        for tag in front.tags.iter().map(|t| t.trim()) {
            if !tag.is_empty() && !tags.iter().any(|t| t == tag) {
                tags.push(tag.to_string());
            }
        }

        let excerpt = match front.excerpt.filter(|e| !e.trim().is_empty()) {
            Some(e) => e,
            None => fallback_excerpt(body),
        };

        Ok(Self {
            slug: slug.to_string(),
            title,
            excerpt,
            author: front.author.unwrap_or(DEFAULT_AUTHOR.to_string()),
            content: body.to_string(),
            category: front.category,
            tags,
            date: front.date,
            read_time: front.read_time.unwrap_or_else(|| reading_time(body)),
            featured_image: front.featured_image.filter(|i| !i.trim().is_empty()),
        })
    }

    /// e.g. `December 05, 2024`
    pub fn display_date(&self) -> String { self.date.format("%B %d, %Y").to_string() }

    /// e.g. `2024-12-05`
    pub fn iso_date(&self) -> String { self.date.format("%Y-%m-%d").to_string() }

    pub fn render_html(&self) -> String {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        let parser = Parser::new_ext(&self.content, options);
        let mut out = String::new();
        html::push_html(&mut out, parser);
        out
    }

    pub fn has_tag(
        &self,
        tag: &str,
    ) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// `needle` must already be lowercased.
    pub fn matches_search(
        &self,
        needle: &str,
    ) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.excerpt.to_lowercase().contains(needle)
            || self.tags.iter().any(|t| t.to_lowercase().contains(needle))
    }
}

/// Split `+++\n<toml>\n+++\n<markdown>` into its two halves.
fn split_front_matter(raw: &str) -> Option<(&str, &str)> {
    let rest = raw.trim_start().strip_prefix("+++")?;
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))?;
    let end = rest.find("\n+++")?;
    let body = &rest[end + "\n+++".len()..];
    let body = body
        .strip_prefix("\r\n")
        .or_else(|| body.strip_prefix('\n'))
        .unwrap_or(body);
    Some((&rest[..end], body))
}

fn fallback_excerpt(body: &str) -> String {
    let head: String = body.trim().graphemes(true).take(EXCERPT_GRAPHEMES).collect();
    format!("{head}...")
}

/// Estimate reading time at 200 words per minute, rounded up, e.g. `3 min
/// read`.
pub fn reading_time(content: &str) -> String {
    let words = content.split_whitespace().count();
    let minutes = words.div_ceil(WORDS_PER_MINUTE).max(1);
    format!("{minutes} min read")
}
