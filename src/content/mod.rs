mod draft;
mod filter;
mod post;
mod slug;

use std::collections::HashSet;

pub use draft::PostDraft;
pub use draft::PostForm;
pub use filter::PostFilter;
pub use post::reading_time;
pub use post::Category;
pub use post::ContentError;
pub use post::Post;
pub use slug::generate_slug;

/// Posts shipped with the binary, keyed by slug. Adding a post means adding a
/// file to `content/posts` and a line here.
const EMBEDDED_POSTS: &[(&str, &str)] = &[
    (
        "ai-in-software-testing",
        include_str!("../../content/posts/ai-in-software-testing.md"),
    ),
    (
        "test-automation-frameworks",
        include_str!("../../content/posts/test-automation-frameworks.md"),
    ),
    (
        "performance-testing-cloud",
        include_str!("../../content/posts/performance-testing-cloud.md"),
    ),
];

/// The blog's content set. Fixed at startup; every accessor is a read-only
/// view over it, so lookups can only ever come back empty, never fail.
#[derive(Debug)]
pub struct ContentStore {
    /// Newest first
    posts: Vec<Post>,
}

impl ContentStore {
    pub fn load_embedded() -> Result<Self, ContentError> {
        Self::from_sources(EMBEDDED_POSTS.iter().copied())
    }

    /// Parse `(slug, raw markdown)` pairs. Slugs must be unique.
    pub fn from_sources<'a>(
        sources: impl IntoIterator<Item = (&'a str, &'a str)>
    ) -> Result<Self, ContentError> {
        let mut seen = HashSet::new();
        let mut posts = vec![];
        for (slug, raw) in sources {
            if !seen.insert(slug) {
                return Err(ContentError::DuplicateSlug(slug.to_string()));
            }
            posts.push(Post::parse(slug, raw)?);
        }
        // stable, so posts sharing a date keep their declaration order
        posts.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(Self { posts })
    }

    /// All posts, newest first
    pub fn all_posts(&self) -> &[Post] { &self.posts }

    pub fn post_by_slug(
        &self,
        slug: &str,
    ) -> Option<&Post> {
        self.posts.iter().find(|p| p.slug == slug)
    }

    pub fn posts_by_category(
        &self,
        category: Category,
    ) -> Vec<&Post> {
        self.posts
            .iter()
            .filter(|p| p.category == category)
            .collect()
    }

    pub fn posts_by_tag(
        &self,
        tag: &str,
    ) -> Vec<&Post> {
        self.posts.iter().filter(|p| p.has_tag(tag)).collect()
    }

    pub fn recent_posts(
        &self,
        limit: usize,
    ) -> &[Post] {
        &self.posts[..limit.min(self.posts.len())]
    }

    /// Distinct categories, in order of first appearance
    pub fn categories(&self) -> Vec<Category> {
        let mut out = vec![];
        for post in &self.posts {
            if !out.contains(&post.category) {
                out.push(post.category);
            }
        }
        out
    }

    /// Distinct tags, in order of first appearance
    pub fn tags(&self) -> Vec<&str> {
        let mut out: Vec<&str> = vec![];
        for tag in self.posts.iter().flat_map(|p| &p.tags) {
            if !out.contains(&tag.as_str()) {
                out.push(tag);
            }
        }
        out
    }

    /// Other posts in the same category, newest first
    pub fn related_posts(
        &self,
        post: &Post,
        limit: usize,
    ) -> Vec<&Post> {
        self.posts_by_category(post.category)
            .into_iter()
            .filter(|p| p.slug != post.slug)
            .take(limit)
            .collect()
    }
}
