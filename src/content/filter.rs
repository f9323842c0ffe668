use serde::Deserialize;

use super::Post;

/// The three independent selections on the blog index, taken from the query
/// string: `/blog?category=Automation&tag=Scalability&q=framework`.
///
/// Blank values count as unset, so submitting the search form with an empty
/// box does not filter anything out.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct PostFilter {
    pub category: Option<String>,
    pub tag: Option<String>,
    #[serde(rename = "q")]
    pub search: Option<String>,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl PostFilter {
    pub fn category(&self) -> Option<&str> { non_blank(&self.category) }

    pub fn tag(&self) -> Option<&str> { non_blank(&self.tag) }

    /// Matched as typed; surrounding whitespace only matters for blankness
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref().filter(|v| !v.trim().is_empty())
    }

    pub fn is_active(&self) -> bool {
        self.category().is_some() || self.tag().is_some() || self.search().is_some()
    }

    /// Keep only the posts that satisfy every selection at once: exact
    /// category, tag membership, and a case-insensitive substring match of the
    /// search term against title, excerpt or any tag. Order is preserved.
    pub fn apply<'a>(
        &self,
        posts: &'a [Post],
    ) -> Vec<&'a Post> {
        let needle = self.search().map(str::to_lowercase);
        posts
            .iter()
            .filter(|p| self.category().map_or(true, |c| p.category.as_str() == c))
            .filter(|p| self.tag().map_or(true, |t| p.has_tag(t)))
            .filter(|p| needle.as_deref().map_or(true, |n| p.matches_search(n)))
            .collect()
    }

    /// Link to the index with this filter's selections; used to build the
    /// category/tag toggles without losing the other selections.
    pub fn href(&self) -> String {
        let params: Vec<String> = [
            ("category", self.category()),
            ("tag", self.tag()),
            ("q", self.search()),
        ]
        .into_iter()
        .filter_map(|(k, v)| v.map(|v| format!("{k}={}", urlencoding::encode(v))))
        .collect();

        match params.is_empty() {
            true => "/blog".to_string(),
            false => format!("/blog?{}", params.join("&")),
        }
    }

    pub fn with_category(
        &self,
        category: Option<&str>,
    ) -> Self {
        Self {
            category: category.map(str::to_string),
            ..self.clone()
        }
    }

    pub fn with_tag(
        &self,
        tag: Option<&str>,
    ) -> Self {
        Self {
            tag: tag.map(str::to_string),
            ..self.clone()
        }
    }
}
