use chrono::NaiveDate;
use serde::Deserialize;

use super::generate_slug;
use super::Category;
use super::Post;

/// The admin post editor form, as submitted. Tags arrive as one
/// comma-separated field.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct PostForm {
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    pub category: String,
    pub date: String,
    #[serde(default)]
    pub read_time: String,
    #[serde(default)]
    pub featured_image: String,
    #[serde(default)]
    pub tags: String,
    pub content: String,
}

impl PostForm {
    /// Defaults for a brand new post
    pub fn blank(today: NaiveDate) -> Self {
        Self {
            category: Category::AiAutomation.to_string(),
            date: today.format("%Y-%m-%d").to_string(),
            read_time: "5 min read".to_string(),
            ..Default::default()
        }
    }

    pub fn from_post(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            excerpt: post.excerpt.clone(),
            category: post.category.to_string(),
            date: post.iso_date(),
            read_time: post.read_time.clone(),
            featured_image: post.featured_image.clone().unwrap_or_default(),
            tags: post.tags.join(", "),
            content: post.content.clone(),
        }
    }
}

/// A validated editor submission. There is nowhere to persist it yet.
#[derive(Debug, Clone, PartialEq)]
pub struct PostDraft {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub category: Category,
    pub date: NaiveDate,
    pub read_time: String,
    pub featured_image: Option<String>,
    pub tags: Vec<String>,
    pub content: String,
}

impl PostDraft {
    /// Validate a submission. `slug` is the slug being edited; new posts get
    /// one derived from the title. All problems are reported at once.
    pub fn parse(
        form: PostForm,
        slug: Option<&str>,
    ) -> Result<Self, Vec<String>> {
        let mut errors = vec![];

        let title = form.title.trim().to_string();
        if title.is_empty() {
            errors.push("Title is required.".to_string());
        }
        let content = form.content.trim().to_string();
        if content.is_empty() {
            errors.push("Content is required.".to_string());
        }
        let category = form.category.parse::<Category>().map_err(|e| errors.push(e));
        let date = NaiveDate::parse_from_str(form.date.trim(), "%Y-%m-%d")
            .map_err(|_| errors.push(format!("Invalid date: {:?}", form.date)));

        let slug = match slug {
            Some(s) => s.to_string(),
            None => generate_slug(&title),
        };
        if slug.is_empty() && !title.is_empty() {
            errors.push("Title must contain at least one letter or digit.".to_string());
        }

        let (Ok(category), Ok(date), true) = (category, date, errors.is_empty()) else {
            return Err(errors);
        };

        let mut tags: Vec<String> = vec![];
        for tag in form.tags.split(',').map(str::trim) {
            if !tag.is_empty() && !tags.iter().any(|t| t == tag) {
                tags.push(tag.to_string());
            }
        }

        Ok(Self {
            slug,
            title,
            excerpt: form.excerpt.trim().to_string(),
            category,
            date,
            read_time: match form.read_time.trim() {
                "" => super::reading_time(&content),
                t => t.to_string(),
            },
            featured_image: Some(form.featured_image.trim().to_string()).filter(|i| !i.is_empty()),
            tags,
            content,
        })
    }
}
