/// Derive a URL slug from a post title: lowercase, drop everything outside
/// `[a-z0-9]`, turn whitespace and hyphen runs into a single `-`.
///
/// Uniqueness against existing slugs is not checked.
pub fn generate_slug(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.to_lowercase().chars() {
        match c {
            'a'..='z' | '0'..='9' => slug.push(c),
            c if c == '-' || c.is_whitespace() => {
                if !slug.is_empty() && !slug.ends_with('-') {
                    slug.push('-');
                }
            }
            _ => {}
        }
    }
    slug.trim_end_matches('-').to_string()
}
