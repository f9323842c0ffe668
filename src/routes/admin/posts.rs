use actix_web::http::StatusCode;
use actix_web::web;
use actix_web::HttpResponse;
use actix_web_flash_messages::FlashMessage;
use chrono::Utc;

use crate::content::Category;
use crate::content::ContentStore;
use crate::content::PostDraft;
use crate::content::PostForm;
use crate::routes::layout::page;
use crate::session_state::AdminSession;
use crate::utils::escape;
use crate::utils::html;
use crate::utils::redirect;

// there is no write path for posts: they are compiled into the binary. Save
// and delete validate the request, log it and report back, but the content
// store is left untouched.

/// Which editor is being rendered
enum Editing<'a> {
    New,
    Existing(&'a str),
}

fn post_not_found() -> HttpResponse {
    let main = r#"<section class="not-found">
  <h1>Post not found</h1>
  <a href="/admin/dashboard">Back to dashboard</a>
</section>"#;
    html(StatusCode::NOT_FOUND, page("Post not found | testinternals", main))
}

fn editor(
    status: StatusCode,
    editing: Editing,
    form: &PostForm,
    errors: &[String],
) -> HttpResponse {
    let (heading, action, delete) = match editing {
        Editing::New => ("New Post", "/admin/new-post".to_string(), String::new()),
        Editing::Existing(slug) => (
            "Edit Post",
            format!("/admin/edit/{slug}"),
            format!(
                r#"<form action="/admin/edit/{slug}/delete" method="post" onsubmit="return confirm('Delete this post?')">
    <button type="submit">Delete post</button>
  </form>"#
            ),
        ),
    };

    let errors = match errors.is_empty() {
        true => String::new(),
        false => format!(
            r#"<ul class="errors">{}</ul>"#,
            errors
                .iter()
                .map(|e| format!("<li>{}</li>", escape(e)))
                .collect::<String>()
        ),
    };

    let categories: String = Category::ALL
        .iter()
        .map(|c| {
            let selected = if c.as_str() == form.category { " selected" } else { "" };
            format!(
                r#"<option value="{0}"{selected}>{0}</option>"#,
                escape(c.as_str())
            )
        })
        .collect();

    let main = format!(
        r#"<section class="editor">
  <a href="/admin/dashboard">Back to dashboard</a>
  <h1>{heading}</h1>
  {errors}
  <form action="{action}" method="post">
    <label>Title <input type="text" name="title" value="{title}" /></label>
    <label>Excerpt <textarea name="excerpt">{excerpt}</textarea></label>
    <label>Category <select name="category">{categories}</select></label>
    <label>Date <input type="date" name="date" value="{date}" /></label>
    <label>Read time <input type="text" name="read_time" value="{read_time}" /></label>
    <label>Featured image <input type="text" name="featured_image" value="{featured_image}" /></label>
    <label>Tags (comma separated) <input type="text" name="tags" value="{tags}" /></label>
    <label>Content (markdown) <textarea name="content" rows="20">{content}</textarea></label>
    <button type="submit">Save post</button>
  </form>
  {delete}
</section>"#,
        title = escape(&form.title),
        excerpt = escape(&form.excerpt),
        date = escape(&form.date),
        read_time = escape(&form.read_time),
        featured_image = escape(&form.featured_image),
        tags = escape(&form.tags),
        content = escape(&form.content),
    );
    html(status, page(&format!("{heading} | testinternals"), &main))
}

/// `GET /admin/new-post`
pub async fn new_post_form() -> HttpResponse {
    let form = PostForm::blank(Utc::now().date_naive());
    editor(StatusCode::OK, Editing::New, &form, &[])
}

/// `POST /admin/new-post`
#[tracing::instrument(name = "Saving new post", skip_all, fields(admin = %admin.email))]
pub async fn create_post(
    admin: web::ReqData<AdminSession>,
    form: web::Form<PostForm>,
) -> HttpResponse {
    let form = form.into_inner();
    match PostDraft::parse(form.clone(), None) {
        Ok(draft) => {
            tracing::info!(slug = %draft.slug, action = "create", "Post saved");
            FlashMessage::success("Post created successfully!").send();
            redirect("/admin/dashboard")
        }
        Err(errors) => editor(StatusCode::BAD_REQUEST, Editing::New, &form, &errors),
    }
}

/// `GET /admin/edit/{slug}`
pub async fn edit_post_form(
    store: web::Data<ContentStore>,
    slug: web::Path<String>,
) -> HttpResponse {
    match store.post_by_slug(&slug) {
        Some(post) => editor(
            StatusCode::OK,
            Editing::Existing(&post.slug),
            &PostForm::from_post(post),
            &[],
        ),
        None => post_not_found(),
    }
}

/// `POST /admin/edit/{slug}`
#[tracing::instrument(name = "Saving post", skip(admin, store, form), fields(admin = %admin.email))]
pub async fn update_post(
    admin: web::ReqData<AdminSession>,
    store: web::Data<ContentStore>,
    slug: web::Path<String>,
    form: web::Form<PostForm>,
) -> HttpResponse {
    let Some(post) = store.post_by_slug(&slug) else {
        return post_not_found();
    };
    let form = form.into_inner();
    match PostDraft::parse(form.clone(), Some(&post.slug)) {
        Ok(draft) => {
            tracing::info!(slug = %draft.slug, action = "update", "Post saved");
            FlashMessage::success("Post updated successfully!").send();
            redirect("/admin/dashboard")
        }
        Err(errors) => editor(
            StatusCode::BAD_REQUEST,
            Editing::Existing(&post.slug),
            &form,
            &errors,
        ),
    }
}

/// `POST /admin/edit/{slug}/delete`
#[tracing::instrument(name = "Deleting post", skip(admin, store), fields(admin = %admin.email))]
pub async fn delete_post(
    admin: web::ReqData<AdminSession>,
    store: web::Data<ContentStore>,
    slug: web::Path<String>,
) -> HttpResponse {
    let Some(post) = store.post_by_slug(&slug) else {
        return post_not_found();
    };
    tracing::info!(slug = %post.slug, action = "delete", "Post deleted");
    FlashMessage::success("Post deleted successfully!").send();
    redirect("/admin/dashboard")
}
