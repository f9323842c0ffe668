// one binary for all black-box tests: helpers are shared, and the link step
// runs once
mod admin_posts;
mod blog;
mod health_check;
mod helpers;
mod login;
mod logout;
mod newsletter_admin;
mod sitemap;
