mod admin;
mod blog;
mod health_check;
mod home;
mod layout;
mod login;
mod sitemap;
mod subscriptions;

pub use admin::*;
pub use blog::*;
pub use health_check::*;
pub use home::*;
pub use login::*;
pub use sitemap::*;
pub use subscriptions::*;
