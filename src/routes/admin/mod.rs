mod dashboard;
mod logout;
mod newsletter;
mod posts;

pub use dashboard::*;
pub use logout::*;
pub use newsletter::*;
pub use posts::*;
