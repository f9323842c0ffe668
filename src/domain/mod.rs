mod subscriber;
mod subscriber_email;
pub use subscriber::NewSubscriber;
pub use subscriber::Subscriber;
pub use subscriber::SubscriberFields;
pub use subscriber::SubscriberStatus;
pub use subscriber::WEBSITE_SOURCE;
pub use subscriber_email::SubscriberEmail;
