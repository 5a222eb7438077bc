mod config_gen;
mod newsletter;
mod short_urls;

pub use config_gen::config_generate;
pub use newsletter::{list_subscriptions, unsubscribe_email};
pub use short_urls::list_short_urls;
