pub mod newsletter_subscription;
pub mod short_url;
pub mod thumbnail;
pub mod title_optimization;

pub use newsletter_subscription::Entity as NewsletterSubscriptionEntity;
pub use short_url::Entity as ShortUrlEntity;
pub use thumbnail::Entity as ThumbnailEntity;
pub use title_optimization::Entity as TitleOptimizationEntity;
