//! Service layer for business logic
//!
//! Shared by the HTTP handlers and the CLI. Each service validates its input,
//! talks to [`SeaOrmStorage`](crate::storage::SeaOrmStorage) and maps
//! "missing" / "already done" outcomes onto `NotFound` / `Conflict`.

mod newsletter_service;
mod short_url_service;
mod thumbnail_service;
mod title_service;

pub use newsletter_service::{NewsletterService, SubscribeOutcome};
pub use short_url_service::{Platform, ShortUrlService};
pub use thumbnail_service::ThumbnailService;
pub use title_service::TitleService;
