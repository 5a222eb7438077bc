//! Newsletter subscription service
//!
//! One row per email. Unsubscribing flips `is_active` and subscribing again
//! reactivates the same row.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::config::get_config;
use crate::errors::{GinywowError, Result};
use crate::storage::{NewsletterSubscription, SeaOrmStorage};
use crate::validation::{NewsletterInput, UnsubscribeInput, validate_newsletter, validate_unsubscribe};

const ALREADY_SUBSCRIBED: &str = "This email is already subscribed";

/// Result of a subscribe call
#[derive(Debug, Clone)]
pub enum SubscribeOutcome {
    Created(NewsletterSubscription),
    Reactivated(NewsletterSubscription),
}

impl SubscribeOutcome {
    pub fn subscription(&self) -> &NewsletterSubscription {
        match self {
            Self::Created(s) | Self::Reactivated(s) => s,
        }
    }

    pub fn into_subscription(self) -> NewsletterSubscription {
        match self {
            Self::Created(s) | Self::Reactivated(s) => s,
        }
    }
}

pub struct NewsletterService {
    storage: Arc<SeaOrmStorage>,
}

impl NewsletterService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    async fn fetch(&self, email: &str) -> Result<NewsletterSubscription> {
        self.storage
            .find_subscription(email)
            .await?
            .ok_or_else(|| GinywowError::not_found("This email is not subscribed"))
    }

    pub async fn subscribe(&self, input: &NewsletterInput) -> Result<SubscribeOutcome> {
        let default_source = get_config().newsletter.default_source.clone();
        let draft = validate_newsletter(input, &default_source)?;

        match self.storage.find_subscription(&draft.email).await? {
            Some(existing) if existing.is_active => Err(GinywowError::conflict(ALREADY_SUBSCRIBED)),
            Some(_) => {
                let changed = self
                    .storage
                    .set_subscription_active(&draft.email, true, Some(&draft.source))
                    .await?;
                if !changed {
                    // 并发请求已经重新激活
                    return Err(GinywowError::conflict(ALREADY_SUBSCRIBED));
                }
                let subscription = self.fetch(&draft.email).await?;
                info!(
                    "Newsletter subscription reactivated: id={}",
                    subscription.id
                );
                Ok(SubscribeOutcome::Reactivated(subscription))
            }
            None => {
                let now = Utc::now();
                let subscription = self
                    .storage
                    .insert_subscription(&NewsletterSubscription {
                        id: 0,
                        email: draft.email,
                        is_active: true,
                        subscription_date: now,
                        last_updated: now,
                        source: Some(draft.source),
                    })
                    .await
                    .map_err(|e| match e {
                        GinywowError::Conflict(_) => GinywowError::conflict(ALREADY_SUBSCRIBED),
                        other => other,
                    })?;
                Ok(SubscribeOutcome::Created(subscription))
            }
        }
    }

    /// 退订；已退订的邮箱原样返回
    pub async fn unsubscribe(&self, input: &UnsubscribeInput) -> Result<NewsletterSubscription> {
        let email = validate_unsubscribe(input)?;
        let existing = self.fetch(&email).await?;
        if !existing.is_active {
            return Ok(existing);
        }

        self.storage
            .set_subscription_active(&email, false, None)
            .await?;
        info!("Newsletter subscription deactivated: id={}", existing.id);
        self.fetch(&email).await
    }

    pub async fn list_active(&self) -> Result<Vec<NewsletterSubscription>> {
        self.storage.list_active_subscriptions().await
    }

    pub async fn count_active(&self) -> Result<u64> {
        self.storage.count_active_subscriptions().await
    }
}
