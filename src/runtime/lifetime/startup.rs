use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info};

use crate::services::{NewsletterService, ShortUrlService, ThumbnailService, TitleService};
use crate::storage::{SeaOrmStorage, StorageFactory};

/// 服务器运行所需的共享状态
#[derive(Clone)]
pub struct StartupContext {
    pub storage: Arc<SeaOrmStorage>,
    pub thumbnail_service: Arc<ThumbnailService>,
    pub title_service: Arc<TitleService>,
    pub newsletter_service: Arc<NewsletterService>,
    pub short_url_service: Arc<ShortUrlService>,
}

impl StartupContext {
    /// 在已有存储上组装各业务服务
    pub fn from_storage(storage: Arc<SeaOrmStorage>) -> Self {
        Self {
            thumbnail_service: Arc::new(ThumbnailService::new(storage.clone())),
            title_service: Arc::new(TitleService::new(storage.clone())),
            newsletter_service: Arc::new(NewsletterService::new(storage.clone())),
            short_url_service: Arc::new(ShortUrlService::new(storage.clone())),
            storage,
        }
    }
}

/// 准备服务器启动的上下文：连接数据库、执行迁移、组装服务
pub async fn prepare_server_startup() -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let storage = StorageFactory::create()
        .await
        .context("Failed to create storage backend")?;
    info!(
        "Using storage backend: {}",
        storage.get_backend_config().storage_type
    );

    let context = StartupContext::from_storage(storage);

    info!("Pre-startup completed in {:?}", start_time.elapsed());
    Ok(context)
}
