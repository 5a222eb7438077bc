pub use sea_orm_migration::prelude::*;

pub mod entities;
mod m20260301_000001_media_tables;
mod m20260301_000002_newsletter_subscriptions;
mod m20260315_000001_short_urls;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_media_tables::Migration),
            Box::new(m20260301_000002_newsletter_subscriptions::Migration),
            Box::new(m20260315_000001_short_urls::Migration),
        ]
    }
}
