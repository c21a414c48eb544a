//! Provider and product seeders
//!
//! Catalog-only: both pools exist to satisfy contract prerequisites and
//! stay small and stable across runs.

use async_trait::async_trait;

use crate::catalog;
use crate::entity::EntityKind;
use crate::error::SeedResult;
use crate::seeder::{SeedContext, SeedReport, Seeder};
use crate::seeders::upsert_fixtures;

pub struct ProviderSeeder;

#[async_trait]
impl Seeder for ProviderSeeder {
    fn name(&self) -> &str {
        "providers"
    }

    fn target(&self) -> EntityKind {
        EntityKind::Provider
    }

    fn priority(&self) -> i32 {
        20
    }

    async fn run(&self, ctx: &mut SeedContext) -> SeedResult<SeedReport> {
        let (created, existing) =
            upsert_fixtures(ctx, EntityKind::Provider, catalog::provider_fixtures()).await?;
        Ok(SeedReport::completed("providers", created, existing))
    }
}

pub struct ProductSeeder;

#[async_trait]
impl Seeder for ProductSeeder {
    fn name(&self) -> &str {
        "products"
    }

    fn target(&self) -> EntityKind {
        EntityKind::Product
    }

    fn priority(&self) -> i32 {
        20
    }

    async fn run(&self, ctx: &mut SeedContext) -> SeedResult<SeedReport> {
        let (created, existing) =
            upsert_fixtures(ctx, EntityKind::Product, catalog::product_fixtures()).await?;
        Ok(SeedReport::completed("products", created, existing))
    }
}
