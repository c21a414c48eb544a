//! Organization seeder: named fixture cooperatives and companies plus a few
//! generated ones

use async_trait::async_trait;

use crate::catalog;
use crate::entity::EntityKind;
use crate::error::SeedResult;
use crate::record::NaturalKey;
use crate::seeder::{SeedContext, SeedReport, Seeder};
use crate::seeders::upsert_fixtures;

pub struct OrganizationSeeder;

pub const NAME: &str = "organizations";

#[async_trait]
impl Seeder for OrganizationSeeder {
    fn name(&self) -> &str {
        NAME
    }

    fn target(&self) -> EntityKind {
        EntityKind::Organization
    }

    fn priority(&self) -> i32 {
        10
    }

    async fn run(&self, ctx: &mut SeedContext) -> SeedResult<SeedReport> {
        let (mut created, mut existing) =
            upsert_fixtures(ctx, EntityKind::Organization, catalog::organization_fixtures())
                .await?;

        let count = ctx.options.count_for(NAME);
        for _ in 0..count {
            let name = ctx.faker.company();
            let slug = ctx.faker.slug(&name);
            let org_type = *ctx
                .faker
                .weighted(&[("cooperative", 60u32), ("company", 40u32)]);
            let record = ctx
                .new_record(EntityKind::Organization)
                .with("name", name)
                .with("slug", slug.clone())
                .with("organization_type", org_type)
                .with("member_count", ctx.faker.range_i64(5, 2500))
                .with("is_active", ctx.faker.bool_with(0.95));

            let key = NaturalKey::new("slug", slug);
            let (_, inserted) = ctx.store().find_or_insert(&key, record).await?;
            if inserted {
                created += 1;
            } else {
                existing += 1;
            }
        }

        Ok(SeedReport::completed(NAME, created, existing))
    }
}
