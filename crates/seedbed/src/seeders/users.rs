//! User seeder: fixture staff accounts plus generated members

use async_trait::async_trait;

use crate::catalog;
use crate::entity::EntityKind;
use crate::error::SeedResult;
use crate::generator::past_datetime;
use crate::record::NaturalKey;
use crate::seeder::{SeedContext, SeedReport, Seeder};
use crate::seeders::upsert_fixtures;

pub struct UserSeeder;

pub const NAME: &str = "users";

#[async_trait]
impl Seeder for UserSeeder {
    fn name(&self) -> &str {
        NAME
    }

    fn target(&self) -> EntityKind {
        EntityKind::User
    }

    fn priority(&self) -> i32 {
        10
    }

    async fn run(&self, ctx: &mut SeedContext) -> SeedResult<SeedReport> {
        let (mut created, mut existing) =
            upsert_fixtures(ctx, EntityKind::User, catalog::user_fixtures()).await?;

        let count = ctx.options.count_for(NAME);
        let now = ctx.now();
        for _ in 0..count {
            let email = ctx.faker.email();
            let joined_at = past_datetime(&mut ctx.faker, now, 1, 730);
            let record = ctx
                .new_record(EntityKind::User)
                .with("name", ctx.faker.full_name())
                .with("email", email.clone())
                .with("role", "member")
                .with("phone", ctx.faker.phone())
                .with("city", ctx.faker.city())
                .with("country", ctx.faker.country())
                .with("is_active", ctx.faker.bool_with(0.9))
                .with_timestamp("created_at", joined_at);

            let key = NaturalKey::new("email", email);
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
