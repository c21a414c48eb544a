//! Energy contract seeder
//!
//! Hard prerequisites: users, providers, and products must all be non-empty
//! pools. If any is missing the seeder logs and skips; it never throws.

use async_trait::async_trait;
use serde_json::json;

use crate::entity::EntityKind;
use crate::error::SeedResult;
use crate::generator::date_pair;
use crate::record::NaturalKey;
use crate::seeder::{SeedContext, SeedReport, Seeder};

pub struct EnergyContractSeeder;

pub const NAME: &str = "energy_contracts";

#[async_trait]
impl Seeder for EnergyContractSeeder {
    fn name(&self) -> &str {
        NAME
    }

    fn target(&self) -> EntityKind {
        EntityKind::EnergyContract
    }

    fn dependencies(&self) -> Vec<String> {
        vec![
            "users".to_string(),
            "providers".to_string(),
            "products".to_string(),
        ]
    }

    async fn run(&self, ctx: &mut SeedContext) -> SeedResult<SeedReport> {
        let mut pools = Vec::with_capacity(3);
        for kind in [EntityKind::User, EntityKind::Provider, EntityKind::Product] {
            match ctx.pool(kind).await? {
                Some(pool) => pools.push(pool),
                None => {
                    tracing::warn!(seeder = NAME, missing = %kind, "prerequisite table empty, skipping");
                    return Ok(SeedReport::skipped_missing(NAME, kind));
                }
            }
        }
        let (users, providers, products) = (&pools[0], &pools[1], &pools[2]);

        let mut created = 0;
        let mut existing = 0;
        let now = ctx.now();
        let count = ctx.options.count_for(NAME);

        for _ in 0..count {
            let contract_number = ctx.sequences.formatted("contract", "EC-", 6);
            let (start_date, end_date) = date_pair(&mut ctx.faker, now, 1095, 365, 1095);
            let user = ctx.pick(users).id;
            let provider = ctx.pick(providers).id;
            let product = ctx.pick(products).id;

            let record = ctx
                .new_record(EntityKind::EnergyContract)
                .with("contract_number", contract_number.clone())
                .with("user_id", json!(user.to_string()))
                .with("provider_id", json!(provider.to_string()))
                .with("product_id", json!(product.to_string()))
                .with("monthly_fee_cents", ctx.faker.price_cents(1_500, 25_000))
                .with("annual_kwh", ctx.faker.range_i64(1_200, 18_000))
                .with(
                    "status",
                    *ctx.faker
                        .weighted(&[("active", 70u32), ("expired", 20), ("cancelled", 10)]),
                )
                .with_timestamp("start_date", start_date)
                .with_timestamp("end_date", end_date);

            let key = NaturalKey::new("contract_number", contract_number);
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
