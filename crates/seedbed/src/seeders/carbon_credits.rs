//! Carbon credit seeder
//!
//! Requires organizations. Each batch's tonnage breakdown is generated by
//! splitting the total, so `available + retired + transferred == total`
//! holds exactly.

use async_trait::async_trait;
use serde_json::json;

use crate::entity::EntityKind;
use crate::error::SeedResult;
use crate::generator::{past_datetime, split_total};
use crate::record::NaturalKey;
use crate::seeder::{SeedContext, SeedReport, Seeder};

pub struct CarbonCreditSeeder;

pub const NAME: &str = "carbon_credits";

const STANDARDS: [(&str, u32); 3] = [("verra", 50), ("gold_standard", 35), ("acr", 15)];

const CO_BENEFITS: [&str; 5] = [
    "biodiversity",
    "community_employment",
    "water_quality",
    "soil_health",
    "air_quality",
];

#[async_trait]
impl Seeder for CarbonCreditSeeder {
    fn name(&self) -> &str {
        NAME
    }

    fn target(&self) -> EntityKind {
        EntityKind::CarbonCredit
    }

    fn dependencies(&self) -> Vec<String> {
        vec!["organizations".to_string()]
    }

    async fn run(&self, ctx: &mut SeedContext) -> SeedResult<SeedReport> {
        let organizations = match ctx.pool(EntityKind::Organization).await? {
            Some(pool) => pool,
            None => {
                tracing::warn!(seeder = NAME, "no organizations available, skipping");
                return Ok(SeedReport::skipped_missing(NAME, EntityKind::Organization));
            }
        };

        let mut created = 0;
        let mut existing = 0;
        let now = ctx.now();
        let count = ctx.options.count_for(NAME);

        for _ in 0..count {
            let serial = ctx.sequences.formatted("credit_serial", "CC-", 6);
            let total_tonnes = ctx.faker.range_i64(100, 50_000);
            let split = split_total(&mut ctx.faker, total_tonnes, 3);
            let (available, retired, transferred) = (split[0], split[1], split[2]);

            let organization = ctx.pick(&organizations).id;
            let standard = *ctx.faker.weighted(&STANDARDS);
            let vintage_year = ctx.faker.range_i64(2015, 2024);
            let issued_at = past_datetime(&mut ctx.faker, now, 30, 1460);
            let benefit_count = ctx.faker.range_i64(1, 3) as usize;
            let co_benefits: Vec<&str> = (0..benefit_count)
                .map(|_| *ctx.faker.choose(&CO_BENEFITS))
                .collect();

            let record = ctx
                .new_record(EntityKind::CarbonCredit)
                .with("serial_number", serial.clone())
                .with("organization_id", json!(organization.to_string()))
                .with("standard", standard)
                .with("vintage_year", vintage_year)
                .with("total_tonnes", total_tonnes)
                .with("available_tonnes", available)
                .with("retired_tonnes", retired)
                .with("transferred_tonnes", transferred)
                .with(
                    "price_per_tonne_cents",
                    ctx.faker.price_cents(500, 15_000),
                )
                .with("co_benefits", json!(co_benefits))
                .with_timestamp("issued_at", issued_at);

            let key = NaturalKey::new("serial_number", serial);
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
