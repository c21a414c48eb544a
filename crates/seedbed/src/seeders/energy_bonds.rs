//! Energy bond seeder
//!
//! Requires organizations. Bond numbers come from the shared sequence set;
//! repayment splits are exact (`outstanding + repaid == total`) and issue
//! always precedes maturity.

use async_trait::async_trait;
use serde_json::json;

use crate::entity::EntityKind;
use crate::error::SeedResult;
use crate::generator::{date_pair, split_total};
use crate::record::NaturalKey;
use crate::seeder::{SeedContext, SeedReport, Seeder};

pub struct EnergyBondSeeder;

pub const NAME: &str = "energy_bonds";

#[async_trait]
impl Seeder for EnergyBondSeeder {
    fn name(&self) -> &str {
        NAME
    }

    fn target(&self) -> EntityKind {
        EntityKind::EnergyBond
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
            let bond_number = ctx.sequences.formatted("bond", "EB-", 5);
            let total_cents = ctx.faker.price_cents(1_000_000, 500_000_000);
            let split = split_total(&mut ctx.faker, total_cents, 2);
            let (repaid, outstanding) = (split[0], split[1]);
            // Bonds run 1 to 20 years
            let (issue_date, maturity_date) = date_pair(&mut ctx.faker, now, 1825, 365, 7300);

            let issuer = ctx.pick(&organizations).id;
            let record = ctx
                .new_record(EntityKind::EnergyBond)
                .with("bond_number", bond_number.clone())
                .with("organization_id", json!(issuer.to_string()))
                .with("total_amount_cents", total_cents)
                .with("repaid_amount_cents", repaid)
                .with("outstanding_amount_cents", outstanding)
                .with("interest_rate", ctx.faker.percentage(2.0, 9.5))
                .with(
                    "status",
                    *ctx.faker
                        .weighted(&[("open", 50u32), ("funded", 35), ("matured", 15)]),
                )
                .with_timestamp("issue_date", issue_date)
                .with_timestamp("maturity_date", maturity_date);

            let key = NaturalKey::new("bond_number", bond_number);
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
