//! Affiliate seeder
//!
//! Requires a non-empty user pool: every affiliate is owned by a user.
//! Fixture codes `AF001`..`AF014` come from the catalog; generated
//! affiliates get `AFG-` codes from the sequence set so the two ranges
//! never collide.

use async_trait::async_trait;
use serde_json::json;

use crate::catalog;
use crate::entity::EntityKind;
use crate::error::SeedResult;
use crate::generator::{approval_after, past_datetime};
use crate::record::NaturalKey;
use crate::seeder::{SeedContext, SeedReport, Seeder};

pub struct AffiliateSeeder;

pub const NAME: &str = "affiliates";

const TIERS: [(&str, u32); 3] = [("bronze", 50), ("silver", 35), ("gold", 15)];

fn commission_for(tier: &str) -> f64 {
    match tier {
        "gold" => 12.5,
        "silver" => 8.0,
        _ => 5.0,
    }
}

#[async_trait]
impl Seeder for AffiliateSeeder {
    fn name(&self) -> &str {
        NAME
    }

    fn target(&self) -> EntityKind {
        EntityKind::Affiliate
    }

    fn dependencies(&self) -> Vec<String> {
        vec!["users".to_string()]
    }

    async fn run(&self, ctx: &mut SeedContext) -> SeedResult<SeedReport> {
        let users = match ctx.pool(EntityKind::User).await? {
            Some(users) => users,
            None => {
                tracing::warn!(seeder = NAME, "no users available, skipping");
                return Ok(SeedReport::skipped_missing(NAME, EntityKind::User));
            }
        };

        let mut created = 0;
        let mut existing = 0;
        let now = ctx.now();

        for fixture in catalog::affiliate_fixtures() {
            let owner = ctx.pick(&users).id;
            let submitted_at = past_datetime(&mut ctx.faker, now, 30, 365);
            let approved_at = approval_after(&mut ctx.faker, submitted_at, now);
            let record = ctx
                .new_record(EntityKind::Affiliate)
                .with_fields(fixture.fields)
                .with("user_id", json!(owner.to_string()))
                .with_timestamp("submitted_at", submitted_at)
                .with_timestamp("approved_at", approved_at);
            let (_, inserted) = ctx.store().find_or_insert(&fixture.key, record).await?;
            if inserted {
                created += 1;
            } else {
                existing += 1;
            }
        }

        let count = ctx.options.count_for(NAME);
        for _ in 0..count {
            let code = ctx.sequences.formatted("affiliate", "AFG-", 4);
            let tier = *ctx.faker.weighted(&TIERS);
            let status = *ctx
                .faker
                .weighted(&[("active", 70u32), ("pending", 20), ("suspended", 10)]);
            let owner = ctx.pick(&users).id;
            let submitted_at = past_datetime(&mut ctx.faker, now, 1, 365);

            let mut record = ctx
                .new_record(EntityKind::Affiliate)
                .with("affiliate_code", code.clone())
                .with("name", ctx.faker.company())
                .with("tier", tier)
                .with("commission_rate", commission_for(tier))
                .with("status", status)
                .with("user_id", json!(owner.to_string()))
                .with("referral_count", ctx.faker.range_i64(0, 500))
                .with_timestamp("submitted_at", submitted_at);
            // Pending applications carry no approval timestamp
            if status != "pending" {
                let approved_at = approval_after(&mut ctx.faker, submitted_at, now);
                record = record.with_timestamp("approved_at", approved_at);
            }

            let key = NaturalKey::new("affiliate_code", code);
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commission_matches_tier() {
        assert_eq!(commission_for("gold"), 12.5);
        assert_eq!(commission_for("silver"), 8.0);
        assert_eq!(commission_for("bronze"), 5.0);
        assert_eq!(commission_for("unknown"), 5.0);
    }
}
