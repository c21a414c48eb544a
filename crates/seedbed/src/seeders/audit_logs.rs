//! Audit log seeder
//!
//! Requires users. The audited subject is a typed [`EntityRef`] into
//! whichever subject pools are populated; every subject seeder is a
//! declared dependency, so on a full run all three pools exist before
//! any log row is written.

use async_trait::async_trait;
use serde_json::json;

use crate::entity::{EntityKind, EntityRef};
use crate::error::SeedResult;
use crate::generator::past_datetime;
use crate::record::NaturalKey;
use crate::seeder::{SeedContext, SeedReport, Seeder};

pub struct AuditLogSeeder;

pub const NAME: &str = "audit_logs";

const ACTIONS: [(&str, u32); 4] = [
    ("updated", 45),
    ("created", 30),
    ("viewed", 15),
    ("deleted", 10),
];

#[async_trait]
impl Seeder for AuditLogSeeder {
    fn name(&self) -> &str {
        NAME
    }

    fn target(&self) -> EntityKind {
        EntityKind::AuditLog
    }

    fn dependencies(&self) -> Vec<String> {
        vec![
            "users".to_string(),
            "organizations".to_string(),
            "products".to_string(),
            "energy_contracts".to_string(),
        ]
    }

    fn priority(&self) -> i32 {
        // Tail of the run among seeders released in the same batch
        200
    }

    async fn run(&self, ctx: &mut SeedContext) -> SeedResult<SeedReport> {
        let users = match ctx.pool(EntityKind::User).await? {
            Some(pool) => pool,
            None => {
                tracing::warn!(seeder = NAME, "no users available, skipping");
                return Ok(SeedReport::skipped_missing(NAME, EntityKind::User));
            }
        };

        // Prefer a spread of subject kinds; only non-empty pools participate
        let mut subject_pools = Vec::new();
        for kind in [
            EntityKind::Organization,
            EntityKind::Product,
            EntityKind::EnergyContract,
        ] {
            if let Some(pool) = ctx.pool(kind).await? {
                subject_pools.push((kind, pool));
            }
        }
        if subject_pools.is_empty() {
            tracing::warn!(seeder = NAME, "no auditable subjects available, skipping");
            return Ok(SeedReport::skipped_missing(NAME, EntityKind::Organization));
        }

        let mut created = 0;
        let mut existing = 0;
        let now = ctx.now();
        let count = ctx.options.count_for(NAME);

        for _ in 0..count {
            let reference = ctx.sequences.formatted("audit", "LOG-", 6);
            let actor = ctx.pick(&users).id;
            let pool_index = ctx.faker.range_i64(0, subject_pools.len() as i64 - 1) as usize;
            let (kind, pool) = &subject_pools[pool_index];
            let subject = EntityRef::new(*kind, ctx.pick(pool).id);
            let recorded_at = past_datetime(&mut ctx.faker, now, 0, 365);

            let record = ctx
                .new_record(EntityKind::AuditLog)
                .with("reference", reference.clone())
                .with("user_id", json!(actor.to_string()))
                .with_ref("subject", subject)
                .with("action", *ctx.faker.weighted(&ACTIONS))
                .with("ip_address", format!(
                    "10.{}.{}.{}",
                    ctx.faker.range_i64(0, 255),
                    ctx.faker.range_i64(0, 255),
                    ctx.faker.range_i64(1, 254)
                ))
                .with_timestamp("recorded_at", recorded_at);

            let key = NaturalKey::new("reference", reference);
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
