//! Comment seeder
//!
//! Requires users and organizations. Comments attach to an organization or
//! product row via a typed [`EntityRef`] and thread through `parent_id`:
//! roots are inserted first, replies pick their parent among the
//! already-inserted roots, so no reply can reference a missing row.

use async_trait::async_trait;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::entity::{EntityKind, EntityRef};
use crate::error::SeedResult;
use crate::generator::past_datetime;
use crate::record::NaturalKey;
use crate::seeder::{SeedContext, SeedReport, Seeder};

pub struct CommentSeeder;

pub const NAME: &str = "comments";

#[async_trait]
impl Seeder for CommentSeeder {
    fn name(&self) -> &str {
        NAME
    }

    fn target(&self) -> EntityKind {
        EntityKind::Comment
    }

    fn dependencies(&self) -> Vec<String> {
        vec![
            "users".to_string(),
            "organizations".to_string(),
            "products".to_string(),
        ]
    }

    async fn run(&self, ctx: &mut SeedContext) -> SeedResult<SeedReport> {
        let users = match ctx.pool(EntityKind::User).await? {
            Some(pool) => pool,
            None => {
                tracing::warn!(seeder = NAME, "no users available, skipping");
                return Ok(SeedReport::skipped_missing(NAME, EntityKind::User));
            }
        };
        // Organizations are required; products join the subject pool when
        // present (a partial run may not have seeded them)
        let mut subject_pools = Vec::new();
        for kind in [EntityKind::Organization, EntityKind::Product] {
            if let Some(pool) = ctx.pool(kind).await? {
                subject_pools.push((kind, pool));
            }
        }
        if !subject_pools
            .iter()
            .any(|(kind, _)| *kind == EntityKind::Organization)
        {
            tracing::warn!(seeder = NAME, "no organizations available, skipping");
            return Ok(SeedReport::skipped_missing(NAME, EntityKind::Organization));
        }

        let mut created = 0;
        let mut existing = 0;
        let now = ctx.now();
        let count = ctx.options.count_for(NAME);
        let root_count = count.div_ceil(2);

        let mut root_ids: Vec<Uuid> = Vec::with_capacity(root_count);
        for index in 0..count {
            let reference = ctx.sequences.formatted("comment", "CMT-", 6);
            let author = ctx.pick(&users).id;
            let pool_index = ctx.faker.range_i64(0, subject_pools.len() as i64 - 1) as usize;
            let (subject_kind, subject_pool) = &subject_pools[pool_index];
            let subject = EntityRef::new(*subject_kind, ctx.pick(subject_pool).id);
            let posted_at = past_datetime(&mut ctx.faker, now, 1, 180);

            // The pick is drawn even when the parent pool is empty so the
            // random stream stays identical across re-runs
            let parent_id = if index < root_count {
                Value::Null
            } else {
                let pick = ctx.faker.range_i64(0, root_count as i64 - 1) as usize;
                root_ids
                    .get(pick)
                    .map(|id| json!(id.to_string()))
                    .unwrap_or(Value::Null)
            };

            let record = ctx
                .new_record(EntityKind::Comment)
                .with("reference", reference.clone())
                .with("user_id", json!(author.to_string()))
                .with_ref("subject", subject)
                .with("body", ctx.faker.sentence())
                .with("parent_id", parent_id.clone())
                .with_timestamp("posted_at", posted_at);

            let key = NaturalKey::new("reference", reference);
            let (inserted_record, inserted) = ctx.store().find_or_insert(&key, record).await?;
            if inserted {
                created += 1;
                if parent_id.is_null() {
                    root_ids.push(inserted_record.id);
                }
            } else {
                existing += 1;
            }
        }

        Ok(SeedReport::completed(NAME, created, existing))
    }
}
