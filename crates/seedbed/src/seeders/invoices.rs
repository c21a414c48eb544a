//! Invoice seeder
//!
//! Requires users. Amount breakdowns are built up from components
//! (`subtotal + tax == total`, integer cents) and due dates always follow
//! issue dates.

use async_trait::async_trait;
use chrono::Duration;
use serde_json::json;

use crate::entity::EntityKind;
use crate::error::SeedResult;
use crate::generator::past_datetime;
use crate::record::NaturalKey;
use crate::seeder::{SeedContext, SeedReport, Seeder};

pub struct InvoiceSeeder;

pub const NAME: &str = "invoices";

const STATUSES: [(&str, u32); 3] = [("paid", 60), ("pending", 30), ("overdue", 10)];

#[async_trait]
impl Seeder for InvoiceSeeder {
    fn name(&self) -> &str {
        NAME
    }

    fn target(&self) -> EntityKind {
        EntityKind::Invoice
    }

    fn dependencies(&self) -> Vec<String> {
        vec!["users".to_string()]
    }

    async fn run(&self, ctx: &mut SeedContext) -> SeedResult<SeedReport> {
        let users = match ctx.pool(EntityKind::User).await? {
            Some(pool) => pool,
            None => {
                tracing::warn!(seeder = NAME, "no users available, skipping");
                return Ok(SeedReport::skipped_missing(NAME, EntityKind::User));
            }
        };

        let mut created = 0;
        let mut existing = 0;
        let now = ctx.now();
        let count = ctx.options.count_for(NAME);

        for _ in 0..count {
            let invoice_number = ctx.sequences.formatted("invoice", "INV-", 6);
            let subtotal_cents = ctx.faker.price_cents(1_000, 90_000);
            let tax_rate = ctx.faker.percentage(5.0, 23.0);
            let tax_cents = ((subtotal_cents as f64) * tax_rate / 100.0).round() as i64;
            let total_cents = subtotal_cents + tax_cents;

            let issued_at = past_datetime(&mut ctx.faker, now, 1, 365);
            let due_at = issued_at + Duration::days(ctx.faker.range_i64(14, 60));

            let user = ctx.pick(&users).id;
            let record = ctx
                .new_record(EntityKind::Invoice)
                .with("invoice_number", invoice_number.clone())
                .with("user_id", json!(user.to_string()))
                .with("subtotal_cents", subtotal_cents)
                .with("tax_rate", tax_rate)
                .with("tax_cents", tax_cents)
                .with("total_cents", total_cents)
                .with("status", *ctx.faker.weighted(&STATUSES))
                .with_timestamp("issued_at", issued_at)
                .with_timestamp("due_at", due_at);

            let key = NaturalKey::new("invoice_number", invoice_number);
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
