//! Menu seeder
//!
//! Fixture top-level menus, generated child entries, then a one-shot
//! backfill that resolves each child's `parent_id` by looking up the parent
//! slug among previously inserted rows. After the backfill no `parent_id`
//! points at a missing row.

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::catalog;
use crate::entity::EntityKind;
use crate::error::SeedResult;
use crate::record::NaturalKey;
use crate::seeder::{SeedContext, SeedReport, Seeder};
use crate::seeders::upsert_fixtures;

pub struct MenuSeeder;

pub const NAME: &str = "menus";

const CHILD_TITLES: [&str; 8] = [
    "Overview",
    "Pricing",
    "Updates",
    "Events",
    "Resources",
    "Team",
    "Partners",
    "Contact",
];

#[async_trait]
impl Seeder for MenuSeeder {
    fn name(&self) -> &str {
        NAME
    }

    fn target(&self) -> EntityKind {
        EntityKind::Menu
    }

    async fn run(&self, ctx: &mut SeedContext) -> SeedResult<SeedReport> {
        let (mut created, mut existing) =
            upsert_fixtures(ctx, EntityKind::Menu, catalog::menu_fixtures()).await?;

        let top_level: Vec<String> = catalog::menu_fixtures()
            .iter()
            .map(|f| f.key.describe())
            .collect();

        let count = ctx.options.count_for(NAME);
        for position in 0..count {
            let title = *ctx.faker.choose(&CHILD_TITLES);
            let slug = ctx.faker.slug(title);
            let parent_slug = ctx.faker.choose(&top_level).clone();
            let record = ctx
                .new_record(EntityKind::Menu)
                .with("slug", slug.clone())
                .with("title", title)
                .with("position", (position + 1) as i64)
                .with("parent_slug", parent_slug)
                .with("parent_id", Value::Null);

            let key = NaturalKey::new("slug", slug);
            let (_, inserted) = ctx.store().find_or_insert(&key, record).await?;
            if inserted {
                created += 1;
            } else {
                existing += 1;
            }
        }

        backfill_parents(ctx).await?;

        Ok(SeedReport::completed(NAME, created, existing))
    }
}

/// Resolve `parent_slug` markers into `parent_id` links
async fn backfill_parents(ctx: &mut SeedContext) -> SeedResult<()> {
    let menus = ctx.store().all(EntityKind::Menu).await?;
    for menu in menus {
        let parent_slug = match menu.str_field("parent_slug") {
            Some(slug) => slug.to_string(),
            None => continue,
        };
        if menu.get("parent_id").map(|v| !v.is_null()).unwrap_or(false) {
            continue;
        }
        let key = NaturalKey::new("slug", parent_slug.clone());
        match ctx.store().find_by_key(EntityKind::Menu, &key).await? {
            Some(parent) => {
                let mut updated = menu.clone();
                updated.set("parent_id", json!(parent.id.to_string()));
                // The slug marker is scratch state; persisted rows carry
                // only the resolved link
                updated.fields.remove("parent_slug");
                ctx.store().update(updated).await?;
            }
            None => {
                tracing::warn!(slug = %parent_slug, "menu parent slug not found, leaving unlinked");
            }
        }
    }
    Ok(())
}
