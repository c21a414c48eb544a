//! Concrete entity seeders
//!
//! Each seeder follows the same shape: upsert its fixture-catalog records by
//! natural key, generate the requested number of procedural records, apply
//! any one-shot post-processing, and report counts.

use crate::catalog::Fixture;
use crate::entity::EntityKind;
use crate::error::SeedResult;
use crate::seeder::{SeedContext, SeederManager};

pub mod affiliates;
pub mod audit_logs;
pub mod carbon_credits;
pub mod comments;
pub mod energy_bonds;
pub mod energy_contracts;
pub mod invoices;
pub mod menus;
pub mod organizations;
pub mod providers;
pub mod users;

pub use affiliates::AffiliateSeeder;
pub use audit_logs::AuditLogSeeder;
pub use carbon_credits::CarbonCreditSeeder;
pub use comments::CommentSeeder;
pub use energy_bonds::EnergyBondSeeder;
pub use energy_contracts::EnergyContractSeeder;
pub use invoices::InvoiceSeeder;
pub use menus::MenuSeeder;
pub use organizations::OrganizationSeeder;
pub use providers::{ProductSeeder, ProviderSeeder};
pub use users::UserSeeder;

/// Upsert a fixture list by natural key; returns (created, already existing)
pub(crate) async fn upsert_fixtures(
    ctx: &mut SeedContext,
    kind: EntityKind,
    fixtures: Vec<Fixture>,
) -> SeedResult<(usize, usize)> {
    let mut created = 0;
    let mut existing = 0;
    for fixture in fixtures {
        let record = ctx.new_record(kind).with_fields(fixture.fields);
        let (_, inserted) = ctx.store().find_or_insert(&fixture.key, record).await?;
        if inserted {
            created += 1;
        } else {
            existing += 1;
        }
    }
    Ok((created, existing))
}

/// The full registry: every seeder wired with its dependencies, in the
/// order a complete sample dataset needs
pub fn default_manager() -> SeederManager {
    SeederManager::new()
        .add(UserSeeder)
        .add(OrganizationSeeder)
        .add(ProviderSeeder)
        .add(ProductSeeder)
        .add(AffiliateSeeder)
        .add(CarbonCreditSeeder)
        .add(EnergyBondSeeder)
        .add(EnergyContractSeeder)
        .add(InvoiceSeeder)
        .add(MenuSeeder)
        .add(CommentSeeder)
        .add(AuditLogSeeder)
}
