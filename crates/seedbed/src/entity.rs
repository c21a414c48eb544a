//! Entity kinds and typed cross-entity references
//!
//! Every seedable entity type is a variant of [`EntityKind`]. Polymorphic
//! links (audit subjects, comment subjects) are expressed as an
//! [`EntityRef`] carrying the kind alongside the id, instead of a raw
//! class-name string.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// The closed set of entity types this tool can seed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    User,
    Organization,
    Provider,
    Product,
    Affiliate,
    CarbonCredit,
    EnergyBond,
    EnergyContract,
    Invoice,
    Menu,
    Comment,
    AuditLog,
}

impl EntityKind {
    /// Target table name for this entity type
    pub fn table_name(&self) -> &'static str {
        match self {
            EntityKind::User => "users",
            EntityKind::Organization => "organizations",
            EntityKind::Provider => "providers",
            EntityKind::Product => "products",
            EntityKind::Affiliate => "affiliates",
            EntityKind::CarbonCredit => "carbon_credits",
            EntityKind::EnergyBond => "energy_bonds",
            EntityKind::EnergyContract => "energy_contracts",
            EntityKind::Invoice => "invoices",
            EntityKind::Menu => "menus",
            EntityKind::Comment => "comments",
            EntityKind::AuditLog => "audit_logs",
        }
    }

    /// Parse a table name back into its kind
    pub fn from_table_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.table_name() == name)
    }

    /// All kinds, in no particular order
    pub const ALL: [EntityKind; 12] = [
        EntityKind::User,
        EntityKind::Organization,
        EntityKind::Provider,
        EntityKind::Product,
        EntityKind::Affiliate,
        EntityKind::CarbonCredit,
        EntityKind::EnergyBond,
        EntityKind::EnergyContract,
        EntityKind::Invoice,
        EntityKind::Menu,
        EntityKind::Comment,
        EntityKind::AuditLog,
    ];
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

/// Typed reference to a record of another entity type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    pub kind: EntityKind,
    pub id: Uuid,
}

impl EntityRef {
    pub fn new(kind: EntityKind, id: Uuid) -> Self {
        Self { kind, id }
    }
}
