//! Seeder trait, run reports, and environment gating

use async_trait::async_trait;

use crate::entity::EntityKind;
use crate::error::SeedResult;

pub mod context;
pub mod manager;

pub use context::{SeedContext, SeedOptions};
pub use manager::{RunSummary, SeederManager};

/// Environment types for seeding control
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Testing,
    Staging,
    Production,
    Custom(String),
}

impl Environment {
    pub fn parse(env: &str) -> Self {
        match env.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "testing" | "test" => Environment::Testing,
            "staging" | "stage" => Environment::Staging,
            "production" | "prod" => Environment::Production,
            custom => Environment::Custom(custom.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Environment::Development => "development",
            Environment::Testing => "testing",
            Environment::Staging => "staging",
            Environment::Production => "production",
            Environment::Custom(name) => name,
        }
    }

    /// Production and unknown environments require explicit opt-in
    pub fn is_safe_for_seeding(&self) -> bool {
        matches!(
            self,
            Environment::Development | Environment::Testing | Environment::Staging
        )
    }

    /// Resolve the environment from `SEEDBED_ENV` / `ENV` / `ENVIRONMENT`,
    /// defaulting to development
    pub fn current() -> Self {
        std::env::var("SEEDBED_ENV")
            .or_else(|_| std::env::var("ENV"))
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .map(|env| Environment::parse(&env))
            .unwrap_or(Environment::Development)
    }
}

/// How a seeder's run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedStatus {
    Completed,
    /// A required prerequisite table was empty; nothing was seeded
    SkippedMissingPrerequisite(EntityKind),
    /// The seeder is not registered for the active environment
    SkippedEnvironment,
}

/// Per-seeder outcome: how many rows were created, how many already existed
#[derive(Debug, Clone)]
pub struct SeedReport {
    pub seeder: String,
    pub created: usize,
    pub existing: usize,
    pub status: SeedStatus,
}

impl SeedReport {
    pub fn completed(seeder: impl Into<String>, created: usize, existing: usize) -> Self {
        Self {
            seeder: seeder.into(),
            created,
            existing,
            status: SeedStatus::Completed,
        }
    }

    pub fn skipped_missing(seeder: impl Into<String>, missing: EntityKind) -> Self {
        Self {
            seeder: seeder.into(),
            created: 0,
            existing: 0,
            status: SeedStatus::SkippedMissingPrerequisite(missing),
        }
    }

    pub fn skipped_environment(seeder: impl Into<String>) -> Self {
        Self {
            seeder: seeder.into(),
            created: 0,
            existing: 0,
            status: SeedStatus::SkippedEnvironment,
        }
    }
}

/// A unit that populates fixture and generated data for one entity type
#[async_trait]
pub trait Seeder: Send + Sync {
    /// Seeder name, used for dependency references and logging
    fn name(&self) -> &str;

    /// The entity kind this seeder writes
    fn target(&self) -> EntityKind;

    /// Environments where this seeder should run
    fn environments(&self) -> Vec<Environment> {
        vec![Environment::Development, Environment::Testing]
    }

    fn should_run(&self, env: &Environment) -> bool {
        self.environments().contains(env)
    }

    /// Names of seeders that must run before this one
    fn dependencies(&self) -> Vec<String> {
        vec![]
    }

    /// Tie-break within one dependency level (lower runs first)
    fn priority(&self) -> i32 {
        100
    }

    async fn run(&self, ctx: &mut SeedContext) -> SeedResult<SeedReport>;
}

impl std::fmt::Debug for dyn Seeder + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Seeder").field("name", &self.name()).finish()
    }
}
