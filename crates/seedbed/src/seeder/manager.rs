//! Seeder orchestration
//!
//! Runs registered seeders sequentially in dependency order. Missing
//! prerequisite data inside a seeder is a local skip; unknown dependencies
//! and cycles are configuration errors that fail the run before anything is
//! written.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::error::{SeedError, SeedResult};
use crate::seeder::context::SeedContext;
use crate::seeder::{Environment, SeedReport, SeedStatus, Seeder};

/// Aggregated outcome of one orchestrated run
#[derive(Debug, Default)]
pub struct RunSummary {
    pub reports: Vec<SeedReport>,
}

impl RunSummary {
    pub fn total_created(&self) -> usize {
        self.reports.iter().map(|r| r.created).sum()
    }

    pub fn total_existing(&self) -> usize {
        self.reports.iter().map(|r| r.existing).sum()
    }

    pub fn skipped(&self) -> usize {
        self.reports
            .iter()
            .filter(|r| r.status != SeedStatus::Completed)
            .count()
    }
}

/// Registry and runner for seeders
#[derive(Default)]
pub struct SeederManager {
    seeders: Vec<Box<dyn Seeder>>,
}

impl SeederManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<S: Seeder + 'static>(mut self, seeder: S) -> Self {
        self.seeders.push(Box::new(seeder));
        self
    }

    pub fn names(&self) -> Vec<&str> {
        self.seeders.iter().map(|s| s.name()).collect()
    }

    /// All registered seeders in resolved execution order
    pub fn execution_order(&self) -> SeedResult<Vec<&dyn Seeder>> {
        self.resolve_dependencies(self.seeders.iter().map(|s| s.as_ref()).collect())
    }

    /// Run every applicable seeder for the given environment
    pub async fn run_for_environment(
        &self,
        ctx: &mut SeedContext,
        env: &Environment,
    ) -> SeedResult<RunSummary> {
        if !env.is_safe_for_seeding() {
            return Err(SeedError::UnsafeEnvironment(env.as_str().to_string()));
        }
        self.run_unchecked(ctx, env).await
    }

    /// Run without the environment safety gate. Explicit opt-in path for
    /// production data loads.
    pub async fn run_forced(
        &self,
        ctx: &mut SeedContext,
        env: &Environment,
    ) -> SeedResult<RunSummary> {
        tracing::warn!(environment = env.as_str(), "forced seeding run");
        self.run_unchecked(ctx, env).await
    }

    /// Run a named subset (plus nothing else; dependencies must already be
    /// satisfied by data or be part of the subset)
    pub async fn run_only(
        &self,
        ctx: &mut SeedContext,
        env: &Environment,
        names: &[String],
    ) -> SeedResult<RunSummary> {
        let known: HashSet<&str> = self.seeders.iter().map(|s| s.name()).collect();
        for name in names {
            if !known.contains(name.as_str()) {
                return Err(SeedError::Configuration(format!(
                    "unknown seeder '{}'",
                    name
                )));
            }
        }

        let selected: Vec<&dyn Seeder> = self
            .seeders
            .iter()
            .map(|s| s.as_ref())
            .filter(|s| names.iter().any(|n| n == s.name()))
            .collect();
        let ordered = self.resolve_subset(selected)?;
        self.execute(ctx, env, ordered).await
    }

    async fn run_unchecked(
        &self,
        ctx: &mut SeedContext,
        env: &Environment,
    ) -> SeedResult<RunSummary> {
        let ordered = self.execution_order()?;
        self.execute(ctx, env, ordered).await
    }

    async fn execute(
        &self,
        ctx: &mut SeedContext,
        env: &Environment,
        ordered: Vec<&dyn Seeder>,
    ) -> SeedResult<RunSummary> {
        tracing::info!(
            environment = env.as_str(),
            seeders = ordered.len(),
            "starting seeding run"
        );

        let mut summary = RunSummary::default();
        for seeder in ordered {
            if !seeder.should_run(env) {
                tracing::debug!(seeder = seeder.name(), "not registered for environment");
                summary
                    .reports
                    .push(SeedReport::skipped_environment(seeder.name()));
                continue;
            }

            tracing::info!(seeder = seeder.name(), "running seeder");
            let report = seeder.run(ctx).await?;
            match &report.status {
                SeedStatus::Completed => tracing::info!(
                    seeder = seeder.name(),
                    created = report.created,
                    existing = report.existing,
                    "seeder completed"
                ),
                SeedStatus::SkippedMissingPrerequisite(kind) => tracing::warn!(
                    seeder = seeder.name(),
                    missing = %kind,
                    "seeder skipped: prerequisite table is empty"
                ),
                SeedStatus::SkippedEnvironment => {}
            }
            summary.reports.push(report);
        }

        tracing::info!(
            created = summary.total_created(),
            existing = summary.total_existing(),
            skipped = summary.skipped(),
            "seeding run finished"
        );
        Ok(summary)
    }

    /// Kahn's algorithm over the full registry; every declared dependency
    /// must be registered
    fn resolve_dependencies<'a>(
        &self,
        seeders: Vec<&'a dyn Seeder>,
    ) -> SeedResult<Vec<&'a dyn Seeder>> {
        let mut seeder_map: HashMap<String, &'a dyn Seeder> = HashMap::new();
        let mut dependencies: HashMap<String, Vec<String>> = HashMap::new();
        let mut in_degree: HashMap<String, usize> = HashMap::new();

        for seeder in &seeders {
            let name = seeder.name().to_string();
            if seeder_map.insert(name.clone(), *seeder).is_some() {
                return Err(SeedError::Configuration(format!(
                    "duplicate seeder name '{}'",
                    name
                )));
            }
            dependencies.insert(name.clone(), seeder.dependencies());
            in_degree.insert(name, 0);
        }

        for (seeder_name, deps) in &dependencies {
            for dep in deps {
                if !seeder_map.contains_key(dep) {
                    return Err(SeedError::Configuration(format!(
                        "seeder '{}' depends on '{}', which is not registered",
                        seeder_name, dep
                    )));
                }
                if let Some(degree) = in_degree.get_mut(seeder_name) {
                    *degree += 1;
                }
            }
        }

        let mut queue: VecDeque<String> = VecDeque::new();
        let mut roots: Vec<String> = in_degree
            .iter()
            .filter(|(_, &degree)| degree == 0)
            .map(|(name, _)| name.clone())
            .collect();
        // Stable seeding order across runs
        roots.sort_by_key(|name| {
            (
                seeder_map.get(name).map(|s| s.priority()).unwrap_or(100),
                name.clone(),
            )
        });
        queue.extend(roots);

        let mut result: Vec<&'a dyn Seeder> = Vec::new();
        let mut processed: HashSet<String> = HashSet::new();

        while let Some(current) = queue.pop_front() {
            if !processed.insert(current.clone()) {
                continue;
            }
            if let Some(seeder) = seeder_map.get(&current) {
                result.push(*seeder);
            }

            let mut released: Vec<String> = Vec::new();
            for (dependent, deps) in &dependencies {
                if deps.contains(&current) {
                    if let Some(degree) = in_degree.get_mut(dependent) {
                        if *degree > 0 {
                            *degree -= 1;
                            if *degree == 0 && !processed.contains(dependent) {
                                released.push(dependent.clone());
                            }
                        }
                    }
                }
            }
            released.sort_by_key(|name| {
                (
                    seeder_map.get(name).map(|s| s.priority()).unwrap_or(100),
                    name.clone(),
                )
            });
            queue.extend(released);
        }

        if result.len() != seeders.len() {
            let unprocessed: Vec<String> = seeders
                .iter()
                .map(|s| s.name().to_string())
                .filter(|name| !processed.contains(name))
                .collect();
            return Err(SeedError::CircularDependency(unprocessed.join(", ")));
        }

        Ok(result)
    }

    /// Dependency order within a subset: edges to seeders outside the subset
    /// are ignored (their data may already be present)
    fn resolve_subset<'a>(&self, seeders: Vec<&'a dyn Seeder>) -> SeedResult<Vec<&'a dyn Seeder>> {
        struct Scoped<'a> {
            inner: &'a dyn Seeder,
            deps: Vec<String>,
        }

        let names: HashSet<String> = seeders.iter().map(|s| s.name().to_string()).collect();
        let scoped: Vec<Scoped<'a>> = seeders
            .iter()
            .map(|s| Scoped {
                inner: *s,
                deps: s
                    .dependencies()
                    .into_iter()
                    .filter(|d| names.contains(d))
                    .collect(),
            })
            .collect();

        // Simple repeated-pass ordering; subsets are small
        let mut ordered: Vec<&'a dyn Seeder> = Vec::new();
        let mut placed: HashSet<String> = HashSet::new();
        let mut remaining: Vec<&Scoped<'a>> = scoped.iter().collect();
        while !remaining.is_empty() {
            let before = remaining.len();
            remaining.retain(|s| {
                if s.deps.iter().all(|d| placed.contains(d)) {
                    placed.insert(s.inner.name().to_string());
                    ordered.push(s.inner);
                    false
                } else {
                    true
                }
            });
            if remaining.len() == before {
                let stuck: Vec<String> =
                    remaining.iter().map(|s| s.inner.name().to_string()).collect();
                return Err(SeedError::CircularDependency(stuck.join(", ")));
            }
        }
        Ok(ordered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityKind;
    use crate::fake::Faker;
    use crate::store::MemoryStore;
    use async_trait::async_trait;
    use std::sync::Arc;

    struct Stub {
        name: &'static str,
        deps: Vec<String>,
        priority: i32,
    }

    impl Stub {
        fn new(name: &'static str, deps: &[&str]) -> Self {
            Self {
                name,
                deps: deps.iter().map(|d| d.to_string()).collect(),
                priority: 100,
            }
        }
    }

    #[async_trait]
    impl Seeder for Stub {
        fn name(&self) -> &str {
            self.name
        }

        fn target(&self) -> EntityKind {
            EntityKind::User
        }

        fn dependencies(&self) -> Vec<String> {
            self.deps.clone()
        }

        fn priority(&self) -> i32 {
            self.priority
        }

        async fn run(&self, _ctx: &mut SeedContext) -> SeedResult<SeedReport> {
            Ok(SeedReport::completed(self.name, 1, 0))
        }
    }

    fn ctx() -> SeedContext {
        SeedContext::new(Arc::new(MemoryStore::new()), Faker::seeded(1))
    }

    #[test]
    fn dependencies_order_execution() {
        let manager = SeederManager::new()
            .add(Stub::new("affiliates", &["users"]))
            .add(Stub::new("users", &[]))
            .add(Stub::new("invoices", &["users", "affiliates"]));

        let order: Vec<&str> = manager
            .execution_order()
            .unwrap()
            .iter()
            .map(|s| s.name())
            .collect();
        assert_eq!(order, vec!["users", "affiliates", "invoices"]);
    }

    #[test]
    fn unknown_dependency_is_a_configuration_error() {
        let manager = SeederManager::new().add(Stub::new("affiliates", &["users"]));
        let err = manager.execution_order().unwrap_err();
        assert!(matches!(err, SeedError::Configuration(_)));
    }

    #[test]
    fn cycles_are_detected() {
        let manager = SeederManager::new()
            .add(Stub::new("a", &["b"]))
            .add(Stub::new("b", &["a"]));
        let err = manager.execution_order().unwrap_err();
        assert!(matches!(err, SeedError::CircularDependency(_)));
    }

    #[test]
    fn priority_breaks_ties_between_roots() {
        let mut low = Stub::new("low", &[]);
        low.priority = 10;
        let manager = SeederManager::new().add(Stub::new("later", &[])).add(low);
        let order: Vec<&str> = manager
            .execution_order()
            .unwrap()
            .iter()
            .map(|s| s.name())
            .collect();
        assert_eq!(order[0], "low");
    }

    #[tokio::test]
    async fn production_requires_forced_run() {
        let manager = SeederManager::new().add(Stub::new("users", &[]));
        let mut context = ctx();
        let err = manager
            .run_for_environment(&mut context, &Environment::Production)
            .await
            .unwrap_err();
        assert!(matches!(err, SeedError::UnsafeEnvironment(_)));

        let summary = manager
            .run_forced(&mut context, &Environment::Production)
            .await
            .unwrap();
        // Stub only registers for dev/test, so the forced run skips it
        assert_eq!(summary.skipped(), 1);
    }

    #[tokio::test]
    async fn run_only_rejects_unknown_names() {
        let manager = SeederManager::new().add(Stub::new("users", &[]));
        let mut context = ctx();
        let err = manager
            .run_only(
                &mut context,
                &Environment::Testing,
                &["nope".to_string()],
            )
            .await
            .unwrap_err();
        assert!(matches!(err, SeedError::Configuration(_)));
    }

    #[tokio::test]
    async fn run_only_orders_within_subset() {
        let manager = SeederManager::new()
            .add(Stub::new("users", &[]))
            .add(Stub::new("affiliates", &["users"]));
        let mut context = ctx();
        let summary = manager
            .run_only(
                &mut context,
                &Environment::Testing,
                &["affiliates".to_string(), "users".to_string()],
            )
            .await
            .unwrap();
        let names: Vec<&str> = summary.reports.iter().map(|r| r.seeder.as_str()).collect();
        assert_eq!(names, vec!["users", "affiliates"]);
    }
}
