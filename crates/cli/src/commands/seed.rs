//! `seedbed run` and `seedbed list`

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use seedbed::{
    default_manager, Environment, Faker, MemoryStore, SeedContext, SeedOptions, SeedStatus, Seeder,
};

pub struct RunArgs {
    pub env: Option<String>,
    pub seed: Option<u64>,
    pub count: usize,
    pub only: Vec<String>,
    pub fresh: bool,
    pub force: bool,
    pub out: Option<PathBuf>,
}

pub async fn run(args: RunArgs) -> anyhow::Result<()> {
    let environment = args
        .env
        .as_deref()
        .map(Environment::parse)
        .unwrap_or_else(Environment::current);

    if !environment.is_safe_for_seeding() {
        if !args.force {
            anyhow::bail!(
                "refusing to seed '{}' without --force",
                environment.as_str()
            );
        }
        tracing::warn!(
            environment = environment.as_str(),
            "seeding an unsafe environment because --force was given"
        );
    }
    tracing::debug!(
        environment = environment.as_str(),
        seed = ?args.seed,
        count = args.count,
        "starting seedbed run"
    );

    let faker = match args.seed {
        Some(seed) => Faker::seeded(seed),
        None => Faker::from_entropy(),
    };

    let store = Arc::new(MemoryStore::new());
    let manager = default_manager();
    let mut ctx = SeedContext::new(store.clone(), faker)
        .with_options(SeedOptions::default().with_default_count(args.count));

    println!("🌱 Seeding ({} environment)", environment.as_str());
    if let Some(seed) = args.seed {
        println!("   rng seed: {}", seed);
    }

    if args.fresh {
        let cleared = clear_targets(&manager, store.as_ref(), &args.only).await?;
        println!("   cleared {} existing rows", cleared);
    }

    let summary = if args.only.is_empty() {
        if environment.is_safe_for_seeding() {
            manager.run_for_environment(&mut ctx, &environment).await?
        } else {
            manager.run_forced(&mut ctx, &environment).await?
        }
    } else {
        manager.run_only(&mut ctx, &environment, &args.only).await?
    };

    println!();
    for report in &summary.reports {
        match &report.status {
            SeedStatus::Completed => println!(
                "   ✅ {:<18} created {:>5}, existing {:>5}",
                report.seeder, report.created, report.existing
            ),
            SeedStatus::SkippedMissingPrerequisite(kind) => println!(
                "   ⚠️  {:<18} skipped (no {} rows)",
                report.seeder, kind
            ),
            SeedStatus::SkippedEnvironment => println!(
                "   ⏭️  {:<18} skipped (not registered for {})",
                report.seeder,
                environment.as_str()
            ),
        }
    }
    println!();
    println!(
        "   total: {} created, {} already present, {} skipped",
        summary.total_created(),
        summary.total_existing(),
        summary.skipped()
    );

    if let Some(path) = args.out {
        let snapshot = store.snapshot();
        let body = serde_json::to_string_pretty(&snapshot)?;
        std::fs::write(&path, body)
            .with_context(|| format!("writing snapshot to {}", path.display()))?;
        println!("   snapshot written to {}", path.display());
    }

    Ok(())
}

async fn clear_targets(
    manager: &seedbed::SeederManager,
    store: &MemoryStore,
    only: &[String],
) -> anyhow::Result<usize> {
    use seedbed::Store;

    let mut cleared = 0;
    for seeder in manager.execution_order()? {
        if !only.is_empty() && !only.iter().any(|n| n == seeder.name()) {
            continue;
        }
        cleared += store.delete_all(seeder.target()).await?;
    }
    Ok(cleared)
}

pub fn list() -> anyhow::Result<()> {
    let manager = default_manager();
    println!("Registered seeders (execution order):");
    for seeder in manager.execution_order()? {
        let deps = seeder.dependencies();
        if deps.is_empty() {
            println!("   {:<18} -> {}", seeder.name(), seeder.target());
        } else {
            println!(
                "   {:<18} -> {}  (after: {})",
                seeder.name(),
                seeder.target(),
                deps.join(", ")
            );
        }
    }
    Ok(())
}
