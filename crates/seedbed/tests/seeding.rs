//! End-to-end seeding runs against the in-memory store

use std::sync::Arc;

use seedbed::{
    default_manager, EntityKind, Environment, Faker, FixedClock, MemoryStore, SeedContext,
    SeedOptions, SeedStatus, Seeder, Store,
};

fn context(store: Arc<MemoryStore>, seed: u64) -> SeedContext {
    SeedContext::new(store, Faker::seeded(seed))
        .with_clock(Arc::new(FixedClock::at_date(2024, 6, 1)))
        .with_options(SeedOptions::default().with_default_count(20))
}

async fn seeded_store(seed: u64) -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    let mut ctx = context(store.clone(), seed);
    default_manager()
        .run_for_environment(&mut ctx, &Environment::Testing)
        .await
        .expect("full seeding run");
    store
}

#[tokio::test]
async fn full_run_populates_every_entity_kind() {
    let store = seeded_store(1).await;
    for kind in EntityKind::ALL {
        let count = store.count(kind).await.unwrap();
        assert!(count > 0, "{} is empty after a full run", kind);
    }
}

#[tokio::test]
async fn carbon_credit_breakdown_sums_to_total() {
    let store = seeded_store(2).await;
    let credits = store.all(EntityKind::CarbonCredit).await.unwrap();
    assert!(!credits.is_empty());
    for credit in credits {
        let total = credit.i64_field("total_tonnes").unwrap();
        let available = credit.i64_field("available_tonnes").unwrap();
        let retired = credit.i64_field("retired_tonnes").unwrap();
        let transferred = credit.i64_field("transferred_tonnes").unwrap();
        assert_eq!(available + retired + transferred, total);
        assert!(available >= 0 && retired >= 0 && transferred >= 0);
    }
}

#[tokio::test]
async fn bond_and_invoice_amounts_sum_exactly() {
    let store = seeded_store(3).await;

    for bond in store.all(EntityKind::EnergyBond).await.unwrap() {
        let total = bond.i64_field("total_amount_cents").unwrap();
        let repaid = bond.i64_field("repaid_amount_cents").unwrap();
        let outstanding = bond.i64_field("outstanding_amount_cents").unwrap();
        assert_eq!(repaid + outstanding, total);
    }

    for invoice in store.all(EntityKind::Invoice).await.unwrap() {
        let subtotal = invoice.i64_field("subtotal_cents").unwrap();
        let tax = invoice.i64_field("tax_cents").unwrap();
        let total = invoice.i64_field("total_cents").unwrap();
        assert_eq!(subtotal + tax, total);
    }
}

#[tokio::test]
async fn generated_timestamps_are_ordered() {
    let store = seeded_store(4).await;

    for bond in store.all(EntityKind::EnergyBond).await.unwrap() {
        let issue = bond.datetime_field("issue_date").unwrap();
        let maturity = bond.datetime_field("maturity_date").unwrap();
        assert!(issue < maturity);
    }

    for contract in store.all(EntityKind::EnergyContract).await.unwrap() {
        let start = contract.datetime_field("start_date").unwrap();
        let end = contract.datetime_field("end_date").unwrap();
        assert!(start < end);
    }

    for invoice in store.all(EntityKind::Invoice).await.unwrap() {
        let issued = invoice.datetime_field("issued_at").unwrap();
        let due = invoice.datetime_field("due_at").unwrap();
        assert!(issued < due);
    }

    for affiliate in store.all(EntityKind::Affiliate).await.unwrap() {
        if let Some(approved) = affiliate.datetime_field("approved_at") {
            let submitted = affiliate.datetime_field("submitted_at").unwrap();
            assert!(approved >= submitted);
        }
    }
}

#[tokio::test]
async fn rerun_with_same_seed_adds_no_rows() {
    let store = Arc::new(MemoryStore::new());
    let manager = default_manager();

    let mut first = context(store.clone(), 7);
    manager
        .run_for_environment(&mut first, &Environment::Testing)
        .await
        .unwrap();
    let counts_after_first: Vec<usize> = {
        let mut counts = Vec::new();
        for kind in EntityKind::ALL {
            counts.push(store.count(kind).await.unwrap());
        }
        counts
    };

    // Fresh context, same seed: identical natural keys, so everything upserts
    let mut second = context(store.clone(), 7);
    let summary = manager
        .run_for_environment(&mut second, &Environment::Testing)
        .await
        .unwrap();
    assert_eq!(summary.total_created(), 0);

    for (kind, expected) in EntityKind::ALL.iter().zip(counts_after_first) {
        assert_eq!(store.count(*kind).await.unwrap(), expected, "{}", kind);
    }
}

#[tokio::test]
async fn affiliate_fixtures_stay_at_fourteen_across_reruns() {
    let store = Arc::new(MemoryStore::new());
    let manager = default_manager();
    let only = vec!["users".to_string(), "affiliates".to_string()];

    let mut first = context(store.clone(), 11);
    manager
        .run_only(&mut first, &Environment::Testing, &only)
        .await
        .unwrap();
    let total_after_first = store.count(EntityKind::Affiliate).await.unwrap();

    let mut second = context(store.clone(), 11);
    let summary = manager
        .run_only(&mut second, &Environment::Testing, &only)
        .await
        .unwrap();

    assert_eq!(summary.total_created(), 0);
    assert_eq!(store.count(EntityKind::Affiliate).await.unwrap(), total_after_first);

    let affiliates = store.all(EntityKind::Affiliate).await.unwrap();
    let fixture_rows = affiliates
        .iter()
        .filter(|a| a.str_field("affiliate_code").unwrap().starts_with("AF0"))
        .count();
    assert_eq!(fixture_rows, 14);
}

#[tokio::test]
async fn affiliates_skip_cleanly_without_users() {
    let store = Arc::new(MemoryStore::new());
    let mut ctx = context(store.clone(), 13);
    let summary = default_manager()
        .run_only(&mut ctx, &Environment::Testing, &["affiliates".to_string()])
        .await
        .unwrap();

    assert_eq!(summary.reports.len(), 1);
    assert_eq!(
        summary.reports[0].status,
        SeedStatus::SkippedMissingPrerequisite(EntityKind::User)
    );
    assert_eq!(store.count(EntityKind::Affiliate).await.unwrap(), 0);
}

#[tokio::test]
async fn contracts_skip_cleanly_when_any_prerequisite_is_empty() {
    let store = Arc::new(MemoryStore::new());
    let manager = default_manager();

    // Users present, providers and products missing
    let mut ctx = context(store.clone(), 17);
    manager
        .run_only(&mut ctx, &Environment::Testing, &["users".to_string()])
        .await
        .unwrap();

    let mut ctx = context(store.clone(), 17);
    let summary = manager
        .run_only(
            &mut ctx,
            &Environment::Testing,
            &["energy_contracts".to_string()],
        )
        .await
        .unwrap();

    assert!(matches!(
        summary.reports[0].status,
        SeedStatus::SkippedMissingPrerequisite(_)
    ));
    assert_eq!(store.count(EntityKind::EnergyContract).await.unwrap(), 0);
}

#[tokio::test]
async fn menu_backfill_leaves_no_orphans() {
    let store = seeded_store(19).await;
    let menus = store.all(EntityKind::Menu).await.unwrap();
    let ids: Vec<String> = menus.iter().map(|m| m.id.to_string()).collect();

    let mut linked = 0;
    for menu in &menus {
        if let Some(parent_id) = menu.str_field("parent_id") {
            assert!(
                ids.contains(&parent_id.to_string()),
                "menu {} points at missing parent {}",
                menu.str_field("slug").unwrap(),
                parent_id
            );
            linked += 1;
        }
    }
    assert!(linked > 0, "no generated menu got a parent link");
}

#[tokio::test]
async fn resolved_menus_drop_the_slug_marker() {
    let store = seeded_store(41).await;
    for menu in store.all(EntityKind::Menu).await.unwrap() {
        if menu.get("parent_id").map(|v| !v.is_null()).unwrap_or(false) {
            assert!(
                menu.get("parent_slug").is_none(),
                "menu {} kept its scratch marker",
                menu.str_field("slug").unwrap()
            );
        }
    }
}

#[tokio::test]
async fn comment_threads_reference_existing_parents() {
    let store = seeded_store(23).await;
    let comments = store.all(EntityKind::Comment).await.unwrap();
    let ids: Vec<String> = comments.iter().map(|c| c.id.to_string()).collect();

    for comment in &comments {
        if let Some(parent_id) = comment.str_field("parent_id") {
            assert!(ids.contains(&parent_id.to_string()));
        }
        let subject = comment.ref_field("subject").unwrap();
        assert!(
            subject.kind == EntityKind::Organization || subject.kind == EntityKind::Product,
            "unexpected comment subject kind {}",
            subject.kind
        );
        let found = store.find_by_id(subject.kind, subject.id).await.unwrap();
        assert!(found.is_some(), "dangling comment subject in {}", subject.kind);
    }
}

#[tokio::test]
async fn comment_subjects_cover_organizations_and_products() {
    let store = seeded_store(43).await;
    let comments = store.all(EntityKind::Comment).await.unwrap();
    let kinds: Vec<EntityKind> = comments
        .iter()
        .map(|c| c.ref_field("subject").unwrap().kind)
        .collect();
    assert!(kinds.contains(&EntityKind::Organization));
    assert!(kinds.contains(&EntityKind::Product));
}

#[test]
fn audit_logs_run_after_their_subject_pools() {
    let order: Vec<String> = default_manager()
        .execution_order()
        .unwrap()
        .iter()
        .map(|s| s.name().to_string())
        .collect();
    let position = |name: &str| order.iter().position(|n| n == name).unwrap();
    assert!(position("audit_logs") > position("organizations"));
    assert!(position("audit_logs") > position("products"));
    assert!(position("audit_logs") > position("energy_contracts"));
}

#[tokio::test]
async fn first_run_audit_subjects_include_contracts() {
    let store = seeded_store(47).await;
    let kinds: Vec<EntityKind> = store
        .all(EntityKind::AuditLog)
        .await
        .unwrap()
        .iter()
        .map(|log| log.ref_field("subject").unwrap().kind)
        .collect();
    assert!(kinds.contains(&EntityKind::EnergyContract));
}

#[tokio::test]
async fn audit_subjects_resolve_to_existing_records() {
    let store = seeded_store(29).await;
    for log in store.all(EntityKind::AuditLog).await.unwrap() {
        let subject = log.ref_field("subject").unwrap();
        let found = store.find_by_id(subject.kind, subject.id).await.unwrap();
        assert!(found.is_some(), "dangling audit subject in {}", subject.kind);
    }
}

#[tokio::test]
async fn same_seed_and_clock_produce_identical_snapshots() {
    let a = seeded_store(31).await;
    let b = seeded_store(31).await;
    assert_eq!(a.snapshot(), b.snapshot());

    let c = seeded_store(32).await;
    assert_ne!(a.snapshot(), c.snapshot());
}

#[tokio::test]
async fn production_environment_is_refused() {
    let store = Arc::new(MemoryStore::new());
    let mut ctx = context(store, 37);
    let err = default_manager()
        .run_for_environment(&mut ctx, &Environment::Production)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("production"));
}
