//! Fixture catalog
//!
//! Hand-authored literal records for stable, realistic sample data. Each
//! fixture carries its natural key; seeders upsert them before generating
//! procedural rows, so re-runs never duplicate catalog entries.

use serde_json::{json, Map, Value};

use crate::record::NaturalKey;

/// One literal catalog entry: natural key plus a complete attribute map
#[derive(Debug, Clone)]
pub struct Fixture {
    pub key: NaturalKey,
    pub fields: Map<String, Value>,
}

impl Fixture {
    fn new(key_field: &str, body: Value) -> Self {
        let fields = body
            .as_object()
            .cloned()
            .expect("fixture body must be a JSON object");
        let key_value = fields
            .get(key_field)
            .cloned()
            .expect("fixture body must contain its own key field");
        Self {
            key: NaturalKey::new(key_field, key_value),
            fields,
        }
    }
}

pub fn user_fixtures() -> Vec<Fixture> {
    [
        ("Admin", "admin@seedbed.dev", "admin"),
        ("Maya Operator", "maya@seedbed.dev", "operator"),
        ("Jonas Support", "jonas@seedbed.dev", "support"),
    ]
    .into_iter()
    .map(|(name, email, role)| {
        Fixture::new(
            "email",
            json!({
                "name": name,
                "email": email,
                "role": role,
                "is_active": true,
            }),
        )
    })
    .collect()
}

pub fn organization_fixtures() -> Vec<Fixture> {
    [
        ("Helios Community Energy", "helios-community-energy", "cooperative"),
        ("Verdant Grid Partners", "verdant-grid-partners", "company"),
        ("Cascade Solar Collective", "cascade-solar-collective", "cooperative"),
        ("Northwind Renewables", "northwind-renewables", "company"),
    ]
    .into_iter()
    .map(|(name, slug, org_type)| {
        Fixture::new(
            "slug",
            json!({
                "name": name,
                "slug": slug,
                "organization_type": org_type,
                "is_active": true,
            }),
        )
    })
    .collect()
}

pub fn provider_fixtures() -> Vec<Fixture> {
    [
        ("PRV-GREEN", "GreenVolt Utilities"),
        ("PRV-SOLAR", "SolarStream Power"),
        ("PRV-WIND", "WindReach Energy"),
    ]
    .into_iter()
    .map(|(code, name)| {
        Fixture::new(
            "provider_code",
            json!({
                "provider_code": code,
                "name": name,
                "is_active": true,
            }),
        )
    })
    .collect()
}

pub fn product_fixtures() -> Vec<Fixture> {
    [
        ("TAR-FIXED-12", "Fixed 12-month tariff", "fixed"),
        ("TAR-FIXED-24", "Fixed 24-month tariff", "fixed"),
        ("TAR-INDEXED", "Indexed wholesale tariff", "indexed"),
        ("TAR-SOLAR-NET", "Solar net-metering plan", "net_metering"),
    ]
    .into_iter()
    .map(|(code, name, pricing)| {
        Fixture::new(
            "product_code",
            json!({
                "product_code": code,
                "name": name,
                "pricing_model": pricing,
                "is_active": true,
            }),
        )
    })
    .collect()
}

/// The fourteen catalog affiliates, `AF001`..`AF014`
pub fn affiliate_fixtures() -> Vec<Fixture> {
    let entries = [
        ("AF001", "Bright Futures Media", "gold", 12.5),
        ("AF002", "EcoLiving Blog", "silver", 8.0),
        ("AF003", "GreenTech Review", "gold", 12.5),
        ("AF004", "Sustainable Homes Network", "bronze", 5.0),
        ("AF005", "Solar Savvy", "silver", 8.0),
        ("AF006", "The Energy Shift", "bronze", 5.0),
        ("AF007", "Carbon Counter", "silver", 8.0),
        ("AF008", "Renewable Roundup", "gold", 12.5),
        ("AF009", "Watt Matters", "bronze", 5.0),
        ("AF010", "Grid Local", "silver", 8.0),
        ("AF011", "CleanSwitch", "bronze", 5.0),
        ("AF012", "Community Power Weekly", "gold", 12.5),
        ("AF013", "OffGrid Digest", "bronze", 5.0),
        ("AF014", "FutureProof Energy", "silver", 8.0),
    ];
    entries
        .into_iter()
        .map(|(code, name, tier, commission)| {
            Fixture::new(
                "affiliate_code",
                json!({
                    "affiliate_code": code,
                    "name": name,
                    "tier": tier,
                    "commission_rate": commission,
                    "status": "active",
                }),
            )
        })
        .collect()
}

/// Top-level navigation menus; children are generated and backfilled
pub fn menu_fixtures() -> Vec<Fixture> {
    [
        ("home", "Home", 1),
        ("projects", "Projects", 2),
        ("invest", "Invest", 3),
        ("community", "Community", 4),
        ("about", "About", 5),
    ]
    .into_iter()
    .map(|(slug, title, position)| {
        Fixture::new(
            "slug",
            json!({
                "slug": slug,
                "title": title,
                "position": position,
                "parent_id": null,
            }),
        )
    })
    .collect()
}
