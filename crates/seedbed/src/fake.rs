//! Realistic fake data generation
//!
//! A [`Faker`] owns its RNG. Seed it for reproducible datasets, or build it
//! from entropy for throwaway data. All generators take `&mut self`; nothing
//! here reads ambient time or global state.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

const FIRST_NAMES: &[&str] = &[
    "Alice", "Bob", "Charlie", "Diana", "Eve", "Frank", "Grace", "Henry", "Ivy", "Jack", "Kate",
    "Liam", "Mia", "Noah", "Olivia", "Peter", "Quinn", "Ruby", "Sam", "Tina", "Uma", "Victor",
    "Willow", "Xander", "Yara", "Zoe",
];

const LAST_NAMES: &[&str] = &[
    "Anderson", "Brown", "Davis", "Evans", "Fisher", "Garcia", "Harris", "Johnson", "King",
    "Lopez", "Miller", "Nelson", "Oliveira", "Parker", "Roberts", "Smith", "Taylor", "Valdez",
    "Williams", "Young", "Zhang",
];

const COMPANY_PREFIXES: &[&str] = &[
    "Solar", "Verdant", "Northwind", "Helios", "Terra", "Aurora", "Cascade", "Meridian",
];

const COMPANY_SUFFIXES: &[&str] = &[
    "Energy", "Cooperative", "Power", "Renewables", "Holdings", "Partners", "Group", "Systems",
];

const EMAIL_DOMAINS: &[&str] = &["example.com", "test.org", "demo.net", "sample.io", "fake.dev"];

const STREETS: &[&str] = &[
    "Main St", "Oak Ave", "Elm Dr", "Park Blvd", "Cedar Ln", "Maple Way", "Pine St", "River Rd",
    "Hill Ave", "Lake Dr",
];

const CITIES: &[&str] = &[
    "Springfield", "Riverside", "Franklin", "Georgetown", "Fairview", "Madison", "Arlington",
    "Salem", "Richmond", "Columbia",
];

const COUNTRIES: &[&str] = &[
    "United States", "Canada", "United Kingdom", "Germany", "France", "Spain", "Netherlands",
    "Australia", "Japan", "Brazil",
];

const SENTENCE_SUBJECTS: &[&str] = &[
    "The cooperative",
    "The provider",
    "The member",
    "The platform",
    "The project",
];
const SENTENCE_VERBS: &[&str] = &["delivers", "tracks", "manages", "reports", "finances"];
const SENTENCE_OBJECTS: &[&str] = &[
    "renewable capacity",
    "consumption data",
    "community investments",
    "carbon offsets",
    "member contracts",
];

/// Fake data source with an explicitly owned RNG
pub struct Faker {
    rng: StdRng,
}

impl Faker {
    /// Deterministic faker; same seed gives the same stream of values
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Non-deterministic faker
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Random id drawn from this faker's RNG, so seeded runs mint stable ids
    pub fn uuid(&mut self) -> Uuid {
        let bytes: [u8; 16] = self.rng.gen();
        uuid::Builder::from_random_bytes(bytes).into_uuid()
    }

    pub fn range_i64(&mut self, min: i64, max: i64) -> i64 {
        self.rng.gen_range(min..=max)
    }

    pub fn range_f64(&mut self, min: f64, max: f64) -> f64 {
        self.rng.gen_range(min..max)
    }

    pub fn bool_with(&mut self, probability: f64) -> bool {
        self.rng.gen_bool(probability)
    }

    /// Uniform choice from a non-empty slice
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        items
            .choose(&mut self.rng)
            .expect("choose called on empty slice")
    }

    /// Weighted categorical choice; weights need not sum to anything
    pub fn weighted<'a, T>(&mut self, choices: &'a [(T, u32)]) -> &'a T {
        let total: u32 = choices.iter().map(|(_, w)| w).sum();
        debug_assert!(total > 0, "weighted called with zero total weight");
        let mut point = self.rng.gen_range(0..total);
        for (item, weight) in choices {
            if point < *weight {
                return item;
            }
            point -= weight;
        }
        &choices[choices.len() - 1].0
    }

    pub fn first_name(&mut self) -> String {
        (*self.choose(FIRST_NAMES)).to_string()
    }

    pub fn last_name(&mut self) -> String {
        (*self.choose(LAST_NAMES)).to_string()
    }

    pub fn full_name(&mut self) -> String {
        format!("{} {}", self.first_name(), self.last_name())
    }

    pub fn email(&mut self) -> String {
        let name = self.choose(FIRST_NAMES).to_lowercase();
        let number = self.range_i64(1, 999);
        let domain = *self.choose(EMAIL_DOMAINS);
        format!("{}{:03}@{}", name, number, domain)
    }

    pub fn company(&mut self) -> String {
        format!(
            "{} {}",
            self.choose(COMPANY_PREFIXES),
            self.choose(COMPANY_SUFFIXES)
        )
    }

    pub fn phone(&mut self) -> String {
        format!(
            "({}) {}-{}",
            self.range_i64(200, 999),
            self.range_i64(200, 999),
            self.range_i64(1000, 9999)
        )
    }

    pub fn street_address(&mut self) -> String {
        format!("{} {}", self.range_i64(1, 9999), self.choose(STREETS))
    }

    pub fn city(&mut self) -> String {
        (*self.choose(CITIES)).to_string()
    }

    pub fn country(&mut self) -> String {
        (*self.choose(COUNTRIES)).to_string()
    }

    pub fn sentence(&mut self) -> String {
        format!(
            "{} {} {}.",
            self.choose(SENTENCE_SUBJECTS),
            self.choose(SENTENCE_VERBS),
            self.choose(SENTENCE_OBJECTS)
        )
    }

    pub fn paragraph(&mut self) -> String {
        let count = self.range_i64(3, 6);
        let sentences: Vec<String> = (0..count).map(|_| self.sentence()).collect();
        sentences.join(" ")
    }

    pub fn url(&mut self) -> String {
        let domain = *self.choose(EMAIL_DOMAINS);
        let paths = ["/", "/home", "/dashboard", "/projects", "/reports"];
        format!("https://www.{}{}", domain, self.choose(&paths))
    }

    /// Slug-style identifier from a label, with a numeric suffix for spread
    pub fn slug(&mut self, label: &str) -> String {
        let base: String = label
            .to_lowercase()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
            .collect();
        format!("{}-{}", base.trim_matches('-'), self.range_i64(100, 999))
    }

    /// Money amount in integer cents
    pub fn price_cents(&mut self, min_cents: i64, max_cents: i64) -> i64 {
        self.range_i64(min_cents, max_cents)
    }

    /// Percentage with two-decimal precision
    pub fn percentage(&mut self, min: f64, max: f64) -> f64 {
        (self.range_f64(min, max) * 100.0).round() / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_fakers_produce_identical_streams() {
        let mut a = Faker::seeded(12345);
        let mut b = Faker::seeded(12345);
        for _ in 0..50 {
            assert_eq!(a.email(), b.email());
            assert_eq!(a.uuid(), b.uuid());
            assert_eq!(a.range_i64(0, 1_000_000), b.range_i64(0, 1_000_000));
        }
    }

    #[test]
    fn emails_are_well_formed() {
        let mut faker = Faker::seeded(7);
        for _ in 0..100 {
            let email = faker.email();
            assert!(email.contains('@'));
            assert!(email.contains('.'));
        }
    }

    #[test]
    fn weighted_never_picks_zero_weight() {
        let mut faker = Faker::seeded(9);
        let choices = [("common", 99u32), ("never", 0u32), ("rare", 1u32)];
        for _ in 0..500 {
            assert_ne!(*faker.weighted(&choices), "never");
        }
    }

    #[test]
    fn weighted_respects_heavy_bias() {
        let mut faker = Faker::seeded(11);
        let choices = [("heavy", 95u32), ("light", 5u32)];
        let heavy = (0..1000)
            .filter(|_| *faker.weighted(&choices) == "heavy")
            .count();
        assert!(heavy > 850, "heavy picked only {} times", heavy);
    }

    #[test]
    fn percentage_stays_in_bounds() {
        let mut faker = Faker::seeded(3);
        for _ in 0..100 {
            let p = faker.percentage(1.0, 15.0);
            assert!((1.0..15.0).contains(&p));
        }
    }

    #[test]
    fn slug_is_lowercase_ascii() {
        let mut faker = Faker::seeded(5);
        let slug = faker.slug("Community Solar!");
        assert!(slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
    }
}
