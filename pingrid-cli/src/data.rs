//! Seeded sample datasets.

use clap::ValueEnum;
use pingrid_lib::column::ColumnSet;
use pingrid_lib::column::ColumnSpec;
use pingrid_lib::error::ConfigError;
use pingrid_lib::model::FieldConcat;
use pingrid_lib::model::Row;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::seq::SliceRandom;

const COLUMN_WIDTH: u32 = 160;
const CONTROL_WIDTH: u32 = 160;

const FIRST_NAMES: &[&str] = &[
    "Ada", "Alan", "Alice", "Amara", "Bjorn", "Carmen", "Chen", "Dara", "Diego", "Elena", "Emeka",
    "Farah", "Grace", "Hana", "Hugo", "Ines", "Ivan", "Jonas", "Kaito", "Lars", "Leila", "Lucia",
    "Maya", "Mateo", "Nadia", "Noah", "Olga", "Omar", "Priya", "Quinn", "Rosa", "Sami", "Sofia",
    "Tanner", "Tomas", "Uma", "Vera", "Wei", "Yara", "Zoe",
];

const LAST_NAMES: &[&str] = &[
    "Adams", "Bauer", "Costa", "Dubois", "Eriksen", "Fischer", "Garcia", "Hansen", "Ibrahim",
    "Jensen", "Kowalski", "Larsen", "Linsley", "Moreau", "Nakamura", "Novak", "Okafor", "Olsen",
    "Petrov", "Quinto", "Rossi", "Sato", "Schmidt", "Silva", "Tanaka", "Ueda", "Vargas", "Weber",
    "Xu", "Yilmaz", "Zhang", "Zimmer",
];

const PERSON_STATUSES: &[&str] = &["relationship", "complicated", "single"];

const DEVICE_PREFIXES: &[&str] = &["alpha", "bravo", "delta", "echo", "kilo", "sierra", "tango"];
const DEVICE_TYPES: &[&str] = &["sensor", "gateway", "camera", "thermostat", "router"];
const LOCATIONS: &[&str] = &[
    "Amsterdam", "Berlin", "Lagos", "Lisbon", "Montreal", "Osaka", "Oslo", "Sydney", "Valencia",
];
const DEVICE_STATUSES: &[&str] = &["online", "offline", "maintenance"];

/// The sample datasets the CLI can generate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Schema {
    /// People keyed by first and last name.
    People,
    /// Devices keyed by name and type.
    Devices,
}

impl Schema {
    /// Column set of the schema, with pin and select controls in front.
    pub fn columns(self) -> Result<ColumnSet, ConfigError> {
        let columns = match self {
            Schema::People => vec![
                ColumnSpec::new("firstName", COLUMN_WIDTH)
                    .header("First N")
                    .no_hide()
                    .no_sort()
                    .no_filter(),
                ColumnSpec::new("lastName", COLUMN_WIDTH).header("Last N"),
                ColumnSpec::new("age", COLUMN_WIDTH).header("Age"),
                ColumnSpec::new("visits", COLUMN_WIDTH).header("Visits"),
                ColumnSpec::new("status", COLUMN_WIDTH).header("Status"),
                ColumnSpec::new("progress", COLUMN_WIDTH).header("Profile Progress"),
            ],
            Schema::Devices => vec![
                ColumnSpec::new("deviceName", COLUMN_WIDTH)
                    .header("Device Name")
                    .no_hide()
                    .no_sort()
                    .no_filter(),
                ColumnSpec::new("deviceType", COLUMN_WIDTH).header("Device Type"),
                ColumnSpec::new("location", COLUMN_WIDTH).header("Location"),
                ColumnSpec::new("connections", COLUMN_WIDTH).header("Connections"),
                ColumnSpec::new("status", COLUMN_WIDTH).header("Status"),
                ColumnSpec::new("batteryLevel", COLUMN_WIDTH).header("Battery Level"),
            ],
        };
        ColumnSet::with_controls(columns, CONTROL_WIDTH)
    }

    /// Row identity of the schema.
    pub fn identity(self) -> FieldConcat {
        match self {
            Schema::People => FieldConcat::new(["firstName", "lastName"]),
            Schema::Devices => FieldConcat::new(["deviceName", "deviceType"]),
        }
    }

    /// Generates `count` rows, deterministic for a given `seed`.
    pub fn generate(self, count: usize, seed: u64) -> Vec<Row> {
        let mut rng = StdRng::seed_from_u64(seed);
        match self {
            Schema::People => people(&mut rng, count),
            Schema::Devices => devices(&mut rng, count),
        }
    }
}

fn pick(rng: &mut StdRng, values: &[&'static str]) -> &'static str {
    values.choose(rng).copied().unwrap_or_default()
}

/// Names are drawn without replacement until every pair is used, so ids
/// stay unique for up to `FIRST_NAMES.len() * LAST_NAMES.len()` rows.
fn people(rng: &mut StdRng, count: usize) -> Vec<Row> {
    let mut pairs: Vec<usize> = (0..FIRST_NAMES.len() * LAST_NAMES.len()).collect();
    pairs.shuffle(rng);
    if count > pairs.len() {
        log::warn!(
            "{} people requested but only {} unique names exist; ids will repeat",
            count,
            pairs.len()
        );
    }

    (0..count)
        .map(|i| {
            let pair = pairs[i % pairs.len()];
            Row::new()
                .set("firstName", FIRST_NAMES[pair / LAST_NAMES.len()])
                .set("lastName", LAST_NAMES[pair % LAST_NAMES.len()])
                .set("age", rng.random_range(0..40i64))
                .set("visits", rng.random_range(0..1000i64))
                .set("progress", rng.random_range(0..100i64))
                .set("status", pick(rng, PERSON_STATUSES))
        })
        .collect()
}

fn devices(rng: &mut StdRng, count: usize) -> Vec<Row> {
    (0..count)
        .map(|i| {
            let name = format!("{}-{:04}", pick(rng, DEVICE_PREFIXES), i);
            Row::new()
                .set("deviceName", name)
                .set("deviceType", pick(rng, DEVICE_TYPES))
                .set("location", pick(rng, LOCATIONS))
                .set("connections", rng.random_range(0..50i64))
                .set("status", pick(rng, DEVICE_STATUSES))
                .set("batteryLevel", rng.random_range(0..100i64))
        })
        .collect()
}
