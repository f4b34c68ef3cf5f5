/// Employer directory generator for Inclusive Match
///
/// Writes a synthetic employer directory in the CSV layout the service loads.
///
/// Run: cargo run --bin generate-employers -- [count] [output] [seed]

use inclusive_match::models::{AccommodationType, Industry, WorkPreference};
use std::error::Error;
use std::fs::File;
use std::io::BufWriter;

const DEFAULT_COUNT: usize = 200;
const DEFAULT_OUTPUT: &str = "data/employers_database.csv";
const DEFAULT_SEED: u64 = 0x5eed_1e55;

const NAME_PREFIXES: &[&str] = &[
    "Bright", "Open", "North", "Clear", "Summit", "Harbor", "Cedar", "Beacon",
    "Evergreen", "Keystone", "Lattice", "Meridian", "Pioneer", "Riverside", "Unity",
];

const NAME_SUFFIXES: &[&str] = &[
    "Labs", "Works", "Systems", "Partners", "Group", "Collective", "Health",
    "Solutions", "Industries", "Co",
];

const COMPANY_SIZES: &[&str] = &["small", "medium", "large"];

/// SplitMix64, so a seed always reproduces the same directory
struct Rng {
    state: u64,
}

impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }

    fn below(&mut self, max: usize) -> usize {
        (self.next_u64() % max as u64) as usize
    }

    fn choice<'a, T>(&mut self, options: &'a [T]) -> &'a T {
        &options[self.below(options.len())]
    }

    fn chance(&mut self, percent: u64) -> bool {
        self.next_u64() % 100 < percent
    }
}

#[derive(serde::Serialize)]
struct EmployerRow {
    name: String,
    company_size: &'static str,
    industry: &'static str,
    remote_policy: &'static str,
    available_accommodations: String,
}

fn generate_row(rng: &mut Rng, index: usize) -> EmployerRow {
    let name = format!(
        "{} {} {}",
        rng.choice(NAME_PREFIXES),
        rng.choice(NAME_SUFFIXES),
        index + 1
    );

    // Each accommodation is offered independently, roughly 40% of the time
    let offered: Vec<String> = AccommodationType::ALL
        .iter()
        .filter(|_| rng.chance(40))
        .map(|a| format!("'{}'", a))
        .collect();

    EmployerRow {
        name,
        company_size: *rng.choice(COMPANY_SIZES),
        industry: rng.choice(Industry::ALL).as_str(),
        remote_policy: rng.choice(WorkPreference::ALL).as_str(),
        available_accommodations: format!("[{}]", offered.join(", ")),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let mut args = std::env::args().skip(1);
    let count = match args.next() {
        Some(raw) => raw.parse::<usize>()?,
        None => DEFAULT_COUNT,
    };
    let output = args.next().unwrap_or_else(|| DEFAULT_OUTPUT.to_string());
    let seed = match args.next() {
        Some(raw) => raw.parse::<u64>()?,
        None => DEFAULT_SEED,
    };

    println!("Generating {} employers (seed {})...", count, seed);

    let mut rng = Rng::new(seed);
    let mut writer = csv::Writer::from_writer(BufWriter::new(File::create(&output)?));
    for index in 0..count {
        writer.serialize(generate_row(&mut rng, index))?;
    }
    writer.flush()?;

    println!("Wrote {}", output);
    Ok(())
}
