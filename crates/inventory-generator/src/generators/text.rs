//! Text value generators backed by small fixed vocabularies.

use rand::seq::SliceRandom;
use rand::Rng;

const WORDS: &[&str] = &[
    "alpha", "amber", "anchor", "apple", "arrow", "atlas", "bamboo", "beacon", "birch", "blade",
    "bloom", "bolt", "breeze", "bridge", "cactus", "canyon", "carbon", "cedar", "cloud", "cobalt",
    "comet", "coral", "crystal", "delta", "drift", "eagle", "echo", "ember", "falcon", "fern",
    "flint", "forest", "frost", "galaxy", "garnet", "glacier", "harbor", "hazel", "horizon",
    "indigo", "iris", "jade", "jasper", "kernel", "lagoon", "lantern", "lotus", "maple", "meadow",
    "mesa", "nova", "oak", "onyx", "orbit", "pebble", "pine", "prism", "quartz", "raven", "reef",
    "ridge", "river", "sage", "shadow", "sierra", "spark", "spruce", "summit", "tide", "timber",
    "topaz", "tundra", "valley", "vertex", "willow", "zephyr",
];

const FIRST_NAMES: &[&str] = &[
    "Alex", "Ana", "Bruno", "Carla", "Chris", "Dana", "Diego", "Elena", "Felipe", "Grace", "Hugo",
    "Ines", "Jamie", "Julia", "Kai", "Laura", "Lucas", "Maria", "Noah", "Olivia", "Pedro",
    "Quinn", "Rafael", "Sofia", "Taylor", "Thiago", "Uma", "Victor", "Wendy", "Yara",
];

const LAST_NAMES: &[&str] = &[
    "Almeida", "Brown", "Carvalho", "Costa", "Davis", "Ferreira", "Garcia", "Johnson", "Lima",
    "Lopez", "Martins", "Miller", "Moore", "Nguyen", "Oliveira", "Pereira", "Ribeiro", "Santos",
    "Silva", "Smith", "Souza", "Taylor", "Walker", "Wilson",
];

const COMPANY_SUFFIXES: &[&str] = &["Inc", "LLC", "Group", "and Sons", "Ltd", "PLC", "Co"];

const STREET_SUFFIXES: &[&str] = &["Street", "Avenue", "Road", "Lane", "Boulevard", "Way"];

const CITIES: &[&str] = &[
    "Springfield", "Riverside", "Fairview", "Madison", "Georgetown", "Franklin", "Clinton",
    "Salem", "Arlington", "Ashland", "Dover", "Milton",
];

const STATES: &[&str] = &["CA", "NY", "TX", "FL", "WA", "IL", "OR", "MA", "CO", "GA"];

fn pick<'a, R: Rng>(rng: &mut R, pool: &[&'a str]) -> &'a str {
    pool.choose(rng).copied().unwrap_or_default()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// A single lowercase word.
pub fn generate_word<R: Rng>(rng: &mut R) -> String {
    pick(rng, WORDS).to_string()
}

/// Between `min` and `max` words (inclusive).
pub fn generate_words<R: Rng>(rng: &mut R, min: usize, max: usize) -> Vec<String> {
    let count = rng.gen_range(min..=max.max(min));
    (0..count).map(|_| generate_word(rng)).collect()
}

/// Sentences of filler text no longer than `max_chars`.
pub fn generate_text<R: Rng>(rng: &mut R, max_chars: usize) -> String {
    let mut text = String::new();
    loop {
        let words = generate_words(rng, 4, 10);
        let sentence = format!("{}.", capitalize(&words.join(" ")));
        let extra = if text.is_empty() { 0 } else { 1 };
        if text.len() + extra + sentence.len() > max_chars {
            break;
        }
        if extra == 1 {
            text.push(' ');
        }
        text.push_str(&sentence);
    }
    if text.is_empty() {
        // A single sentence did not fit; fall back to a truncated word list.
        let mut words = generate_words(rng, 1, 3).join(" ");
        words.truncate(max_chars);
        text = words;
    }
    text
}

/// First and last name.
pub fn generate_person_name<R: Rng>(rng: &mut R) -> String {
    format!("{} {}", pick(rng, FIRST_NAMES), pick(rng, LAST_NAMES))
}

/// A company name such as "Silva Group".
pub fn generate_company<R: Rng>(rng: &mut R) -> String {
    format!("{} {}", pick(rng, LAST_NAMES), pick(rng, COMPANY_SUFFIXES))
}

/// A contact address on the company's domain.
pub fn generate_company_email<R: Rng>(rng: &mut R, company: &str) -> String {
    let domain: String = company
        .split_whitespace()
        .next()
        .unwrap_or("store")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_lowercase();
    let mailbox = ["info", "contact", "sales", "support"]
        .choose(rng)
        .copied()
        .unwrap_or("info");
    format!("{mailbox}@{domain}.com")
}

/// Street address with city, state and ZIP code.
pub fn generate_address<R: Rng>(rng: &mut R) -> String {
    format!(
        "{} {} {}, {}, {} {:05}",
        rng.gen_range(1..=9999),
        capitalize(pick(rng, WORDS)),
        pick(rng, STREET_SUFFIXES),
        pick(rng, CITIES),
        pick(rng, STATES),
        rng.gen_range(0..100_000)
    )
}

/// North American style phone number.
pub fn generate_phone_number<R: Rng>(rng: &mut R) -> String {
    format!(
        "({:03}) {:03}-{:04}",
        rng.gen_range(200..1000),
        rng.gen_range(200..1000),
        rng.gen_range(0..10_000)
    )
}
