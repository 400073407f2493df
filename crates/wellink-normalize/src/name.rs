//! Lease and well name keys.

/// Minimum length of a usable normalized name.
pub const NAME_MIN_LEN: usize = 4;

/// Minimum length of a usable alpha-only name.
pub const ALPHA_MIN_LEN: usize = 5;

/// Names too generic to identify anything.
pub const NOISE_NAMES: &[&str] = &[
    "UNKNOWN",
    "TEST",
    "NONE",
    "NA",
    "NULL",
    "TBD",
    "NOTAVAILABLE",
    "UNNAMED",
    "NONAME",
    "VARIOUS",
];

const NOISE_PREFIXES: [&str; 2] = ["TRACT", "UNKNOWN"];

/// Legal/administrative words removed before composite scoring.
const SCRUB_TOKENS: &[&str] = &[
    "UNIT", "FEDERAL", "FED", "STATE", "ST", "LEASE", "LSE", "ESTATE", "EST", "ETAL",
];

/// Uppercases and removes every non-alphanumeric character.
pub fn normalize_name(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|ch| ch.to_ascii_uppercase())
        .collect()
}

/// [`normalize_name`] with digits removed as well.
pub fn alpha_name(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_alphabetic)
        .map(|ch| ch.to_ascii_uppercase())
        .collect()
}

/// True when a normalized name cannot serve as a matching key.
pub fn is_noise_name(normalized: &str) -> bool {
    is_noise(normalized, NAME_MIN_LEN)
}

/// True when an alpha-only name cannot serve as a matching key.
pub fn is_alpha_noise(alpha: &str) -> bool {
    is_noise(alpha, ALPHA_MIN_LEN)
}

fn is_noise(key: &str, min_len: usize) -> bool {
    key.len() < min_len
        || NOISE_NAMES.contains(&key)
        || NOISE_PREFIXES.iter().any(|prefix| key.starts_with(prefix))
        || key.chars().all(|ch| ch.is_ascii_digit())
}

/// Normalized name, or `None` when it is noise.
pub fn name_key(raw: &str) -> Option<String> {
    let key = normalize_name(raw);
    (!is_noise_name(&key)).then_some(key)
}

/// Alpha-only name, or `None` when it is noise.
pub fn alpha_key(raw: &str) -> Option<String> {
    let key = alpha_name(raw);
    (!is_alpha_noise(&key)).then_some(key)
}

/// Normalized name with scrub words (UNIT, STATE, LEASE, ...) removed as whole words.
pub fn weighted_key(raw: &str) -> String {
    let upper = raw.to_uppercase();
    let tokens: Vec<&str> = upper
        .split(|ch: char| !ch.is_ascii_alphanumeric())
        .filter(|token| !token.is_empty())
        .collect();
    let mut key = String::with_capacity(upper.len());
    let mut idx = 0;
    while idx < tokens.len() {
        let token = tokens[idx];
        if token == "ET" && tokens.get(idx + 1) == Some(&"AL") {
            idx += 2;
            continue;
        }
        if !SCRUB_TOKENS.contains(&token) {
            key.push_str(token);
        }
        idx += 1;
    }
    key
}

/// Operator identifiers compare trimmed and case-insensitively.
pub fn normalize_operator(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Concatenation of every digit run in a name (`"SMITH 2-10"` → `"210"`).
pub fn section_numbers(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Name decomposition used by composite scoring.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeightedName {
    /// Scrubbed, collapsed key.
    pub key: String,
    /// Key with digits removed.
    pub base: String,
    /// Digit runs of the key, concatenated.
    pub digits: String,
}

impl WeightedName {
    pub fn from_raw(raw: &str) -> Self {
        let key = weighted_key(raw);
        let base = key.chars().filter(char::is_ascii_alphabetic).collect();
        let digits = section_numbers(&key);
        Self { key, base, digits }
    }

    pub fn is_empty(&self) -> bool {
        self.key.is_empty()
    }
}
