//! Geographic normalization: county and Public Land Survey locators.

const SECTION_WORDS: [&str; 20] = [
    "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "eleven",
    "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen", "nineteen",
    "twenty",
];

/// Normalizes a county name.
///
/// Keeps letters only (which drops a numeric county-code prefix such as
/// `"017 - Garvin"`), uppercases and strips a trailing `COUNTY` suffix, so
/// `"Le Flore County"` and `"LEFLORE"` compare equal. Returns an empty string
/// when nothing is left.
pub fn normalize_county(raw: &str) -> String {
    let mut letters: String = raw
        .chars()
        .filter(char::is_ascii_alphabetic)
        .map(|ch| ch.to_ascii_uppercase())
        .collect();
    while let Some(stripped) = letters.strip_suffix("COUNTY") {
        let keep = stripped.len();
        letters.truncate(keep);
    }
    letters
}

/// Normalizes a township to `<number><N|S>`, defaulting the direction to `N`.
pub fn normalize_township(raw: &str) -> Option<String> {
    normalize_survey_line(raw, 'T', ['N', 'S'], 'N')
}

/// Normalizes a range to `<number><E|W>`, defaulting the direction to `W`.
pub fn normalize_range(raw: &str) -> Option<String> {
    normalize_survey_line(raw, 'R', ['E', 'W'], 'W')
}

fn normalize_survey_line(
    raw: &str,
    prefix: char,
    directions: [char; 2],
    default_direction: char,
) -> Option<String> {
    let upper = raw.trim().to_uppercase();
    let body = upper.strip_prefix(prefix).unwrap_or(&upper).trim_start();
    let digits: String = body.chars().take_while(char::is_ascii_digit).collect();
    let number: u32 = digits.parse().ok()?;
    if number == 0 {
        return None;
    }
    // First letter after the number is the direction; any other letter is invalid.
    let direction = match body[digits.len()..].chars().find(char::is_ascii_alphabetic) {
        None => default_direction,
        Some(ch) if directions.contains(&ch) => ch,
        Some(_) => return None,
    };
    Some(format!("{number}{direction}"))
}

/// Parses a section number (1–36).
///
/// Accepts a leading integer (`"12"`, `"12 NE"`) and falls back to the first
/// English number word `one`..`twenty` among the words (`"Sec. twelve"`).
/// Anything else, including out-of-range numbers, is `None`.
pub fn parse_section(raw: &str) -> Option<u8> {
    let trimmed = raw.trim();
    let digits: String = trimmed.chars().take_while(char::is_ascii_digit).collect();
    let value = if digits.is_empty() {
        trimmed
            .split(|ch: char| !ch.is_ascii_alphabetic())
            .filter(|word| !word.is_empty())
            .find_map(|word| {
                let word = word.to_lowercase();
                SECTION_WORDS
                    .iter()
                    .position(|candidate| *candidate == word)
            })
            .map(|idx| idx as u32 + 1)?
    } else {
        digits.parse::<u32>().ok()?
    };
    if (1..=36).contains(&value) {
        u8::try_from(value).ok()
    } else {
        None
    }
}

/// Section / township / range locator. Each component may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Trs {
    pub section: Option<u8>,
    pub township: Option<String>,
    pub range: Option<String>,
}

impl Trs {
    pub fn from_raw(section: &str, township: &str, range: &str) -> Self {
        Self {
            section: parse_section(section),
            township: normalize_township(township),
            range: normalize_range(range),
        }
    }

    /// All three components are present.
    pub fn is_complete(&self) -> bool {
        self.section.is_some() && self.township.is_some() && self.range.is_some()
    }

    /// Both locators are complete and identical.
    pub fn matches_exactly(&self, other: &Trs) -> bool {
        self.is_complete() && self == other
    }

    /// Number of components that are present on both sides and equal.
    pub fn matching_components(&self, other: &Trs) -> usize {
        let section = matches!((self.section, other.section), (Some(a), Some(b)) if a == b);
        let township = both_equal(self.township.as_deref(), other.township.as_deref());
        let range = both_equal(self.range.as_deref(), other.range.as_deref());
        [section, township, range]
            .into_iter()
            .filter(|matched| *matched)
            .count()
    }
}

fn both_equal(left: Option<&str>, right: Option<&str>) -> bool {
    matches!((left, right), (Some(a), Some(b)) if a == b)
}
