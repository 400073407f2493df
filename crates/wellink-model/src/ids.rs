#![deny(unsafe_code)]

use std::fmt;

use crate::ModelError;

/// Drilling permit number. Globally unique for a well.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct PermitNumber(String);

impl PermitNumber {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ModelError::EmptyPermitNumber);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PermitNumber {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PermitNumber> for String {
    fn from(value: PermitNumber) -> Self {
        value.0
    }
}

impl fmt::Display for PermitNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Segment widths of a full-length unit number: county, lease, sub, merge.
const SEGMENT_WIDTHS: [usize; 4] = [3, 6, 1, 4];

/// Production unit number (`CCC-LLLLLL-S-MMMM`).
///
/// Full-length numbers are canonicalised to the dashed form, whether they arrive
/// dashed or as 14 contiguous digits. Anything else is kept verbatim as an opaque
/// identifier with no merge segment.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct UnitNumber {
    value: String,
    /// Byte offset of the dash preceding the merge segment.
    merge_at: Option<usize>,
}

impl UnitNumber {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ModelError::EmptyUnitNumber);
        }
        match full_length_segments(trimmed) {
            Some(segments) => {
                let canonical = segments.join("-");
                let merge_at = canonical.len() - SEGMENT_WIDTHS[3] - 1;
                Ok(Self {
                    value: canonical,
                    merge_at: Some(merge_at),
                })
            }
            None => Ok(Self {
                value: trimmed.to_string(),
                merge_at: None,
            }),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// True when all four segments are present.
    pub fn is_full_length(&self) -> bool {
        self.merge_at.is_some()
    }

    /// The merge (tract allocation) segment, if the number is full-length.
    pub fn merge_segment(&self) -> Option<&str> {
        self.merge_at.map(|idx| &self.value[idx + 1..])
    }

    /// The unit number without its merge segment.
    pub fn base_key(&self) -> BaseKey {
        match self.merge_at {
            Some(idx) => BaseKey(self.value[..idx].to_string()),
            None => BaseKey(self.value.clone()),
        }
    }

    /// The primary allocation of a lease carries an all-zero merge segment.
    pub fn is_primary_allocation(&self) -> bool {
        self.merge_segment()
            .is_some_and(|merge| merge.chars().all(|ch| ch == '0'))
    }

    /// A tract allocation carries a non-zero merge segment.
    pub fn is_tract_allocation(&self) -> bool {
        self.merge_segment()
            .is_some_and(|merge| merge.chars().any(|ch| ch != '0'))
    }
}

fn full_length_segments(raw: &str) -> Option<Vec<&str>> {
    if raw.contains('-') {
        let parts: Vec<&str> = raw.split('-').map(str::trim).collect();
        if parts.len() != SEGMENT_WIDTHS.len() {
            return None;
        }
        let valid = parts.iter().zip(SEGMENT_WIDTHS).all(|(part, width)| {
            part.len() == width && part.chars().all(|ch| ch.is_ascii_digit())
        });
        return valid.then_some(parts);
    }
    let total: usize = SEGMENT_WIDTHS.iter().sum();
    if raw.len() != total || !raw.chars().all(|ch| ch.is_ascii_digit()) {
        return None;
    }
    let mut parts = Vec::with_capacity(SEGMENT_WIDTHS.len());
    let mut start = 0;
    for width in SEGMENT_WIDTHS {
        parts.push(&raw[start..start + width]);
        start += width;
    }
    Some(parts)
}

impl TryFrom<String> for UnitNumber {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UnitNumber> for String {
    fn from(value: UnitNumber) -> Self {
        value.value
    }
}

impl fmt::Display for UnitNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// Lease identity independent of tract subdivision.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct BaseKey(String);

impl BaseKey {
    /// Builds a base key from an explicit upstream value. Blank input yields `None`.
    pub fn explicit(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BaseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
