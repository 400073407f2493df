//! Normalization functions shared by every linking strategy.
//!
//! This crate turns raw registry fields into comparable keys:
//! - **geo**: county, township, range, section and the combined [`Trs`] locator
//! - **name**: lease/well name keys, alpha-only keys, noise detection and the
//!   scrubbed key used by composite scoring
//!
//! All functions are pure and allocation-light; none of them fail. Inputs that
//! cannot be interpreted come back as `None` or an empty string.

pub mod geo;
pub mod name;

pub use geo::{Trs, normalize_county, normalize_range, normalize_township, parse_section};
pub use name::{
    ALPHA_MIN_LEN, NAME_MIN_LEN, NOISE_NAMES, WeightedName, alpha_key, alpha_name, is_alpha_noise,
    is_noise_name, name_key, normalize_name, normalize_operator, section_numbers, weighted_key,
};
