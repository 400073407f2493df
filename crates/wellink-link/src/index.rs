//! Normalized views of wells and units plus the candidate lookup maps.

use std::collections::BTreeMap;

use wellink_model::{BaseKey, LinkKey, ProductionUnit, UnitNumber, Well};
use wellink_normalize::{
    Trs, WeightedName, alpha_key, name_key, normalize_county, normalize_operator,
};

use crate::ledger::LinkLedger;

/// A well with its matching keys computed once.
#[derive(Debug, Clone)]
pub struct WellView<'a> {
    pub well: &'a Well,
    pub county: String,
    /// Normalized name, `None` when noise.
    pub name_key: Option<String>,
    /// Digit-stripped name, `None` when noise.
    pub alpha_key: Option<String>,
    pub weighted: WeightedName,
    pub operator: String,
    pub trs: Trs,
}

impl<'a> WellView<'a> {
    pub fn new(well: &'a Well) -> Self {
        Self {
            well,
            county: normalize_county(&well.county),
            name_key: name_key(&well.name),
            alpha_key: alpha_key(&well.name),
            weighted: WeightedName::from_raw(&well.name),
            operator: normalize_operator(&well.operator_id),
            trs: Trs::from_raw(&well.section, &well.township, &well.range),
        }
    }
}

/// A production unit with its matching keys computed once.
#[derive(Debug, Clone)]
pub struct UnitView<'a> {
    pub unit: &'a ProductionUnit,
    pub county: String,
    pub name_key: Option<String>,
    pub alpha_key: Option<String>,
    pub weighted: WeightedName,
    pub operator: String,
    pub trs: Trs,
}

impl<'a> UnitView<'a> {
    pub fn new(unit: &'a ProductionUnit) -> Self {
        Self {
            unit,
            county: normalize_county(&unit.county),
            name_key: name_key(&unit.lease_name),
            alpha_key: alpha_key(&unit.lease_name),
            weighted: WeightedName::from_raw(&unit.lease_name),
            operator: normalize_operator(&unit.operator_id),
            trs: Trs::from_raw(&unit.section, &unit.township, &unit.range),
        }
    }
}

/// Key of the operator+TRS map: operator, section, township, range.
pub type OperatorTrsKey = (String, u8, String, String);

/// Lookup maps over the unit collection, keyed on normalized fields.
///
/// Every map holds positions into the unit list in input order, so probes are
/// deterministic for a given input.
#[derive(Debug, Default)]
pub struct CandidateIndex<'a> {
    units: Vec<UnitView<'a>>,
    by_unit_number: BTreeMap<&'a UnitNumber, usize>,
    by_county_name: BTreeMap<(String, String), Vec<usize>>,
    by_county_alpha: BTreeMap<(String, String), Vec<usize>>,
    by_operator_trs: BTreeMap<OperatorTrsKey, Vec<usize>>,
    by_county: BTreeMap<String, Vec<usize>>,
}

impl<'a> CandidateIndex<'a> {
    pub fn build(units: &'a [ProductionUnit]) -> Self {
        let mut index = Self {
            units: units.iter().map(UnitView::new).collect(),
            ..Self::default()
        };
        for position in 0..index.units.len() {
            index.insert(position);
        }
        index
    }

    fn insert(&mut self, position: usize) {
        let unit: &'a ProductionUnit = self.units[position].unit;
        self.by_unit_number
            .entry(&unit.unit_number)
            .or_insert(position);
        let view = &self.units[position];
        // County gates only the county-keyed maps.
        if !view.county.is_empty() {
            self.by_county
                .entry(view.county.clone())
                .or_default()
                .push(position);
            if let Some(name) = &view.name_key {
                self.by_county_name
                    .entry((view.county.clone(), name.clone()))
                    .or_default()
                    .push(position);
            }
            if let Some(alpha) = &view.alpha_key {
                self.by_county_alpha
                    .entry((view.county.clone(), alpha.clone()))
                    .or_default()
                    .push(position);
            }
        }
        if let Some(key) = operator_trs_key(&view.operator, &view.trs) {
            let base_key = &unit.base_key;
            let slot = self.by_operator_trs.entry(key).or_default();
            // One candidate per lease; the primary allocation wins when present.
            match slot
                .iter()
                .position(|&other| &self.units[other].unit.base_key == base_key)
            {
                Some(existing) => {
                    let incumbent = self.units[slot[existing]].unit;
                    if unit.is_primary_allocation() && !incumbent.is_primary_allocation() {
                        slot[existing] = position;
                    }
                }
                None => slot.push(position),
            }
        }
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn unit(&self, position: usize) -> &UnitView<'a> {
        &self.units[position]
    }

    pub fn units(&self) -> impl Iterator<Item = &UnitView<'a>> {
        self.units.iter()
    }

    /// First unit carrying this unit number.
    pub fn find(&self, unit_number: &UnitNumber) -> Option<&UnitView<'a>> {
        self.by_unit_number
            .get(unit_number)
            .map(|&position| &self.units[position])
    }

    /// Lease identity of a unit number: the unit's own base key when it is
    /// known, otherwise the key derived from a full-length number.
    pub fn base_key_of(&self, unit_number: &UnitNumber) -> Option<BaseKey> {
        if !unit_number.is_full_length() {
            return None;
        }
        Some(match self.find(unit_number) {
            Some(view) => view.unit.base_key.clone(),
            None => unit_number.base_key(),
        })
    }

    /// Pairs in the ledger grouped by the lease identity of their unit.
    /// Pairs whose unit number is not full-length are left out.
    pub fn by_base_key<'l>(
        &self,
        ledger: &'l LinkLedger,
    ) -> BTreeMap<BaseKey, Vec<&'l LinkKey>> {
        let mut grouped: BTreeMap<BaseKey, Vec<&'l LinkKey>> = BTreeMap::new();
        for key in ledger.pairs() {
            if let Some(base_key) = self.base_key_of(&key.unit_number) {
                grouped.entry(base_key).or_default().push(key);
            }
        }
        grouped
    }

    pub fn by_county_name(&self, county: &str, name: &str) -> &[usize] {
        lookup(&self.by_county_name, county, name)
    }

    pub fn by_county_alpha(&self, county: &str, alpha: &str) -> &[usize] {
        lookup(&self.by_county_alpha, county, alpha)
    }

    /// Units sharing operator and complete TRS, at most one per lease.
    pub fn by_operator_trs(&self, operator: &str, trs: &Trs) -> &[usize] {
        operator_trs_key(operator, trs)
            .and_then(|key| self.by_operator_trs.get(&key))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn by_county(&self, county: &str) -> &[usize] {
        self.by_county
            .get(county)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

fn lookup<'m>(
    map: &'m BTreeMap<(String, String), Vec<usize>>,
    county: &str,
    key: &str,
) -> &'m [usize] {
    if county.is_empty() {
        return &[];
    }
    map.get(&(county.to_string(), key.to_string()))
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn operator_trs_key(operator: &str, trs: &Trs) -> Option<OperatorTrsKey> {
    if operator.is_empty() {
        return None;
    }
    match (trs.section, &trs.township, &trs.range) {
        (Some(section), Some(township), Some(range)) => Some((
            operator.to_string(),
            section,
            township.clone(),
            range.clone(),
        )),
        _ => None,
    }
}
