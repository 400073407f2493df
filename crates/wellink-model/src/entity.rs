use serde::{Deserialize, Serialize};

use crate::enums::{UnitClass, WellType};
use crate::ids::{BaseKey, PermitNumber, UnitNumber};

/// A permitted well as delivered by upstream ingestion.
///
/// Geographic fields are kept raw; the normalizer canonicalises them at
/// index/probe time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Well {
    pub permit_number: PermitNumber,
    pub name: String,
    pub operator_id: String,
    pub well_type: WellType,
    pub county: String,
    pub section: String,
    pub township: String,
    pub range: String,
}

/// A tax-reporting production unit (one tract allocation of a lease).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionUnit {
    pub unit_number: UnitNumber,
    /// Lease identity; derived from the unit number unless supplied upstream.
    pub base_key: BaseKey,
    pub lease_name: String,
    pub operator_id: String,
    pub classification: UnitClass,
    pub county: String,
    pub section: String,
    pub township: String,
    pub range: String,
}

impl ProductionUnit {
    /// Creates a unit whose base key is derived from the unit number.
    pub fn new(unit_number: UnitNumber, lease_name: impl Into<String>) -> Self {
        let base_key = unit_number.base_key();
        Self {
            unit_number,
            base_key,
            lease_name: lease_name.into(),
            operator_id: String::new(),
            classification: UnitClass::Other,
            county: String::new(),
            section: String::new(),
            township: String::new(),
            range: String::new(),
        }
    }

    /// Overrides the derived base key with an upstream value.
    #[must_use]
    pub fn with_base_key(mut self, base_key: BaseKey) -> Self {
        self.base_key = base_key;
        self
    }

    #[must_use]
    pub fn with_operator(mut self, operator_id: impl Into<String>) -> Self {
        self.operator_id = operator_id.into();
        self
    }

    #[must_use]
    pub fn with_classification(mut self, classification: UnitClass) -> Self {
        self.classification = classification;
        self
    }

    /// Sets county, section, township and range in one go.
    #[must_use]
    pub fn with_location(
        mut self,
        county: impl Into<String>,
        section: impl Into<String>,
        township: impl Into<String>,
        range: impl Into<String>,
    ) -> Self {
        self.county = county.into();
        self.section = section.into();
        self.township = township.into();
        self.range = range.into();
        self
    }

    pub fn is_primary_allocation(&self) -> bool {
        self.unit_number.is_primary_allocation()
    }

    pub fn is_tract_allocation(&self) -> bool {
        self.unit_number.is_tract_allocation()
    }
}

impl Well {
    pub fn new(permit_number: PermitNumber, name: impl Into<String>) -> Self {
        Self {
            permit_number,
            name: name.into(),
            operator_id: String::new(),
            well_type: WellType::Other,
            county: String::new(),
            section: String::new(),
            township: String::new(),
            range: String::new(),
        }
    }

    #[must_use]
    pub fn with_operator(mut self, operator_id: impl Into<String>) -> Self {
        self.operator_id = operator_id.into();
        self
    }

    #[must_use]
    pub fn with_type(mut self, well_type: WellType) -> Self {
        self.well_type = well_type;
        self
    }

    /// Sets county, section, township and range in one go.
    #[must_use]
    pub fn with_location(
        mut self,
        county: impl Into<String>,
        section: impl Into<String>,
        township: impl Into<String>,
        range: impl Into<String>,
    ) -> Self {
        self.county = county.into();
        self.section = section.into();
        self.township = township.into();
        self.range = range.into();
        self
    }
}
