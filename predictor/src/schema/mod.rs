pub mod validator;

use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Serialize, Serializer, ser::SerializeMap};

use crate::error::PredictorError;

pub use validator::{check, validate};

/// Ocean proximity of a block, the categorical input of the model.
///
/// On the wire it travels one-hot encoded as five integer fields, see [`Location::one_hot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Location {
    #[default]
    LessThanHourOcean,
    Inland,
    Island,
    NearBay,
    NearOcean,
}

impl Location {
    /// Every option, in wire order.
    pub const ALL: [Location; 5] = [
        Location::LessThanHourOcean,
        Location::Inland,
        Location::Island,
        Location::NearBay,
        Location::NearOcean,
    ];

    /// The wire key of this option, also used as its display name.
    pub fn label(self) -> &'static str {
        match self {
            Location::LessThanHourOcean => "<1H OCEAN",
            Location::Inland => "INLAND",
            Location::Island => "ISLAND",
            Location::NearBay => "NEAR BAY",
            Location::NearOcean => "NEAR OCEAN",
        }
    }

    /// Encodes this option as five `(key, bit)` pairs in wire order.
    ///
    /// # Returns
    /// Exactly one pair carries `1`, the one whose key is [`Location::label`].
    pub fn one_hot(self) -> [(&'static str, u8); 5] {
        Self::ALL.map(|option| (option.label(), u8::from(option == self)))
    }

    /// The next option, wrapping around after the last one.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// The previous option, wrapping around before the first one.
    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Location {
    type Err = PredictorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|option| option.label() == s)
            .ok_or_else(|| PredictorError::UnknownCategory(s.to_string()))
    }
}

/// Whether a feature accepts any real number or only whole numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureKind {
    Real,
    Count,
}

/// The eight free-form numeric inputs of the form, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Feature {
    Longitude,
    Latitude,
    HousingMedianAge,
    TotalRooms,
    TotalBedrooms,
    Population,
    Households,
    MedianIncome,
}

impl Feature {
    pub const ALL: [Feature; 8] = [
        Feature::Longitude,
        Feature::Latitude,
        Feature::HousingMedianAge,
        Feature::TotalRooms,
        Feature::TotalBedrooms,
        Feature::Population,
        Feature::Households,
        Feature::MedianIncome,
    ];

    /// The field name in the submitted record.
    pub fn key(self) -> &'static str {
        match self {
            Feature::Longitude => "longitude",
            Feature::Latitude => "latitude",
            Feature::HousingMedianAge => "housing_median_age",
            Feature::TotalRooms => "total_rooms",
            Feature::TotalBedrooms => "total_bedrooms",
            Feature::Population => "population",
            Feature::Households => "households",
            Feature::MedianIncome => "median_income",
        }
    }

    /// Human readable name shown next to the input.
    pub fn label(self) -> &'static str {
        match self {
            Feature::Longitude => "Longitude",
            Feature::Latitude => "Latitude",
            Feature::HousingMedianAge => "Housing Median Age",
            Feature::TotalRooms => "Total Rooms",
            Feature::TotalBedrooms => "Total Bedrooms",
            Feature::Population => "Population",
            Feature::Households => "Households",
            Feature::MedianIncome => "Median Income",
        }
    }

    pub fn kind(self) -> FeatureKind {
        match self {
            Feature::Longitude | Feature::Latitude | Feature::MedianIncome => FeatureKind::Real,
            _ => FeatureKind::Count,
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A single typed feature value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Real(f64),
    Count(i64),
}

/// A schema-valid record, ready to be sent to the prediction endpoint.
///
/// Counts are signed: the schema only requires whole numbers, it never checks ranges.
/// Whole numbers beyond the `i64` range saturate to `i64::MIN`/`i64::MAX`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    pub longitude: f64,
    pub latitude: f64,
    pub housing_median_age: i64,
    pub total_rooms: i64,
    pub total_bedrooms: i64,
    pub population: i64,
    pub households: i64,
    pub median_income: f64,
    pub location: Location,
}

impl Record {
    /// Reads a feature back as a typed [`Value`].
    pub fn get(&self, feature: Feature) -> Value {
        match feature {
            Feature::Longitude => Value::Real(self.longitude),
            Feature::Latitude => Value::Real(self.latitude),
            Feature::HousingMedianAge => Value::Count(self.housing_median_age),
            Feature::TotalRooms => Value::Count(self.total_rooms),
            Feature::TotalBedrooms => Value::Count(self.total_bedrooms),
            Feature::Population => Value::Count(self.population),
            Feature::Households => Value::Count(self.households),
            Feature::MedianIncome => Value::Real(self.median_income),
        }
    }
}

// Flat object: the eight features followed by the one-hot location fields.
impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = Feature::ALL.len() + Location::ALL.len();
        let mut map = serializer.serialize_map(Some(len))?;

        for feature in Feature::ALL {
            map.serialize_entry(feature.key(), &self.get(feature))?;
        }

        for (key, bit) in self.location.one_hot() {
            map.serialize_entry(key, &bit)?;
        }

        map.end()
    }
}

/// A candidate record as typed by the user: raw text per feature plus the chosen location.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecordDraft {
    pub values: BTreeMap<Feature, String>,
    pub location: Location,
}

impl RecordDraft {
    /// The raw text for `feature`, empty when it was never typed.
    pub fn raw(&self, feature: Feature) -> &str {
        self.values.get(&feature).map(String::as_str).unwrap_or("")
    }
}

/// Validation messages keyed by the offending feature.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldErrors(BTreeMap<Feature, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, feature: Feature, msg: impl Into<String>) {
        self.0.insert(feature, msg.into());
    }

    pub fn remove(&mut self, feature: Feature) -> Option<String> {
        self.0.remove(&feature)
    }

    pub fn get(&self, feature: Feature) -> Option<&str> {
        self.0.get(&feature).map(String::as_str)
    }

    pub fn contains(&self, feature: Feature) -> bool {
        self.0.contains_key(&feature)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Feature, &str)> {
        self.0.iter().map(|(f, msg)| (*f, msg.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (feature, msg)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{feature}: {msg}")?;
        }
        Ok(())
    }
}
