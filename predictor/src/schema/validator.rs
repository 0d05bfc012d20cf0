use super::{Feature, FeatureKind, FieldErrors, Record, RecordDraft, Value};

pub const NOT_A_NUMBER: &str = "Expected number, received nan";
pub const NOT_AN_INTEGER: &str = "Expected integer, received float";

/// Checks a single raw input against the rule for `feature`.
///
/// # Arguments
/// * `feature` - Which input the text belongs to, decides between real and count rules.
/// * `raw` - The text exactly as typed, surrounding whitespace is ignored.
///
/// # Returns
/// The typed value or the message to show next to the input.
pub fn check(feature: Feature, raw: &str) -> Result<Value, String> {
    match feature.kind() {
        FeatureKind::Real => parse_real(raw).map(Value::Real),
        FeatureKind::Count => parse_count(raw).map(Value::Count),
    }
}

fn parse_real(raw: &str) -> Result<f64, String> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|x| x.is_finite())
        .ok_or_else(|| NOT_A_NUMBER.to_string())
}

/// Any finite whole number passes; magnitudes past the `i64` range saturate.
fn parse_count(raw: &str) -> Result<i64, String> {
    let number = parse_real(raw)?;
    if number.fract() != 0.0 {
        return Err(NOT_AN_INTEGER.to_string());
    }
    Ok(number as i64)
}

/// Collects per-feature messages while a record is assembled field by field.
struct Collector<'a> {
    draft: &'a RecordDraft,
    errors: FieldErrors,
}

impl Collector<'_> {
    fn real(&mut self, feature: Feature) -> f64 {
        parse_real(self.draft.raw(feature)).unwrap_or_else(|msg| {
            self.errors.insert(feature, msg);
            0.0
        })
    }

    fn count(&mut self, feature: Feature) -> i64 {
        parse_count(self.draft.raw(feature)).unwrap_or_else(|msg| {
            self.errors.insert(feature, msg);
            0
        })
    }
}

/// Validates a whole draft, checking every feature even after the first failure.
///
/// The location needs no check, the draft holds a single [`Location`](super::Location)
/// and its one-hot encoding is derived from it.
///
/// # Errors
/// Returns one message per invalid feature, never alongside a record.
pub fn validate(draft: &RecordDraft) -> Result<Record, FieldErrors> {
    let mut c = Collector {
        draft,
        errors: FieldErrors::new(),
    };

    let record = Record {
        longitude: c.real(Feature::Longitude),
        latitude: c.real(Feature::Latitude),
        housing_median_age: c.count(Feature::HousingMedianAge),
        total_rooms: c.count(Feature::TotalRooms),
        total_bedrooms: c.count(Feature::TotalBedrooms),
        population: c.count(Feature::Population),
        households: c.count(Feature::Households),
        median_income: c.real(Feature::MedianIncome),
        location: draft.location,
    };

    if c.errors.is_empty() {
        Ok(record)
    } else {
        Err(c.errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Location;

    fn draft(values: &[(Feature, &str)], location: Location) -> RecordDraft {
        RecordDraft {
            values: values.iter().map(|(f, v)| (*f, v.to_string())).collect(),
            location,
        }
    }

    fn valid_values() -> Vec<(Feature, &'static str)> {
        vec![
            (Feature::Longitude, "-122.23"),
            (Feature::Latitude, "37.88"),
            (Feature::HousingMedianAge, "41"),
            (Feature::TotalRooms, "880"),
            (Feature::TotalBedrooms, "129"),
            (Feature::Population, "322"),
            (Feature::Households, "126"),
            (Feature::MedianIncome, "8.3252"),
        ]
    }

    #[test]
    fn test_valid_draft_produces_typed_record() {
        let record = validate(&draft(&valid_values(), Location::Island)).unwrap();

        assert_eq!(record.longitude, -122.23);
        assert_eq!(record.housing_median_age, 41);
        assert_eq!(record.total_rooms, 880);
        assert_eq!(record.median_income, 8.3252);
        assert_eq!(record.location, Location::Island);
    }

    #[test]
    fn test_every_invalid_field_is_reported() {
        let mut values = valid_values();
        values[0].1 = "west";
        values[3].1 = "3.5";
        values[6].1 = "";

        let errors = validate(&draft(&values, Location::default())).unwrap_err();

        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get(Feature::Longitude), Some(NOT_A_NUMBER));
        assert_eq!(errors.get(Feature::TotalRooms), Some(NOT_AN_INTEGER));
        assert_eq!(errors.get(Feature::Households), Some(NOT_A_NUMBER));
        assert!(!errors.contains(Feature::Latitude));
        assert!(!errors.contains(Feature::MedianIncome));
    }

    #[test]
    fn test_empty_draft_fails_on_all_features() {
        let errors = validate(&RecordDraft::default()).unwrap_err();
        assert_eq!(errors.len(), Feature::ALL.len());
    }

    #[test]
    fn test_negative_counts_are_accepted() {
        let mut values = valid_values();
        values[5].1 = "-10";

        let record = validate(&draft(&values, Location::default())).unwrap();
        assert_eq!(record.population, -10);
    }

    #[test]
    fn test_check_rules() {
        assert_eq!(check(Feature::TotalRooms, " 12 "), Ok(Value::Count(12)));
        assert_eq!(check(Feature::TotalRooms, "1e3"), Ok(Value::Count(1000)));
        assert_eq!(check(Feature::TotalRooms, "4.0"), Ok(Value::Count(4)));
        assert_eq!(check(Feature::Latitude, "3.5"), Ok(Value::Real(3.5)));
        assert_eq!(check(Feature::Latitude, "inf"), Err(NOT_A_NUMBER.to_string()));
        assert_eq!(check(Feature::Latitude, "NaN"), Err(NOT_A_NUMBER.to_string()));
    }

    #[test]
    fn test_large_counts_are_accepted() {
        assert_eq!(
            check(Feature::TotalRooms, "10000000000000000"),
            Ok(Value::Count(10_000_000_000_000_000))
        );
        assert_eq!(check(Feature::Population, "1e20"), Ok(Value::Count(i64::MAX)));
        assert_eq!(check(Feature::Population, "-1e20"), Ok(Value::Count(i64::MIN)));

        let mut values = valid_values();
        values[3].1 = "10000000000000000";
        let record = validate(&draft(&values, Location::default())).unwrap();
        assert_eq!(record.total_rooms, 10_000_000_000_000_000);
    }
}
