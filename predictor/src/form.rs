use std::collections::BTreeMap;

use crate::{
    error::PredictorError,
    schema::{self, Feature, FieldErrors, Location, RecordDraft},
};

/// Everything the form shows: raw inputs, the selected location, inline errors and the
/// outcome of the last submission.
///
/// All mutation goes through the named operations below. The location is a single value,
/// so its five-field encoding can never disagree with itself.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    values: BTreeMap<Feature, String>,
    category: Location,
    errors: FieldErrors,
    prediction: Option<f64>,
    submission_failed: bool,
    /// Set once a submit has validated the form, cleared by `reset`.
    validated: bool,
}

impl FormState {
    /// Creates an empty form with the first location selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the raw text of one input.
    ///
    /// Before the first submit attempt nothing is checked. After it, the edited input's
    /// own rule is re-run so its message follows the user's edits. Other inputs are left
    /// alone.
    ///
    /// # Arguments
    /// * `feature` - The input being edited.
    /// * `raw` - Its full new text.
    pub fn update_field(&mut self, feature: Feature, raw: impl Into<String>) {
        let raw = raw.into();

        if self.validated || self.errors.contains(feature) {
            match schema::check(feature, &raw) {
                Ok(_) => {
                    self.errors.remove(feature);
                }
                Err(msg) => self.errors.insert(feature, msg),
            }
        }

        self.values.insert(feature, raw);
    }

    /// Selects a location. The old and new one-hot bits flip in this one update.
    pub fn select_category(&mut self, location: Location) {
        log::debug!("category {} -> {}", self.category, location);
        self.category = location;
    }

    /// Selects a location by its wire key, e.g. `"NEAR BAY"`.
    ///
    /// # Errors
    /// Returns `UnknownCategory` and leaves the selection untouched if `name` is not one
    /// of the five options.
    pub fn select_category_by_name(&mut self, name: &str) -> Result<(), PredictorError> {
        let location = name.parse()?;
        self.select_category(location);
        Ok(())
    }

    /// Restores inputs, errors and the location to their initial state.
    ///
    /// The last prediction and the failure flag are result state and survive the reset.
    pub fn reset(&mut self) {
        self.values.clear();
        self.errors = FieldErrors::new();
        self.category = Location::default();
        self.validated = false;
    }

    /// Replaces the inline errors with the outcome of a full validation.
    ///
    /// From here on every edit re-checks the edited input, until the next `reset`.
    pub fn show_errors(&mut self, errors: FieldErrors) {
        self.errors = errors;
        self.validated = true;
    }

    /// Stores a fresh prediction and clears the failure flag.
    pub fn record_prediction(&mut self, value: f64) {
        self.prediction = Some(value);
        self.submission_failed = false;
    }

    /// Flags the last submission as failed, inputs are kept for a retry.
    pub fn mark_failed(&mut self) {
        self.submission_failed = true;
    }

    /// Snapshots the current inputs as a candidate record.
    pub fn draft(&self) -> RecordDraft {
        RecordDraft {
            values: self.values.clone(),
            location: self.category,
        }
    }

    pub fn raw(&self, feature: Feature) -> &str {
        self.values.get(&feature).map(String::as_str).unwrap_or("")
    }

    pub fn category(&self) -> Location {
        self.category
    }

    /// The five location fields as they would be submitted right now.
    pub fn one_hot(&self) -> [(&'static str, u8); 5] {
        self.category.one_hot()
    }

    pub fn error(&self, feature: Feature) -> Option<&str> {
        self.errors.get(feature)
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn prediction(&self) -> Option<f64> {
        self.prediction
    }

    pub fn submission_failed(&self) -> bool {
        self.submission_failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hot_sum(form: &FormState) -> u32 {
        form.one_hot().iter().map(|(_, b)| *b as u32).sum()
    }

    #[test]
    fn test_new_form_defaults() {
        let form = FormState::new();

        assert_eq!(form.category(), Location::LessThanHourOcean);
        assert!(Feature::ALL.iter().all(|f| form.raw(*f).is_empty()));
        assert!(form.errors().is_empty());
        assert_eq!(form.prediction(), None);
        assert!(!form.submission_failed());
    }

    #[test]
    fn test_any_selection_sequence_keeps_exactly_one_hot() {
        let mut form = FormState::new();
        let sequence = [
            Location::Inland,
            Location::Inland,
            Location::NearOcean,
            Location::LessThanHourOcean,
            Location::NearBay,
            Location::Island,
        ];

        for location in sequence {
            form.select_category(location);
            assert_eq!(hot_sum(&form), 1);

            let (key, _) = form.one_hot().into_iter().find(|(_, b)| *b == 1).unwrap();
            assert_eq!(key, location.label());
        }
    }

    #[test]
    fn test_switch_from_inland_to_island() {
        let mut form = FormState::new();
        form.select_category(Location::Inland);
        form.select_category(Location::Island);

        assert_eq!(
            form.one_hot(),
            [
                ("<1H OCEAN", 0),
                ("INLAND", 0),
                ("ISLAND", 1),
                ("NEAR BAY", 0),
                ("NEAR OCEAN", 0),
            ]
        );
    }

    #[test]
    fn test_unknown_category_name_is_rejected() {
        let mut form = FormState::new();
        form.select_category_by_name("NEAR BAY").unwrap();

        let err = form.select_category_by_name("DOWNTOWN").unwrap_err();
        assert!(matches!(err, PredictorError::UnknownCategory(_)));
        assert_eq!(form.category(), Location::NearBay);
    }

    #[test]
    fn test_update_field_does_not_validate_clean_fields() {
        let mut form = FormState::new();
        form.update_field(Feature::TotalRooms, "3.5");

        assert_eq!(form.raw(Feature::TotalRooms), "3.5");
        assert!(form.error(Feature::TotalRooms).is_none());
    }

    #[test]
    fn test_update_field_rechecks_only_the_edited_field() {
        let mut form = FormState::new();
        let mut errors = FieldErrors::new();
        errors.insert(Feature::TotalRooms, schema::validator::NOT_A_NUMBER);
        errors.insert(Feature::Population, schema::validator::NOT_A_NUMBER);
        form.show_errors(errors);

        form.update_field(Feature::TotalRooms, "3.5");
        assert_eq!(
            form.error(Feature::TotalRooms),
            Some(schema::validator::NOT_AN_INTEGER)
        );

        form.update_field(Feature::TotalRooms, "3");
        assert!(form.error(Feature::TotalRooms).is_none());
        assert!(form.error(Feature::Population).is_some());
    }

    #[test]
    fn test_edits_after_validation_recheck_clean_fields() {
        let mut form = FormState::new();
        form.update_field(Feature::TotalRooms, "12");
        form.show_errors(FieldErrors::new());

        form.update_field(Feature::TotalRooms, "12.5");
        assert_eq!(
            form.error(Feature::TotalRooms),
            Some(schema::validator::NOT_AN_INTEGER)
        );
        assert!(form.error(Feature::Latitude).is_none());

        form.reset();
        form.update_field(Feature::TotalRooms, "12.5");
        assert!(form.error(Feature::TotalRooms).is_none());
    }

    #[test]
    fn test_reset_keeps_result_state() {
        let mut form = FormState::new();
        form.update_field(Feature::Latitude, "37.5");
        form.select_category(Location::NearOcean);
        form.record_prediction(1.5);
        form.reset();

        assert_eq!(form.raw(Feature::Latitude), "");
        assert_eq!(form.category(), Location::LessThanHourOcean);
        assert_eq!(form.prediction(), Some(1.5));
    }

    #[test]
    fn test_prediction_clears_failure_flag() {
        let mut form = FormState::new();
        form.mark_failed();
        assert!(form.submission_failed());

        form.record_prediction(42.0);
        assert!(!form.submission_failed());
        assert_eq!(form.prediction(), Some(42.0));
    }
}
