use crate::{
    client::PredictionClient,
    error::PredictorError,
    form::FormState,
    schema::{self, Record},
};

/// Where the coordinator is in the submit cycle.
///
/// `Success` and `Failed` are passed through on the way back to `Idle` and are only
/// visible in the logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Validating,
    Submitting,
    Success,
    Failed,
}

/// What a submit attempt ended in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    /// The endpoint priced the record, the form was reset.
    Predicted(f64),
    /// This many inputs failed validation, nothing was sent.
    Invalid(usize),
    /// The request failed, inputs were kept.
    Failed,
    /// A request is already in flight, the attempt was ignored.
    Busy,
}

/// Drives validate → send → interpret for a [`FormState`].
///
/// The coordinator never writes form fields itself, every change goes through the form's
/// own operations.
#[derive(Debug)]
pub struct Coordinator {
    phase: Phase,
}

impl Coordinator {
    pub fn new() -> Self {
        Self { phase: Phase::Idle }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn in_flight(&self) -> bool {
        self.phase == Phase::Submitting
    }

    /// Runs a full submit cycle against `client`.
    ///
    /// Awaiting the client is the only suspension point.
    ///
    /// # Arguments
    /// * `form` - The form to validate, update and possibly reset.
    /// * `client` - Where to send the validated record.
    ///
    /// # Returns
    /// How the attempt ended; the form already reflects it.
    pub async fn submit<C: PredictionClient>(&mut self, form: &mut FormState, client: &C) -> Outcome {
        let record = match self.begin(form) {
            Ok(record) => record,
            Err(outcome) => return outcome,
        };

        let result = client.predict(&record).await;
        self.complete(form, result)
    }

    /// First half of a submit: validates the form and, if it passes, enters `Submitting`.
    ///
    /// The location is encoded from the form's current selection, so the record and the
    /// selector always agree at submission time.
    ///
    /// # Returns
    /// The record to send.
    ///
    /// # Errors
    /// `Busy` while a request is in flight, `Invalid` when inputs fail validation (their
    /// messages are now shown on the form).
    pub fn begin(&mut self, form: &mut FormState) -> Result<Record, Outcome> {
        if self.in_flight() {
            log::debug!("submit ignored, a request is already in flight");
            return Err(Outcome::Busy);
        }

        self.transition(Phase::Validating);

        match schema::validate(&form.draft()) {
            Ok(record) => {
                form.show_errors(Default::default());
                log::debug!("submitting {record:?}");
                self.transition(Phase::Submitting);
                Ok(record)
            }
            Err(errors) => {
                let invalid = errors.len();
                log::debug!("validation failed: {errors}");
                form.show_errors(errors);
                self.transition(Phase::Idle);
                Err(Outcome::Invalid(invalid))
            }
        }
    }

    /// Second half of a submit: applies the endpoint's answer to the form.
    ///
    /// On success the prediction is stored and the form reset; on failure the inputs are
    /// kept and the failure flag raised. Either way the coordinator ends `Idle`.
    ///
    /// # Arguments
    /// * `form` - The form the request was built from.
    /// * `result` - What the client returned.
    pub fn complete(&mut self, form: &mut FormState, result: Result<f64, PredictorError>) -> Outcome {
        let outcome = match result {
            Ok(value) => {
                self.transition(Phase::Success);
                log::info!("predicted price: {value}");
                form.record_prediction(value);
                form.reset();
                Outcome::Predicted(value)
            }
            Err(e) => {
                self.transition(Phase::Failed);
                log::warn!("error submitting form: {e}");
                form.mark_failed();
                Outcome::Failed
            }
        };

        self.transition(Phase::Idle);
        outcome
    }

    fn transition(&mut self, next: Phase) {
        log::debug!("submission {:?} -> {:?}", self.phase, next);
        self.phase = next;
    }
}

impl Default for Coordinator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Feature, Location};

    fn filled_form() -> FormState {
        let mut form = FormState::new();
        for (feature, raw) in Feature::ALL.into_iter().zip([
            "-118.3", "34.1", "20", "1500", "300", "900", "280", "4.2",
        ]) {
            form.update_field(feature, raw);
        }
        form.select_category(Location::Inland);
        form
    }

    #[test]
    fn test_begin_enters_submitting_with_current_location() {
        let mut coordinator = Coordinator::new();
        let mut form = filled_form();

        let record = coordinator.begin(&mut form).unwrap();

        assert_eq!(record.location, Location::Inland);
        assert_eq!(coordinator.phase(), Phase::Submitting);
    }

    #[test]
    fn test_second_begin_while_in_flight_is_busy() {
        let mut coordinator = Coordinator::new();
        let mut form = filled_form();

        coordinator.begin(&mut form).unwrap();
        assert_eq!(coordinator.begin(&mut form), Err(Outcome::Busy));
        assert_eq!(coordinator.phase(), Phase::Submitting);
    }

    #[test]
    fn test_invalid_form_returns_to_idle_with_errors() {
        let mut coordinator = Coordinator::new();
        let mut form = filled_form();
        form.update_field(Feature::TotalRooms, "3.5");

        assert_eq!(coordinator.begin(&mut form), Err(Outcome::Invalid(1)));
        assert_eq!(coordinator.phase(), Phase::Idle);
        assert!(form.error(Feature::TotalRooms).is_some());
    }

    #[test]
    fn test_successful_begin_clears_stale_errors() {
        let mut coordinator = Coordinator::new();
        let mut form = filled_form();
        let mut stale = crate::schema::FieldErrors::new();
        stale.insert(Feature::Households, "Expected number, received nan");
        form.show_errors(stale);

        coordinator.begin(&mut form).unwrap();
        assert!(form.errors().is_empty());
    }

    #[test]
    fn test_complete_after_failure_allows_resubmit() {
        let mut coordinator = Coordinator::new();
        let mut form = filled_form();

        coordinator.begin(&mut form).unwrap();
        let outcome = coordinator.complete(&mut form, Err(PredictorError::Status(502)));

        assert_eq!(outcome, Outcome::Failed);
        assert_eq!(coordinator.phase(), Phase::Idle);
        assert!(coordinator.begin(&mut form).is_ok());
    }
}
