pub mod client;
pub mod configs;
pub mod error;
pub mod form;
pub mod schema;
pub mod submission;

pub use client::{HttpClient, PredictionClient};
pub use configs::ClientConfig;
pub use error::PredictorError;
pub use form::FormState;
pub use schema::{Feature, FieldErrors, Location, Record};
pub use submission::{Coordinator, Outcome, Phase};
