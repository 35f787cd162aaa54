pub mod controller;
pub mod page;

pub use crate::domain::model::{Alert, ConsultationRequest, FormField, Record, Testimonial};
pub use crate::domain::ports::{ConfigProvider, DataService};
pub use crate::utils::error::Result;
pub use controller::{PageController, PendingSubmission, SubmissionOutcome, SubmissionState};
