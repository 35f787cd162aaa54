use crate::domain::model::{Alert, ConsultationRequest, FormField, Record, Testimonial};
use crate::domain::ports::DataService;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
}

/// How the data service resolved one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Accepted,
    Rejected(String),
}

/// A submission detached from the controller so that several can be in
/// flight at once. Carries the form values as they were when it was created.
pub struct PendingSubmission<D: DataService + ?Sized> {
    service: Arc<D>,
    collection: String,
    request: ConsultationRequest,
}

impl<D: DataService + ?Sized> PendingSubmission<D> {
    pub fn request(&self) -> &ConsultationRequest {
        &self.request
    }

    pub async fn send(self) -> SubmissionOutcome {
        let record = Record::from(&self.request);
        match self.service.insert_one(&self.collection, record).await {
            Ok(()) => {
                tracing::info!("Consultation request stored in {}", self.collection);
                SubmissionOutcome::Accepted
            }
            Err(e) => {
                tracing::warn!("Consultation request rejected: {}", e);
                SubmissionOutcome::Rejected(e.service_message())
            }
        }
    }
}

/// State and behaviour behind one view of the page.
pub struct PageController<D: DataService + ?Sized> {
    service: Arc<D>,
    testimonials_collection: String,
    consultation_collection: String,
    testimonials: Vec<Testimonial>,
    form: ConsultationRequest,
    alert: Option<Alert>,
    loaded: bool,
    in_flight: usize,
}

impl<D: DataService + ?Sized> PageController<D> {
    pub fn new(
        service: Arc<D>,
        testimonials_collection: impl Into<String>,
        consultation_collection: impl Into<String>,
    ) -> Self {
        Self {
            service,
            testimonials_collection: testimonials_collection.into(),
            consultation_collection: consultation_collection.into(),
            testimonials: Vec::new(),
            form: ConsultationRequest::default(),
            alert: None,
            loaded: false,
            in_flight: 0,
        }
    }

    /// Called once the view is visible. Only the first call reads from the
    /// data service.
    pub async fn mount(&mut self) {
        if self.loaded {
            tracing::debug!("Testimonials already loaded for this view");
            return;
        }
        self.loaded = true;
        self.load_testimonials().await;
    }

    // Read failures leave the list empty; the visitor is never told.
    async fn load_testimonials(&mut self) {
        let records = match self.service.list_all(&self.testimonials_collection).await {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!("Could not load testimonials: {}", e);
                return;
            }
        };

        self.testimonials = records.into_iter().map(Testimonial::from).collect();
        tracing::debug!("Loaded {} testimonials", self.testimonials.len());
    }

    pub fn testimonials(&self) -> &[Testimonial] {
        &self.testimonials
    }

    pub fn form(&self) -> &ConsultationRequest {
        &self.form
    }

    pub fn field(&self, field: FormField) -> &str {
        self.form.get(field)
    }

    pub fn update_field(&mut self, field: FormField, value: impl Into<String>) {
        self.form.set(field, value.into());
    }

    /// Resolves an input name first; names that are not form fields are ignored.
    pub fn update_named_field(&mut self, name: &str, value: impl Into<String>) {
        match name.parse::<FormField>() {
            Ok(field) => self.update_field(field, value),
            Err(_) => tracing::debug!("Ignoring unknown form field '{}'", name),
        }
    }

    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    pub fn submission_state(&self) -> SubmissionState {
        if self.in_flight == 0 {
            SubmissionState::Idle
        } else {
            SubmissionState::Submitting
        }
    }

    /// Snapshots the current form. Nothing stops a second call before the
    /// first submission is finished.
    pub fn begin_submit(&mut self) -> PendingSubmission<D> {
        self.in_flight += 1;
        PendingSubmission {
            service: Arc::clone(&self.service),
            collection: self.consultation_collection.clone(),
            request: self.form.clone(),
        }
    }

    /// Applies a resolved submission. The most recent call decides which
    /// alert is showing.
    pub fn finish_submit(&mut self, outcome: SubmissionOutcome) -> Alert {
        self.in_flight = self.in_flight.saturating_sub(1);
        let alert = match outcome {
            SubmissionOutcome::Accepted => {
                self.form.clear();
                Alert::Submitted
            }
            SubmissionOutcome::Rejected(message) => Alert::SubmitFailed(message),
        };
        self.alert = Some(alert.clone());
        alert
    }

    pub async fn submit(&mut self) -> Alert {
        let pending = self.begin_submit();
        let outcome = pending.send().await;
        self.finish_submit(outcome)
    }
}
