use std::sync::Arc;

use crate::{
    geolocation::GeoLocator,
    provider::WeatherProvider,
    retrieval::RetrievalService,
    session::{Located, Locating, Session, Settled, Submission, ViewState},
};

/// Input side of the client: turns user actions into lookups and feeds
/// their results back into the [`Session`].
///
/// The `submit*` methods wait for the lookup to finish. Front ends that must
/// stay responsive use [`Controller::begin`], run the [`Submission`]
/// elsewhere, and hand the result to [`Controller::settle`]. Geolocation
/// splits the same way through [`Controller::locate`] and
/// [`Controller::finish_locating`].
#[derive(Debug)]
pub struct Controller<P> {
    session: Session,
    service: Arc<RetrievalService<P>>,
}

impl<P: WeatherProvider> Controller<P> {
    pub fn new(provider: P) -> Self {
        Self {
            session: Session::new(),
            service: Arc::new(RetrievalService::new(provider)),
        }
    }

    pub fn service(&self) -> Arc<RetrievalService<P>> {
        Arc::clone(&self.service)
    }

    pub fn state(&self) -> &ViewState {
        self.session.state()
    }

    pub fn query(&self) -> &str {
        self.session.query()
    }

    pub fn set_query(&mut self, text: impl Into<String>) {
        self.session.set_query(text);
    }

    pub fn reset(&mut self) {
        self.session.reset();
    }

    pub fn begin(&mut self) -> Option<Submission> {
        self.session.submit()
    }

    pub fn settle(&mut self, settled: Settled) -> bool {
        self.session.settle(settled)
    }

    /// Looks up the current query. Does nothing for a blank query.
    pub async fn submit(&mut self) {
        if let Some(submission) = self.begin() {
            self.run(submission).await;
        }
    }

    /// Sets the query text to `name` and looks it up, as picking a
    /// suggested city does.
    pub async fn submit_name(&mut self, name: impl Into<String>) {
        self.set_query(name);
        self.submit().await;
    }

    /// Asks `locator` for the current position. The returned [`Locating`]
    /// still has to be resolved to a place name and passed to
    /// [`Controller::finish_locating`].
    ///
    /// A locator failure goes straight to the error state and no request of
    /// any kind is made.
    pub async fn locate(&mut self, locator: &dyn GeoLocator) -> Option<Locating> {
        match locator.current_position().await {
            Ok(coords) => Some(self.session.begin_locating(coords)),
            Err(kind) => {
                tracing::info!(error = %kind, "Geolocation unavailable");
                self.session.fail(kind);
                None
            }
        }
    }

    /// The lookup for a resolved position, or `None` if something newer
    /// was submitted meanwhile.
    pub fn finish_locating(&mut self, located: Located) -> Option<Submission> {
        self.session.finish_locating(located)
    }

    /// Looks up the weather where the user is. The query text becomes the
    /// place name, or the raw coordinates when reverse geocoding finds none.
    pub async fn request_geolocation(&mut self, locator: &dyn GeoLocator) {
        let Some(locating) = self.locate(locator).await else {
            return;
        };
        let located = locating.resolve(&self.service).await;
        if let Some(submission) = self.finish_locating(located) {
            self.run(submission).await;
        }
    }

    async fn run(&mut self, submission: Submission) {
        let settled = submission.execute(&self.service).await;
        self.session.settle(settled);
    }
}
