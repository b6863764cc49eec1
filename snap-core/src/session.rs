//! The single piece of UI state and the rules for changing it.

use crate::{
    error::ErrorKind,
    model::{Coordinates, CurrentConditions, ForecastDay, LocationQuery, WeatherReport},
    provider::WeatherProvider,
    retrieval::RetrievalService,
};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState {
    #[default]
    Empty,
    Loading,
    Error(ErrorKind),
    Populated(WeatherReport),
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn conditions(&self) -> Option<&CurrentConditions> {
        match self {
            ViewState::Populated(report) => Some(&report.conditions),
            _ => None,
        }
    }

    pub fn forecast(&self) -> Option<&[ForecastDay]> {
        match self {
            ViewState::Populated(report) => report.forecast.as_deref(),
            _ => None,
        }
    }
}

/// Identifies one accepted submission. Only the newest ticket may settle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// A lookup that has been accepted and is waiting to run.
#[derive(Debug, Clone)]
pub struct Submission {
    pub ticket: Ticket,
    pub query: LocationQuery,
}

impl Submission {
    pub async fn execute<P: WeatherProvider>(self, service: &RetrievalService<P>) -> Settled {
        let outcome = service.fetch(&self.query).await;
        Settled { ticket: self.ticket, outcome }
    }
}

/// A finished lookup, ready to be applied with [`Session::settle`].
#[derive(Debug, Clone)]
pub struct Settled {
    pub ticket: Ticket,
    pub outcome: Result<WeatherReport, ErrorKind>,
}

/// A position waiting to be turned into a place name.
#[derive(Debug, Clone)]
pub struct Locating {
    pub ticket: Ticket,
    pub coords: Coordinates,
}

impl Locating {
    pub async fn resolve<P: WeatherProvider>(self, service: &RetrievalService<P>) -> Located {
        let place = service.resolve_place(self.coords).await;
        Located { ticket: self.ticket, coords: self.coords, place }
    }
}

/// A resolved position, ready for [`Session::finish_locating`].
#[derive(Debug, Clone)]
pub struct Located {
    pub ticket: Ticket,
    pub coords: Coordinates,
    pub place: Option<String>,
}

/// Owns the query text and the [`ViewState`].
///
/// Overlapping lookups are resolved last-request-wins: every accepted
/// submission, reset or local failure advances the generation, and results
/// carrying an older ticket are dropped.
#[derive(Debug, Default)]
pub struct Session {
    query: String,
    state: ViewState,
    generation: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Any text is accepted; an empty query just can't be submitted.
    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query = text.into();
    }

    fn next_ticket(&mut self) -> Ticket {
        self.generation += 1;
        Ticket(self.generation)
    }

    /// Accepts the current query text and moves to `Loading`.
    /// Returns `None`, changing nothing, when the query is blank.
    pub fn submit(&mut self) -> Option<Submission> {
        let name = self.query.trim();
        if name.is_empty() {
            return None;
        }
        let query = LocationQuery::Name(name.to_string());
        Some(self.accept(query))
    }

    /// Like [`Session::submit`] but for a position; the query text shows
    /// the coordinates.
    pub fn submit_coordinates(&mut self, coords: Coordinates) -> Submission {
        self.query = coords.to_string();
        self.accept(LocationQuery::Coordinates(coords))
    }

    fn accept(&mut self, query: LocationQuery) -> Submission {
        let ticket = self.next_ticket();
        self.state = ViewState::Loading;
        tracing::debug!(?ticket, %query, "Lookup submitted");
        Submission { ticket, query }
    }

    /// Moves to `Loading` while the position is resolved to a place name.
    pub fn begin_locating(&mut self, coords: Coordinates) -> Locating {
        let ticket = self.next_ticket();
        self.state = ViewState::Loading;
        tracing::debug!(?ticket, %coords, "Resolving position");
        Locating { ticket, coords }
    }

    /// Turns a resolved position into a lookup by place name, or by
    /// coordinates when no name was found. Superseded positions give `None`.
    pub fn finish_locating(&mut self, located: Located) -> Option<Submission> {
        if located.ticket != Ticket(self.generation) {
            tracing::debug!(ticket = ?located.ticket, "Discarding superseded position");
            return None;
        }

        match located.place {
            Some(name) => {
                self.query = name;
                self.submit()
            }
            None => Some(self.submit_coordinates(located.coords)),
        }
    }

    /// Applies a finished lookup. Returns `false` if it was superseded.
    pub fn settle(&mut self, settled: Settled) -> bool {
        if settled.ticket != Ticket(self.generation) || !self.state.is_loading() {
            tracing::debug!(ticket = ?settled.ticket, "Discarding superseded lookup result");
            return false;
        }

        self.state = match settled.outcome {
            Ok(report) => ViewState::Populated(report),
            Err(kind) => ViewState::Error(kind),
        };
        true
    }

    /// Shows an error that happened before any lookup was issued.
    pub fn fail(&mut self, kind: ErrorKind) {
        self.next_ticket();
        self.state = ViewState::Error(kind);
    }

    /// Back to the empty state, dropping any lookup still in flight.
    pub fn reset(&mut self) {
        self.next_ticket();
        self.query.clear();
        self.state = ViewState::Empty;
    }
}
