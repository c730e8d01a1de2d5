//! Chart controller
//!
//! Owns the one live chart surface and the selection state machine:
//! `Idle` until a selection change, `Loading` while the fetch for the new
//! kind is in flight, back to `Idle` once the surface has been redrawn or
//! the fetch has failed.

use tracing::{debug, info, instrument, warn};

use crate::client::ChartDataClient;
use crate::error::Result;
use crate::options::ChartOptions;
use crate::registry;
use crate::types::{ChartKind, MetricsPayload, PlotPoint};

/// The live chart abstraction the controller drives
///
/// `apply` replaces the chart's data and options and triggers a redraw;
/// `set_loading` toggles the page's loading indicator.
pub trait ChartSurface {
    fn apply(&mut self, data: &[PlotPoint], options: &ChartOptions);
    fn set_loading(&mut self, loading: bool);
}

/// Controller fetch state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    /// No fetch in flight
    Idle,
    /// Fetch issued, loading indicator shown
    Loading,
}

/// Outcome of a selection change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// The fetch succeeded and the surface was redrawn for this kind
    Redrawn(ChartKind),
    /// The kind was already current; no fetch was issued
    Unchanged(ChartKind),
    /// A newer selection superseded this one before its response arrived
    Superseded(ChartKind),
}

/// Drives one chart surface from dropdown selections
///
/// The current kind only advances on a confirmed successful redraw; a
/// failed fetch leaves the previous chart in place with the loading
/// indicator cleared.
pub struct ChartController<S> {
    client: ChartDataClient,
    surface: S,
    current: ChartKind,
    state: ControllerState,
    request_seq: u64,
}

impl<S: ChartSurface> ChartController<S> {
    /// Build the controller and draw the initial chart eagerly
    ///
    /// The first render uses the pre-loaded default dataset and the fixed
    /// initial configuration, without entering `Loading`.
    pub fn new(client: ChartDataClient, mut surface: S, initial: &MetricsPayload) -> Self {
        let def = registry::chart_def(ChartKind::TicketPrice);
        let data = (def.transform)(initial);

        debug!(points = data.len(), "Drawing initial ticket price chart");
        surface.apply(&data, &ChartOptions::initial());

        Self {
            client,
            surface,
            current: ChartKind::TicketPrice,
            state: ControllerState::Idle,
            request_seq: 0,
        }
    }

    /// The kind currently drawn on the surface
    #[must_use]
    pub fn current_kind(&self) -> ChartKind {
        self.current
    }

    #[must_use]
    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// The live surface, for inspection
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Handle a selection change
    ///
    /// Selecting the current kind is a no-op beyond a loading-indicator
    /// blink. Selecting a new kind fetches its series, reshapes it, and
    /// redraws; responses overtaken by a newer selection are discarded
    /// (last-requested-wins).
    #[instrument(skip(self), fields(from = %self.current, to = %kind))]
    pub async fn select(&mut self, kind: ChartKind) -> Result<Selection> {
        self.surface.set_loading(true);

        if kind == self.current {
            debug!("Selection unchanged, skipping fetch");
            self.surface.set_loading(false);
            return Ok(Selection::Unchanged(kind));
        }

        self.state = ControllerState::Loading;
        self.request_seq += 1;
        let seq = self.request_seq;

        let fetched = self.client.fetch_chart(kind).await;

        // A newer selection owns the surface and the loading indicator now
        if seq != self.request_seq {
            debug!(seq = seq, newest = self.request_seq, "Discarding stale response");
            return Ok(Selection::Superseded(kind));
        }

        match fetched {
            Ok(payload) => {
                let (data, options) = registry::prepare_chart(kind, &payload);
                info!(points = data.len(), "Redrawing chart");

                self.surface.apply(&data, &options);
                self.current = kind;
                self.surface.set_loading(false);
                self.state = ControllerState::Idle;
                Ok(Selection::Redrawn(kind))
            }
            Err(e) => {
                warn!(error = %e, "Chart fetch failed, keeping previous chart");
                self.surface.set_loading(false);
                self.state = ControllerState::Idle;
                Err(e)
            }
        }
    }
}
