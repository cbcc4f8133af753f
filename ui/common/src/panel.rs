//! State behind the map panel: fetched records, overlay graphics and the
//! single error slot, advanced one fetch cycle at a time.

use std::fmt::Display;

use crate::{
    geometry::{parse_geometry, GeometryError, IsochroneShape, IsochroneStyle},
    record::{IsochroneList, IsochroneRecord},
};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PanelError {
    #[error("Error fetching isochrones: Failed to fetch isochrones: {0}")]
    Fetch(String),
    #[error("Error fetching isochrones: No isochrone data found{}", detail_suffix(.0))]
    MissingData(Option<String>),
    #[error("Error fetching isochrones: {0}")]
    Network(String),
    #[error("Error rendering isochrone: {0}")]
    Render(String),
    #[error("Failed to load map: {0}")]
    MapLoad(String),
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail.as_ref().map(|d| format!(": {d}")).unwrap_or_default()
}

impl From<GeometryError> for PanelError {
    fn from(e: GeometryError) -> Self {
        PanelError::Render(e.to_string())
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum PanelPhase {
    #[default]
    Idle,
    Loading,
    Rendered,
    Errored,
}

/// Handed out by [`MapPanelState::begin`]; identifies one fetch cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Rendered(u32),
    Failed,
    /// A newer cycle was started before this one resolved
    Stale,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverlayGraphic {
    pub id: u32,
    pub shape: IsochroneShape,
    pub style: IsochroneStyle,
}

#[derive(Debug, Default, Clone)]
pub struct MapPanelState {
    records: IsochroneList,
    overlay: Vec<OverlayGraphic>,
    error: Option<PanelError>,
    phase: PanelPhase,
    latest: u64,
    map_failed: bool,
    style: IsochroneStyle,
}

impl MapPanelState {
    /// Start a new fetch cycle. Clears the error slot and makes every
    /// earlier ticket stale. Returns `None` if the map failed to load.
    pub fn begin(&mut self) -> Option<RequestTicket> {
        if self.map_failed {
            return None;
        }

        self.latest += 1;
        self.error = None;
        self.phase = PanelPhase::Loading;
        Some(RequestTicket(self.latest))
    }

    /// Apply the outcome of a fetch. `outcome` carries the raw GeoJSON text
    /// on success. A record is appended only if the text renders.
    pub fn complete(
        &mut self,
        ticket: RequestTicket,
        outcome: Result<String, PanelError>,
    ) -> Completion {
        if ticket.0 != self.latest {
            log::debug!(
                "Discarding response #{} (latest request is #{})",
                ticket.0,
                self.latest
            );
            return Completion::Stale;
        }

        match outcome.and_then(|geojson| Ok((parse_geometry(&geojson)?, geojson))) {
            Ok((shape, geojson)) => {
                let id = self.records.push(geojson).id;
                self.overlay.push(OverlayGraphic {
                    id,
                    shape,
                    style: self.style,
                });
                self.phase = PanelPhase::Rendered;
                Completion::Rendered(id)
            }
            Err(e) => {
                log::warn!("{e}");
                self.error = Some(e);
                self.phase = PanelPhase::Errored;
                Completion::Failed
            }
        }
    }

    /// Record a failure to set up the map surface. No further cycles start.
    pub fn fail_map_load(&mut self, cause: impl Display) {
        let e = PanelError::MapLoad(cause.to_string());
        log::error!("{e}");
        self.error = Some(e);
        self.phase = PanelPhase::Errored;
        self.map_failed = true;
    }

    pub fn records(&self) -> &[IsochroneRecord] {
        self.records.as_slice()
    }

    pub fn overlay(&self) -> &[OverlayGraphic] {
        &self.overlay
    }

    pub fn error(&self) -> Option<&PanelError> {
        self.error.as_ref()
    }

    /// Text of the error banner, e.g. `Error: Failed to load map: ..`
    pub fn banner(&self) -> Option<String> {
        self.error.as_ref().map(|e| format!("Error: {e}"))
    }

    pub fn phase(&self) -> PanelPhase {
        self.phase
    }
}
