mod geometry;
mod panel;
mod query;
mod record;
mod wire;

pub use geometry::{
    parse_geometry, Bounds, GeometryError, IsochroneShape, IsochroneStyle, LatLng, Rgba,
};
pub use panel::{Completion, MapPanelState, OverlayGraphic, PanelError, PanelPhase, RequestTicket};
pub use query::{AddressQuery, InvalidWalkTime, WalkTime, DEFAULT_ADDRESS};
pub use record::{IsochroneList, IsochroneRecord};
pub use wire::{
    AppConfig, IsochroneResponse, SaveResponse, StoredIsochrone, StoredIsochrones,
    DEFAULT_BACKEND_URL,
};
