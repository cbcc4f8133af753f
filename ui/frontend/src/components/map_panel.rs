use leptos::*;
use leptos_leaflet::*;

use isochrone_api::IsochroneClient;
use ui_common::{AddressQuery, MapPanelState, OverlayGraphic, PanelError};

use crate::components::{error_banner::ErrorBanner, isochrone_list::IsochroneList};

// Toronto, matching the default address of the form
const DEFAULT_CENTER: (f64, f64) = (43.6532, -79.3832);
const DEFAULT_ZOOM: f64 = 13.0;

#[component]
fn IsochroneGraphic(graphic: OverlayGraphic) -> impl IntoView {
    let style = graphic.style;
    graphic
        .shape
        .rings
        .into_iter()
        .map(|ring| {
            let positions: Vec<Position> = ring
                .into_iter()
                .map(|p| Position::new(p.lat, p.lng))
                .collect();
            view! {
                <Polygon
                    positions=positions
                    color=style.outline.to_css()
                    opacity=style.outline.a
                    weight=style.outline_width
                    fill_color=style.fill.to_css()
                    fill_opacity=style.fill.a
                />
            }
        })
        .collect_view()
}

/// Map with the isochrone overlay, the error banner and the list of fetched
/// isochrones. A fetch starts whenever `query` changes or `submissions` is
/// bumped; only the latest request is applied.
#[component]
pub fn MapPanel(
    backend_url: String,
    #[prop(into)] query: Signal<AddressQuery>,
    submissions: ReadSignal<u32>,
) -> impl IntoView {
    let panel = create_rw_signal(MapPanelState::default());

    let client = match IsochroneClient::new(&backend_url) {
        Ok(client) => Some(client),
        Err(e) => {
            panel.update(|p| p.fail_map_load(format!("backend `{backend_url}`: {e}")));
            None
        }
    };

    create_effect(move |_| {
        // Re-run on submit even when the query is unchanged
        submissions.get();
        let query = query.get();

        let Some(client) = client.clone() else {
            return;
        };
        let Some(Some(ticket)) = panel.try_update(|p| p.begin()) else {
            return;
        };

        log::debug!("Request #{} for {query:?}", ticket.sequence());
        spawn_local(async move {
            let outcome = isochrone_api::get_isochrone(&client, &query)
                .await
                .map_err(PanelError::from);
            panel.update(|p| {
                p.complete(ticket, outcome);
            });
        });
    });

    let graphics = move || panel.with(|p| p.overlay().to_vec());
    let records = Signal::derive(move || panel.with(|p| p.records().to_vec()));
    let banner = Signal::derive(move || panel.with(|p| p.error().map(ToString::to_string)));

    view! {
        <div>
            <MapContainer
                style="width: 100%; height: 500px"
                center=Position::new(DEFAULT_CENTER.0, DEFAULT_CENTER.1)
                zoom=DEFAULT_ZOOM
                set_view=true
                class="z-0"
            >
                <TileLayer
                    url="https://tile.openstreetmap.org/{z}/{x}/{y}.png"
                    attribution="&copy; OpenStreetMap contributors"
                />
                <For
                    each=graphics
                    key=|graphic| graphic.id
                    children=move |graphic| view! { <IsochroneGraphic graphic=graphic/> }
                />
            </MapContainer>

            <ErrorBanner message=banner/>
            <IsochroneList records=records/>
        </div>
    }
}
