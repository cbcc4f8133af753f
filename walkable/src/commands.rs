use std::path::Path;

use anyhow::Context;
use isochrone_api::IsochroneClient;
use ui_common::{AddressQuery, Completion, MapPanelState, PanelError, StoredIsochrone};

/// Run one fetch cycle of the map panel against the backend.
pub async fn fetch(
    client: &IsochroneClient,
    panel: &mut MapPanelState,
    query: &AddressQuery,
) -> Completion {
    let Some(ticket) = panel.begin() else {
        log::warn!("Map is not available, skipping request");
        return Completion::Failed;
    };

    log::info!(
        "Fetching {} minute isochrone for `{}`",
        query.walk_time,
        query.address
    );
    let outcome = isochrone_api::get_isochrone(client, query)
        .await
        .map_err(PanelError::from);

    panel.complete(ticket, outcome)
}

/// What the page would show: the record list followed by the error
/// banner, or a summary of the last rendered isochrone.
pub fn render_panel(panel: &MapPanelState) -> Vec<String> {
    let mut lines = vec!["Fetched Isochrones:".to_string()];
    lines.extend(
        panel
            .records()
            .iter()
            .map(|r| format!("  Isochrone ID: {}", r.id)),
    );

    if let Some(banner) = panel.banner() {
        lines.push(banner);
    } else if let Some(graphic) = panel.overlay().last() {
        let mut summary = format!(
            "Isochrone {}: {} polygon(s), {} points",
            graphic.id,
            graphic.shape.rings.len(),
            graphic.shape.num_points()
        );
        if let Some(b) = graphic.shape.bounds() {
            let c = b.center();
            summary.push_str(&format!(
                ", centre {:.5},{:.5}, bounds [{:.5},{:.5}]-[{:.5},{:.5}]",
                c.lat, c.lng, b.south, b.west, b.north, b.east
            ));
        }
        lines.push(summary);
    }

    lines
}

pub fn write_last_geojson(panel: &MapPanelState, path: &Path) -> anyhow::Result<()> {
    let Some(record) = panel.records().last() else {
        anyhow::bail!("No isochrone was fetched, nothing to write to {path:?}");
    };
    std::fs::write(path, &record.geojson)
        .with_context(|| format!("Cannot write isochrone to {path:?}"))?;
    log::info!("Isochrone {} written to {path:?}", record.id);
    Ok(())
}

pub async fn save(client: &IsochroneClient, query: &AddressQuery) -> anyhow::Result<i64> {
    isochrone_api::save_isochrone(client, query)
        .await
        .with_context(|| format!("Cannot save isochrone for `{}`", query.address))
}

pub async fn list(client: &IsochroneClient) -> anyhow::Result<Vec<StoredIsochrone>> {
    isochrone_api::list_isochrones(client)
        .await
        .context("Cannot list stored isochrones")
}

pub fn format_stored(row: &StoredIsochrone) -> String {
    format!(
        "{:>4}  {:>10.5} {:>10.5}  {:>2} min  {} bytes",
        row.id,
        row.latitude,
        row.longitude,
        row.walk_time,
        row.geojson.len()
    )
}
