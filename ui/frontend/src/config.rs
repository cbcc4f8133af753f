use anyhow::Context;
use ui_common::AppConfig;

const CONFIG_PATH: &str = "/config.json";

/// Origin of the page, e.g. `http://localhost:3080`
pub fn get_origin() -> anyhow::Result<String> {
    let Some(window) = web_sys::window() else {
        anyhow::bail!("Cannot get window");
    };

    let Ok(hostname) = window.location().hostname() else {
        anyhow::bail!("Cannot get hostname");
    };

    let Ok(port) = window.location().port() else {
        anyhow::bail!("Cannot get port");
    };

    let Ok(protocol) = window.location().protocol() else {
        anyhow::bail!("Cannot get protocol");
    };

    if protocol != "http:" && protocol != "https:" {
        anyhow::bail!("Unknown protocol {protocol}");
    }

    if port.is_empty() {
        Ok(format!("{protocol}//{hostname}"))
    } else {
        Ok(format!("{protocol}//{hostname}:{port}"))
    }
}

async fn fetch_config() -> anyhow::Result<AppConfig> {
    let url = format!("{}{CONFIG_PATH}", get_origin()?);
    let text = reqwest::get(&url)
        .await
        .with_context(|| format!("Cannot reach {url}"))?
        .error_for_status()?
        .text()
        .await?;
    AppConfig::from_json(&text).with_context(|| format!("Invalid configuration at {url}"))
}

/// Configuration served next to the page. Falls back to the default
/// backend when the page is not served by `walkable serve`.
pub async fn load() -> AppConfig {
    match fetch_config().await {
        Ok(config) => {
            log::info!("Using backend {}", config.backend_url);
            config
        }
        Err(e) => {
            let config = AppConfig::default();
            log::warn!("{e:#}, using backend {}", config.backend_url);
            config
        }
    }
}
