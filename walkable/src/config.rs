use std::{env, path::PathBuf};

use anyhow::Context;
use isochrone_api::parse_base_url;
use ui_common::DEFAULT_BACKEND_URL;

pub const DEFAULT_PORT: u16 = 3080;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnvVars {
    pub backend_url: String,
    pub http_port: u16,
    pub dist_dir: Option<PathBuf>,
}

pub fn load_env_vars() -> anyhow::Result<EnvVars> {
    env_vars_from(|key| env::var(key).ok())
}

/// Build [`EnvVars`] from any key lookup, `std::env` in production.
pub fn env_vars_from(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<EnvVars> {
    let backend_url = match lookup("ISOCHRONE_BACKEND_URL") {
        Some(url) => check_backend_url("ISOCHRONE_BACKEND_URL", url)?,
        None => {
            log::info!("ISOCHRONE_BACKEND_URL not set, using {DEFAULT_BACKEND_URL}");
            DEFAULT_BACKEND_URL.to_string()
        }
    };

    let http_port = match lookup("HTTP_PORT") {
        Some(port) => port.parse().unwrap_or_else(|e| {
            log::error!("Invalid HTTP_PORT `{port}`: {e}");
            log::info!("Using default port {DEFAULT_PORT}");
            DEFAULT_PORT
        }),
        None => {
            log::info!("HTTP_PORT not set, using default port {DEFAULT_PORT}");
            DEFAULT_PORT
        }
    };

    let dist_dir = lookup("WALKABLE_DIST_DIR").map(PathBuf::from);

    Ok(EnvVars {
        backend_url,
        http_port,
        dist_dir,
    })
}

/// Reject backend URLs the isochrone client could not use. `source` names
/// where the value came from.
pub fn check_backend_url(source: &str, url: String) -> anyhow::Result<String> {
    parse_base_url(&url).with_context(|| format!("Invalid value for {source} `{url}`"))?;
    Ok(url)
}
