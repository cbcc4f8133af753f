use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::{Path, PathBuf},
};

use tokio_util::sync::CancellationToken;
use ui_common::AppConfig;
use warp::Filter;

use crate::config::EnvVars;

pub const CONFIG_PATH: &str = "config.json";

fn project_root() -> anyhow::Result<PathBuf> {
    let mut dir = std::env::current_exe()?;
    loop {
        let mut cargo_lock = dir.clone();
        cargo_lock.push("Cargo.lock");
        if cargo_lock.exists() {
            return Ok(dir);
        } else if !dir.pop() {
            anyhow::bail!("Cannot determine root of project. Cargo.lock not found");
        }
    }
}

fn has_index(dir: &Path) -> bool {
    dir.join("index.html").exists()
}

/// Locate the built front-end. An explicitly configured directory must
/// contain `index.html`; otherwise the trunk output directories of the
/// workspace are tried.
pub fn find_dist_dir(configured: Option<&Path>) -> anyhow::Result<PathBuf> {
    if let Some(dir) = configured {
        if has_index(dir) {
            return Ok(dir.to_path_buf());
        }
        anyhow::bail!("Cannot find index.html in {dir:?}");
    }

    let root_dir = project_root()?;

    let dist_dir = root_dir.join("target/dist");
    if has_index(&dist_dir) {
        return Ok(dist_dir);
    }

    let dist_dir_alt = root_dir.join("ui/frontend/dist");
    log::warn!("Cannot find index.html in {dist_dir:?}, trying {dist_dir_alt:?}");
    if has_index(&dist_dir_alt) {
        return Ok(dist_dir_alt);
    }

    anyhow::bail!("Cannot find index.html in either {dist_dir:?} or {dist_dir_alt:?}");
}

/// `GET /config.json`, the runtime configuration read by the browser app
pub fn config_route(
    config: AppConfig,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::get()
        .and(warp::path(CONFIG_PATH))
        .and(warp::path::end())
        .map(move || warp::reply::json(&config))
}

pub fn routes(
    config: AppConfig,
    dist_dir: PathBuf,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    // handle path "/"
    let index = warp::get()
        .and(warp::path::end())
        .and(warp::fs::file(dist_dir.join("index.html")));

    // handle path "/xxxx" (e.g. http://hostname/walkable.js loads dist/walkable.js)
    let static_dir = warp::fs::dir(dist_dir);

    config_route(config)
        .or(index)
        .or(static_dir)
        .with(warp::log("walkable::server"))
}

pub async fn start(env: &EnvVars, shutdown: CancellationToken) -> anyhow::Result<()> {
    let dist_dir = find_dist_dir(env.dist_dir.as_deref())?;
    log::info!("Serving front-end from {dist_dir:?}");

    let config = AppConfig {
        backend_url: env.backend_url.clone(),
    };
    log::info!("Browser clients will use backend {}", config.backend_url);

    let address = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), env.http_port);
    let signal = async move {
        shutdown.cancelled().await;
        log::info!("Shutting down web server");
    };
    let (addr, server) = match warp::serve(routes(config, dist_dir))
        .try_bind_with_graceful_shutdown(address, signal)
    {
        Ok(r) => r,
        Err(e) => anyhow::bail!(e),
    };
    log::info!("Listening on http://{addr}");

    server.await;
    log::warn!("web server exited");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_config_route() {
        let config = AppConfig {
            backend_url: "http://iso.example.com".into(),
        };
        let res = warp::test::request()
            .method("GET")
            .path("/config.json")
            .reply(&config_route(config.clone()))
            .await;

        assert_eq!(res.status(), 200);
        let body = std::str::from_utf8(res.body()).unwrap();
        assert_eq!(AppConfig::from_json(body).unwrap(), config);
    }

    #[tokio::test]
    async fn test_routes_serve_index_and_assets() {
        let dist = tempfile::tempdir().unwrap();
        std::fs::write(dist.path().join("index.html"), "<html>walkable</html>").unwrap();
        std::fs::write(dist.path().join("app.js"), "console.log(1)").unwrap();

        let filter = routes(AppConfig::default(), dist.path().to_path_buf());

        let res = warp::test::request().path("/").reply(&filter).await;
        assert_eq!(res.status(), 200);
        assert_eq!(res.body().as_ref(), b"<html>walkable</html>");

        let res = warp::test::request().path("/app.js").reply(&filter).await;
        assert_eq!(res.status(), 200);

        let res = warp::test::request().path("/config.json").reply(&filter).await;
        assert_eq!(res.status(), 200);

        let res = warp::test::request().path("/missing.css").reply(&filter).await;
        assert_eq!(res.status(), 404);
    }

    #[test]
    fn test_find_configured_dist_dir() {
        let dist = tempfile::tempdir().unwrap();
        assert!(find_dist_dir(Some(dist.path())).is_err());

        std::fs::write(dist.path().join("index.html"), "").unwrap();
        assert_eq!(find_dist_dir(Some(dist.path())).unwrap(), dist.path());
    }
}
