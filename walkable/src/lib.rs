use std::io::Write;

pub mod commands;
pub mod config;
pub mod server;

fn get_file_name(path_str: Option<&str>) -> String {
    if let Some(path_str_val) = path_str {
        let path = std::path::Path::new(path_str_val);
        if let Some(file_name) = path.file_name() {
            if let Some(s) = file_name.to_str() {
                return s.to_string();
            }
        }
    }

    "unknown".to_string()
}

/// Initialise `env_logger`. `RUST_LOG` wins over `debug`.
pub fn init_log(debug: bool) {
    let default_filter = if debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format(|buf, record| {
            let style = buf.default_level_style(record.level());
            writeln!(
                buf,
                "{} [{style}{}{style:#}] {} {}:{} - {}",
                chrono::Local::now().format("%Y-%m-%dT%H:%M:%S"),
                record.level(),
                record.target(),
                get_file_name(record.file()),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .init();
}

#[test]
fn test_get_file_name() {
    assert_eq!(get_file_name(Some("walkable/src/server.rs")), "server.rs");
    assert_eq!(get_file_name(None), "unknown");
}
