//! `tracing` 구독자 초기화.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// 전역 구독자를 한 번 설치한다. `RUST_LOG`가 있으면 `default_level`보다 우선한다.
///
/// `log_file`을 주면 ANSI 없이 그 파일에 덧붙여 쓴다. 이미 구독자가 설치돼
/// 있으면 아무 것도 하지 않는다.
pub fn init(default_level: &str, log_file: Option<&Path>) -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .ok()
        .or_else(|| EnvFilter::try_new(default_level).ok())
        .unwrap_or_else(|| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let installed = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder.with_writer(io::stderr).try_init(),
    };
    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_go_to_the_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("viewer.log");
        init("info", Some(&path)).unwrap();
        tracing::error!(book = "Jude", "log file smoke test");
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("log file smoke test"));
        assert!(!written.contains("\u{1b}["));
    }
}
