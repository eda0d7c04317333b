//! 본문 조회와 번역 저장 로직을 라이브러리로 분리하여 CLI 뿐 아니라 추후 GUI 확장도 쉽게 한다.

pub mod app;
pub mod archive;
pub mod books;
pub mod cli;
pub mod config;
pub mod i18n;
pub mod logging;
pub mod scripture;
pub mod ui_cli;
