//! 대화형 메뉴를 메모리 콘솔로 끝까지 돌려 보는 테스트.
use std::fs;
use std::io::Cursor;

use new_testament_viewer::app;
use new_testament_viewer::config::Config;
use new_testament_viewer::i18n::Translator;
use new_testament_viewer::ui_cli::Console;

fn run_session(cfg: &mut Config, config_path: &std::path::Path, script: &str) -> String {
    let mut con = Console::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());
    app::run(cfg, config_path, Translator::new("en"), &mut con).expect("session");
    String::from_utf8(con.into_output()).expect("utf8")
}

#[test]
fn load_then_save_uses_current_reference() {
    let dir = tempfile::tempdir().expect("tempdir");
    let corpus = dir.path().join("text");
    fs::create_dir_all(&corpus).expect("mkdir");
    fs::write(
        corpus.join("Jude.txt"),
        "Jude 1:1\tἸούδας Ἰησοῦ Χριστοῦ δοῦλος\nJude 1:2\tἔλεος ὑμῖν\n",
    )
    .expect("write corpus");

    let mut cfg = Config {
        corpus_root: corpus,
        translations_dir: dir.path().join("translations"),
        ..Config::default()
    };
    let config_path = dir.path().join("config.toml");
    let script = "1\njude\n1\n1-2\n2\nJude, a servant\n\nof Jesus Christ\n.\n0\n";
    let out = run_session(&mut cfg, &config_path, script);

    assert!(out.contains("Ἰούδας Ἰησοῦ Χριστοῦ δοῦλος\nἔλεος ὑμῖν"));
    assert!(out.contains("Current reference: Jude 1:1-2"));
    let saved = dir.path().join("translations").join("Jude.1_1-2.translated.txt");
    assert_eq!(
        fs::read_to_string(saved).expect("saved"),
        "Jude, a servant\n\nof Jesus Christ"
    );
}

#[test]
fn errors_are_shown_and_loop_continues() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut cfg = Config {
        corpus_root: dir.path().join("missing"),
        translations_dir: dir.path().join("translations"),
        ..Config::default()
    };
    let config_path = dir.path().join("config.toml");
    let out = run_session(&mut cfg, &config_path, "1\nMatt\n1\n1\n0\n");
    assert!(out.contains("The specified text file does not exist."));
    assert!(out.contains("Exiting the program."));
}

#[test]
fn language_change_is_persisted() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut cfg = Config::default();
    let config_path = dir.path().join("config.toml");
    let out = run_session(&mut cfg, &config_path, "5\n1\n0\n");
    assert_eq!(cfg.language, "ko");
    assert!(out.contains("프로그램을 종료합니다."));
    let saved = fs::read_to_string(&config_path).expect("config");
    assert!(saved.contains("language = \"ko\""));
}
