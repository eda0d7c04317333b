use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::archive::{ArchiveError, TranslationArchiver};
use crate::config::{Config, ConfigError};
use crate::i18n::{self, keys, Translator};
use crate::scripture::{ReferenceStore, ResolveError};
use crate::ui_cli::{self, Console, MenuChoice};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 콘솔 입출력 오류
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// 본문 조회 오류
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    /// 번역 저장/읽기 오류
    #[error(transparent)]
    Archive(#[from] ArchiveError),
    /// 27권 목록에 없는 책 코드
    #[error("unknown book code: {0}")]
    UnknownBook(String),
}

/// 화면 입력란에 해당하는 현재 참조(책, 장, 절).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub book: String,
    pub chapter: String,
    pub verses: String,
}

impl Reference {
    /// 장과 절 입력값은 앞뒤 공백을 지워 보관한다.
    pub fn new(book: &str, chapter: &str, verses: &str) -> Self {
        Self {
            book: book.to_string(),
            chapter: chapter.trim().to_string(),
            verses: verses.trim().to_string(),
        }
    }
}

impl std::fmt::Display for Reference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}:{}", self.book, self.chapter, self.verses)
    }
}

/// 본문 조회기와 번역 저장기를 설정값으로 묶은 것. UI 계층이 이 둘만 호출한다.
#[derive(Debug, Clone)]
pub struct Viewer {
    store: ReferenceStore,
    archiver: TranslationArchiver,
}

impl Viewer {
    pub fn new(store: ReferenceStore, archiver: TranslationArchiver) -> Self {
        Self { store, archiver }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(
            ReferenceStore::new(&cfg.corpus_root),
            TranslationArchiver::new(&cfg.translations_dir),
        )
    }

    pub fn load_text(&self, r: &Reference) -> Result<String, AppError> {
        Ok(self.store.resolve(&r.book, &r.chapter, &r.verses)?)
    }

    pub fn save_translation(&self, r: &Reference, text: &str) -> Result<PathBuf, AppError> {
        Ok(self.archiver.save(&r.book, &r.chapter, &r.verses, text)?)
    }

    pub fn saved_translation(&self, r: &Reference) -> Result<Option<String>, AppError> {
        Ok(self.archiver.load(&r.book, &r.chapter, &r.verses)?)
    }
}

/// 오류를 사용자에게 보여줄 한 줄 메시지로 바꾼다.
pub fn user_message(tr: &Translator, err: &AppError) -> String {
    match err {
        AppError::Resolve(ResolveError::CorpusNotFound { .. }) => {
            tr.t(keys::ERROR_CORPUS_NOT_FOUND).to_string()
        }
        AppError::Resolve(ResolveError::InvalidVerseSpec { source, .. }) => {
            format!("{} {source}", tr.t(keys::ERROR_VERSE_RANGE))
        }
        AppError::Resolve(e @ ResolveError::MalformedReferenceLine { .. }) => {
            format!("{} {e}", tr.t(keys::ERROR_MALFORMED_LINE))
        }
        AppError::Archive(ArchiveError::UnsafeReference { value, .. }) => {
            format!("{} '{value}'", tr.t(keys::ERROR_UNSAFE_REFERENCE))
        }
        AppError::Archive(ArchiveError::InvalidVerseSpec { source, .. }) => {
            format!("{} {source}", tr.t(keys::ERROR_VERSE_RANGE))
        }
        AppError::Archive(e @ ArchiveError::WriteFailed { .. }) => {
            format!("{} {e}", tr.t(keys::ERROR_SAVE_FAILED))
        }
        AppError::Archive(e @ ArchiveError::ReadFailed { .. }) => {
            format!("{} {e}", tr.t(keys::ERROR_READ_FAILED))
        }
        AppError::UnknownBook(code) => format!("{} {code}", tr.t(keys::ERROR_UNKNOWN_BOOK)),
        AppError::Io(_) | AppError::Config(_) => {
            format!("{} {err}", tr.t(keys::ERROR_UNEXPECTED))
        }
    }
}

/// 대화형 CLI의 메인 루프를 실행한다. 언어를 바꾸면 설정 파일에 저장한다.
pub fn run<R: BufRead, W: Write>(
    config: &mut Config,
    config_path: &Path,
    tr: Translator,
    con: &mut Console<R, W>,
) -> Result<(), AppError> {
    let viewer = Viewer::from_config(config);
    let mut tr = tr;
    let mut current: Option<Reference> = None;
    loop {
        match ui_cli::main_menu(&tr, con)? {
            MenuChoice::LoadText => ui_cli::handle_load_text(&tr, con, &viewer, &mut current)?,
            MenuChoice::SaveTranslation => {
                ui_cli::handle_save_translation(&tr, con, &viewer, &mut current)?
            }
            MenuChoice::ShowTranslation => {
                ui_cli::handle_show_translation(&tr, con, &viewer, &mut current)?
            }
            MenuChoice::Books => {
                let mut listing = Vec::new();
                ui_cli::print_books(&mut listing)?;
                con.println(String::from_utf8_lossy(&listing).trim_end())?;
            }
            MenuChoice::Language => {
                if let Some(lang) = ui_cli::handle_language(&tr, con)? {
                    config.language = lang.to_string();
                    config.save(config_path)?;
                    tr = Translator::new_with_pack(&i18n::resolve_language(Some(lang), None), None);
                    con.println(&format!("{} {lang}", tr.t(keys::SETTINGS_LANGUAGE_SAVED)))?;
                }
            }
            MenuChoice::Exit => {
                con.println(tr.t(keys::APP_EXIT))?;
                break;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scripture::VerseSpecError;

    #[test]
    fn reference_trims_user_input() {
        let r = Reference::new("Matt", " 5 ", " 3-12\n");
        assert_eq!(r.to_string(), "Matt 5:3-12");
    }

    #[test]
    fn messages_follow_error_kind() {
        let tr = Translator::new("en");
        let missing = AppError::Resolve(ResolveError::CorpusNotFound {
            book: "Nope".into(),
            path: PathBuf::from("Nope.txt"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        });
        assert_eq!(
            user_message(&tr, &missing),
            "The specified text file does not exist."
        );

        let bad = AppError::Resolve(ResolveError::from(VerseSpecError::Reversed {
            start: 5,
            end: 3,
        }));
        assert!(user_message(&tr, &bad).starts_with("An error occurred with the verse range:"));
    }
}
