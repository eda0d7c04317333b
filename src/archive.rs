//! 사용자가 입력한 번역문을 결정적인 파일 이름으로 저장한다.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;

use crate::scripture::{VerseSpec, VerseSpecError};

/// 번역 저장 시 발생 가능한 오류.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// 경로에 넣을 수 없는 책/장/절 값
    #[error("refusing to build a translation path from {field} '{value}'")]
    UnsafeReference { field: &'static str, value: String },
    /// 본문 조회와 같은 규칙으로 해석되지 않는 절 지정
    #[error("cannot save translation for verse '{value}': {source}")]
    InvalidVerseSpec {
        value: String,
        #[source]
        source: VerseSpecError,
    },
    /// 디렉터리 생성 또는 파일 쓰기 실패
    #[error("could not write translation to {}: {source}", .path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// 저장된 번역문을 읽지 못함
    #[error("could not read translation from {}: {source}", .path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// 번역 산출물 파일 이름: `<책>.<장>_<절>.translated.txt`. 세 값 모두 공백을 지운다.
pub fn artifact_file_name(book: &str, chapter: &str, verse_spec: &str) -> String {
    format!(
        "{}.{}_{}.translated.txt",
        strip_spaces(book),
        strip_spaces(chapter),
        strip_spaces(verse_spec)
    )
}

fn strip_spaces(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

/// 번역문을 고정된 출력 디렉터리에 파일로 남긴다. 호출 사이에 상태를 갖지 않는다.
#[derive(Debug, Clone)]
pub struct TranslationArchiver {
    output_dir: PathBuf,
}

impl TranslationArchiver {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// 검증을 거친 산출물 경로를 계산한다. 파일 시스템은 건드리지 않는다.
    pub fn artifact_path(
        &self,
        book: &str,
        chapter: &str,
        verse_spec: &str,
    ) -> Result<PathBuf, ArchiveError> {
        validate_reference(book, chapter, verse_spec)?;
        Ok(self
            .output_dir
            .join(artifact_file_name(book, chapter, verse_spec)))
    }

    /// 번역문을 저장하고 기록한 경로를 돌려준다.
    ///
    /// 같은 참조로 다시 저장하면 기존 파일을 통째로 덮어쓴다. 임시 파일에 먼저
    /// 쓴 뒤 이름을 바꾸므로 실패 시 대상 경로에 쓰다 만 파일이 남지 않는다.
    pub fn save(
        &self,
        book: &str,
        chapter: &str,
        verse_spec: &str,
        content: &str,
    ) -> Result<PathBuf, ArchiveError> {
        let path = self.artifact_path(book, chapter, verse_spec)?;
        tracing::info!(path = %path.display(), "saving translation");

        fs::create_dir_all(&self.output_dir).map_err(|source| {
            tracing::error!(dir = %self.output_dir.display(), error = %source, "cannot create translations directory");
            ArchiveError::WriteFailed {
                path: path.clone(),
                source,
            }
        })?;
        write_replacing(&path, content.as_bytes()).map_err(|source| {
            tracing::error!(path = %path.display(), error = %source, "error saving translation");
            ArchiveError::WriteFailed {
                path: path.clone(),
                source,
            }
        })?;

        tracing::info!(bytes = content.len(), "translation saved");
        Ok(path)
    }

    /// 이전에 저장한 번역문을 읽는다. 파일이 없으면 `None`.
    pub fn load(
        &self,
        book: &str,
        chapter: &str,
        verse_spec: &str,
    ) -> Result<Option<String>, ArchiveError> {
        let path = self.artifact_path(book, chapter, verse_spec)?;
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(ArchiveError::ReadFailed { path, source }),
        }
    }
}

/// 공백을 지운 뒤 책은 영숫자, 장은 숫자, 절은 숫자와 `-`만 허용한다.
/// 절 지정은 본문 조회와 같은 `VerseSpec::parse` 규칙도 통과해야 한다.
fn validate_reference(book: &str, chapter: &str, verse_spec: &str) -> Result<(), ArchiveError> {
    let unsafe_ref = |field: &'static str, value: &str| ArchiveError::UnsafeReference {
        field,
        value: value.to_string(),
    };

    let book_compact = strip_spaces(book);
    if book_compact.is_empty() || !book_compact.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(unsafe_ref("book", book));
    }
    if !is_digits(&strip_spaces(chapter)) {
        return Err(unsafe_ref("chapter", chapter));
    }
    let verses = strip_spaces(verse_spec);
    if verses.is_empty() || !verses.bytes().all(|b| b.is_ascii_digit() || b == b'-') {
        return Err(unsafe_ref("verse", verse_spec));
    }
    VerseSpec::parse(&verses).map_err(|source| ArchiveError::InvalidVerseSpec {
        value: verse_spec.to_string(),
        source,
    })?;
    Ok(())
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn write_replacing(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let tmp_path = tmp_write_path(path);
    let write_result = (|| -> io::Result<()> {
        let mut file = File::create(&tmp_path)?;
        file.write_all(bytes)?;
        file.sync_all()
    })();
    if let Err(e) = write_result {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }
    fs::rename(&tmp_path, path).inspect_err(|_| {
        let _ = fs::remove_file(&tmp_path);
    })
}

fn tmp_write_path(path: &Path) -> PathBuf {
    let unique = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let mut tmp: OsString = path.as_os_str().to_os_string();
    tmp.push(format!(".tmp.{}.{}", std::process::id(), unique));
    PathBuf::from(tmp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_strips_spaces_from_book() {
        assert_eq!(
            artifact_file_name("1 John", "1", "1-3"),
            "1John.1_1-3.translated.txt"
        );
    }

    #[test]
    fn path_hostile_values_are_rejected() {
        let archiver = TranslationArchiver::new("translations");
        for (book, chapter, verse) in [
            ("1John", "../1", "1"),
            ("1John", "1", "1/2"),
            ("1John", "1", ".."),
            ("../etc", "1", "1"),
            ("1John", "", "1"),
            ("1John", "1", "+3"),
            ("", "1", "1"),
        ] {
            assert!(
                matches!(
                    archiver.artifact_path(book, chapter, verse),
                    Err(ArchiveError::UnsafeReference { .. })
                ),
                "{book} {chapter}:{verse} should be rejected"
            );
        }
    }

    #[test]
    fn verse_spec_follows_lookup_rules() {
        let archiver = TranslationArchiver::new("out");
        for verse in ["2-1", "1-", "1-2-3", "0"] {
            assert!(
                matches!(
                    archiver.artifact_path("Jude", "1", verse),
                    Err(ArchiveError::InvalidVerseSpec { .. })
                ),
                "{verse} should be rejected"
            );
        }
        assert_eq!(
            archiver.artifact_path("Jude", " 1 ", " 1 - 2 ").unwrap(),
            Path::new("out").join("Jude.1_1-2.translated.txt")
        );
    }

    #[test]
    fn accepted_reference_lands_in_output_dir() {
        let archiver = TranslationArchiver::new("out");
        let path = archiver.artifact_path("Matt", "5", "3-12").unwrap();
        assert_eq!(path, Path::new("out").join("Matt.5_3-12.translated.txt"));
    }
}
