use std::path::{Path, PathBuf};

use super::reference_store::ResolveError;
use super::verse_spec::{VerseSpec, VerseSpecError};

/// 코퍼스 한 줄이 나타내는 절. 장은 파일에 적힌 문자열 그대로 보관한다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerseRecord {
    pub book: String,
    pub chapter: String,
    pub verse: u32,
    pub text: String,
}

/// 한 책의 코퍼스 파일을 메모리에 올린 것.
///
/// 각 줄은 `"<책> <장>:<절>\t<본문>"` 형식이다. 탭 필드가 둘 미만인 줄은
/// 서식 잡음으로 보고 건너뛴다.
#[derive(Debug, Clone)]
pub struct Corpus {
    book: String,
    path: PathBuf,
    lines: Vec<String>,
}

impl Corpus {
    pub fn from_text(book: &str, path: impl Into<PathBuf>, text: &str) -> Self {
        Self {
            book: book.to_string(),
            path: path.into(),
            lines: text.lines().map(str::to_string).collect(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// 책과 장이 일치하고 절 번호가 `spec`에 속하는 줄을 파일 순서대로 고른다.
    ///
    /// 장은 정수로 바꾸지 않고 문자열 그대로 비교한다(`"01"`과 `"1"`은 다르다).
    /// 절 번호는 책과 장이 모두 일치하는 줄에서만 해석한다.
    pub fn select(&self, chapter: &str, spec: &VerseSpec) -> Result<Vec<VerseRecord>, ResolveError> {
        let mut out = Vec::new();
        for (idx, raw) in self.lines.iter().enumerate() {
            let line_no = idx + 1;
            let mut fields = raw.trim().split('\t');
            let (Some(reference), Some(text)) = (fields.next(), fields.next()) else {
                continue;
            };

            let (ref_book, ref_chapter, ref_verse) = split_reference(line_no, reference)?;
            if ref_book != self.book || ref_chapter != chapter {
                continue;
            }
            let verse = ref_verse
                .trim()
                .parse::<u32>()
                .map_err(|source| ResolveError::InvalidVerseSpec {
                    line: Some(line_no),
                    source: VerseSpecError::NotANumber {
                        text: ref_verse.trim().to_string(),
                        source,
                    },
                })?;
            if spec.contains(verse) {
                out.push(VerseRecord {
                    book: ref_book.to_string(),
                    chapter: ref_chapter.to_string(),
                    verse,
                    text: text.to_string(),
                });
            }
        }
        Ok(out)
    }
}

/// `"<책> <장>:<절>"` 참조 토큰을 나눈다.
fn split_reference(line: usize, reference: &str) -> Result<(&str, &str, &str), ResolveError> {
    let parts: Vec<&str> = reference.split_whitespace().collect();
    let [book, chapter_verse] = parts.as_slice() else {
        return Err(ResolveError::MalformedReferenceLine {
            line,
            reference: reference.to_string(),
        });
    };
    let cv: Vec<&str> = chapter_verse.split(':').collect();
    let [chapter, verse] = cv.as_slice() else {
        return Err(ResolveError::InvalidVerseSpec {
            line: Some(line),
            source: VerseSpecError::ChapterVerse {
                text: chapter_verse.to_string(),
            },
        });
    };
    Ok((*book, *chapter, *verse))
}
