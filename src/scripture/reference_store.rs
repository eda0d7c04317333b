use std::fs;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::corpus::{Corpus, VerseRecord};
use super::verse_spec::{VerseSpec, VerseSpecError};

/// 본문 조회 중 발생 가능한 오류.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// 코퍼스 파일이 없거나 읽을 수 없음
    #[error("corpus for '{book}' could not be read from {}: {source}", .path.display())]
    CorpusNotFound {
        book: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// 절 지정 또는 코퍼스 참조의 장:절 부분을 해석할 수 없음
    #[error("invalid verse specification{}: {source}", at_line(.line))]
    InvalidVerseSpec {
        line: Option<usize>,
        #[source]
        source: VerseSpecError,
    },
    /// 참조 토큰이 `<책> <장>:<절>` 두 부분으로 나뉘지 않음
    #[error("corpus line {line}: malformed reference '{reference}'")]
    MalformedReferenceLine { line: usize, reference: String },
}

impl From<VerseSpecError> for ResolveError {
    fn from(source: VerseSpecError) -> Self {
        ResolveError::InvalidVerseSpec { line: None, source }
    }
}

fn at_line(line: &Option<usize>) -> String {
    line.map(|l| format!(" on corpus line {l}"))
        .unwrap_or_default()
}

/// 책 코드로 코퍼스 파일을 찾아 장/절 범위 조회에 답한다.
///
/// 호출 사이에 아무 것도 캐시하지 않는다. 매 조회마다 파일을 다시 읽는다.
#[derive(Debug, Clone)]
pub struct ReferenceStore {
    corpus_root: PathBuf,
}

impl ReferenceStore {
    pub fn new(corpus_root: impl Into<PathBuf>) -> Self {
        Self {
            corpus_root: corpus_root.into(),
        }
    }

    /// 책 하나의 코퍼스 경로: `<corpus_root>/<book>.txt`.
    pub fn corpus_path(&self, book: &str) -> PathBuf {
        self.corpus_root.join(format!("{book}.txt"))
    }

    /// 코퍼스 파일 전체를 읽어 들인다.
    pub fn load(&self, book: &str) -> Result<Corpus, ResolveError> {
        let path = self.corpus_path(book);
        let text = fs::read_to_string(&path).map_err(|source| ResolveError::CorpusNotFound {
            book: book.to_string(),
            path: path.clone(),
            source,
        })?;
        let corpus = Corpus::from_text(book, path, &text);
        tracing::debug!(
            book,
            path = %corpus.path().display(),
            lines = corpus.line_count(),
            "corpus loaded"
        );
        Ok(corpus)
    }

    /// 조회 결과를 절 단위로 돌려준다. 순서는 파일에 나타난 순서다.
    pub fn lookup(
        &self,
        book: &str,
        chapter: &str,
        verse_spec: &str,
    ) -> Result<Vec<VerseRecord>, ResolveError> {
        let chapter = chapter.trim();
        let corpus = self.load(book)?;
        let spec = VerseSpec::parse(verse_spec)?;
        corpus.select(chapter, &spec)
    }

    /// 일치하는 절 본문을 줄바꿈으로 이어 붙인다. 일치하는 절이 없으면 빈 문자열.
    pub fn resolve(&self, book: &str, chapter: &str, verse_spec: &str) -> Result<String, ResolveError> {
        tracing::info!(
            book,
            chapter = chapter.trim(),
            verses = verse_spec.trim(),
            "resolving scripture text"
        );
        match self.lookup(book, chapter, verse_spec) {
            Ok(records) => {
                tracing::info!(matched = records.len(), "scripture text resolved");
                let texts: Vec<String> = records.into_iter().map(|r| r.text).collect();
                Ok(texts.join("\n"))
            }
            Err(err) => {
                tracing::warn!(error = %err, "scripture lookup failed");
                Err(err)
            }
        }
    }
}
