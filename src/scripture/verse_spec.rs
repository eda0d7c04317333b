use std::fmt;
use std::num::ParseIntError;

use thiserror::Error;

/// 절 지정 문자열을 해석할 때 발생 가능한 오류.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerseSpecError {
    /// 10진 정수로 읽을 수 없는 값
    #[error("invalid verse number '{text}': {source}")]
    NotANumber {
        text: String,
        #[source]
        source: ParseIntError,
    },
    /// 절 번호는 1부터 시작한다
    #[error("verse numbers start at 1, got '{text}'")]
    Zero { text: String },
    /// 하이픈 분할 결과가 정확히 두 조각이 아님
    #[error("a verse range needs exactly one '-', got '{text}'")]
    RangeParts { text: String },
    /// 시작 절이 끝 절보다 큼
    #[error("verse range {start}-{end} runs backwards")]
    Reversed { start: u32, end: u32 },
    /// 코퍼스 참조의 `장:절` 부분이 콜론으로 정확히 나뉘지 않음
    #[error("'{text}' is not a chapter:verse pair")]
    ChapterVerse { text: String },
}

/// 단일 절 또는 양 끝을 포함하는 절 범위.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerseSpec {
    Single(u32),
    Range { start: u32, end: u32 },
}

impl VerseSpec {
    /// `"7"`, `"3-5"`, `" 3 - 5 "` 형태를 해석한다. 앞뒤 공백은 무시한다.
    pub fn parse(input: &str) -> Result<Self, VerseSpecError> {
        let input = input.trim();
        if !input.contains('-') {
            return parse_verse_number(input).map(VerseSpec::Single);
        }
        let parts: Vec<&str> = input.split('-').collect();
        let [start, end] = parts.as_slice() else {
            return Err(VerseSpecError::RangeParts {
                text: input.to_string(),
            });
        };
        let start = parse_verse_number(start)?;
        let end = parse_verse_number(end)?;
        if start > end {
            return Err(VerseSpecError::Reversed { start, end });
        }
        Ok(VerseSpec::Range { start, end })
    }

    pub fn contains(&self, verse: u32) -> bool {
        match *self {
            VerseSpec::Single(v) => v == verse,
            VerseSpec::Range { start, end } => (start..=end).contains(&verse),
        }
    }

    pub fn start(&self) -> u32 {
        match *self {
            VerseSpec::Single(v) => v,
            VerseSpec::Range { start, .. } => start,
        }
    }

    pub fn end(&self) -> u32 {
        match *self {
            VerseSpec::Single(v) => v,
            VerseSpec::Range { end, .. } => end,
        }
    }
}

impl fmt::Display for VerseSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerseSpec::Single(v) => write!(f, "{v}"),
            VerseSpec::Range { start, end } => write!(f, "{start}-{end}"),
        }
    }
}

/// 공백을 제거한 뒤 양의 정수 절 번호로 읽는다.
pub(crate) fn parse_verse_number(text: &str) -> Result<u32, VerseSpecError> {
    let text = text.trim();
    let n = text
        .parse::<u32>()
        .map_err(|source| VerseSpecError::NotANumber {
            text: text.to_string(),
            source,
        })?;
    if n == 0 {
        return Err(VerseSpecError::Zero {
            text: text.to_string(),
        });
    }
    Ok(n)
}
