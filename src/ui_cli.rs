use std::io::{BufRead, Write};

use crate::app::{user_message, AppError, Reference, Viewer};
use crate::books::{self, DEFAULT_BOOK};
use crate::i18n::{keys, Translator};

/// 여러 줄 입력을 끝내는 줄.
pub const BLOCK_END: &str = ".";

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    LoadText,
    SaveTranslation,
    ShowTranslation,
    Books,
    Language,
    Exit,
}

/// 콘솔 입력/출력 한 쌍. 테스트에서는 메모리 버퍼를 넣는다.
pub struct Console<R, W> {
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, out: W) -> Self {
        Self { input, out }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    pub fn println(&mut self, text: &str) -> Result<(), AppError> {
        writeln!(self.out, "{text}")?;
        Ok(())
    }

    /// 프롬프트를 출력하고 한 줄을 읽는다. 입력이 끝나면 `None`.
    pub fn read_line(&mut self, prompt: &str) -> Result<Option<String>, AppError> {
        write!(self.out, "{prompt}")?;
        self.out.flush()?;
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(buf.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// `.` 한 글자짜리 줄이나 입력 끝까지 여러 줄을 읽어 줄바꿈으로 잇는다.
    /// 빈 줄은 문단 구분으로 그대로 남는다.
    pub fn read_block(&mut self) -> Result<String, AppError> {
        let mut lines = Vec::new();
        while let Some(line) = self.read_line("")? {
            if line.trim() == BLOCK_END {
                break;
            }
            lines.push(line);
        }
        Ok(lines.join("\n"))
    }
}

/// 메인 메뉴를 표시하고 선택값을 반환한다. 입력이 끝나면 종료로 본다.
pub fn main_menu<R: BufRead, W: Write>(
    tr: &Translator,
    con: &mut Console<R, W>,
) -> Result<MenuChoice, AppError> {
    for key in [
        keys::MAIN_MENU_TITLE,
        keys::MAIN_MENU_LOAD_TEXT,
        keys::MAIN_MENU_SAVE_TRANSLATION,
        keys::MAIN_MENU_SHOW_TRANSLATION,
        keys::MAIN_MENU_BOOKS,
        keys::MAIN_MENU_LANGUAGE,
        keys::MAIN_MENU_EXIT,
    ] {
        con.println(tr.t(key))?;
    }
    loop {
        let Some(sel) = con.read_line(tr.t(keys::PROMPT_MENU_SELECT))? else {
            return Ok(MenuChoice::Exit);
        };
        match sel.trim() {
            "1" => return Ok(MenuChoice::LoadText),
            "2" => return Ok(MenuChoice::SaveTranslation),
            "3" => return Ok(MenuChoice::ShowTranslation),
            "4" => return Ok(MenuChoice::Books),
            "5" => return Ok(MenuChoice::Language),
            "0" => return Ok(MenuChoice::Exit),
            _ => con.println(tr.t(keys::INVALID_SELECTION_RETRY))?,
        }
    }
}

/// 책/장/절을 물어 현재 참조를 갱신한다. 입력이 끝나면 `None`.
pub fn ask_reference<R: BufRead, W: Write>(
    tr: &Translator,
    con: &mut Console<R, W>,
    current: Option<&Reference>,
) -> Result<Option<Reference>, AppError> {
    let current_book = current.map_or(DEFAULT_BOOK, |r| r.book.as_str()).to_string();
    let book = loop {
        let Some(sel) = con.read_line(&format!("{} [{current_book}]: ", tr.t(keys::PROMPT_BOOK)))?
        else {
            return Ok(None);
        };
        let sel = sel.trim();
        if sel.is_empty() {
            break current_book.clone();
        }
        let found = sel
            .parse::<usize>()
            .ok()
            .and_then(books::book_by_index)
            .or_else(|| books::find_book(sel));
        match found {
            Some(b) => break b.to_string(),
            None => con.println(&format!("{} {sel}", tr.t(keys::ERROR_UNKNOWN_BOOK)))?,
        }
    };
    let Some(chapter) = con.read_line(tr.t(keys::PROMPT_CHAPTER))? else {
        return Ok(None);
    };
    let Some(verses) = con.read_line(tr.t(keys::PROMPT_VERSE))? else {
        return Ok(None);
    };
    Ok(Some(Reference::new(&book, &chapter, &verses)))
}

/// 본문 불러오기 메뉴를 처리한다.
pub fn handle_load_text<R: BufRead, W: Write>(
    tr: &Translator,
    con: &mut Console<R, W>,
    viewer: &Viewer,
    current: &mut Option<Reference>,
) -> Result<(), AppError> {
    let Some(reference) = ask_reference(tr, con, current.as_ref())? else {
        return Ok(());
    };
    match viewer.load_text(&reference) {
        Ok(text) if text.is_empty() => con.println(tr.t(keys::RESULT_NO_VERSES))?,
        Ok(text) => con.println(&text)?,
        Err(err) => report(tr, con, &err)?,
    }
    *current = Some(reference);
    Ok(())
}

/// 번역 저장 메뉴를 처리한다. 현재 참조가 없으면 먼저 묻는다.
pub fn handle_save_translation<R: BufRead, W: Write>(
    tr: &Translator,
    con: &mut Console<R, W>,
    viewer: &Viewer,
    current: &mut Option<Reference>,
) -> Result<(), AppError> {
    let reference = match current.clone() {
        Some(r) => r,
        None => match ask_reference(tr, con, None)? {
            Some(r) => r,
            None => return Ok(()),
        },
    };
    con.println(&format!("{} {reference}", tr.t(keys::CURRENT_REFERENCE)))?;
    con.println(tr.t(keys::PROMPT_TRANSLATION))?;
    let text = con.read_block()?;
    match viewer.save_translation(&reference, &text) {
        Ok(path) => con.println(&format!("{} {}", tr.t(keys::RESULT_SAVED), path.display()))?,
        Err(err) => report(tr, con, &err)?,
    }
    *current = Some(reference);
    Ok(())
}

/// 저장된 번역 보기 메뉴를 처리한다.
pub fn handle_show_translation<R: BufRead, W: Write>(
    tr: &Translator,
    con: &mut Console<R, W>,
    viewer: &Viewer,
    current: &mut Option<Reference>,
) -> Result<(), AppError> {
    let Some(reference) = ask_reference(tr, con, current.as_ref())? else {
        return Ok(());
    };
    match viewer.saved_translation(&reference) {
        Ok(Some(text)) => con.println(&text)?,
        Ok(None) => con.println(tr.t(keys::RESULT_NO_SAVED_TRANSLATION))?,
        Err(err) => report(tr, con, &err)?,
    }
    *current = Some(reference);
    Ok(())
}

/// 번호와 함께 27권 목록을 출력한다.
pub fn print_books<W: Write>(out: &mut W) -> Result<(), AppError> {
    for (i, book) in books::books().iter().enumerate() {
        writeln!(out, "{:>2}) {book}", i + 1)?;
    }
    Ok(())
}

/// 언어 설정 메뉴를 처리한다. 바뀐 언어 코드를 돌려준다.
pub fn handle_language<R: BufRead, W: Write>(
    tr: &Translator,
    con: &mut Console<R, W>,
) -> Result<Option<&'static str>, AppError> {
    con.println(tr.t(keys::SETTINGS_LANGUAGE_OPTIONS))?;
    let Some(sel) = con.read_line(tr.t(keys::PROMPT_MENU_SELECT))? else {
        return Ok(None);
    };
    let lang = match sel.trim() {
        "1" => "ko",
        "2" => "en",
        _ => {
            con.println(tr.t(keys::INVALID_SELECTION_RETRY))?;
            return Ok(None);
        }
    };
    Ok(Some(lang))
}

/// 오류를 사용자 메시지로 출력하고 로그에 남긴다. 루프는 계속된다.
fn report<R: BufRead, W: Write>(
    tr: &Translator,
    con: &mut Console<R, W>,
    err: &AppError,
) -> Result<(), AppError> {
    tracing::error!(error = %err, "request failed");
    con.println(&user_message(tr, err))
}
