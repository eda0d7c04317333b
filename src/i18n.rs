use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_LOAD_TEXT: &str = "main_menu.load_text";
    pub const MAIN_MENU_SAVE_TRANSLATION: &str = "main_menu.save_translation";
    pub const MAIN_MENU_SHOW_TRANSLATION: &str = "main_menu.show_translation";
    pub const MAIN_MENU_BOOKS: &str = "main_menu.books";
    pub const MAIN_MENU_LANGUAGE: &str = "main_menu.language";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";

    pub const PROMPT_BOOK: &str = "prompt.book";
    pub const PROMPT_CHAPTER: &str = "prompt.chapter";
    pub const PROMPT_VERSE: &str = "prompt.verse";
    pub const PROMPT_TRANSLATION: &str = "prompt.translation";
    pub const CURRENT_REFERENCE: &str = "reference.current";

    pub const RESULT_NO_VERSES: &str = "result.no_verses";
    pub const RESULT_SAVED: &str = "result.saved";
    pub const RESULT_NO_SAVED_TRANSLATION: &str = "result.no_saved_translation";

    pub const ERROR_UNKNOWN_BOOK: &str = "error.unknown_book";
    pub const ERROR_CORPUS_NOT_FOUND: &str = "error.corpus_not_found";
    pub const ERROR_VERSE_RANGE: &str = "error.verse_range";
    pub const ERROR_MALFORMED_LINE: &str = "error.malformed_line";
    pub const ERROR_UNSAFE_REFERENCE: &str = "error.unsafe_reference";
    pub const ERROR_SAVE_FAILED: &str = "error.save_failed";
    pub const ERROR_READ_FAILED: &str = "error.read_failed";
    pub const ERROR_UNEXPECTED: &str = "error.unexpected";

    pub const SETTINGS_LANGUAGE_OPTIONS: &str = "settings.language_options";
    pub const SETTINGS_LANGUAGE_SAVED: &str = "settings.language_saved";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("ko") {
            Language::Ko
        } else {
            Language::En
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 en으로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&Path>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides(Path::new("locales"), lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    /// 번역을 가져온다. 언어팩 → 선택 언어 → 영어 순으로 찾고, 끝내 없으면 키 자체.
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        if let Some(v) = self.overrides.as_ref().and_then(|m| m.get(key)) {
            return v;
        }
        let builtin: Option<&str> = match self.lang {
            Language::Ko => ko(key).or_else(|| en(key)),
            Language::En => en(key),
        };
        builtin.unwrap_or(key)
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: Option<&str>, config_lang: Option<&str>) -> String {
    cli_arg
        .and_then(normalize_lang)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko".into()),
        "en" => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(lang) = get_locale().as_deref().and_then(normalize_locale_string) {
        return Some(lang);
    }
    ["LC_ALL", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|v| normalize_locale_string(&v))
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 또는 [섹션] 아래 key = "value".
fn load_overrides(dir: &Path, lang: &str) -> Option<HashMap<String, String>> {
    let path = dir.join(format!("{lang}.toml"));
    let content = fs::read_to_string(path).ok()?;
    parse_toml_to_map(&content)
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn ko(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "오류:",
        APP_EXIT => "프로그램을 종료합니다.",
        MAIN_MENU_TITLE => "\n=== 그리스어 신약 뷰어 ===",
        MAIN_MENU_LOAD_TEXT => "1) 본문 불러오기",
        MAIN_MENU_SAVE_TRANSLATION => "2) 번역 저장",
        MAIN_MENU_SHOW_TRANSLATION => "3) 저장된 번역 보기",
        MAIN_MENU_BOOKS => "4) 책 목록",
        MAIN_MENU_LANGUAGE => "5) 언어 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        PROMPT_BOOK => "책 (번호 또는 코드, 엔터=현재값)",
        PROMPT_CHAPTER => "장: ",
        PROMPT_VERSE => "절 (예: 3 또는 3-5): ",
        PROMPT_TRANSLATION => "번역문을 입력하세요. 마침표(.) 한 글자만 있는 줄을 입력하면 끝납니다:",
        CURRENT_REFERENCE => "현재 참조:",
        RESULT_NO_VERSES => "일치하는 절이 없습니다.",
        RESULT_SAVED => "번역을 저장했습니다:",
        RESULT_NO_SAVED_TRANSLATION => "저장된 번역이 없습니다.",
        ERROR_UNKNOWN_BOOK => "알 수 없는 책 코드입니다:",
        ERROR_CORPUS_NOT_FOUND => "지정한 본문 파일이 존재하지 않습니다.",
        ERROR_VERSE_RANGE => "절 범위에 오류가 있습니다:",
        ERROR_MALFORMED_LINE => "본문 파일에 잘못된 참조 줄이 있습니다:",
        ERROR_UNSAFE_REFERENCE => "장과 절은 숫자여야 합니다 (예: 3 또는 3-5):",
        ERROR_SAVE_FAILED => "번역 저장 중 오류:",
        ERROR_READ_FAILED => "번역 읽기 중 오류:",
        ERROR_UNEXPECTED => "예기치 않은 오류:",
        SETTINGS_LANGUAGE_OPTIONS => "1) 한국어  2) English",
        SETTINGS_LANGUAGE_SAVED => "언어가 변경되었습니다:",
        _ => return None,
    })
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error:",
        APP_EXIT => "Exiting the program.",
        MAIN_MENU_TITLE => "\n=== Greek New Testament Viewer ===",
        MAIN_MENU_LOAD_TEXT => "1) Load Greek text",
        MAIN_MENU_SAVE_TRANSLATION => "2) Save translation",
        MAIN_MENU_SHOW_TRANSLATION => "3) Show saved translation",
        MAIN_MENU_BOOKS => "4) List books",
        MAIN_MENU_LANGUAGE => "5) Language",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please choose again.",
        PROMPT_BOOK => "Book (number or code, enter=keep current)",
        PROMPT_CHAPTER => "Chapter: ",
        PROMPT_VERSE => "Verse (e.g. 3 or 3-5): ",
        PROMPT_TRANSLATION => "Type your translation. Finish with a line containing only \".\":",
        CURRENT_REFERENCE => "Current reference:",
        RESULT_NO_VERSES => "No verses matched.",
        RESULT_SAVED => "Translation saved successfully to",
        RESULT_NO_SAVED_TRANSLATION => "No saved translation.",
        ERROR_UNKNOWN_BOOK => "Unknown book code:",
        ERROR_CORPUS_NOT_FOUND => "The specified text file does not exist.",
        ERROR_VERSE_RANGE => "An error occurred with the verse range:",
        ERROR_MALFORMED_LINE => "The text file contains a malformed reference line:",
        ERROR_UNSAFE_REFERENCE => "Chapter and verse must be numbers (e.g. 3 or 3-5):",
        ERROR_SAVE_FAILED => "Error saving translation:",
        ERROR_READ_FAILED => "Error reading translation:",
        ERROR_UNEXPECTED => "An unexpected error occurred:",
        SETTINGS_LANGUAGE_OPTIONS => "1) 한국어  2) English",
        SETTINGS_LANGUAGE_SAVED => "Language changed to:",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_is_the_fallback() {
        let tr = Translator::new("fr");
        assert_eq!(tr.language(), Language::En);
        assert_eq!(
            tr.t(keys::ERROR_CORPUS_NOT_FOUND),
            "The specified text file does not exist."
        );
        assert_eq!(tr.t("no.such.key"), "no.such.key");
    }

    #[test]
    fn cli_flag_wins_over_config() {
        assert_eq!(resolve_language(Some("ko-KR"), Some("en")), "ko");
        assert_eq!(resolve_language(Some("auto"), Some("en-us")), "en");
    }

    #[test]
    fn pack_overrides_builtin_strings() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("en.toml"),
            "[result]\nno_verses = \"Nothing here.\"\n",
        )
        .unwrap();
        let tr = Translator::new_with_pack("en", Some(dir.path()));
        assert_eq!(tr.t(keys::RESULT_NO_VERSES), "Nothing here.");
        assert_eq!(tr.t(keys::RESULT_SAVED), "Translation saved successfully to");
    }
}
