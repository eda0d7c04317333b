/// 신약 27권의 책 코드 목록. 코퍼스 파일 이름(`<코드>.txt`)과 동일하다.
/// 순서는 책 선택 메뉴에 표시되는 순서를 따른다.
pub const BOOKS: [&str; 27] = [
    "1Cor", "1John", "1Pet", "1Thess", "1Tim", "2Cor", "2John", "2Pet", "2Thess", "2Tim", "3John",
    "Acts", "Col", "Eph", "Gal", "Heb", "James", "Jude", "John", "Luke", "Mark", "Matt", "Phil",
    "Phlm", "Rev", "Rom", "Titus",
];

/// 책 선택기의 초기값.
pub const DEFAULT_BOOK: &str = "1John";

pub fn books() -> &'static [&'static str] {
    &BOOKS
}

/// 사용자 입력을 정식 책 코드로 맞춘다. 정확히 일치하는 코드를 우선하고,
/// 없으면 대소문자를 무시하고 찾는다.
pub fn find_book(code: &str) -> Option<&'static str> {
    let code = code.trim();
    BOOKS
        .iter()
        .find(|b| **b == code)
        .or_else(|| BOOKS.iter().find(|b| b.eq_ignore_ascii_case(code)))
        .copied()
}

/// 메뉴 번호(1부터 시작)로 책 코드를 찾는다.
pub fn book_by_index(n: usize) -> Option<&'static str> {
    n.checked_sub(1).and_then(|i| BOOKS.get(i)).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_book_normalizes_case() {
        assert_eq!(find_book("matt"), Some("Matt"));
        assert_eq!(find_book(" 1JOHN "), Some("1John"));
        assert_eq!(find_book("Genesis"), None);
    }

    #[test]
    fn book_index_is_one_based() {
        assert_eq!(book_by_index(1), Some("1Cor"));
        assert_eq!(book_by_index(27), Some("Titus"));
        assert_eq!(book_by_index(0), None);
        assert_eq!(book_by_index(28), None);
    }

    #[test]
    fn default_book_is_listed() {
        assert!(BOOKS.contains(&DEFAULT_BOOK));
    }
}
