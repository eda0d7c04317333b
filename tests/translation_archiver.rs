//! 번역 저장 회귀 테스트.
use std::fs;

use new_testament_viewer::archive::{ArchiveError, TranslationArchiver};

#[test]
fn save_writes_canonical_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("translations");
    let archiver = TranslationArchiver::new(&out);

    let path = archiver
        .save("1John", "1", "1", "In the beginning...")
        .expect("save");
    assert_eq!(path, out.join("1John.1_1.translated.txt"));
    assert_eq!(fs::read_to_string(&path).expect("read"), "In the beginning...");
}

#[test]
fn second_save_overwrites() {
    let dir = tempfile::tempdir().expect("tempdir");
    let archiver = TranslationArchiver::new(dir.path().join("translations"));

    let first = archiver.save("1John", "1", "1", "first draft, longer").expect("save");
    let second = archiver.save("1John", "1", "1", "final").expect("save");
    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(&second).expect("read"), "final");

    let entries: Vec<_> = fs::read_dir(dir.path().join("translations"))
        .expect("read_dir")
        .collect();
    assert_eq!(entries.len(), 1, "temp files must not be left behind");
}

#[test]
fn empty_content_is_saved() {
    let dir = tempfile::tempdir().expect("tempdir");
    let archiver = TranslationArchiver::new(dir.path());
    let path = archiver.save("Rev", "22", "20-21", "").expect("save");
    assert_eq!(fs::read_to_string(path).expect("read"), "");
}

#[test]
fn uncreatable_directory_is_write_failed() {
    let dir = tempfile::tempdir().expect("tempdir");
    let blocker = dir.path().join("translations");
    fs::write(&blocker, "not a directory").expect("write blocker");
    let archiver = TranslationArchiver::new(&blocker);

    let err = archiver.save("1John", "1", "1", "text").unwrap_err();
    assert!(matches!(err, ArchiveError::WriteFailed { .. }), "{err}");
    assert_eq!(fs::read_to_string(&blocker).expect("read"), "not a directory");
    assert!(!blocker.join("1John.1_1.translated.txt").exists());
}

#[test]
fn path_traversal_is_refused_without_touching_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("translations");
    let archiver = TranslationArchiver::new(&out);

    let err = archiver.save("1John", "../../etc", "1", "x").unwrap_err();
    assert!(matches!(
        err,
        ArchiveError::UnsafeReference { field: "chapter", .. }
    ));
    assert!(!out.exists());
}

#[test]
fn load_reads_back_saved_translation() {
    let dir = tempfile::tempdir().expect("tempdir");
    let archiver = TranslationArchiver::new(dir.path());
    assert_eq!(archiver.load("Matt", "5", "3-12").expect("load"), None);
    archiver.save("Matt", "5", "3-12", "Blessed are").expect("save");
    assert_eq!(
        archiver.load("Matt", "5", "3-12").expect("load").as_deref(),
        Some("Blessed are")
    );
}

#[test]
fn verse_spec_is_compacted_and_checked_like_lookups() {
    let dir = tempfile::tempdir().expect("tempdir");
    let archiver = TranslationArchiver::new(dir.path());

    let path = archiver.save("Jude", "1", "1 - 2", "a\nb").expect("save");
    assert_eq!(path, dir.path().join("Jude.1_1-2.translated.txt"));
    assert_eq!(
        archiver.load("Jude", "1", "1-2").expect("load").as_deref(),
        Some("a\nb")
    );

    let err = archiver.save("Jude", "1", "2-1", "x").unwrap_err();
    assert!(matches!(err, ArchiveError::InvalidVerseSpec { .. }), "{err}");
    assert!(!dir.path().join("Jude.1_2-1.translated.txt").exists());
}
