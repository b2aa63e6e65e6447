use std::path::PathBuf;

use catch_the_object::persistence::HighScoreStore;
use proptest::prelude::*;

/// A per-test file under the system temp dir, removed up front.
fn scratch(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "catch_the_object_{}_{}",
        std::process::id(),
        name
    ));
    let _ = std::fs::remove_file(&path);
    path
}

#[test]
fn missing_file_loads_zero() {
    let store = HighScoreStore::new(scratch("missing"));
    assert_eq!(store.load(), 0);
}

#[test]
fn corrupt_file_loads_zero() {
    let path = scratch("corrupt");
    std::fs::write(&path, "not a number").unwrap();
    assert_eq!(HighScoreStore::new(&path).load(), 0);

    std::fs::write(&path, "-5").unwrap();
    assert_eq!(HighScoreStore::new(&path).load(), 0);
}

#[test]
fn surrounding_whitespace_is_tolerated() {
    let path = scratch("whitespace");
    std::fs::write(&path, "42\n").unwrap();
    assert_eq!(HighScoreStore::new(&path).load(), 42);
}

#[test]
fn save_writes_plain_decimal() {
    let path = scratch("decimal");
    HighScoreStore::new(&path).save(1234).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "1234");
}

#[test]
fn save_into_missing_directory_fails() {
    let store = HighScoreStore::new("/definitely/not/a/dir/score");
    assert!(store.save(3).is_err());
}

proptest! {
    #[test]
    fn save_then_load_round_trips(score in any::<u32>()) {
        let store = HighScoreStore::new(scratch("roundtrip"));
        store.save(score).unwrap();
        prop_assert_eq!(store.load(), score);
    }
}
