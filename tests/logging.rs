//! The file logger. Kept in its own test binary because a logger can only be
//! installed once per process.

use std::fs;

use log::LevelFilter;
use styled_markup::{Error, decode, init_logger};

#[test]
fn logger_writes_records_and_installs_once() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("styled-markup.log");

    init_logger(&path, LevelFilter::Debug).unwrap();

    assert!(decode(b"<html/>").is_none());
    log::trace!("not written at debug level");

    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.contains("[DEBUG] markup::decode: cannot decode markup"), "{}", contents);
    assert!(!contents.contains("not written"));

    assert!(matches!(
        init_logger(&path, LevelFilter::Debug),
        Err(Error::Logger(_))
    ));
}
