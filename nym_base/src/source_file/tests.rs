use std::path::PathBuf;

#[test]
fn test_get_line_byte_positions() {
    let text = "fn-def\nworld\r\n!\rtes";
    let byte_positions = super::get_line_byte_positions(text);
    assert_eq!(byte_positions, vec![0..7, 7..14, 14..16, 16..19]);
}

#[test]
fn test_mapped_file() {
    const TEST_FILE: &str = "test file";
    let source_file = super::SourceFile::temp(TEST_FILE).unwrap();
    assert_eq!(source_file.content(), TEST_FILE);
}

#[test]
fn test_owned_source() {
    let source_file = super::SourceFile::new(
        "print \"hi\"\nprint \"there\"".to_owned(),
        PathBuf::from("repl"),
    );

    assert_eq!(source_file.line_number(), 2);
    assert_eq!(source_file.get_line(1), Some("print \"hi\"\n"));
    assert_eq!(source_file.get_line(2), Some("print \"there\""));

    let location = source_file.get_location(11).unwrap();
    assert_eq!(location.line, 2);
    assert_eq!(location.column, 1);
}
