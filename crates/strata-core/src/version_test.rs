use super::*;

#[test]
fn leading_digits_become_the_id() {
    assert_eq!(version_from_filename("001_initial.sql").unwrap(), 1);
    assert_eq!(version_from_filename("42_add_index.sql").unwrap(), 42);
    assert_eq!(version_from_filename("7.sql").unwrap(), 7);
}

#[test]
fn id_is_the_whole_name_when_there_is_no_slug() {
    assert_eq!(version_from_filename("12").unwrap(), 12);
}

#[test]
fn missing_prefix_is_rejected() {
    let err = version_from_filename("add_index.sql").unwrap_err();
    assert!(matches!(err, CoreError::MissingVersionPrefix { .. }));

    let err = version_from_filename("").unwrap_err();
    assert!(matches!(err, CoreError::MissingVersionPrefix { .. }));
}

#[test]
fn zero_is_reserved_for_the_sentinel() {
    let err = version_from_filename("000_bootstrap.sql").unwrap_err();
    assert!(matches!(err, CoreError::VersionZero { .. }));
}

#[test]
fn overflowing_prefix_is_rejected() {
    let err = version_from_filename("99999999999999999999_huge.sql").unwrap_err();
    assert!(matches!(err, CoreError::VersionOutOfRange { .. }));
}
