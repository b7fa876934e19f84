// Integration tests for FindLimitations and FindOptions validation.

use lzforge::{Error, FindLimitations, FindOptions, UnitSize};

#[test]
fn limitations_must_be_ordered() {
    assert!(FindLimitations::new(3, 18, 1, 0x1000).validate(UnitSize::Byte).is_ok());
    assert!(FindLimitations::new(19, 18, 1, 0x1000).validate(UnitSize::Byte).is_err());
    assert!(FindLimitations::new(3, 18, 9, 8).validate(UnitSize::Byte).is_err());
}

#[test]
fn zero_minimums_are_rejected() {
    let err = FindLimitations::new(0, 18, 1, 0x1000).validate(UnitSize::Byte).unwrap_err();
    assert!(matches!(err, Error::Configuration(_)));
    assert!(FindLimitations::new(3, 18, 0, 0x1000).validate(UnitSize::Byte).is_err());
}

#[test]
fn min_length_covers_one_unit() {
    assert!(FindLimitations::new(2, 16, 2, 0x100).validate(UnitSize::Int).is_err());
    assert!(FindLimitations::new(4, 16, 4, 0x100).validate(UnitSize::Int).is_ok());
}

#[test]
fn options_builders_and_validation() {
    let options = FindOptions::new()
        .with_unit_size(UnitSize::Short)
        .with_pre_buffer_size(16)
        .with_skip_after_match(1)
        .with_task_count(2)
        .with_search_depth(32);
    assert_eq!(options.unit_size.bytes(), 2);
    assert_eq!(options.pre_buffer_size, 16);
    assert_eq!(options.skip_after_match, 1);
    assert!(options.transform().is_none());
    assert!(options.validate().is_ok());
    assert!(options.clone().with_search_depth(0).validate().is_err());
}
