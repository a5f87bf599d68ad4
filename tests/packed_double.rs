use bson_core::{Document, Error, NativeDouble, PackedFloat};

#[test]
fn packed_float_is_readable_as_double() {
    let mut buffer = [0u8; 64];
    let mut doc = Document::new(&mut buffer).unwrap();
    doc.append_double_with::<PackedFloat>("floaty", 0.5).unwrap();
    doc.append_double_with::<PackedFloat>("neg", -1234.5).unwrap();

    // Normal f32 values pack into exactly the binary64 of the same value.
    assert_eq!(doc.get_double("floaty"), Ok(0.5));
    assert_eq!(doc.get_double("neg"), Ok(-1234.5));
    assert_eq!(doc.get_double_with::<PackedFloat>("neg"), Ok(-1234.5f32));
}

#[test]
fn packed_float_matches_native_bytes() {
    let mut packed_buffer = [0u8; 32];
    let mut packed = Document::new(&mut packed_buffer).unwrap();
    packed
        .append_double_with::<PackedFloat>("fl", 0.34534)
        .unwrap();

    let mut native_buffer = [0u8; 32];
    let mut native = Document::new(&mut native_buffer).unwrap();
    native
        .append_double_with::<NativeDouble>("fl", f64::from(0.34534f32))
        .unwrap();

    assert_eq!(packed.as_bytes(), native.as_bytes());
}

#[test]
fn native_double_loses_precision_when_read_packed() {
    let mut buffer = [0u8; 32];
    let mut doc = Document::new(&mut buffer).unwrap();
    doc.append_double("fl", 0.2342).unwrap();

    let val = doc.get_double_with::<PackedFloat>("fl").unwrap();
    assert_ne!(f64::from(val), 0.2342);
    assert!((f64::from(val) - 0.2342).abs() < 1e-6);
}

#[test]
fn out_of_range_exponent_reads_as_nan() {
    let mut buffer = [0u8; 64];
    let mut doc = Document::new(&mut buffer).unwrap();
    doc.append_double("huge", 1e300).unwrap();
    doc.append_double("zero", 0.0).unwrap();

    assert!(doc.get_double_with::<PackedFloat>("huge").unwrap().is_nan());
    assert!(doc.get_double_with::<PackedFloat>("zero").unwrap().is_nan());
    assert_eq!(doc.get_double("huge"), Ok(1e300));
}

#[test]
fn packed_zero_round_trips() {
    let mut buffer = [0u8; 32];
    let mut doc = Document::new(&mut buffer).unwrap();
    doc.append_double_with::<PackedFloat>("zero", 0.0).unwrap();
    assert_eq!(doc.get_double_with::<PackedFloat>("zero"), Ok(0.0));
}

#[test]
fn packed_getter_checks_type() {
    let mut buffer = [0u8; 32];
    let mut doc = Document::new(&mut buffer).unwrap();
    doc.append_i32("num", 1).unwrap();
    assert_eq!(
        doc.get_double_with::<PackedFloat>("num"),
        Err(Error::IncorrectType)
    );
}
