use parcel_core::{Parcel, STATUS_REGISTERED, STATUS_SHIPPED};
use serde_json::json;

#[test]
fn parcel_serializes_with_camel_case_fields() {
    let mut parcel = Parcel::new(1000, STATUS_REGISTERED, "test", "2024-12-18T12:00:00Z");
    parcel.number = 3;

    let value = serde_json::to_value(&parcel).unwrap();
    assert_eq!(
        value,
        json!({
            "number": 3,
            "client": 1000,
            "status": "registered",
            "address": "test",
            "createdAt": "2024-12-18T12:00:00Z"
        })
    );

    let decoded: Parcel = serde_json::from_value(value).unwrap();
    assert_eq!(decoded, parcel);
}

#[test]
fn only_registered_status_counts_as_registered() {
    let mut parcel = Parcel::registered(1, "a");
    assert!(parcel.is_registered());

    parcel.status = STATUS_SHIPPED.to_string();
    assert!(!parcel.is_registered());
}
