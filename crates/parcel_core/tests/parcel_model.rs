use parcel_core::{Parcel, ParcelStatus, PARCEL_STATUS_REGISTERED};

#[test]
fn registered_constructor_sets_initial_state() {
    let parcel = Parcel::registered(3, "Lenina 1", "2026-10-19T08:30:00Z");

    assert_eq!(parcel.number, 0);
    assert_eq!(parcel.client, 3);
    assert_eq!(parcel.status, PARCEL_STATUS_REGISTERED);
    assert!(parcel.is_registered());
}

#[test]
fn is_registered_tracks_status_text() {
    let mut parcel = Parcel::registered(3, "Lenina 1", "2026-10-19T08:30:00Z");
    parcel.status = ParcelStatus::Sent.as_str().to_string();
    assert!(!parcel.is_registered());
}

#[test]
fn parcel_serialization_uses_column_names() {
    let mut parcel = Parcel::registered(12, "Lenina 1", "2026-10-19T08:30:00Z");
    parcel.number = 5;

    let json = serde_json::to_value(&parcel).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "number": 5,
            "client": 12,
            "status": "registered",
            "address": "Lenina 1",
            "created_at": "2026-10-19T08:30:00Z",
        })
    );
}

#[test]
fn status_serializes_as_stored_text() {
    let json = serde_json::to_value(ParcelStatus::Delivered).unwrap();
    assert_eq!(json, "delivered");
    assert_eq!(
        serde_json::from_value::<ParcelStatus>(json).unwrap().as_str(),
        "delivered"
    );
}
