use ehub_domain::features::FeatureSet;
use serde_json::json;

#[test]
fn parses_feature_names() {
    assert_eq!(FeatureSet::from_name("gallery"), Some(FeatureSet::GALLERY));
    assert_eq!(FeatureSet::from_name("check-in"), Some(FeatureSet::CHECK_IN));
    assert_eq!(FeatureSet::from_name("*"), Some(FeatureSet::ALL));
    assert_eq!(FeatureSet::from_name("unknown"), None);
}

#[test]
fn serializes_as_names() {
    let value = serde_json::to_value(FeatureSet::REGISTRATIONS | FeatureSet::CHECK_IN).unwrap();
    assert_eq!(value, json!(["registrations", "check_in"]));
}

#[test]
fn deserializes_names_and_bits() {
    let from_names: FeatureSet = serde_json::from_value(json!(["gallery", "registrations"])).unwrap();
    assert_eq!(from_names, FeatureSet::GALLERY | FeatureSet::REGISTRATIONS);

    let from_bits: FeatureSet = serde_json::from_value(json!(4)).unwrap();
    assert_eq!(from_bits, FeatureSet::CHECK_IN);

    let all: FeatureSet = serde_json::from_value(json!("all")).unwrap();
    assert_eq!(all, FeatureSet::ALL);
}

#[test]
fn rejects_unknown_feature_names() {
    let err = serde_json::from_value::<FeatureSet>(json!(["galery", "registrations"])).unwrap_err();
    assert!(err.to_string().contains("unknown feature 'galery'"), "{err}");

    let err = serde_json::from_value::<FeatureSet>(json!("checkin")).unwrap_err();
    assert!(err.to_string().contains("unknown feature 'checkin'"), "{err}");

    let empty: FeatureSet = serde_json::from_value(json!([])).unwrap();
    assert_eq!(empty, FeatureSet::empty());
}
