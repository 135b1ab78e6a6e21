use smartfilter_lib::{CategoryColumn, CellValue, DataView, Filters, IdentityKey, RowIdentity};

fn data() -> DataView {
    DataView::new(vec![
        CategoryColumn::new(
            "Country",
            vec!["Italy".into(), "France".into(), CellValue::Number(7.0)],
        ),
        CategoryColumn::new("City", vec!["Rome".into(), "Paris".into(), "Nice".into()]),
    ])
}

#[test]
fn test_missing_selection_is_empty() {
    let filters = Filters::load(None, &data(), &RowIdentity);

    assert!(filters.is_empty());
    assert!(filters.get("Country").is_empty());
}

#[test]
fn test_malformed_selection_is_empty() {
    for selection in ["{not json", "42", r#"{"Country":"row:0"}"#] {
        let filters = Filters::load(Some(selection), &data(), &RowIdentity);
        assert!(filters.is_empty(), "{}", selection);
    }
}

#[test]
fn test_map_selection_round_trips() {
    let json = r#"{"City":["row:1"],"Country":["row:0","row:2"]}"#;
    let filters = Filters::load(Some(json), &data(), &RowIdentity);

    assert_eq!(filters.get("Country").len(), 2);
    assert_eq!(filters.to_json().unwrap(), json);
}

#[test]
fn test_legacy_array_upgraded_against_first_category() {
    let legacy = r#"["\"France\"", "7", "\"Atlantis\"", "{bad"]"#;
    let filters = Filters::load(Some(legacy), &data(), &RowIdentity);

    assert_eq!(
        filters.get("Country"),
        &[IdentityKey::from("row:1"), IdentityKey::from("row:2")]
    );
    assert!(filters.get("City").is_empty());
}

#[test]
fn test_add_and_remove() {
    let mut filters = Filters::load(None, &data(), &RowIdentity);
    filters.add("Country", "row:0".into());
    filters.add("Country", "row:0".into());
    filters.add("Country", "row:1".into());

    assert_eq!(filters.get("Country").len(), 2);

    filters.remove("Country", &"row:0".into());
    assert_eq!(filters.get("Country"), &[IdentityKey::from("row:1")]);

    filters.clear_category("Country");
    assert!(filters.is_empty());
}

#[test]
fn test_admits_ignores_own_category() {
    let mut filters = Filters::new();
    filters.add("Country", "row:0".into());
    filters.add("City", "row:0".into());
    filters.add("City", "row:1".into());

    assert!(filters.admits("Country", &"row:1".into()));
    assert!(!filters.admits("City", &"row:1".into()));
    assert!(filters.admits("City", &"row:0".into()));
}
