use tidytask_core::{CatalogError, CategoryCatalog, CategoryRule};

#[test]
fn reference_catalog_has_ten_categories_in_declaration_order() {
    let catalog = CategoryCatalog::reference();
    let names: Vec<&str> = catalog.rules().iter().map(|rule| rule.name()).collect();

    assert_eq!(
        names,
        vec![
            "work",
            "personal",
            "health",
            "shopping",
            "learning",
            "finance",
            "travel",
            "hobby",
            "maintenance",
            "social"
        ]
    );
    assert!(catalog.rules().iter().all(|rule| rule.weight() == 1.0));
    assert_eq!(CategoryCatalog::default(), catalog);
}

#[test]
fn reference_rules_match_expected_keywords() {
    let catalog = CategoryCatalog::reference();
    let work = &catalog.rules()[0];

    assert!(work.matches("career"));
    assert!(work.matches("project"));
    assert!(!work.matches("report"));
    assert_eq!(work.keywords().count(), 11);
}

#[test]
fn json_catalog_keeps_order_and_defaults_weight() {
    let json = r#"[
        { "name": "garden", "keywords": ["Plant", "soil"] },
        { "name": "cooking", "keywords": ["recipe"], "weight": 2.5 }
    ]"#;
    let catalog = CategoryCatalog::from_json_str(json).unwrap();

    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.rules()[0].name(), "garden");
    assert_eq!(catalog.rules()[0].weight(), 1.0);
    assert!(catalog.rules()[0].matches("plant"));
    assert_eq!(catalog.rules()[1].weight(), 2.5);
}

#[test]
fn json_catalog_loads_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.json");
    std::fs::write(&path, r#"[{ "name": "errands", "keywords": ["post"] }]"#).unwrap();

    let catalog = CategoryCatalog::from_json_file(&path).unwrap();
    assert!(catalog.contains("errands"));
}

#[test]
fn missing_catalog_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = CategoryCatalog::from_json_file(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, CatalogError::Io(_)));
}

#[test]
fn malformed_json_is_parse_error() {
    let err = CategoryCatalog::from_json_str(r#"{ "name": "x" }"#).unwrap_err();
    assert!(matches!(err, CatalogError::Parse(_)));
}

#[test]
fn empty_catalog_is_rejected() {
    let err = CategoryCatalog::from_json_str("[]").unwrap_err();
    assert!(matches!(err, CatalogError::Empty));
}

#[test]
fn duplicate_names_are_rejected() {
    let err = CategoryCatalog::new(vec![
        CategoryRule::new("home", ["house"], 1.0),
        CategoryRule::new("home", ["garden"], 1.0),
    ])
    .unwrap_err();
    assert!(matches!(err, CatalogError::DuplicateName(name) if name == "home"));
}

#[test]
fn negative_and_non_finite_weights_are_rejected() {
    let err = CategoryCatalog::new(vec![CategoryRule::new("bad", ["x"], -1.0)]).unwrap_err();
    assert!(matches!(err, CatalogError::InvalidWeight { .. }));

    let err = CategoryCatalog::new(vec![CategoryRule::new("bad", ["x"], f64::NAN)]).unwrap_err();
    assert!(err.to_string().contains("invalid weight"));
}
