use chrono::NaiveDate;
use souvenir_core::{
    CatalogService, CatalogServiceError, CatalogStore, FileCatalogStore, InMemoryCatalogStore,
    ModelValidationError, Souvenir,
};
use tempfile::TempDir;

fn file_service() -> (TempDir, CatalogService<FileCatalogStore>) {
    let dir = tempfile::tempdir().unwrap();
    let store = FileCatalogStore::open(dir.path().join("souvenirs.json")).unwrap();
    (dir, CatalogService::new(store))
}

fn souvenir(name: &str, release_date: &str, price: f64) -> Souvenir {
    Souvenir::parse(name, "details", release_date, price).unwrap()
}

fn names<'a>(items: impl IntoIterator<Item = &'a Souvenir>) -> Vec<&'a str> {
    items.into_iter().map(Souvenir::name).collect()
}

/// Acme (USA): Mug 2020 9.99, Cap 2018 4.50
/// Bolt (Poland): Mug 2021 12.00, Pen 2020 1.25
/// Cora (usa): Bag 2020 30.00
fn seeded() -> (TempDir, CatalogService<FileCatalogStore>) {
    let (dir, service) = file_service();
    service.add_manufacturer("Acme", "USA").unwrap();
    service.add_manufacturer("Bolt", "Poland").unwrap();
    service.add_manufacturer("Cora", "usa").unwrap();
    service
        .add_souvenir("Acme", souvenir("Mug", "01.01.2020", 9.99))
        .unwrap();
    service
        .add_souvenir("Acme", souvenir("Cap", "15.07.2018", 4.5))
        .unwrap();
    service
        .add_souvenir("Bolt", souvenir("Mug", "10.03.2021", 12.0))
        .unwrap();
    service
        .add_souvenir("Bolt", souvenir("Pen", "28.02.2020", 1.25))
        .unwrap();
    service
        .add_souvenir("Cora", souvenir("Bag", "05.05.2020", 30.0))
        .unwrap();
    (dir, service)
}

#[test]
fn add_then_find_manufacturer_returns_exact_fields() {
    let (_dir, service) = file_service();
    service.add_manufacturer("Acme", "USA").unwrap();

    let found = service.find_manufacturer_by_name("Acme").unwrap();
    assert_eq!(found.name(), "Acme");
    assert_eq!(found.country(), "USA");
    assert!(found.souvenirs().is_empty());
}

#[test]
fn duplicate_manufacturer_is_rejected_without_changes() {
    let (_dir, service) = seeded();
    let before = service.list_catalog();

    let err = service.add_manufacturer("Acme", "Germany").unwrap_err();

    assert!(matches!(err, CatalogServiceError::DuplicateManufacturer(ref name) if name == "Acme"));
    assert_eq!(service.list_catalog(), before);
}

#[test]
fn add_manufacturer_validates_fields() {
    let (_dir, service) = file_service();

    let err = service.add_manufacturer("Acme", "").unwrap_err();
    assert!(matches!(
        err,
        CatalogServiceError::Validation(ModelValidationError::EmptyCountry)
    ));
    assert!(service.list_catalog().is_empty());
}

#[test]
fn duplicate_souvenir_is_rejected_and_count_unchanged() {
    let (_dir, service) = seeded();

    let err = service
        .add_souvenir("Acme", souvenir("Mug", "02.02.2022", 1.0))
        .unwrap_err();

    assert!(err.is_duplicate());
    assert_eq!(service.find_souvenirs_by_manufacturer_name("Acme").len(), 2);
    let mug = service.find_souvenir("Acme", "Mug").unwrap();
    assert_eq!(mug.price(), 9.99);
}

#[test]
fn add_souvenir_to_unknown_manufacturer_is_not_found() {
    let (_dir, service) = seeded();

    let err = service
        .add_souvenir("Nobody", souvenir("Mug", "02.02.2022", 1.0))
        .unwrap_err();

    assert!(matches!(err, CatalogServiceError::ManufacturerNotFound(ref name) if name == "Nobody"));
}

#[test]
fn add_souvenirs_batch_is_all_or_nothing() {
    let (_dir, service) = seeded();

    let err = service
        .add_souvenirs(
            "Bolt",
            vec![souvenir("Flag", "01.06.2019", 2.0), souvenir("Pen", "01.06.2019", 2.0)],
        )
        .unwrap_err();
    assert!(err.is_duplicate());
    assert_eq!(service.find_souvenirs_by_manufacturer_name("Bolt").len(), 2);

    let added = service
        .add_souvenirs(
            "Bolt",
            vec![souvenir("Flag", "01.06.2019", 2.0), souvenir("Pin", "01.06.2019", 0.5)],
        )
        .unwrap();
    assert_eq!(added, 2);
    assert_eq!(
        names(&service.find_souvenirs_by_manufacturer_name("Bolt")),
        vec!["Mug", "Pen", "Flag", "Pin"]
    );
}

#[test]
fn find_souvenir_misses_on_either_key() {
    let (_dir, service) = seeded();

    assert_eq!(service.find_souvenir("Bolt", "Pen").unwrap().price(), 1.25);
    assert!(service.find_souvenir("Bolt", "Cap").unwrap_err().is_not_found());
    assert!(service.find_souvenir("Nobody", "Mug").unwrap_err().is_not_found());
    assert!(service.find_manufacturer_by_name("acme").unwrap_err().is_not_found());
}

#[test]
fn souvenirs_by_unknown_manufacturer_are_empty() {
    let (_dir, service) = seeded();
    assert!(service.find_souvenirs_by_manufacturer_name("Nobody").is_empty());
}

#[test]
fn souvenirs_by_country_union_all_matching_manufacturers_case_sensitively() {
    let (_dir, service) = seeded();
    service.add_manufacturer("Dune", "USA").unwrap();
    service
        .add_souvenir("Dune", souvenir("Hat", "01.01.2019", 3.0))
        .unwrap();

    assert_eq!(
        names(&service.find_souvenirs_by_manufacturer_country("USA")),
        vec!["Mug", "Cap", "Hat"]
    );
    assert_eq!(
        names(&service.find_souvenirs_by_manufacturer_country("usa")),
        vec!["Bag"]
    );
    assert!(service.find_souvenirs_by_manufacturer_country("Spain").is_empty());
}

#[test]
fn price_filters_use_strict_lower_bound() {
    let (_dir, service) = seeded();

    assert_eq!(
        names(&service.find_souvenirs_by_price_lower_than(9.99)),
        vec!["Cap", "Pen"]
    );
    assert_eq!(
        names(&service.find_souvenirs_by_price_lower_than(10.0)),
        vec!["Mug", "Cap", "Pen"]
    );

    let manufacturers: Vec<String> = service
        .find_manufacturers_by_price_lower_than(2.0)
        .iter()
        .map(|m| m.name().to_string())
        .collect();
    assert_eq!(manufacturers, vec!["Bolt"]);
    assert!(service.find_manufacturers_by_price_lower_than(1.25).is_empty());
}

#[test]
fn release_year_queries_span_all_manufacturers() {
    let (_dir, service) = seeded();

    let in_2020 = service.find_souvenirs_by_release_date(2020);
    assert_eq!(names(&in_2020), vec!["Mug", "Pen", "Bag"]);
    assert!(in_2020.iter().all(|s| s.release_year() == 2020));
    assert!(service.find_souvenirs_by_release_date(1999).is_empty());

    let mug_2021: Vec<String> = service
        .find_manufacturers_by_souvenir_and_release_date("Mug", 2021)
        .iter()
        .map(|m| m.name().to_string())
        .collect();
    assert_eq!(mug_2021, vec!["Bolt"]);
    assert!(service
        .find_manufacturers_by_souvenir_and_release_date("Cap", 2020)
        .is_empty());
}

#[test]
fn remove_manufacturer_cascades_and_keeps_others_untouched() {
    let (_dir, service) = seeded();
    let before = service.list_catalog();

    assert!(service.remove_manufacturer_and_souvenirs("Acme").unwrap());

    let after = service.list_catalog();
    assert!(service.find_manufacturer_by_name("Acme").is_err());
    assert!(service.find_souvenirs_by_manufacturer_name("Acme").is_empty());
    assert_eq!(after.len(), 2);
    for manufacturer in after.manufacturers() {
        assert_eq!(
            Some(manufacturer),
            before.manufacturer(manufacturer.name())
        );
    }
}

#[test]
fn remove_unknown_manufacturer_is_noop() {
    let (_dir, service) = seeded();
    let before = service.list_catalog();

    assert!(!service.remove_manufacturer_and_souvenirs("Nobody").unwrap());
    assert_eq!(service.list_catalog(), before);
}

#[test]
fn update_manufacturer_name_enforces_uniqueness() {
    let (_dir, service) = seeded();

    let err = service.update_manufacturer_name("Acme", "Bolt").unwrap_err();
    assert!(matches!(err, CatalogServiceError::DuplicateManufacturer(_)));
    assert!(matches!(
        service.update_manufacturer_name("Acme", " ").unwrap_err(),
        CatalogServiceError::Validation(ModelValidationError::EmptyManufacturerName)
    ));
    assert!(service
        .update_manufacturer_name("Nobody", "Zed")
        .unwrap_err()
        .is_not_found());

    let renamed = service.update_manufacturer_name("Acme", "Acme Corp").unwrap();
    assert_eq!(renamed.name(), "Acme Corp");
    assert_eq!(renamed.souvenirs().len(), 2);
    assert!(service.find_manufacturer_by_name("Acme").is_err());
    assert_eq!(
        service.find_souvenirs_by_manufacturer_name("Acme Corp").len(),
        2
    );
}

#[test]
fn update_manufacturer_country_locates_by_current_country() {
    let (_dir, service) = seeded();

    let updated = service
        .update_manufacturer_country("Poland", "Czechia")
        .unwrap();
    assert_eq!(updated.name(), "Bolt");
    assert_eq!(
        service.find_manufacturer_by_name("Bolt").unwrap().country(),
        "Czechia"
    );

    assert!(matches!(
        service
            .update_manufacturer_country("Spain", "France")
            .unwrap_err(),
        CatalogServiceError::CountryNotFound(_)
    ));
    assert!(matches!(
        service.update_manufacturer_country("USA", "").unwrap_err(),
        CatalogServiceError::Validation(ModelValidationError::EmptyCountry)
    ));
    assert_eq!(service.find_manufacturer_by_name("Acme").unwrap().country(), "USA");
}

#[test]
fn update_souvenir_name_rejects_sibling_collision_only() {
    let (_dir, service) = seeded();

    let err = service.update_souvenir_name("Acme", "Mug", "Cap").unwrap_err();
    assert!(matches!(err, CatalogServiceError::DuplicateSouvenir { .. }));

    // "Pen" exists only under Bolt, so Acme may use it.
    let renamed = service.update_souvenir_name("Acme", "Mug", "Pen").unwrap();
    assert_eq!(renamed.name(), "Pen");
    assert_eq!(renamed.price(), 9.99);
    assert!(service.find_souvenir("Acme", "Mug").is_err());
    assert!(service.find_souvenir("Bolt", "Mug").is_ok());

    assert!(service
        .update_souvenir_name("Acme", "Missing", "Other")
        .unwrap_err()
        .is_not_found());
}

#[test]
fn update_souvenir_fields_persist() {
    let (_dir, service) = seeded();

    service
        .update_souvenir_manufacturer_details("Acme", "Mug", "42 Main St")
        .unwrap();
    service
        .update_souvenir_release_date("Acme", "Mug", "24.12.2023")
        .unwrap();
    service.update_souvenir_price("Acme", "Mug", 0.0).unwrap();

    let mug = service.find_souvenir("Acme", "Mug").unwrap();
    assert_eq!(mug.manufacturer_details(), "42 Main St");
    assert_eq!(
        mug.release_date(),
        NaiveDate::from_ymd_opt(2023, 12, 24).unwrap()
    );
    assert_eq!(mug.price(), 0.0);

    let typed = NaiveDate::from_ymd_opt(2001, 9, 9).unwrap();
    let updated = service
        .update_souvenir_release_date_value("Acme", "Mug", typed)
        .unwrap();
    assert_eq!(updated.release_date(), typed);
}

#[test]
fn invalid_souvenir_updates_leave_catalog_unchanged() {
    let (_dir, service) = seeded();
    let before = service.list_catalog();

    assert!(matches!(
        service
            .update_souvenir_release_date("Acme", "Mug", "2023/12/24")
            .unwrap_err(),
        CatalogServiceError::Validation(ModelValidationError::InvalidReleaseDate(_))
    ));
    assert!(matches!(
        service
            .update_souvenir_price("Acme", "Mug", -3.0)
            .unwrap_err(),
        CatalogServiceError::Validation(ModelValidationError::InvalidPrice(_))
    ));
    assert!(service
        .update_souvenir_manufacturer_details("Acme", "Nope", "x")
        .unwrap_err()
        .is_not_found());

    assert_eq!(service.list_catalog(), before);
}

#[test]
fn catalog_built_through_service_roundtrips_through_store() {
    let (_dir, service) = seeded();
    let snapshot = service.list_catalog();

    let store = service.into_store();
    store.save(&snapshot).unwrap();
    assert_eq!(store.try_load().unwrap(), snapshot);

    let reopened = FileCatalogStore::open(store.path()).unwrap();
    assert_eq!(CatalogService::new(reopened).list_catalog(), snapshot);
}

#[test]
fn acme_mug_scenario() {
    let service = CatalogService::new(InMemoryCatalogStore::new());
    service.add_manufacturer("Acme", "USA").unwrap();
    service
        .add_souvenir(
            "Acme",
            Souvenir::parse("Mug", "123 St", "01.01.2020", 9.99).unwrap(),
        )
        .unwrap();

    assert_eq!(names(&service.find_souvenirs_by_release_date(2020)), vec!["Mug"]);

    let cheap: Vec<String> = service
        .find_manufacturers_by_price_lower_than(10.00)
        .iter()
        .map(|m| m.name().to_string())
        .collect();
    assert_eq!(cheap, vec!["Acme"]);
    assert!(service.find_manufacturers_by_price_lower_than(5.00).is_empty());
}

#[test]
fn lost_update_between_two_handles_is_last_writer_wins() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("souvenirs.json");
    let first = CatalogService::new(FileCatalogStore::open(&path).unwrap());
    let second = CatalogService::new(FileCatalogStore::open(&path).unwrap());

    first.add_manufacturer("Acme", "USA").unwrap();
    let stale = second.store().load();
    second.add_manufacturer("Bolt", "Poland").unwrap();
    second.store().save(&stale).unwrap();

    let names: Vec<String> = first
        .list_catalog()
        .manufacturers()
        .iter()
        .map(|m| m.name().to_string())
        .collect();
    assert_eq!(names, vec!["Acme"]);
}
