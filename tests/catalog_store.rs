use std::fs;

use book_catalog::store::Corruption;
use book_catalog::{add_book, Book, BookInput, CatalogError, CatalogFile, ValidationError};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn setup() -> (TempDir, CatalogFile) {
    let dir = TempDir::new().unwrap();
    let file = CatalogFile::new(dir.path().join("books.json"));
    (dir, file)
}

fn input(title: &str, author: &str, year: &str, price: &str) -> BookInput {
    BookInput {
        title: title.to_string(),
        author: author.to_string(),
        genre: "Fiction".to_string(),
        year: year.to_string(),
        price: price.to_string(),
    }
}

#[test]
fn missing_file_loads_empty_without_corruption() {
    let (_dir, file) = setup();
    let loaded = file.load().unwrap();
    assert!(loaded.catalog.is_empty());
    assert!(loaded.corruption.is_none());
}

#[test]
fn add_then_reload_round_trips_every_field() {
    let (_dir, file) = setup();
    let mut catalog = file.load().unwrap().catalog;

    let first =
        add_book(&mut catalog, &file, &input("Emma", "Jane Austen", "1815", "4.25")).unwrap();
    let second =
        add_book(&mut catalog, &file, &input("Dune", "Frank Herbert", "1965", "9")).unwrap();
    assert_eq!(first, "1");
    assert_eq!(second, "2");

    let reloaded = file.load().unwrap();
    assert!(reloaded.corruption.is_none());
    assert_eq!(reloaded.catalog, catalog);
    assert_eq!(
        reloaded.catalog.get("2"),
        Some(&Book::new("Dune", "Frank Herbert", "Fiction", 1965, 9.0))
    );
}

#[test]
fn saved_file_is_four_space_indented_object() {
    let (_dir, file) = setup();
    let mut catalog = file.load().unwrap().catalog;
    add_book(&mut catalog, &file, &input("Emma", "Jane Austen", "1815", "4.5")).unwrap();

    let raw = fs::read_to_string(file.path()).unwrap();
    assert_eq!(
        raw,
        r#"{
    "1": {
        "title": "Emma",
        "author": "Jane Austen",
        "genre": "Fiction",
        "year": 1815,
        "price": 4.5
    }
}"#
    );
}

#[test]
fn invalid_input_changes_nothing() {
    let (_dir, file) = setup();
    let mut catalog = file.load().unwrap().catalog;
    add_book(&mut catalog, &file, &input("Emma", "Jane Austen", "1815", "4")).unwrap();
    let before = fs::read_to_string(file.path()).unwrap();

    for (year, price) in [("eighteen", "4"), ("1815", "four"), ("1815", "-2")] {
        let err = add_book(&mut catalog, &file, &input("Persuasion", "Jane Austen", year, price))
            .unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)), "{year}/{price}");
    }

    assert_eq!(catalog.len(), 1);
    assert_eq!(fs::read_to_string(file.path()).unwrap(), before);
}

#[test]
fn invalid_year_does_not_create_file() {
    let (_dir, file) = setup();
    let mut catalog = file.load().unwrap().catalog;
    let err = add_book(&mut catalog, &file, &input("Emma", "", "1.5", "1")).unwrap_err();
    assert!(matches!(
        err,
        CatalogError::Validation(ValidationError::InvalidYear { .. })
    ));
    assert!(!file.path().exists());
}

#[test]
fn corrupt_file_loads_empty_and_is_replaced_on_next_add() {
    let (_dir, file) = setup();
    fs::write(file.path(), "not valid json").unwrap();

    let loaded = file.load().unwrap();
    assert!(loaded.catalog.is_empty());
    assert!(matches!(loaded.corruption, Some(Corruption::Malformed(_))));
    assert_eq!(
        loaded.corruption.unwrap().to_string(),
        "Error: JSON file is malformed."
    );

    let mut catalog = file.load().unwrap().catalog;
    add_book(&mut catalog, &file, &input("Emma", "Jane Austen", "1815", "4")).unwrap();

    let reloaded = file.load().unwrap();
    assert!(reloaded.corruption.is_none());
    assert_eq!(reloaded.catalog.len(), 1);
    assert_eq!(reloaded.catalog.get("1").unwrap().display_title(), "Emma");
}

#[test]
fn non_object_json_is_unexpected_shape() {
    let (_dir, file) = setup();
    fs::write(file.path(), r#"["Emma", "Dune"]"#).unwrap();

    let loaded = file.load().unwrap();
    assert!(loaded.catalog.is_empty());
    assert!(matches!(loaded.corruption, Some(Corruption::UnexpectedShape)));
}

#[test]
fn partial_and_negative_records_round_trip_unchanged() {
    let (_dir, file) = setup();
    fs::write(
        file.path(),
        r#"{"1": {"title": "Old Ledger", "price": -3.0}, "2": {}}"#,
    )
    .unwrap();

    let loaded = file.load().unwrap();
    assert!(loaded.corruption.is_none());
    let ledger = loaded.catalog.get("1").unwrap();
    assert_eq!(ledger.price, Some(-3.0));
    assert_eq!(ledger.author, None);
    assert_eq!(loaded.catalog.get("2"), Some(&Book::default()));

    file.save(&loaded.catalog).unwrap();
    assert_eq!(file.load().unwrap().catalog, loaded.catalog);
}

#[test]
fn mistyped_field_keeps_the_rest_of_the_catalog() {
    let (_dir, file) = setup();
    fs::write(
        file.path(),
        r#"{"1": {"title": "Emma", "year": 1815}, "2": {"title": "Old", "price": "9.99"}}"#,
    )
    .unwrap();

    let loaded = file.load().unwrap();
    assert!(loaded.corruption.is_none());
    assert_eq!(loaded.catalog.len(), 2);
    assert_eq!(loaded.catalog.get("2").unwrap().display_price(), "0.00");

    let mut catalog = loaded.catalog;
    let id = add_book(&mut catalog, &file, &input("Dune", "Frank Herbert", "1965", "9")).unwrap();
    assert_eq!(id, "3");

    let raw = fs::read_to_string(file.path()).unwrap();
    assert!(raw.contains(r#""title": "Emma""#));
    assert!(raw.contains(r#""price": "9.99""#));
    let reloaded = file.load().unwrap();
    assert!(reloaded.corruption.is_none());
    assert_eq!(reloaded.catalog, catalog);
}

#[test]
fn unknown_keys_survive_an_add() {
    let (_dir, file) = setup();
    fs::write(file.path(), r#"{"1": {"title": "Emma", "isbn": "978-0"}}"#).unwrap();

    let mut catalog = file.load().unwrap().catalog;
    add_book(&mut catalog, &file, &input("Dune", "Frank Herbert", "1965", "9")).unwrap();

    let raw = fs::read_to_string(file.path()).unwrap();
    assert_eq!(
        raw,
        r#"{
    "1": {
        "title": "Emma",
        "isbn": "978-0"
    },
    "2": {
        "title": "Dune",
        "author": "Frank Herbert",
        "genre": "Fiction",
        "year": 1965,
        "price": 9.0
    }
}"#
    );
}

#[test]
fn non_object_record_is_unexpected_shape() {
    let (_dir, file) = setup();
    fs::write(file.path(), r#"{"1": {"title": "Emma"}, "2": "Dune"}"#).unwrap();

    let loaded = file.load().unwrap();
    assert!(loaded.catalog.is_empty());
    assert!(matches!(loaded.corruption, Some(Corruption::UnexpectedShape)));
}

#[test]
fn new_id_follows_count_even_with_gaps() {
    let (_dir, file) = setup();
    fs::write(
        file.path(),
        r#"{"1": {"title": "A"}, "5": {"title": "B"}}"#,
    )
    .unwrap();

    let mut catalog = file.load().unwrap().catalog;
    let id = add_book(&mut catalog, &file, &input("C", "", "2000", "1")).unwrap();
    assert_eq!(id, "3");
    let ids: Vec<&str> = catalog.iter().map(|(id, _)| id).collect();
    assert_eq!(ids, vec!["1", "5", "3"]);
}

#[test]
fn failed_save_rolls_back_the_insert() {
    let dir = TempDir::new().unwrap();
    // A directory where the file should be makes the write fail.
    let path = dir.path().join("books.json");
    fs::create_dir(&path).unwrap();
    let file = CatalogFile::new(&path);

    let mut catalog = book_catalog::Catalog::new();
    let err = add_book(&mut catalog, &file, &input("Emma", "", "1815", "4")).unwrap_err();
    assert!(matches!(err, CatalogError::Store(_)));
    assert!(catalog.is_empty());
}
