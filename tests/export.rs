use std::fs;

use book_catalog::{export_field, Book, Catalog, ExportField};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn catalog(books: Vec<Book>) -> Catalog {
    books
        .into_iter()
        .enumerate()
        .map(|(idx, book)| ((idx + 1).to_string(), book))
        .collect()
}

#[test]
fn empty_catalog_writes_only_the_header() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("titles.csv");

    let rows = export_field(&Catalog::new(), ExportField::Title, &path).unwrap();
    assert_eq!(rows, 0);
    assert_eq!(fs::read_to_string(&path).unwrap(), "Title\n");
}

#[test]
fn titles_are_written_in_catalog_order_with_quoting() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("titles.csv");
    let catalog = catalog(vec![
        Book::new("Emma", "Jane Austen", "Novel", 1815, 4.0),
        Book::new("War and Peace, Vol. 1", "Tolstoy", "Novel", 1869, 12.0),
        Book::new(r#"The "Hobbit""#, "Tolkien", "Fantasy", 1937, 8.0),
    ]);

    let rows = export_field(&catalog, ExportField::Title, &path).unwrap();
    assert_eq!(rows, 3);
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "Title\nEmma\n\"War and Peace, Vol. 1\"\n\"The \"\"Hobbit\"\"\"\n"
    );
}

#[test]
fn years_export_keeps_signs_and_blanks_missing_values() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("years.csv");
    let catalog = catalog(vec![
        Book::new("Iliad", "Homer", "Epic", -750, 5.0),
        Book {
            title: Some("Undated".into()),
            ..Book::default()
        },
        Book::new("Dune", "Frank Herbert", "SF", 1965, 9.0),
    ]);

    export_field(&catalog, ExportField::Year, &path).unwrap();
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "Year\n-750\n\"\"\n1965\n"
    );
}

#[test]
fn export_overwrites_previous_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("titles.csv");
    fs::write(&path, "stale content\nmore\n").unwrap();

    export_field(
        &catalog(vec![Book::new("Emma", "", "", 1815, 1.0)]),
        ExportField::Title,
        &path,
    )
    .unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "Title\nEmma\n");
}
