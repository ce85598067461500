//! Read-only passes over a catalog snapshot. Every function walks the catalog
//! in its iteration order, so "first" always means first in that order.

use crate::models::{Book, Catalog};

/// First record whose title equals `title`, ignoring case.
pub fn search<'a>(catalog: &'a Catalog, title: &str) -> Option<(&'a str, &'a Book)> {
    let needle = title.to_lowercase();
    catalog
        .iter()
        .find(|(_, book)| book.title_key().to_lowercase() == needle)
}

/// All records ordered by lower-cased title. The sort is stable, so equal
/// titles keep their catalog order; missing titles sort first.
pub fn sort_by_title(catalog: &Catalog) -> Vec<(&str, &Book)> {
    let mut sorted: Vec<(&str, &Book)> = catalog.iter().collect();
    sorted.sort_by_cached_key(|(_, book)| book.title_key().to_lowercase());
    sorted
}

/// Record with the smallest year; the first one wins on ties. Records
/// without a year never qualify.
pub fn find_oldest(catalog: &Catalog) -> Option<(&str, &Book)> {
    let mut oldest: Option<(&str, &Book, i64)> = None;
    for (id, book) in catalog.iter() {
        let Some(year) = book.year else {
            continue;
        };
        if oldest.map_or(true, |(_, _, oldest_year)| year < oldest_year) {
            oldest = Some((id, book, year));
        }
    }
    oldest.map(|(id, book, _)| (id, book))
}

/// Record with the largest year; the first one wins on ties.
///
/// The running maximum starts at zero, so a record whose year is zero or
/// negative is never returned, even when it is the only record.
pub fn find_newest(catalog: &Catalog) -> Option<(&str, &Book)> {
    let mut newest = None;
    let mut newest_year = 0;
    for (id, book) in catalog.iter() {
        let year = book.year.unwrap_or(0);
        if year > newest_year {
            newest = Some((id, book));
            newest_year = year;
        }
    }
    newest
}

/// Number of records whose author equals `author`, ignoring case.
pub fn count_by_author(catalog: &Catalog, author: &str) -> usize {
    let needle = author.to_lowercase();
    catalog
        .books()
        .filter(|book| book.author_key().to_lowercase() == needle)
        .count()
}
