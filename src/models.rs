//! Domain models for the book catalog. A `Book` is a light-weight data holder
//! that mirrors one entry of the JSON backing store, and `Catalog` is the
//! ordered collection the rest of the crate reads from and writes to.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Fallback shown when a record has no title.
pub const UNKNOWN_TITLE: &str = "Unknown Title";
/// Fallback shown when a record has no author.
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";
/// Fallback shown when a record has no genre.
pub const UNKNOWN_GENRE: &str = "Unknown Genre";
/// Fallback shown when a record has no year.
pub const UNKNOWN_YEAR: &str = "Unknown Year";

/// One book entry. Every field is optional so legacy or hand-edited records
/// load without failing.
///
/// Stored objects are trusted as-is: a known key whose value has an
/// unexpected type, and any key this crate does not know about, is kept
/// verbatim in `extra` and written back on the next save.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    from = "serde_json::Map<String, Value>",
    into = "serde_json::Map<String, Value>"
)]
pub struct Book {
    /// Title shown in listings and matched by search and sort.
    pub title: Option<String>,
    /// Author name, compared case-insensitively when counting titles.
    pub author: Option<String>,
    /// Free-text genre. There is no fixed list of genres.
    pub genre: Option<String>,
    /// Publication year. Any sign or magnitude is accepted, so ancient works
    /// can carry negative years.
    pub year: Option<i64>,
    /// Price in the user's currency. Only new entries are checked for
    /// negativity; loaded values round-trip unchanged.
    pub price: Option<f64>,
    /// Everything else found in the stored object, in file order.
    pub extra: Map<String, Value>,
}

impl Book {
    /// Build a fully populated record, as the add flow does.
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        genre: impl Into<String>,
        year: i64,
        price: f64,
    ) -> Self {
        Self {
            title: Some(title.into()),
            author: Some(author.into()),
            genre: Some(genre.into()),
            year: Some(year),
            price: Some(price),
            extra: Map::new(),
        }
    }

    /// Title for display, falling back to [`UNKNOWN_TITLE`].
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(UNKNOWN_TITLE)
    }

    pub fn display_author(&self) -> &str {
        self.author.as_deref().unwrap_or(UNKNOWN_AUTHOR)
    }

    pub fn display_genre(&self) -> &str {
        self.genre.as_deref().unwrap_or(UNKNOWN_GENRE)
    }

    pub fn display_year(&self) -> String {
        self.year
            .map(|year| year.to_string())
            .unwrap_or_else(|| UNKNOWN_YEAR.to_string())
    }

    /// Price rendered with two decimals; a missing price shows as zero.
    pub fn display_price(&self) -> String {
        format!("{:.2}", self.price.unwrap_or(0.0))
    }

    /// Title used by comparisons: a missing title behaves like an empty one.
    pub(crate) fn title_key(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    /// Author used by comparisons; missing behaves like empty.
    pub(crate) fn author_key(&self) -> &str {
        self.author.as_deref().unwrap_or("")
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Title: {}, Author: {}, Genre: {}, Year: {}, Price: ${}",
            self.display_title(),
            self.display_author(),
            self.display_genre(),
            self.display_year(),
            self.display_price()
        )
    }
}

impl From<Map<String, Value>> for Book {
    /// Lift the known keys out of a stored object when their values have the
    /// expected type. Anything else stays in `extra` untouched.
    fn from(mut fields: Map<String, Value>) -> Self {
        Self {
            title: take_field(&mut fields, "title", string_value),
            author: take_field(&mut fields, "author", string_value),
            genre: take_field(&mut fields, "genre", string_value),
            year: take_field(&mut fields, "year", Value::as_i64),
            price: take_field(&mut fields, "price", Value::as_f64),
            extra: fields,
        }
    }
}

impl From<Book> for Map<String, Value> {
    fn from(book: Book) -> Self {
        let mut fields = Map::new();
        if let Some(title) = book.title {
            fields.insert("title".to_string(), Value::from(title));
        }
        if let Some(author) = book.author {
            fields.insert("author".to_string(), Value::from(author));
        }
        if let Some(genre) = book.genre {
            fields.insert("genre".to_string(), Value::from(genre));
        }
        if let Some(year) = book.year {
            fields.insert("year".to_string(), Value::from(year));
        }
        if let Some(price) = book.price {
            fields.insert("price".to_string(), Value::from(price));
        }
        fields.extend(book.extra);
        fields
    }
}

/// Remove `key` from `fields` only if `read` understands its value.
fn take_field<T>(
    fields: &mut Map<String, Value>,
    key: &str,
    read: impl Fn(&Value) -> Option<T>,
) -> Option<T> {
    let typed = read(fields.get(key)?)?;
    fields.shift_remove(key);
    Some(typed)
}

fn string_value(value: &Value) -> Option<String> {
    value.as_str().map(str::to_owned)
}

/// The whole collection for one session, keyed by the decimal id string.
///
/// Iteration follows file order for loaded entries and insertion order for new
/// ones. "First match" lookups and export row order depend on it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    books: IndexMap<String, Book>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Book> {
        self.books.get(id)
    }

    /// Id the next added record receives: the current count plus one.
    pub fn next_id(&self) -> String {
        (self.books.len() + 1).to_string()
    }

    /// Iterate `(id, book)` pairs in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Book)> {
        self.books.iter().map(|(id, book)| (id.as_str(), book))
    }

    pub fn books(&self) -> impl Iterator<Item = &Book> {
        self.books.values()
    }

    /// Insert under `id`. An existing entry with the same id is replaced in
    /// place and keeps its position.
    pub(crate) fn insert(&mut self, id: String, book: Book) -> Option<Book> {
        self.books.insert(id, book)
    }

    pub(crate) fn remove(&mut self, id: &str) -> Option<Book> {
        self.books.shift_remove(id)
    }
}

impl FromIterator<(String, Book)> for Catalog {
    fn from_iter<I: IntoIterator<Item = (String, Book)>>(iter: I) -> Self {
        Self {
            books: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_placeholders() {
        let book = Book::default();
        assert_eq!(book.display_title(), UNKNOWN_TITLE);
        assert_eq!(book.display_author(), UNKNOWN_AUTHOR);
        assert_eq!(book.display_genre(), UNKNOWN_GENRE);
        assert_eq!(book.display_year(), UNKNOWN_YEAR);
        assert_eq!(book.display_price(), "0.00");
    }

    #[test]
    fn next_id_counts_records_not_max_key() {
        let catalog: Catalog = [
            ("1".to_string(), Book::default()),
            ("7".to_string(), Book::default()),
        ]
        .into_iter()
        .collect();
        assert_eq!(catalog.next_id(), "3");
    }

    #[test]
    fn absent_fields_are_not_serialized() {
        let book = Book {
            title: Some("Dune".into()),
            ..Book::default()
        };
        let json = serde_json::to_string(&book).unwrap();
        assert_eq!(json, r#"{"title":"Dune"}"#);
    }

    #[test]
    fn mistyped_and_unknown_keys_round_trip() {
        let raw = r#"{"title":"Old","price":"9.99","isbn":"978-0","year":1815}"#;
        let book: Book = serde_json::from_str(raw).unwrap();
        assert_eq!(book.title.as_deref(), Some("Old"));
        assert_eq!(book.year, Some(1815));
        assert_eq!(book.price, None);
        assert_eq!(book.display_price(), "0.00");
        assert_eq!(book.extra.get("price"), Some(&Value::from("9.99")));
        assert_eq!(book.extra.get("isbn"), Some(&Value::from("978-0")));

        let json = serde_json::to_string(&book).unwrap();
        assert_eq!(json, r#"{"title":"Old","year":1815,"price":"9.99","isbn":"978-0"}"#);
    }

    #[test]
    fn non_object_record_is_rejected() {
        assert!(serde_json::from_str::<Book>(r#""just a title""#).is_err());
    }

    #[test]
    fn display_line_uses_dollar_price() {
        let book = Book::new("Dune", "Frank Herbert", "SF", 1965, 9.5);
        assert_eq!(
            book.to_string(),
            "Title: Dune, Author: Frank Herbert, Genre: SF, Year: 1965, Price: $9.50"
        );
    }
}
