use tracing::{debug, info};

use crate::error::{CatalogError, ValidationError};
use crate::models::{Book, Catalog};

use super::file::CatalogFile;

/// Raw text for a new record, as typed by the user.
#[derive(Debug, Clone, Default)]
pub struct BookInput {
    pub title: String,
    pub author: String,
    pub genre: String,
    /// Parsed as a signed integer after trimming.
    pub year: String,
    /// Parsed as a finite, non-negative number after trimming.
    pub price: String,
}

impl BookInput {
    /// Parse year then price. Year problems win when both are wrong.
    pub fn validate(&self) -> Result<(i64, f64), ValidationError> {
        let year = self
            .year
            .trim()
            .parse::<i64>()
            .map_err(|_| ValidationError::InvalidYear {
                input: self.year.clone(),
            })?;

        let price = self
            .price
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|price| price.is_finite())
            .ok_or_else(|| ValidationError::InvalidPrice {
                input: self.price.clone(),
            })?;
        if price < 0.0 {
            return Err(ValidationError::NegativePrice { price });
        }

        Ok((year, price))
    }
}

/// Validate `input`, append it under the next sequential id and persist the
/// whole catalog. Returns the new id.
///
/// Invalid input leaves both the catalog and the file untouched. If the save
/// fails the record is taken back out so memory keeps matching disk.
pub fn add_book(
    catalog: &mut Catalog,
    file: &CatalogFile,
    input: &BookInput,
) -> Result<String, CatalogError> {
    let (year, price) = input.validate().inspect_err(|err| {
        debug!(error = %err, "rejected book input");
    })?;

    let id = catalog.next_id();
    let book = Book::new(
        input.title.clone(),
        input.author.clone(),
        input.genre.clone(),
        year,
        price,
    );
    let replaced = catalog.insert(id.clone(), book);

    if let Err(err) = file.save(catalog) {
        match replaced {
            Some(previous) => {
                catalog.insert(id, previous);
            }
            None => {
                catalog.remove(&id);
            }
        }
        return Err(err.into());
    }

    info!(id = %id, title = %input.title, "book added");
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(year: &str, price: &str) -> BookInput {
        BookInput {
            title: "Dune".into(),
            author: "Frank Herbert".into(),
            genre: "SF".into(),
            year: year.into(),
            price: price.into(),
        }
    }

    #[test]
    fn accepts_signed_years_and_padded_numbers() {
        assert_eq!(input(" -44 ", " 12.5 ").validate(), Ok((-44, 12.5)));
        assert_eq!(input("+1965", "0").validate(), Ok((1965, 0.0)));
    }

    #[test]
    fn year_is_checked_before_price() {
        assert!(matches!(
            input("soon", "-1").validate(),
            Err(ValidationError::InvalidYear { .. })
        ));
    }

    #[test]
    fn rejects_bad_prices() {
        assert!(matches!(
            input("1965", "cheap").validate(),
            Err(ValidationError::InvalidPrice { .. })
        ));
        assert!(matches!(
            input("1965", "NaN").validate(),
            Err(ValidationError::InvalidPrice { .. })
        ));
        assert!(matches!(
            input("1965", "-0.01").validate(),
            Err(ValidationError::NegativePrice { .. })
        ));
    }
}
