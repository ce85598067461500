use crate::models::{Book, Catalog};

/// Numbered entries of the main menu, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddBook,
    ViewBooks,
    ExportTitles,
    ExportYears,
    SearchBook,
    SortByTitle,
    FindOldest,
    FindNewest,
    CountByAuthor,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 10] = [
        MenuChoice::AddBook,
        MenuChoice::ViewBooks,
        MenuChoice::ExportTitles,
        MenuChoice::ExportYears,
        MenuChoice::SearchBook,
        MenuChoice::SortByTitle,
        MenuChoice::FindOldest,
        MenuChoice::FindNewest,
        MenuChoice::CountByAuthor,
        MenuChoice::Exit,
    ];

    /// Map typed text to a menu entry. Only the exact strings "1" to "10"
    /// match: no padding, sign, or leading zeros.
    pub fn parse(input: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|choice| choice.number().to_string() == input)
    }

    pub fn from_number(number: usize) -> Option<Self> {
        number
            .checked_sub(1)
            .and_then(|idx| Self::ALL.get(idx))
            .copied()
    }

    pub fn number(self) -> usize {
        Self::ALL
            .iter()
            .position(|choice| *choice == self)
            .map_or(0, |idx| idx + 1)
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::AddBook => "Add Book",
            MenuChoice::ViewBooks => "View Books",
            MenuChoice::ExportTitles => "Extract Titles to CSV",
            MenuChoice::ExportYears => "Extract Years to CSV",
            MenuChoice::SearchBook => "Search Book",
            MenuChoice::SortByTitle => "Sort Books by Title",
            MenuChoice::FindOldest => "Find Oldest Book",
            MenuChoice::FindNewest => "Find Newest Book",
            MenuChoice::CountByAuthor => "Count Titles by Author",
            MenuChoice::Exit => "Exit",
        }
    }
}

/// Menu highlight plus the choice typed so far.
#[derive(Default)]
pub(crate) struct MenuScreen {
    /// Index into [`MenuChoice::ALL`] of the highlighted entry.
    pub(crate) selected: usize,
    /// Characters typed since the last Enter.
    pub(crate) choice: String,
}

impl MenuScreen {
    pub(crate) fn move_selection(&mut self, offset: isize) {
        let len = MenuChoice::ALL.len() as isize;
        let new = (self.selected as isize + offset).clamp(0, len - 1);
        self.selected = new as usize;
    }

    pub(crate) fn highlighted(&self) -> MenuChoice {
        MenuChoice::ALL[self.selected]
    }

    /// Consume the typed choice. An empty buffer means the highlighted entry.
    pub(crate) fn take_choice(&mut self) -> Option<MenuChoice> {
        let typed = std::mem::take(&mut self.choice);
        if typed.trim().is_empty() {
            return Some(self.highlighted());
        }
        let choice = MenuChoice::parse(&typed)?;
        self.selected = choice.number() - 1;
        Some(choice)
    }
}

/// How much of each record a list shows.
#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum ListStyle {
    /// Every field on one line.
    Full,
    /// Id and title only, as the sorted view prints them.
    TitleOnly,
}

/// Scrollable snapshot of records, used by "View Books" and "Sort Books".
pub(crate) struct BookListScreen {
    /// Title drawn on the list border.
    pub(crate) heading: String,
    pub(crate) style: ListStyle,
    /// `(id, book)` pairs copied at open time, in display order.
    pub(crate) rows: Vec<(String, Book)>,
    /// Highlighted row; always 0 for an empty list.
    pub(crate) selected: usize,
}

impl BookListScreen {
    pub(crate) fn new<'a>(
        heading: impl Into<String>,
        style: ListStyle,
        rows: impl IntoIterator<Item = (&'a str, &'a Book)>,
    ) -> Self {
        Self {
            heading: heading.into(),
            style,
            rows: rows
                .into_iter()
                .map(|(id, book)| (id.to_string(), book.clone()))
                .collect(),
            selected: 0,
        }
    }

    pub(crate) fn all(catalog: &Catalog) -> Self {
        Self::new("All Books", ListStyle::Full, catalog.iter())
    }

    pub(crate) fn line(&self, idx: usize) -> Option<String> {
        let (id, book) = self.rows.get(idx)?;
        Some(match self.style {
            ListStyle::Full => format!("{id}. {book}"),
            ListStyle::TitleOnly => format!("{id}. Title: {}", book.display_title()),
        })
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        if self.rows.is_empty() {
            return;
        }
        let len = self.rows.len() as isize;
        self.selected = (self.selected as isize + offset).clamp(0, len - 1) as usize;
    }

    pub(crate) fn select_first(&mut self) {
        self.selected = 0;
    }

    pub(crate) fn select_last(&mut self) {
        self.selected = self.rows.len().saturating_sub(1);
    }
}

/// One record shown field by field (search hit, oldest, newest).
pub(crate) struct DetailScreen {
    /// What was asked for, e.g. "Oldest Book".
    pub(crate) heading: String,
    /// Catalog key of the record, shown next to the heading.
    pub(crate) id: String,
    pub(crate) book: Book,
}

impl DetailScreen {
    pub(crate) fn new(heading: impl Into<String>, id: &str, book: &Book) -> Self {
        Self {
            heading: heading.into(),
            id: id.to_string(),
            book: book.clone(),
        }
    }

    /// Label/value pairs in display order.
    pub(crate) fn fields(&self) -> [(&'static str, String); 5] {
        [
            ("Title", self.book.display_title().to_string()),
            ("Author", self.book.display_author().to_string()),
            ("Genre", self.book.display_genre().to_string()),
            ("Publication Year", self.book.display_year()),
            ("Price", format!("${}", self.book.display_price())),
        ]
    }
}
