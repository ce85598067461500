use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::store::BookInput;

/// Form state for the "Add Book" modal. Values stay raw text until save so
/// the store can report year and price problems itself.
#[derive(Default, Clone)]
pub(crate) struct BookForm {
    /// Raw text of each field, exactly as typed.
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) genre: String,
    pub(crate) year: String,
    pub(crate) price: String,
    /// Field that receives typed characters.
    pub(crate) active: BookField,
    /// Validation message from the last failed save, shown under the fields.
    pub(crate) error: Option<String>,
}

/// Fields within the book form, in tab order.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub(crate) enum BookField {
    #[default]
    Title,
    Author,
    Genre,
    Year,
    Price,
}

impl BookField {
    pub(crate) const ALL: [BookField; 5] = [
        BookField::Title,
        BookField::Author,
        BookField::Genre,
        BookField::Year,
        BookField::Price,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            BookField::Title => "Title",
            BookField::Author => "Author",
            BookField::Genre => "Genre",
            BookField::Year => "Year",
            BookField::Price => "Price",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|field| *field == self).unwrap_or(0)
    }
}

impl BookForm {
    /// Move focus forward, wrapping from Price back to Title.
    pub(crate) fn next_field(&mut self) {
        let idx = (self.active.index() + 1) % BookField::ALL.len();
        self.active = BookField::ALL[idx];
    }

    pub(crate) fn previous_field(&mut self) {
        let len = BookField::ALL.len();
        let idx = (self.active.index() + len - 1) % len;
        self.active = BookField::ALL[idx];
    }

    fn value(&self, field: BookField) -> &String {
        match field {
            BookField::Title => &self.title,
            BookField::Author => &self.author,
            BookField::Genre => &self.genre,
            BookField::Year => &self.year,
            BookField::Price => &self.price,
        }
    }

    fn value_mut(&mut self, field: BookField) -> &mut String {
        match field {
            BookField::Title => &mut self.title,
            BookField::Author => &mut self.author,
            BookField::Genre => &mut self.genre,
            BookField::Year => &mut self.year,
            BookField::Price => &mut self.price,
        }
    }

    /// Append a character to the active field. Control characters are ignored.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        let field = self.active;
        self.value_mut(field).push(ch);
        true
    }

    pub(crate) fn backspace(&mut self) {
        let field = self.active;
        self.value_mut(field).pop();
    }

    pub(crate) fn to_input(&self) -> BookInput {
        BookInput {
            title: self.title.clone(),
            author: self.author.clone(),
            genre: self.genre.clone(),
            year: self.year.clone(),
            price: self.price.clone(),
        }
    }

    /// Render one labelled field, highlighting the focused one.
    pub(crate) fn build_line(&self, field: BookField) -> Line<'static> {
        let value = self.value(field);
        let is_active = self.active == field;

        let display = if value.is_empty() {
            match field {
                BookField::Year => "<integer>".to_string(),
                BookField::Price => "<number>".to_string(),
                _ => String::new(),
            }
        } else {
            value.clone()
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{}: ", field.label())),
            Span::styled(display, style),
        ])
    }

    /// Cursor column offset for the active field, prefix included.
    pub(crate) fn cursor_offset(&self) -> usize {
        self.active.label().len() + 2 + self.value(self.active).chars().count()
    }
}

/// What a single-line prompt is asking for.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum PromptKind {
    SearchTitle,
    CountAuthor,
}

impl PromptKind {
    pub(crate) fn title(self) -> &'static str {
        match self {
            PromptKind::SearchTitle => "Search Book",
            PromptKind::CountAuthor => "Count Titles by Author",
        }
    }

    pub(crate) fn question(self) -> &'static str {
        match self {
            PromptKind::SearchTitle => "Enter the title of the book you are searching for: ",
            PromptKind::CountAuthor => "Enter the author's name: ",
        }
    }
}

/// State for an active single-line prompt.
pub(crate) struct Prompt {
    /// Which question is being asked; decides what Enter does with `input`.
    pub(crate) kind: PromptKind,
    pub(crate) input: String,
}

impl Prompt {
    pub(crate) fn new(kind: PromptKind) -> Self {
        Self {
            kind,
            input: String::new(),
        }
    }
}
