use std::mem;

use anyhow::{Context, Result};
use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;
use tracing::debug;

use crate::config::Paths;
use crate::error::CatalogError;
use crate::export::{export_field, ExportField};
use crate::models::Catalog;
use crate::query::{count_by_author, find_newest, find_oldest, search, sort_by_title};
use crate::store::{add_book, CatalogFile, Corruption};

use super::forms::{BookField, BookForm, Prompt, PromptKind};
use super::helpers::{centered_rect, cursor_x};
use super::screens::{BookListScreen, DetailScreen, ListStyle, MenuChoice, MenuScreen};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
const CHOICE_PROMPT: &str = "Enter your choice: ";
const NO_BOOKS: &str = "No books available.";

/// Which view fills the content area.
enum Screen {
    Menu,
    Books(BookListScreen),
    Detail(DetailScreen),
}

/// Modal input layered over the current screen.
enum Mode {
    Normal,
    AddingBook(BookForm),
    Prompting(Prompt),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state: the catalog for this session, where it lives on
/// disk, and what the user is currently looking at.
pub struct App {
    catalog: Catalog,
    file: CatalogFile,
    paths: Paths,
    menu: MenuScreen,
    screen: Screen,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(catalog: Catalog, paths: Paths) -> Self {
        Self {
            catalog,
            file: CatalogFile::new(paths.catalog.clone()),
            paths,
            menu: MenuScreen::default(),
            screen: Screen::Menu,
            mode: Mode::Normal,
            status: None,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Text currently shown in the footer, if any.
    pub fn status(&self) -> Option<&str> {
        self.status.as_ref().map(|status| status.text.as_str())
    }

    /// Surface a discarded backing file once the UI is up.
    pub fn report_corruption(&mut self, corruption: &Corruption) {
        self.set_status(corruption.to_string(), StatusKind::Error);
    }

    /// Feed one key press through the state machine. Returns `true` when the
    /// user asked to exit. Save and export failures come back as errors.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::AddingBook(form) => self.handle_add_book(code, form)?,
            Mode::Prompting(prompt) => self.handle_prompt(code, prompt)?,
        };

        Ok(exit)
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        if matches!(self.screen, Screen::Menu) {
            return self.handle_menu_key(code, exit);
        }

        match code {
            KeyCode::Char('q') => *exit = true,
            KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace => self.back_to_menu(),
            _ => {
                if let Screen::Books(list) = &mut self.screen {
                    match code {
                        KeyCode::Up => list.move_selection(-1),
                        KeyCode::Down => list.move_selection(1),
                        KeyCode::PageUp => list.move_selection(-10),
                        KeyCode::PageDown => list.move_selection(10),
                        KeyCode::Home => list.select_first(),
                        KeyCode::End => list.select_last(),
                        _ => {}
                    }
                }
            }
        }
        Ok(Mode::Normal)
    }

    fn handle_menu_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        match code {
            KeyCode::Esc if !self.menu.choice.is_empty() => self.menu.choice.clear(),
            KeyCode::Esc => *exit = true,
            KeyCode::Char('q') if self.menu.choice.is_empty() => *exit = true,
            KeyCode::Up => {
                self.menu.choice.clear();
                self.menu.move_selection(-1);
            }
            KeyCode::Down => {
                self.menu.choice.clear();
                self.menu.move_selection(1);
            }
            KeyCode::Backspace => {
                self.menu.choice.pop();
            }
            KeyCode::Enter => match self.menu.take_choice() {
                Some(choice) => return self.dispatch(choice, exit),
                None => {
                    debug!("invalid menu choice");
                    self.set_status("Invalid choice. Please try again.", StatusKind::Error);
                }
            },
            KeyCode::Char(ch) if !ch.is_control() => self.menu.choice.push(ch),
            _ => {}
        }
        Ok(Mode::Normal)
    }

    /// Run the action behind a menu entry.
    fn dispatch(&mut self, choice: MenuChoice, exit: &mut bool) -> Result<Mode> {
        debug!(choice = choice.number(), "menu choice");
        self.clear_status();
        match choice {
            MenuChoice::AddBook => return Ok(Mode::AddingBook(BookForm::default())),
            MenuChoice::ViewBooks => {
                if self.catalog.is_empty() {
                    self.set_status(NO_BOOKS, StatusKind::Info);
                } else {
                    self.screen = Screen::Books(BookListScreen::all(&self.catalog));
                }
            }
            MenuChoice::ExportTitles => {
                let path = self.paths.titles_csv.clone();
                export_field(&self.catalog, ExportField::Title, &path)
                    .context("failed to export titles")?;
                self.set_status(
                    format!("Book titles have been extracted to {}.", path.display()),
                    StatusKind::Info,
                );
            }
            MenuChoice::ExportYears => {
                let path = self.paths.years_csv.clone();
                export_field(&self.catalog, ExportField::Year, &path)
                    .context("failed to export years")?;
                self.set_status(
                    format!("Book years have been extracted to {}.", path.display()),
                    StatusKind::Info,
                );
            }
            MenuChoice::SearchBook => {
                return Ok(Mode::Prompting(Prompt::new(PromptKind::SearchTitle)))
            }
            MenuChoice::SortByTitle => {
                if self.catalog.is_empty() {
                    self.set_status(NO_BOOKS, StatusKind::Info);
                } else {
                    let sorted = sort_by_title(&self.catalog);
                    self.screen = Screen::Books(BookListScreen::new(
                        "Books by Title",
                        ListStyle::TitleOnly,
                        sorted,
                    ));
                }
            }
            MenuChoice::FindOldest => match find_oldest(&self.catalog) {
                Some((id, book)) => {
                    self.screen = Screen::Detail(DetailScreen::new("Oldest Book", id, book));
                }
                None => self.set_status(NO_BOOKS, StatusKind::Info),
            },
            MenuChoice::FindNewest => match find_newest(&self.catalog) {
                Some((id, book)) => {
                    self.screen = Screen::Detail(DetailScreen::new("Newest Book", id, book));
                }
                None => self.set_status(NO_BOOKS, StatusKind::Info),
            },
            MenuChoice::CountByAuthor => {
                return Ok(Mode::Prompting(Prompt::new(PromptKind::CountAuthor)))
            }
            MenuChoice::Exit => *exit = true,
        }
        Ok(Mode::Normal)
    }

    fn handle_add_book(&mut self, code: KeyCode, mut form: BookForm) -> Result<Mode> {
        let mut keep_open = true;
        match code {
            KeyCode::Esc => {
                self.set_status("Add book cancelled.", StatusKind::Info);
                keep_open = false;
            }
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.previous_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => {
                match add_book(&mut self.catalog, &self.file, &form.to_input()) {
                    Ok(_) => {
                        self.set_status("Book added successfully.", StatusKind::Info);
                        keep_open = false;
                    }
                    Err(CatalogError::Validation(err)) => {
                        let message = err.to_string();
                        form.error = Some(message.clone());
                        self.set_status(message, StatusKind::Error);
                    }
                    Err(err @ CatalogError::Store(_)) => {
                        return Err(err).context("failed to save catalog");
                    }
                }
            }
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }

        if keep_open {
            Ok(Mode::AddingBook(form))
        } else {
            Ok(Mode::Normal)
        }
    }

    fn handle_prompt(&mut self, code: KeyCode, mut prompt: Prompt) -> Result<Mode> {
        match code {
            KeyCode::Esc => {
                self.clear_status();
                return Ok(Mode::Normal);
            }
            KeyCode::Enter => {
                self.submit_prompt(&prompt);
                return Ok(Mode::Normal);
            }
            KeyCode::Backspace => {
                prompt.input.pop();
            }
            KeyCode::Char(ch) if !ch.is_control() => prompt.input.push(ch),
            _ => {}
        }
        Ok(Mode::Prompting(prompt))
    }

    fn submit_prompt(&mut self, prompt: &Prompt) {
        match prompt.kind {
            PromptKind::SearchTitle => match search(&self.catalog, &prompt.input) {
                Some((id, book)) => {
                    self.screen = Screen::Detail(DetailScreen::new("Search Result", id, book));
                    self.clear_status();
                }
                None => self.set_status("Book not found.", StatusKind::Info),
            },
            PromptKind::CountAuthor => {
                let count = count_by_author(&self.catalog, &prompt.input);
                self.set_status(
                    format!("Number of titles by {}: {count}", prompt.input),
                    StatusKind::Info,
                );
            }
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        match &self.screen {
            Screen::Menu => self.draw_menu(frame, content_area),
            Screen::Books(list) => self.draw_book_list(frame, content_area, list),
            Screen::Detail(detail) => self.draw_detail(frame, content_area, detail),
        }

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }

        match &self.mode {
            Mode::AddingBook(form) => self.draw_book_form(frame, area, form),
            Mode::Prompting(prompt) => self.draw_prompt(frame, area, prompt),
            Mode::Normal => {}
        }
    }

    fn draw_menu(&self, frame: &mut Frame, area: Rect) {
        let panel = centered_rect(60, 80, area);
        let block = Block::default()
            .title("Book Management System")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), panel);
        let inner = block.inner(panel);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(inner);

        let summary = Paragraph::new(Line::from(Span::styled(
            format!(
                "{} book(s) in {}",
                self.catalog.len(),
                self.file.path().display()
            ),
            Style::default().fg(Color::DarkGray),
        )));
        frame.render_widget(summary, chunks[0]);

        let items: Vec<ListItem> = MenuChoice::ALL
            .iter()
            .map(|choice| ListItem::new(format!("{:>2}. {}", choice.number(), choice.label())))
            .collect();
        let list = List::new(items).highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
        let mut state = ListState::default();
        state.select(Some(self.menu.selected));
        frame.render_stateful_widget(list, chunks[1], &mut state);

        let prompt = Paragraph::new(Line::from(vec![
            Span::raw(CHOICE_PROMPT),
            Span::styled(self.menu.choice.clone(), Style::default().fg(Color::Yellow)),
        ]));
        frame.render_widget(prompt, chunks[2]);

        if matches!(self.mode, Mode::Normal) {
            frame.set_cursor_position((
                cursor_x(chunks[2].x, chunks[2].width, CHOICE_PROMPT, &self.menu.choice),
                chunks[2].y,
            ));
        }
    }

    fn draw_book_list(&self, frame: &mut Frame, area: Rect, list: &BookListScreen) {
        let items: Vec<ListItem> = (0..list.rows.len())
            .filter_map(|idx| list.line(idx))
            .map(ListItem::new)
            .collect();
        let widget = List::new(items)
            .block(
                Block::default()
                    .title(format!("{} ({})", list.heading, list.rows.len()))
                    .borders(Borders::ALL),
            )
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        let mut state = ListState::default();
        state.select(Some(list.selected));
        frame.render_stateful_widget(widget, area, &mut state);
    }

    fn draw_detail(&self, frame: &mut Frame, area: Rect, detail: &DetailScreen) {
        let label_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let lines: Vec<Line> = detail
            .fields()
            .into_iter()
            .map(|(label, value)| {
                Line::from(vec![
                    Span::styled(format!("{label}: "), label_style),
                    Span::raw(value),
                ])
            })
            .collect();

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .title(format!("{} (#{})", detail.heading, detail.id))
                    .borders(Borders::ALL),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, centered_rect(70, 50, area));
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let paragraph =
            Paragraph::new(vec![status_line, self.footer_instructions()]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        match (&self.screen, &self.mode) {
            (_, Mode::AddingBook(_)) => Line::from(vec![
                Span::styled("[Tab]", key_style),
                Span::raw(" Next Field   "),
                Span::styled("[Enter]", key_style),
                Span::raw(" Save   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Cancel"),
            ]),
            (_, Mode::Prompting(_)) => Line::from(vec![
                Span::styled("[Enter]", key_style),
                Span::raw(" Submit   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Cancel"),
            ]),
            (Screen::Books(_), _) => Line::from(vec![
                Span::styled("[↑↓]", key_style),
                Span::raw(" Scroll   "),
                Span::styled("[PgUp/PgDn]", key_style),
                Span::raw(" Page   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Menu   "),
                Span::styled("[q]", key_style),
                Span::raw(" Quit"),
            ]),
            (Screen::Detail(_), _) => Line::from(vec![
                Span::styled("[Esc]", key_style),
                Span::raw(" Menu   "),
                Span::styled("[q]", key_style),
                Span::raw(" Quit"),
            ]),
            (Screen::Menu, _) => Line::from(vec![
                Span::styled("[1-10]", key_style),
                Span::raw(" Choose   "),
                Span::styled("[↑↓]", key_style),
                Span::raw(" Highlight   "),
                Span::styled("[Enter]", key_style),
                Span::raw(" Run   "),
                Span::styled("[q]", key_style),
                Span::raw(" Quit"),
            ]),
        }
    }

    fn draw_book_form(&self, frame: &mut Frame, area: Rect, form: &BookForm) {
        let popup_area = centered_rect(70, 50, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Add Book").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines: Vec<Line> = BookField::ALL
            .iter()
            .map(|field| form.build_line(*field))
            .collect();
        lines.push(Line::from(""));

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter to save • Tab to switch • Esc to cancel",
                Style::default().fg(Color::Gray),
            )));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        let row = BookField::ALL
            .iter()
            .position(|field| *field == form.active)
            .unwrap_or(0) as u16;
        let offset = form.cursor_offset().min(u16::MAX as usize) as u16;
        frame.set_cursor_position((
            inner.x + offset.min(inner.width.saturating_sub(1)),
            inner.y + row,
        ));
    }

    fn draw_prompt(&self, frame: &mut Frame, area: Rect, prompt: &Prompt) {
        let height = 3u16.min(area.height);
        let popup_area = Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height,
        };
        frame.render_widget(Clear, popup_area);

        let question = prompt.kind.question();
        let block = Block::default()
            .borders(Borders::ALL)
            .title(prompt.kind.title());
        let paragraph = Paragraph::new(Span::raw(format!("{question}{}", prompt.input)))
            .block(block.clone())
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, popup_area);

        let inner = block.inner(popup_area);
        frame.set_cursor_position((
            cursor_x(inner.x, inner.width, question, &prompt.input),
            inner.y,
        ));
    }

    fn back_to_menu(&mut self) {
        self.screen = Screen::Menu;
        self.clear_status();
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }
}
