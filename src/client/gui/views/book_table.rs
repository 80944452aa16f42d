use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use iced::widget::{Button, Column, Container, Row, Text};
use iced::{Alignment, Color, Command, Element, Font, Length};
use log::{debug, info, warn};

use crate::client::gui::widgets::alert;
use crate::client::models::messages::TableMessage;
use crate::client::models::notification::{hide_after, Notification, Severity};
use crate::client::services::books_service::BooksApi;
use crate::client::services::query_cache::{QueryCache, BOOKS_QUERY};
use crate::common::models::Book;

pub const EMPTY_MESSAGE: &str = "No books in the library.";
pub const CAPTION: &str = "List of Books";
pub const HEADERS: [&str; 3] = ["", "Title", "Subject"];
pub const DELETED_MESSAGE: &str = "Book deleted.";

const CARD_BG: Color = Color::from_rgb(0.18, 0.19, 0.36);
const TEXT_PRIMARY: Color = Color::WHITE;
const TEXT_SECONDARY: Color = Color::from_rgb(0.7, 0.7, 0.7);
const LINK_COLOR: Color = Color::from_rgb(0.4, 0.7, 1.0);

const BOLD_FONT: Font = Font {
    family: iced::font::Family::SansSerif,
    weight: iced::font::Weight::Bold,
    ..Font::DEFAULT
};

const DELETE_WIDTH: Length = Length::Fixed(180.0);
const TITLE_WIDTH: Length = Length::FillPortion(2);
const SUBJECT_WIDTH: Length = Length::FillPortion(1);

fn table_appearance(_: &iced::Theme) -> iced::widget::container::Appearance {
    iced::widget::container::Appearance {
        background: Some(iced::Background::Color(CARD_BG)),
        text_color: Some(TEXT_PRIMARY),
        border: iced::Border {
            width: 1.0,
            color: Color::from_rgb(0.2, 0.2, 0.3),
            radius: 12.0.into(),
        },
        shadow: iced::Shadow {
            offset: iced::Vector::new(0.0, 2.0),
            blur_radius: 6.0,
            color: Color::from_rgba(0.0, 0.0, 0.0, 0.2),
        },
    }
}

/// What the table shows for a given book list, independent of widgets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableLayout {
    Empty {
        message: &'static str,
    },
    Table {
        caption: &'static str,
        headers: [&'static str; 3],
        rows: Vec<RowLayout>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowLayout {
    pub book_id: i64,
    pub delete_label: String,
    pub title: String,
    pub link: String,
    pub subject: String,
    /// Delete request in flight; the delete control is disabled.
    pub deleting: bool,
}

impl RowLayout {
    /// Message sent by the row's delete control; `None` while disabled.
    pub fn delete_message(&self) -> Option<TableMessage> {
        (!self.deleting).then(|| TableMessage::DeletePressed {
            id: self.book_id,
            title: self.title.clone(),
        })
    }
}

/// Table of books with a per-row delete action and a deletion banner.
///
/// The books are owned by the parent and passed to [`BookTable::view`] on every
/// render. A successful delete invalidates [`BOOKS_QUERY`] so the parent refetches;
/// rows are never removed locally.
pub struct BookTable {
    api: Arc<dyn BooksApi>,
    cache: Arc<dyn QueryCache>,
    notification: Notification,
    // id -> title of deletes in flight
    pending: HashMap<i64, String>,
}

impl BookTable {
    pub fn new(api: Arc<dyn BooksApi>, cache: Arc<dyn QueryCache>, auto_hide: Duration) -> Self {
        Self {
            api,
            cache,
            notification: Notification::new(auto_hide),
            pending: HashMap::new(),
        }
    }

    pub fn notification(&self) -> &Notification {
        &self.notification
    }

    pub fn is_deleting(&self, id: i64) -> bool {
        self.pending.contains_key(&id)
    }

    pub fn update(&mut self, message: TableMessage) -> Command<TableMessage> {
        match message {
            TableMessage::DeletePressed { id, title } => match self.begin_delete(id, title) {
                Some(mutation) => Command::perform(mutation, |msg| msg),
                None => Command::none(),
            },
            TableMessage::DeleteFinished { id, result } => {
                let title = self.pending.remove(&id);
                let generation = match result {
                    Ok(()) => self.notification.show(Severity::Success, DELETED_MESSAGE),
                    Err(e) => {
                        warn!("[BOOK_TABLE] delete of book {} failed: {}", id, e);
                        let text = match title {
                            Some(title) => format!("Could not delete \"{}\".", title),
                            None => format!("Could not delete book {}.", id),
                        };
                        self.notification.show(Severity::Error, text)
                    }
                };
                self.hide_timer(generation)
            }
            // Navigation is handled by the parent
            TableMessage::OpenBook(_) => Command::none(),
            TableMessage::DismissNotification => {
                self.notification.dismiss();
                Command::none()
            }
            TableMessage::NotificationExpired(generation) => {
                if self.notification.expire(generation) {
                    debug!("[BOOK_TABLE] notification auto-hidden");
                }
                Command::none()
            }
        }
    }

    /// Marks `id` as pending and returns its delete mutation, or `None` while a
    /// delete for `id` is already in flight.
    pub fn begin_delete(
        &mut self,
        id: i64,
        title: String,
    ) -> Option<impl Future<Output = TableMessage> + Send + 'static> {
        if self.pending.contains_key(&id) {
            debug!("[BOOK_TABLE] delete of book {} already in flight", id);
            return None;
        }
        info!("[BOOK_TABLE] deleting book {} ({})", id, title);
        self.pending.insert(id, title);
        Some(delete_book(self.api.clone(), self.cache.clone(), id))
    }

    fn hide_timer(&self, generation: Option<u64>) -> Command<TableMessage> {
        match generation {
            Some(generation) => Command::perform(
                hide_after(self.notification.auto_hide(), generation),
                TableMessage::NotificationExpired,
            ),
            None => Command::none(),
        }
    }

    pub fn layout(&self, books: &[Book]) -> TableLayout {
        if books.is_empty() {
            return TableLayout::Empty { message: EMPTY_MESSAGE };
        }
        let rows = books
            .iter()
            .map(|book| RowLayout {
                book_id: book.id,
                delete_label: format!("Delete {}", book.title),
                title: book.title.clone(),
                link: book.manage_path(),
                subject: book.subject.clone(),
                deleting: self.is_deleting(book.id),
            })
            .collect();
        TableLayout::Table {
            caption: CAPTION,
            headers: HEADERS,
            rows,
        }
    }

    pub fn view<'a>(&'a self, books: &[Book]) -> Element<'a, TableMessage> {
        let body: Element<'a, TableMessage> = match self.layout(books) {
            TableLayout::Empty { message } => Text::new(message).size(16).style(TEXT_SECONDARY).into(),
            TableLayout::Table { caption, headers, rows } => {
                let header = Row::new()
                    .spacing(12)
                    .push(Text::new(headers[0]).font(BOLD_FONT).width(DELETE_WIDTH))
                    .push(Text::new(headers[1]).font(BOLD_FONT).width(TITLE_WIDTH))
                    .push(Text::new(headers[2]).font(BOLD_FONT).width(SUBJECT_WIDTH));

                let mut table = Column::new()
                    .spacing(8)
                    .push(Text::new(caption).size(20).font(BOLD_FONT).style(TEXT_PRIMARY))
                    .push(header);
                for row in rows {
                    table = table.push(row_view(row));
                }

                Container::new(table)
                    .padding(16)
                    .width(Length::Fill)
                    .style(iced::theme::Container::Custom(Box::new(table_appearance)))
                    .into()
            }
        };

        Column::new()
            .spacing(16)
            .push(body)
            .push(alert::view(&self.notification))
            .into()
    }
}

fn row_view<'a>(row: RowLayout) -> Element<'a, TableMessage> {
    let on_delete = row.delete_message();
    let delete = Button::new(Text::new(row.delete_label).size(14))
        .style(iced::theme::Button::Destructive)
        .padding([6, 10])
        .on_press_maybe(on_delete);

    // Link verso /manage-book/{id}
    let link = Button::new(Text::new(row.title).style(LINK_COLOR))
        .style(iced::theme::Button::Text)
        .padding(0)
        .on_press(TableMessage::OpenBook(row.book_id));

    Row::new()
        .spacing(12)
        .align_items(Alignment::Center)
        .push(Container::new(delete).width(DELETE_WIDTH))
        .push(Container::new(link).width(TITLE_WIDTH))
        .push(Text::new(row.subject).style(TEXT_SECONDARY).width(SUBJECT_WIDTH))
        .into()
}

/// Deletion mutation: removes the book remotely and, on success, invalidates the
/// cached book list before reporting back.
pub async fn delete_book(api: Arc<dyn BooksApi>, cache: Arc<dyn QueryCache>, id: i64) -> TableMessage {
    let result = api.delete_book(id).await;
    if result.is_ok() {
        cache.invalidate(BOOKS_QUERY);
    }
    TableMessage::DeleteFinished {
        id,
        result: result.map_err(|e| e.to_string()),
    }
}
