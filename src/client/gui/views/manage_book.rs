use iced::widget::{Button, Column, Container, Text};
use iced::{Color, Element, Length};

use crate::client::models::app_state::AppState;
use crate::client::models::messages::Message;
use crate::common::models::Book;

const TEXT_SECONDARY: Color = Color::from_rgb(0.7, 0.7, 0.7);

pub fn view<'a>(id: i64, book: Option<&'a Book>) -> Element<'a, Message> {
    let back = Button::new(Text::new("← Back").size(14))
        .style(iced::theme::Button::Secondary)
        .padding(10)
        .on_press(Message::Navigate(AppState::Books));

    let details: Element<'a, Message> = match book {
        Some(book) => Column::new()
            .spacing(8)
            .push(Text::new(&book.title).size(28))
            .push(Text::new(format!("Subject: {}", book.subject)).size(16).style(TEXT_SECONDARY))
            .push(Text::new(book.manage_path()).size(12).style(TEXT_SECONDARY))
            .into(),
        None => Column::new()
            .spacing(8)
            .push(Text::new("Book not found.").size(20))
            .push(Text::new(format!("No book with id {} in the library.", id)).size(14).style(TEXT_SECONDARY))
            .into(),
    };

    Container::new(Column::new().spacing(24).push(back).push(details))
        .padding(24)
        .width(Length::Fill)
        .into()
}
