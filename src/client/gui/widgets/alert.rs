// Widget di alert per la GUI
use iced::widget::{Button, Container, Row, Space, Text};
use iced::{Alignment, Color, Element, Font, Length};

use crate::client::models::messages::TableMessage;
use crate::client::models::notification::{Notification, Severity};

const EMOJI_FONT: Font = Font::with_name("Segoe UI Emoji");

fn color(severity: Severity) -> Color {
    match severity {
        Severity::Success => Color::from_rgb(0.2, 0.8, 0.4),
        Severity::Error => Color::from_rgb(1.0, 0.2, 0.2),
    }
}

fn emoji(severity: Severity) -> &'static str {
    match severity {
        Severity::Success => "✅",
        Severity::Error => "❌",
    }
}

/// Banner with a close button; empty space while hidden.
pub fn view<'a>(notification: &Notification) -> Element<'a, TableMessage> {
    if !notification.is_visible() {
        return Space::new(Length::Fill, Length::Fixed(0.0)).into();
    }

    let bg_color = color(notification.severity());
    let close = Button::new(Text::new("✕").font(EMOJI_FONT).size(16).style(Color::WHITE))
        .style(iced::theme::Button::Text)
        .on_press(TableMessage::DismissNotification);

    Container::new(
        Row::new()
            .spacing(12)
            .align_items(Alignment::Center)
            .push(Text::new(emoji(notification.severity())).font(EMOJI_FONT).size(20).style(Color::WHITE))
            .push(
                Text::new(notification.message().to_string())
                    .size(18)
                    .style(Color::WHITE)
                    .width(Length::Fill),
            )
            .push(close),
    )
    .padding([12, 16])
    .width(Length::Fill)
    .style(iced::theme::Container::Custom(Box::new(move |_: &iced::Theme| {
        iced::widget::container::Appearance {
            background: Some(iced::Background::Color(bg_color)),
            text_color: Some(Color::WHITE),
            border: iced::Border {
                radius: 8.0.into(),
                ..Default::default()
            },
            shadow: iced::Shadow {
                offset: iced::Vector::new(0.0, 4.0),
                blur_radius: 12.0,
                color: Color::from_rgba(0.0, 0.0, 0.0, 0.3),
            },
        }
    })))
    .into()
}
