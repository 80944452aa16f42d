use std::sync::Arc;

use iced::widget::{Button, Column, Container, Row, Text};
use iced::{Alignment, Application, Color, Command, Element, Length, Theme};
use log::{error, info};

use crate::client::gui::views::book_table::BookTable;
use crate::client::gui::views::manage_book;
use crate::client::models::app_state::{AppState, BooksAppState};
use crate::client::models::messages::{Message, TableMessage};
use crate::client::services::books_service::{BooksApi, BooksService};
use crate::client::services::query_cache::{QueryCache, QueryClient, BOOKS_QUERY};
use crate::common::config::ClientConfig;

const ERROR_COLOR: Color = Color::from_rgb(1.0, 0.4, 0.4);
const TEXT_SECONDARY: Color = Color::from_rgb(0.7, 0.7, 0.7);

pub struct BooksApp {
    pub state: BooksAppState,
    table: BookTable,
    cache: Arc<dyn QueryCache>,
}

impl BooksApp {
    /// Builds the app around injected services and returns the initial fetch.
    pub fn with_services(
        api: Arc<dyn BooksApi>,
        cache: Arc<dyn QueryCache>,
        config: &ClientConfig,
    ) -> (Self, Command<Message>) {
        let mut app = BooksApp {
            state: BooksAppState::default(),
            table: BookTable::new(api, cache.clone(), config.notification_timeout()),
            cache,
        };
        let cmd = app.fetch_books();
        (app, cmd)
    }

    fn fetch_books(&mut self) -> Command<Message> {
        if self.state.fetching {
            return Command::none();
        }
        self.state.fetching = true;
        let cache = self.cache.clone();
        Command::perform(
            async move { cache.fetch(BOOKS_QUERY).await.map_err(|e| e.to_string()) },
            Message::BooksLoaded,
        )
    }

    fn refetch_if_stale(&mut self) -> Command<Message> {
        if self.cache.is_stale(BOOKS_QUERY) {
            self.fetch_books()
        } else {
            Command::none()
        }
    }

    fn navigate(&mut self, route: AppState) {
        info!("[APP] navigating to {}", route.path());
        self.state.app_state = route;
    }
}

impl Application for BooksApp {
    type Message = Message;
    type Theme = Theme;
    type Executor = iced::executor::Default;
    type Flags = ClientConfig;

    fn new(config: ClientConfig) -> (Self, Command<Message>) {
        let api: Arc<dyn BooksApi> = Arc::new(BooksService::new(config.address()));
        let cache: Arc<dyn QueryCache> = Arc::new(QueryClient::new(api.clone()));
        info!("[APP] books server at {}", config.address());
        Self::with_services(api, cache, &config)
    }

    fn title(&self) -> String {
        "Library - Books".to_string()
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        match message {
            Message::BooksLoaded(result) => {
                self.state.fetching = false;
                if self.state.app_state == AppState::Loading {
                    self.state.app_state = AppState::Books;
                }
                match result {
                    Ok(books) => {
                        info!("[APP] loaded {} books", books.len());
                        self.state.books = books;
                        self.state.load_error = None;
                        // invalidated while this fetch was running
                        self.refetch_if_stale()
                    }
                    Err(e) => {
                        error!("[APP] loading books failed: {}", e);
                        self.state.load_error = Some(e);
                        Command::none()
                    }
                }
            }
            Message::RetryLoad => {
                self.cache.invalidate(BOOKS_QUERY);
                self.fetch_books()
            }
            Message::Navigate(route) => {
                self.navigate(route);
                Command::none()
            }
            Message::Table(TableMessage::OpenBook(id)) => {
                self.navigate(AppState::ManageBook(id));
                Command::none()
            }
            Message::Table(msg) => {
                let table_cmd = self.table.update(msg).map(Message::Table);
                Command::batch(vec![table_cmd, self.refetch_if_stale()])
            }
        }
    }

    fn view(&self) -> Element<Message> {
        let content: Element<Message> = match &self.state.app_state {
            AppState::Loading => Text::new("Loading books...").size(16).style(TEXT_SECONDARY).into(),
            AppState::Books => {
                let mut column = Column::new().spacing(16);
                if let Some(e) = &self.state.load_error {
                    column = column.push(
                        Row::new()
                            .spacing(12)
                            .align_items(Alignment::Center)
                            .push(Text::new(format!("Could not load books: {}", e)).style(ERROR_COLOR))
                            .push(
                                Button::new(Text::new("Retry").size(14))
                                    .style(iced::theme::Button::Secondary)
                                    .on_press(Message::RetryLoad),
                            ),
                    );
                }
                column
                    .push(self.table.view(&self.state.books).map(Message::Table))
                    .into()
            }
            AppState::ManageBook(id) => manage_book::view(*id, self.state.find_book(*id)),
        };

        Container::new(content).padding(24).width(Length::Fill).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::services::testing::MockBooksApi;
    use crate::common::models::Book;

    /// App whose initial fetch has reached the cache but not yet reported back.
    async fn app_with(books: Vec<Book>) -> (Arc<dyn QueryCache>, BooksApp) {
        let api: Arc<dyn BooksApi> = Arc::new(MockBooksApi::with_books(books));
        let cache: Arc<dyn QueryCache> = Arc::new(QueryClient::new(api.clone()));
        let (app, _) = BooksApp::with_services(api, cache.clone(), &ClientConfig::default());
        cache.fetch(BOOKS_QUERY).await.unwrap();
        (cache, app)
    }

    async fn app() -> (Arc<dyn QueryCache>, BooksApp) {
        app_with(vec![Book::new(1, "Alpha", "Math")]).await
    }

    #[tokio::test]
    async fn starts_loading_with_fetch_in_flight() {
        let (_, app) = app().await;
        assert_eq!(app.state.app_state, AppState::Loading);
        assert!(app.state.fetching);
    }

    #[tokio::test]
    async fn loaded_books_show_the_list() {
        let (_, mut app) = app().await;
        let _ = app.update(Message::BooksLoaded(Ok(vec![Book::new(1, "Alpha", "Math")])));

        assert_eq!(app.state.app_state, AppState::Books);
        assert!(!app.state.fetching);
        assert_eq!(app.state.books.len(), 1);
    }

    #[tokio::test]
    async fn failed_load_keeps_previous_books() {
        let (_, mut app) = app().await;
        let _ = app.update(Message::BooksLoaded(Ok(vec![Book::new(1, "Alpha", "Math")])));
        let _ = app.update(Message::BooksLoaded(Err("connection refused".to_string())));

        assert_eq!(app.state.books.len(), 1);
        assert_eq!(app.state.load_error.as_deref(), Some("connection refused"));
    }

    #[tokio::test]
    async fn title_link_opens_management_view() {
        let (_, mut app) = app().await;
        let _ = app.update(Message::Table(TableMessage::OpenBook(1)));
        assert_eq!(app.state.app_state, AppState::ManageBook(1));
        assert_eq!(app.state.app_state.path(), "/manage-book/1");

        let _ = app.update(Message::Navigate(AppState::Books));
        assert_eq!(app.state.app_state, AppState::Books);
    }

    #[tokio::test]
    async fn successful_delete_triggers_refetch_of_stale_list() {
        let (cache, mut app) = app().await;
        let _ = app.update(Message::BooksLoaded(Ok(vec![Book::new(1, "Alpha", "Math")])));

        // the mutation invalidates before reporting back
        cache.invalidate(BOOKS_QUERY);
        let _ = app.update(Message::Table(TableMessage::DeleteFinished { id: 1, result: Ok(()) }));

        assert!(app.state.fetching);
    }

    #[tokio::test]
    async fn delete_during_running_fetch_refetches_when_it_lands() {
        let before = vec![Book::new(1, "Alpha", "Math"), Book::new(2, "Beta", "History")];
        let (cache, mut app) = app_with(before.clone()).await;
        assert!(app.state.fetching);

        cache.invalidate(BOOKS_QUERY);
        let _ = app.update(Message::Table(TableMessage::DeleteFinished { id: 2, result: Ok(()) }));
        let _ = app.update(Message::Table(TableMessage::DismissNotification));

        // the running fetch returns the list from before the delete
        let _ = app.update(Message::BooksLoaded(Ok(before)));
        assert_eq!(app.state.books.len(), 2);
        assert!(cache.is_stale(BOOKS_QUERY));
        assert!(app.state.fetching);
    }

    #[tokio::test]
    async fn failed_load_does_not_refetch_in_a_loop() {
        let (cache, mut app) = app().await;
        cache.invalidate(BOOKS_QUERY);
        let _ = app.update(Message::BooksLoaded(Err("connection refused".to_string())));

        assert!(!app.state.fetching);
    }
}
