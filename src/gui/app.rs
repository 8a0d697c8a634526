use std::path::PathBuf;

use iced::widget::{Image, button, canvas, column, container, row, stack, text};
use iced::{Element, Length, Task};
use rfd::{AsyncFileDialog, AsyncMessageDialog, MessageButtons, MessageLevel};

use crate::annotation::COMPLETION_MESSAGE;
use crate::annotation::export::AnnotationRecord;
use crate::annotation::preview::save_preview;
use crate::gui::widgets::BoxCanvas;
use crate::gui::{AfterDialog, AppState, Message, PointerEvent, load_image};

const SELECTION_TITLE: &str = "Digit Selection";

/// Startup options from the command line
#[derive(Debug, Clone, Default)]
pub struct AnnotatorOptions {
    /// Image to open right away instead of waiting for File > Open Image
    pub image: Option<PathBuf>,
    /// Where to save the image with the boxes drawn on it
    pub preview: Option<PathBuf>,
    /// Where to save the boxes as JSON
    pub json: Option<PathBuf>,
}

pub struct AnnotatorApp {
    state: AppState,
    options: AnnotatorOptions,
}

impl AnnotatorApp {
    pub fn new(options: AnnotatorOptions) -> (Self, Task<Message>) {
        let task = match options.image.clone() {
            Some(path) => Task::done(Message::ImagePicked(Some(path))),
            None => Task::none(),
        };
        (
            Self {
                state: AppState::default(),
                options,
            },
            task,
        )
    }

    pub fn title(&self) -> String {
        match &self.state.image {
            Some(image) => format!("Image Box Tool - {}", image.path.display()),
            None => "Image Box Tool".to_string(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::OpenImage => {
                if self.state.dialog.is_some() {
                    return Task::none();
                }
                Task::perform(
                    AsyncFileDialog::new()
                        .set_title("Open Image")
                        .add_filter("Image Files", &["png", "jpg", "jpeg"])
                        .pick_file(),
                    |handle| Message::ImagePicked(handle.map(|data| data.path().to_path_buf())),
                )
            }
            // Cancelled picker: nothing to do
            Message::ImagePicked(None) => Task::none(),
            Message::ImagePicked(Some(path)) => {
                tracing::info!(path = %path.display(), "loading image");
                Task::perform(load_image(path), Message::ImageLoaded)
            }
            Message::ImageLoaded(Ok(image)) => {
                tracing::debug!(?image, "image loaded");
                self.state.start(image);
                self.prompt()
            }
            Message::ImageLoaded(Err(error)) => {
                tracing::error!(%error, "failed to load image");
                self.show_dialog(MessageLevel::Error, "Open Image", error, AfterDialog::Nothing)
            }
            Message::Pointer(event) => self.on_pointer(event),
            Message::DialogClosed => match self.state.dialog.take() {
                Some(AfterDialog::PromptNext) => self.prompt(),
                _ => Task::none(),
            },
        }
    }

    fn on_pointer(&mut self, event: PointerEvent) -> Task<Message> {
        if !self.state.accepts_pointer() {
            return Task::none();
        }
        let session = &mut self.state.session;
        match event {
            PointerEvent::Pressed(x, y) => {
                session.press(x, y);
                Task::none()
            }
            PointerEvent::Moved(x, y) => {
                session.drag(x, y);
                Task::none()
            }
            PointerEvent::Released(x, y) => match session.release(x, y) {
                Some(commit) => self.show_dialog(
                    MessageLevel::Info,
                    "Box Selection",
                    commit.confirmation(),
                    AfterDialog::PromptNext,
                ),
                None => Task::none(),
            },
        }
    }

    /// Ask for the next label, or wrap up once every label has a box
    fn prompt(&mut self) -> Task<Message> {
        match self.state.session.current_label() {
            Some(label) => self.show_dialog(
                MessageLevel::Info,
                SELECTION_TITLE,
                label.prompt(),
                AfterDialog::Nothing,
            ),
            None => {
                self.finish();
                self.show_dialog(
                    MessageLevel::Info,
                    SELECTION_TITLE,
                    COMPLETION_MESSAGE.to_string(),
                    AfterDialog::Nothing,
                )
            }
        }
    }

    fn finish(&mut self) {
        if self.state.finished {
            return;
        }
        self.state.finished = true;
        print!("{}", self.state.session.summary());

        let Some(image) = &self.state.image else {
            return;
        };
        if let Some(path) = &self.options.preview {
            if let Err(e) = save_preview(&image.image, self.state.session.boxes(), path) {
                tracing::error!("{:#}", e);
            }
        }
        if let Some(path) = &self.options.json {
            let record = AnnotationRecord::from_session(&image.path, &self.state.session);
            if let Err(e) = record.save(path) {
                tracing::error!("{:#}", e);
            }
        }
    }

    fn show_dialog(
        &mut self,
        level: MessageLevel,
        title: &str,
        description: String,
        after: AfterDialog,
    ) -> Task<Message> {
        self.state.dialog = Some(after);
        Task::perform(
            AsyncMessageDialog::new()
                .set_level(level)
                .set_title(title)
                .set_description(description)
                .set_buttons(MessageButtons::Ok)
                .show(),
            |_| Message::DialogClosed,
        )
    }

    fn status(&self) -> String {
        if self.state.image.is_none() {
            return "Open an image to begin.".to_string();
        }
        match self.state.session.current_label() {
            Some(label) => format!("Draw the box for the {} digit.", label),
            None => "All digits selected.".to_string(),
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let toolbar = row![
            button("Open Image").on_press(Message::OpenImage),
            text(self.status()),
        ]
        .spacing(20)
        .padding(10);

        let surface: Element<'_, Message> = match &self.state.image {
            Some(image) => {
                let width = Length::Fixed(image.width() as f32);
                let height = Length::Fixed(image.height() as f32);
                let overlay = canvas(BoxCanvas {
                    committed: self.state.session.boxes(),
                    active: self.state.session.in_progress(),
                    enabled: self.state.accepts_pointer(),
                })
                .width(width)
                .height(height);

                stack![
                    Image::new(image.handle.clone()).width(width).height(height),
                    overlay,
                ]
                .into()
            }
            None => container(text("No image loaded"))
                .center_x(Length::Fill)
                .center_y(Length::Fill)
                .into(),
        };

        column![toolbar, surface].into()
    }
}
