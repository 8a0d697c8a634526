mod app;
mod message;
mod state;
mod widgets;

pub use app::{AnnotatorApp, AnnotatorOptions};
pub use message::{Message, PointerEvent};
pub use state::{AfterDialog, AppState, LoadedImage, load_image};

/// Open the annotator window and block until it is closed
pub fn run(options: AnnotatorOptions) -> anyhow::Result<()> {
    iced::application(
        move || AnnotatorApp::new(options.clone()),
        AnnotatorApp::update,
        AnnotatorApp::view,
    )
    .title(AnnotatorApp::title)
    .run()
    .map_err(|e| anyhow::anyhow!("Annotator window failed: {}", e))
}
