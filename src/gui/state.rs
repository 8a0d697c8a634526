use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Context;
use iced::widget::image::Handle;
use image::DynamicImage;

use crate::annotation::AnnotationSession;

/// Decoded image ready to be shown on the canvas
#[derive(Clone)]
pub struct LoadedImage {
    pub path: PathBuf,
    pub image: DynamicImage,
    pub handle: Handle,
}

impl LoadedImage {
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let image = image::open(path)
            .with_context(|| format!("Failed to open image: {}", path.display()))?;
        let rgba = image.to_rgba8();
        let handle = Handle::from_rgba(rgba.width(), rgba.height(), rgba.into_raw());
        Ok(Self {
            path: path.to_path_buf(),
            image,
            handle,
        })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

impl fmt::Debug for LoadedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadedImage")
            .field("path", &self.path)
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

/// Decode off the UI thread
pub async fn load_image(path: PathBuf) -> Result<LoadedImage, String> {
    tokio::task::spawn_blocking(move || LoadedImage::open(&path))
        .await
        .map_err(|e| e.to_string())?
        .map_err(|e| format!("{:#}", e))
}

/// What happens once the open dialog is dismissed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AfterDialog {
    Nothing,
    PromptNext,
}

#[derive(Debug)]
pub struct AppState {
    pub image: Option<LoadedImage>,
    pub session: AnnotationSession,
    /// A modal notification is showing; pointer input is ignored until it closes
    pub dialog: Option<AfterDialog>,
    pub finished: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            image: None,
            session: AnnotationSession::new(),
            dialog: None,
            finished: false,
        }
    }
}

impl AppState {
    /// Replace the image and start a fresh session for it
    pub fn start(&mut self, image: LoadedImage) {
        self.image = Some(image);
        self.session = AnnotationSession::new();
        self.finished = false;
    }

    pub fn accepts_pointer(&self) -> bool {
        self.image.is_some() && self.dialog.is_none() && !self.session.is_complete()
    }
}
