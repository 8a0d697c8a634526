use std::path::PathBuf;

use crate::gui::state::LoadedImage;

/// Pointer activity on the drawing surface, in image pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Pressed(i32, i32),
    Moved(i32, i32),
    Released(i32, i32),
}

#[derive(Debug, Clone)]
pub enum Message {
    OpenImage,
    ImagePicked(Option<PathBuf>),
    ImageLoaded(Result<LoadedImage, String>),
    Pointer(PointerEvent),
    DialogClosed,
}
