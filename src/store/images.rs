use super::Reducer;
use crate::api::Image;
use std::rc::Rc;

/// Current result set and the viewer position within it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageState {
    images: Rc<Vec<Image>>,
    current_view_index: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ImageAction {
    /// Replace the whole list
    SetImages(Vec<Image>),
    /// Open the viewer at an index; out of range indices are ignored
    SetCurrentViewIndex(usize),
    CloseImageView,
    NextImage,
    PreviousImage,
}

impl ImageState {
    pub fn images(&self) -> &[Image] {
        &self.images
    }

    /// Shared handle to the list, for handing to child components cheaply
    pub fn images_rc(&self) -> Rc<Vec<Image>> {
        self.images.clone()
    }

    pub fn current_view_index(&self) -> Option<usize> {
        self.current_view_index
    }

    pub fn is_image_view_open(&self) -> bool {
        self.current_view_index.is_some()
    }

    pub fn current_image(&self) -> Option<&Image> {
        self.current_view_index.and_then(|i| self.images.get(i))
    }
}

impl Reducer for ImageState {
    type Action = ImageAction;

    fn reduce(&self, action: ImageAction) -> Self {
        match action {
            ImageAction::SetImages(images) => {
                // The viewer follows the open image to its new position, or
                // closes if the image is gone
                let current_view_index = self
                    .current_image()
                    .and_then(|open| images.iter().position(|image| image.id == open.id));
                ImageState {
                    images: Rc::new(images),
                    current_view_index,
                }
            }
            ImageAction::SetCurrentViewIndex(index) if index < self.images.len() => ImageState {
                images: self.images.clone(),
                current_view_index: Some(index),
            },
            ImageAction::SetCurrentViewIndex(_) => self.clone(),
            ImageAction::CloseImageView => ImageState {
                images: self.images.clone(),
                current_view_index: None,
            },
            ImageAction::NextImage => self.step(1),
            ImageAction::PreviousImage => self.step(self.images.len().saturating_sub(1)),
        }
    }
}

impl ImageState {
    /// Move the viewer forward by `offset`, wrapping at the end
    fn step(&self, offset: usize) -> Self {
        let len = self.images.len();
        match self.current_view_index {
            Some(index) if len > 0 => ImageState {
                images: self.images.clone(),
                current_view_index: Some((index + offset) % len),
            },
            _ => self.clone(),
        }
    }
}
