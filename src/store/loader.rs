use super::Reducer;

/// Blocking loading indicator shared by every page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoaderState {
    pub loading: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoaderAction {
    Show(String),
    Hide,
}

impl LoaderAction {
    pub fn show(message: impl Into<String>) -> Self {
        LoaderAction::Show(message.into())
    }
}

impl Reducer for LoaderState {
    type Action = LoaderAction;

    fn reduce(&self, action: LoaderAction) -> Self {
        match action {
            LoaderAction::Show(message) => LoaderState {
                loading: true,
                message,
            },
            LoaderAction::Hide => LoaderState::default(),
        }
    }
}
