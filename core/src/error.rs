use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("No content category can supply {requested} distinct symbols, largest has {available}")]
    NotEnoughContent { requested: usize, available: usize },
    #[error("Requested zero symbols")]
    EmptyContentRequest,
    #[error("Content source repeats a symbol")]
    DuplicateContent,
}

pub type Result<T> = core::result::Result<T, GameError>;
