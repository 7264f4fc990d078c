use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("state text must be exactly 64 characters, got {0}")]
    StateTextLength(usize),
    #[error("unrecognized character '{0}' in state text")]
    StateTextChar(char),
    #[error("unrecognized character '{0}' in placement field")]
    PlacementChar(char),
    #[error("placement field must describe 8 ranks of 8 files")]
    PlacementShape,
}
