use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProjectionError {
    #[error("Unknown risk profile '{name}'")]
    UnknownProfile { name: String },
}

pub type ProjectionResult<T> = Result<T, ProjectionError>;
