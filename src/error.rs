use std::{io, path::PathBuf};

use plotters::drawing::DrawingAreaErrorKind;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed timings table: {0}")]
    Csv(#[from] csv::Error),
    #[error("missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error("failed to draw chart: {0}")]
    Render(String),
    #[error("failed to encode image: {0}")]
    Encode(#[from] png::EncodingError),
    #[error("failed to persist chart: {0}")]
    Persist(#[from] tempfile::PersistError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

// plotters errors are generic over the backend, so they are flattened to text.
impl<E> From<DrawingAreaErrorKind<E>> for Error
where
    E: std::error::Error + Send + Sync,
{
    fn from(err: DrawingAreaErrorKind<E>) -> Error {
        Error::Render(err.to_string())
    }
}
