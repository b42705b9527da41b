//! Problem importer boundary.

use crate::error::BoxError;

/// Builds the initial problem of a session from a dataset reference.
///
/// Any `Fn(&str) -> Result<P, E>` closure is an importer.
pub trait Importer<P>: Send + Sync + 'static {
    fn import(&self, dataset: &str) -> Result<P, BoxError>;
}

impl<P, E, F> Importer<P> for F
where
    F: Fn(&str) -> Result<P, E> + Send + Sync + 'static,
    E: Into<BoxError>,
{
    fn import(&self, dataset: &str) -> Result<P, BoxError> {
        self(dataset).map_err(Into::into)
    }
}
