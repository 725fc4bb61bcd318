use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArchiveIndexError {
    #[error("config file invalid or unreadable: {0}")]
    InvalidConfig(String),
    #[error("invalid output name `{0}`: expected a bare file name")]
    InvalidOutputName(String),
    #[error("page template failed to render: {0}")]
    Template(#[from] minijinja::Error),
}
