use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GitlocalError>;

#[derive(Error, Debug)]
pub enum GitlocalError {
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Registry error at {}: {source}", path.display())]
    Registry {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Email file error at {}: {source}", path.display())]
    EmailFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to open repository {}: {source}", path.display())]
    RepoOpen {
        path: PathBuf,
        #[source]
        source: Box<gix::open::Error>,
    },
    #[error("Failed to resolve HEAD of {}: {source}", path.display())]
    HeadResolution {
        path: PathBuf,
        #[source]
        source: Box<GitlocalError>,
    },
    #[error("Failed to walk commit log of {}: {source}", path.display())]
    LogIteration {
        path: PathBuf,
        #[source]
        source: Box<GitlocalError>,
    },
    #[error("Config error: {0}")]
    Config(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Reference find error: {0}")]
    RefFind(#[from] Box<gix::reference::find::existing::Error>),
    #[error("Head peel error: {0}")]
    HeadPeel(#[from] Box<gix::head::peel::to_commit::Error>),
    #[error("Object find with conversion error: {0}")]
    ObjectFindConv(#[from] Box<gix::object::find::existing::with_conversion::Error>),
    #[error("Object decode error: {0}")]
    ObjectDecode(#[from] Box<gix::objs::decode::Error>),
    #[error("Signature time error: {0}")]
    SignatureTime(#[from] Box<gix::date::parse::Error>),
}

// Manual From implementations for unboxed to boxed conversions
impl From<gix::reference::find::existing::Error> for GitlocalError {
    fn from(err: gix::reference::find::existing::Error) -> Self {
        GitlocalError::RefFind(Box::new(err))
    }
}

impl From<gix::head::peel::to_commit::Error> for GitlocalError {
    fn from(err: gix::head::peel::to_commit::Error) -> Self {
        GitlocalError::HeadPeel(Box::new(err))
    }
}

impl From<gix::object::find::existing::with_conversion::Error> for GitlocalError {
    fn from(err: gix::object::find::existing::with_conversion::Error) -> Self {
        GitlocalError::ObjectFindConv(Box::new(err))
    }
}

impl From<gix::objs::decode::Error> for GitlocalError {
    fn from(err: gix::objs::decode::Error) -> Self {
        GitlocalError::ObjectDecode(Box::new(err))
    }
}

impl From<gix::date::parse::Error> for GitlocalError {
    fn from(err: gix::date::parse::Error) -> Self {
        GitlocalError::SignatureTime(Box::new(err))
    }
}
