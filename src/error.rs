use thiserror::Error;

pub type Result<T> = std::result::Result<T, GrassError>;

#[derive(Error, Debug)]
pub enum GrassError {
    #[error("Invalid color input: {0}")]
    InvalidColorInput(String),
    #[error("Git error: {0}")]
    Git(#[from] Box<gix::open::Error>),
    #[error("Git repository error: {0}")]
    GitRepo(String),
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("Cache error: {0}")]
    Cache(String),
    #[error("Config error: {0}")]
    Config(String),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Object find error: {0}")]
    ObjectFind(#[from] Box<gix::object::find::existing::Error>),
    #[error("Commit error: {0}")]
    Commit(#[from] Box<gix::object::commit::Error>),
    #[error("Reference find error: {0}")]
    RefFind(#[from] Box<gix::reference::find::existing::Error>),
    #[error("Object find with conversion error: {0}")]
    ObjectFindConv(#[from] Box<gix::object::find::existing::with_conversion::Error>),
    #[error("Head peel error: {0}")]
    HeadPeel(#[from] Box<gix::head::peel::to_commit::Error>),
    #[error("Object decode error: {0}")]
    ObjectDecode(#[from] Box<gix::objs::decode::Error>),
    #[error("Git discover error: {0}")]
    GitDiscover(#[from] Box<gix::discover::Error>),
}

impl GrassError {
    pub fn invalid_color(msg: impl Into<String>) -> Self {
        GrassError::InvalidColorInput(msg.into())
    }
}

// gix errors are large; keep them boxed so `Result<T>` stays small.
impl From<gix::open::Error> for GrassError {
    fn from(err: gix::open::Error) -> Self {
        GrassError::Git(Box::new(err))
    }
}

impl From<gix::object::find::existing::Error> for GrassError {
    fn from(err: gix::object::find::existing::Error) -> Self {
        GrassError::ObjectFind(Box::new(err))
    }
}

impl From<gix::object::commit::Error> for GrassError {
    fn from(err: gix::object::commit::Error) -> Self {
        GrassError::Commit(Box::new(err))
    }
}

impl From<gix::reference::find::existing::Error> for GrassError {
    fn from(err: gix::reference::find::existing::Error) -> Self {
        GrassError::RefFind(Box::new(err))
    }
}

impl From<gix::object::find::existing::with_conversion::Error> for GrassError {
    fn from(err: gix::object::find::existing::with_conversion::Error) -> Self {
        GrassError::ObjectFindConv(Box::new(err))
    }
}

impl From<gix::head::peel::to_commit::Error> for GrassError {
    fn from(err: gix::head::peel::to_commit::Error) -> Self {
        GrassError::HeadPeel(Box::new(err))
    }
}

impl From<gix::objs::decode::Error> for GrassError {
    fn from(err: gix::objs::decode::Error) -> Self {
        GrassError::ObjectDecode(Box::new(err))
    }
}

impl From<gix::discover::Error> for GrassError {
    fn from(err: gix::discover::Error) -> Self {
        GrassError::GitDiscover(Box::new(err))
    }
}
