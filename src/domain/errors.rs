/// Errors of the overlay glue. The sonar core itself never fails.
#[derive(Debug, Clone, PartialEq)]
pub enum FinderError {
    Config(String),
    Canvas(String),
    Bridge(String),
}

impl std::fmt::Display for FinderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FinderError::Config(msg) => write!(f, "Config Error: {}", msg),
            FinderError::Canvas(msg) => write!(f, "Canvas Error: {}", msg),
            FinderError::Bridge(msg) => write!(f, "Bridge Error: {}", msg),
        }
    }
}

impl std::error::Error for FinderError {}

pub type FinderResult<T> = Result<T, FinderError>;
