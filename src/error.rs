use thiserror::Error;

#[derive(Error, Debug)]
pub enum BrowseError {
    #[error("no column index for {column}")]
    NoColumn { column: String },

    #[error("no resource selected")]
    NoSelection,

    #[error("no accessor registered for \"{gvr}\"")]
    NoAccessor { gvr: String },

    #[error("expecting a pausable resource for \"{gvr}\"")]
    NotPausable { gvr: String },

    #[error("failed to identify action; must be 'Pause' or 'Resume' but is: '{0}'")]
    UnknownAction(String),

    #[error("failed to {action}: {source}")]
    ActionFailed {
        action: String,
        #[source]
        source: Box<BrowseError>,
    },

    #[error("{gvr} \"{path}\" not found")]
    NotFound { gvr: String, path: String },

    #[error("invalid resource path '{0}', expected <namespace>/<name>")]
    InvalidPath(String),

    #[error("context deadline exceeded")]
    Timeout,

    #[error("context canceled")]
    Cancelled,

    #[error("{applied} of {total} resources updated")]
    Incomplete { applied: usize, total: usize },

    #[error("{0} is disabled in read-only mode")]
    ReadOnly(String),

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Store error: {0}")]
    Store(String),
}

impl BrowseError {
    /// Wrap an accessor failure with the action that triggered it.
    pub fn action_failed(action: impl Into<String>, source: BrowseError) -> Self {
        BrowseError::ActionFailed {
            action: action.into(),
            source: Box::new(source),
        }
    }

    /// Returns a user-friendly suggestion for how to fix the error.
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            BrowseError::NoAccessor { .. } => {
                Some("Check the resource kind with `kbrowse --kind <resource> list`.")
            }
            BrowseError::NotPausable { .. } => {
                Some("Only deployments can be paused. Switch kinds with --kind deployments.")
            }
            BrowseError::NotFound { .. } => {
                Some("Run `kbrowse list` to see the available resources.")
            }
            BrowseError::InvalidPath(_) => Some("Use the form namespace/name, e.g. default/web."),
            BrowseError::Timeout => Some("Raise the call timeout with --call-timeout <secs>."),
            BrowseError::ReadOnly(_) => {
                Some("Unset read_only in config.toml or drop the --read-only flag.")
            }
            BrowseError::ActionFailed { source, .. } => source.suggestion(),
            BrowseError::Store(_) => Some("Check the store file is valid JSON."),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for BrowseError {
    fn from(err: serde_json::Error) -> Self {
        BrowseError::Store(err.to_string())
    }
}

impl From<toml::de::Error> for BrowseError {
    fn from(err: toml::de::Error) -> Self {
        BrowseError::Config(format!("Invalid config.toml: {}", err))
    }
}
