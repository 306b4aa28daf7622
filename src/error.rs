use std::fmt;

/// Errors that stop the showcase from starting
#[derive(Debug)]
pub enum ShowcaseError {
    /// Neither a container nor a window size could be found to render into
    MissingMountTarget(String),
    /// A channel in the configuration does not cover progress properly
    InvalidChannel(ChannelError),
    /// A tooltip trigger outside of [0,1]
    InvalidTrigger(f32),
    /// The configuration file could not be read
    ConfigRead(std::io::Error),
    /// The configuration file could not be parsed
    ConfigParse(serde_json::Error),
}

impl fmt::Display for ShowcaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShowcaseError::MissingMountTarget(selector) => {
                write!(f, "No mount target found for {selector}")
            }
            ShowcaseError::InvalidChannel(error) => write!(f, "Invalid channel: {error}"),
            ShowcaseError::InvalidTrigger(trigger) => {
                write!(f, "Tooltip trigger {trigger} is outside of [0,1]")
            }
            ShowcaseError::ConfigRead(error) => write!(f, "Unable to read config: {error}"),
            ShowcaseError::ConfigParse(error) => write!(f, "Unable to parse config: {error}"),
        }
    }
}

impl std::error::Error for ShowcaseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShowcaseError::InvalidChannel(error) => Some(error),
            ShowcaseError::ConfigRead(error) => Some(error),
            ShowcaseError::ConfigParse(error) => Some(error),
            _ => None,
        }
    }
}

impl From<ChannelError> for ShowcaseError {
    fn from(error: ChannelError) -> Self {
        ShowcaseError::InvalidChannel(error)
    }
}

impl From<std::io::Error> for ShowcaseError {
    fn from(error: std::io::Error) -> Self {
        ShowcaseError::ConfigRead(error)
    }
}

impl From<serde_json::Error> for ShowcaseError {
    fn from(error: serde_json::Error) -> Self {
        ShowcaseError::ConfigParse(error)
    }
}

/// Ways a breakpoint table can fail to describe a channel
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelError {
    Empty,
    /// Breakpoint with its end before its start
    Reversed { index: usize },
    /// Gap or overlap between consecutive breakpoints
    NotContiguous { index: usize },
    /// First breakpoint does not start at 0 or last does not end at 1
    NotCovering,
}

impl fmt::Display for ChannelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelError::Empty => write!(f, "no breakpoints"),
            ChannelError::Reversed { index } => write!(f, "breakpoint {index} ends before it starts"),
            ChannelError::NotContiguous { index } => {
                write!(f, "breakpoint {index} does not start where the previous one ends")
            }
            ChannelError::NotCovering => write!(f, "breakpoints do not cover [0,1]"),
        }
    }
}

impl std::error::Error for ChannelError {}

/// Why an asset never replaced the placeholder
#[derive(Debug, Clone, PartialEq)]
pub enum LoadError {
    /// The bytes could not be fetched
    Transport(String),
    /// The bytes were fetched but are not a usable asset
    Parse(String),
    /// The transport dropped its end without answering
    Abandoned,
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Transport(message) => write!(f, "transport failed: {message}"),
            LoadError::Parse(message) => write!(f, "parse failed: {message}"),
            LoadError::Abandoned => write!(f, "transport abandoned the load"),
        }
    }
}

impl std::error::Error for LoadError {}
