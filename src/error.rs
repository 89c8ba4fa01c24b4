// One error type for the pad and its sample app.
// Every variant states *where* things went wrong.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Window init error: {0}")]
    WindowInit(String), // Creating the window failed

    #[error("Window update error: {0}")]
    WindowUpdate(String), // Updating the window buffer failed

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(String), // TOML was not a valid PadConfig

    #[error("Invalid config: {0}")]
    InvalidConfig(String), // Parsed, but values make no sense (e.g. zero height)

    /// A saved segment entry did not hold exactly four numbers.
    #[error("Malformed saved state: entry {index} has {len} values, expected 4")]
    MalformedState { index: usize, len: usize },

    /// A saved segment entry held NaN or an infinity.
    #[error("Malformed saved state: entry {index} holds a non-finite coordinate")]
    NonFiniteState { index: usize },

    #[error("State encoding error: {0}")]
    StateEncoding(String),

    #[error("Image encode error: {0}")]
    ImageEncode(String),
}

pub type Result<T> = std::result::Result<T, Error>;
