use std::path::PathBuf;

/// Failures of the layers around the generator. Generation itself cannot fail.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse JSON source file ({}): {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config at {path}: {message}")]
    Config { path: String, message: String },
    #[error("JSON pointer {pointer} matched nothing in {}", path.display())]
    Pointer { pointer: String, path: PathBuf },
    #[error("class {class} is generated from both {} and {}; pass inputs separately or rename the root", first.display(), second.display())]
    ClassClash { class: String, first: PathBuf, second: PathBuf },
    #[error("classes {first} and {second} would both be written to {}", path.display())]
    FileClash { first: String, second: String, path: PathBuf },
    #[error("jq filter failed: {0}")]
    Jq(String),
    #[error("bad input pattern: {0}")]
    Pattern(String),
}
