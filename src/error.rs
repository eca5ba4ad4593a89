#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("request to {url} failed: {message}")]
    Request { url: String, message: String },
    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },
    #[error("malformed payload from {url}: {message}")]
    Decode { url: String, message: String },
    #[error("detail task for {name} did not complete: {message}")]
    Task { name: String, message: String },
}

impl FetchError {
    pub fn request(url: &str, err: impl std::fmt::Display) -> Self {
        FetchError::Request {
            url: url.to_string(),
            message: err.to_string(),
        }
    }

    pub fn decode(url: &str, err: impl std::fmt::Display) -> Self {
        FetchError::Decode {
            url: url.to_string(),
            message: err.to_string(),
        }
    }
}
