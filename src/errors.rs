#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("AI provider error: {0}")]
    Ai(String),

    #[error("malformed model output: {0}")]
    MalformedModelOutput(String),
}
