#[derive(Clone, Debug, PartialEq)]
pub struct LoggingConfig {
    pub directory: String,
}
