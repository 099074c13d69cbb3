use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("Serenity error: {0}")]
    Serenity(Box<poise::serenity_prelude::Error>),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    #[error("List {0} does not exist")]
    ListNotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("S3 error: {0}")]
    S3(String),
}

impl From<poise::serenity_prelude::Error> for BotError {
    fn from(err: poise::serenity_prelude::Error) -> Self {
        BotError::Serenity(Box::new(err))
    }
}

impl BotError {
    /// Returns a user-friendly error message suitable for displaying in Discord
    pub fn user_message(&self) -> String {
        match self {
            BotError::Serenity(_) => {
                "Sorry, I'm having trouble communicating with Discord right now. Please try again later.".to_string()
            }
            BotError::Config(_) | BotError::EnvVar(_) => {
                "Sorry, there's a configuration issue on my end. Please contact the bot administrator.".to_string()
            }
            BotError::ListNotFound(name) => {
                format!("List {name} does not exist!")
            }
            BotError::Io(_) | BotError::Json(_) | BotError::S3(_) => {
                "Sorry, I'm having trouble reaching my list storage. Please try again later.".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, BotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_not_found_reply_names_the_list() {
        let err = BotError::ListNotFound("eng".to_string());
        assert_eq!(err.user_message(), "List eng does not exist!");
    }

    #[test]
    fn storage_errors_share_one_friendly_reply() {
        let io = BotError::Io(std::io::Error::other("disk gone"));
        let s3 = BotError::S3("bucket gone".to_string());
        assert_eq!(io.user_message(), s3.user_message());
        assert!(io.user_message().contains("list storage"));
    }

    #[test]
    fn configuration_errors_point_at_the_administrator() {
        let err = BotError::Config("bad decorator".to_string());
        assert!(err.user_message().contains("bot administrator"));
    }
}
