use thiserror::Error;

/// Outcome kinds of a single remote generation call.
///
/// `Transport` covers everything up to and including decoding the service
/// envelope. The remaining variants mean the call succeeded but what came
/// back could not be turned into the requested entity.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("transport error: {0}")] Transport(String),
    #[error("no {0} in model response")] EmptyPayload(&'static str),
    #[error("image payload is not valid base64: {0}")] InvalidImage(String),
    #[error("model returned malformed JSON: {reason}")] MalformedJson { reason: String, raw: String },
    #[error("model JSON does not match expected shape: {0}")] SchemaMismatch(String),
}

impl GenerationError {
    pub fn is_transport(&self) -> bool {
        matches!(self, GenerationError::Transport(_))
    }

    pub fn is_payload(&self) -> bool {
        !self.is_transport()
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(e: reqwest::Error) -> Self {
        GenerationError::Transport(e.to_string())
    }
}

#[derive(Error, Debug)]
pub enum ViewError {
    #[error("{0}")] Validation(String),
    #[error("a generation call is already in flight")] Busy,
    #[error(transparent)] Generation(#[from] GenerationError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("GEMINI_API_KEY (or API_KEY) is not set in config or environment")] MissingCredential,
    #[error("reading config: {0}")] Read(#[from] std::io::Error),
    #[error("parsing config: {0}")] Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_and_payload_are_disjoint() {
        let t = GenerationError::Transport("connection reset".into());
        assert!(t.is_transport());
        assert!(!t.is_payload());

        let kinds = [
            GenerationError::EmptyPayload("image"),
            GenerationError::InvalidImage("bad byte".into()),
            GenerationError::MalformedJson { reason: "eof".into(), raw: String::new() },
            GenerationError::SchemaMismatch("missing field `title`".into()),
        ];
        for k in kinds {
            assert!(k.is_payload(), "{k} should be a payload failure");
        }
    }
}
