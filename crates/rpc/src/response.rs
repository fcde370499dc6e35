//! Operation results and their response payloads

use userledger_core::User;

/// Result of one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Success without a value; empty payload
    Unit,
    Bool(bool),
    User(User),
    Users(Vec<User>),
}

impl Response {
    /// Serialize into the JSON payload handed back to the caller
    pub fn payload(&self) -> Result<Vec<u8>, serde_json::Error> {
        match self {
            Response::Unit => Ok(Vec::new()),
            Response::Bool(value) => serde_json::to_vec(value),
            Response::User(user) => serde_json::to_vec(user),
            Response::Users(users) => serde_json::to_vec(users),
        }
    }

    /// Payload rendered as text, for display
    pub fn payload_string(&self) -> Result<String, serde_json::Error> {
        Ok(String::from_utf8_lossy(&self.payload()?).into_owned())
    }
}
