use serde::Deserialize;

use crate::core::error::Error;
use crate::types::token::Payload;

#[derive(Debug, Deserialize)]
pub(crate) struct Message {
    pub(crate) message: String,
    pub(crate) to: String,
    pub(crate) from: String,
    #[serde(rename = "timeToLifeSec")]
    pub(crate) time_to_life_sec: i64,
}

impl Message {
    pub(crate) fn validate(&self) -> Result<(), Error> {
        if self.message.is_empty() {
            return Err(Error::Validation("message must not be empty"));
        }

        if self.to.is_empty() {
            return Err(Error::Validation("to must not be empty"));
        }

        if self.from.is_empty() {
            return Err(Error::Validation("from must not be empty"));
        }

        if self.time_to_life_sec <= 0 {
            return Err(Error::Validation("timeToLifeSec must be greater than zero"));
        }

        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct IssueToken {
    #[serde(default)]
    pub(crate) payload: Payload,
}
