use serde::Serialize;

#[derive(Serialize)]
pub(crate) struct Message {
    pub(crate) message: String,
}

impl Message {
    pub(crate) fn new(recipient: &str) -> Self {
        Self {
            message: format!("Hello {} your message will be send", recipient),
        }
    }
}

#[derive(Serialize)]
pub(crate) struct IssuedToken {
    pub(crate) token: String,
    pub(crate) expires_in: u64,
}

impl IssuedToken {
    pub(crate) fn new(token: String, expires_in: u64) -> Self {
        Self { token, expires_in }
    }
}

#[derive(Serialize)]
pub(crate) struct Health {
    pub(crate) status: &'static str,
}
