pub(crate) mod fallback;
pub(crate) mod health;
pub(crate) mod message;
pub(crate) mod router;
pub(crate) mod token;
