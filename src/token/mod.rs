pub(crate) mod admission;
pub(crate) mod issuer;
pub(crate) mod store;
