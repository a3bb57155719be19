pub(crate) mod error;
pub(crate) mod responses;
pub(crate) mod search;

pub(crate) use error::ApiError;
