//! Users and sessions

mod errors;
mod handlers;

pub(crate) use handlers::*;
