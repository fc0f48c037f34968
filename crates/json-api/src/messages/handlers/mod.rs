//! Message Handlers

pub(crate) mod index;
