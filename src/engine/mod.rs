//! Animation update loop and subject handling.

pub(crate) mod frame;
pub(crate) mod subject;
pub(crate) mod swarm;
