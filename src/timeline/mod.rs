pub(crate) mod phase;
pub(crate) mod sequencer;
