mod expand;
mod resolve;
mod walk;

pub(crate) use expand::{expand_target, target_root};
