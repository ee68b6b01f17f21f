mod dispatch;
mod registry;

pub(crate) use dispatch::fan_out;
pub(crate) use registry::{Entry, Registry};
