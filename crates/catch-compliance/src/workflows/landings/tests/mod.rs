pub(crate) mod common;

mod gate;
mod routing;
