mod canvas;
mod command;
mod query;

pub use canvas::*;
pub use command::*;
pub use query::*;
