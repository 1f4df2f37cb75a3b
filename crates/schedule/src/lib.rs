mod command;
mod query;
mod template;

pub use command::*;
pub use query::*;
pub use template::*;
