mod as_value;
mod connection;
mod driver;
mod format;
mod report;
mod result;
mod rewrite;
mod statement;
mod trace;
mod util;
mod value;

pub use ::anyhow::Context;
pub use as_value::*;
pub use connection::*;
pub use driver::*;
pub use format::*;
pub use report::*;
pub use result::*;
pub use rewrite::*;
pub use statement::*;
pub use trace::*;
pub use util::*;
pub use value::*;

pub type Result<T> = anyhow::Result<T>;
pub type Error = anyhow::Error;
