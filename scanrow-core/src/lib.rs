mod accessors;
mod as_value;
mod connection;
mod cursor;
mod geometry;
mod mapper;
mod record;
mod row;
mod session;
mod timestamp;
mod util;
mod value;

pub use ::anyhow::Context;
pub use accessors::*;
pub use as_value::*;
pub use connection::*;
pub use cursor::*;
pub use geometry::*;
pub use mapper::*;
pub use record::*;
pub use row::*;
pub use session::*;
pub use timestamp::*;
pub use value::*;

pub type Result<T> = anyhow::Result<T>;
pub type Error = anyhow::Error;
