//! Buffered query results mapped onto plain Rust records.
//!
//! A [`Session`] runs a query, keeps every row in memory and lets the caller
//! read them one at a time through typed getters or all at once with
//! [`Session::unwrap`] into structs deriving [`Record`].
//!
//! ```rust,ignore
//! use scanrow::{Record, Session, params};
//! use scanrow_sqlite::SqliteConnection;
//!
//! #[derive(Default, Record)]
//! struct User {
//!     #[sql("id")]
//!     id: i64,
//!     #[sql("name")]
//!     name: String,
//! }
//!
//! let mut session = Session::<SqliteConnection>::connect("sqlite://:memory:").await?;
//! session.query("SELECT id, name FROM users WHERE id > ?", params![10]).await?;
//! let mut users = Vec::<User>::new();
//! session.unwrap(&mut users, None)?;
//! ```
pub use scanrow_core::*;
pub use scanrow_macros::*;
