//! The `upload`, `delete` and `list` commands.
//!
//! Each command resolves at most one release and runs its network calls one
//! after the other; the first fatal error ends the command.

mod delete;
mod list;
mod upload;

pub use delete::delete;
pub use list::list;
pub use upload::upload;
