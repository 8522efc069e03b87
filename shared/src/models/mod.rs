//! Domain models (公会数据模型)
//!
//! Each entity follows the same pattern as the API expects it:
//! the row type, a `XxxCreate` payload and a `XxxUpdate` payload
//! (all optional fields, `COALESCE` semantics on update).

mod admin;
mod assessment;
mod blackpoint;
mod course;
mod leave;
mod member;
mod progress;
mod quit;
mod reminder;
mod retention;
mod settings;
mod video;

pub use admin::*;
pub use assessment::*;
pub use blackpoint::*;
pub use course::*;
pub use leave::*;
pub use member::*;
pub use progress::*;
pub use quit::*;
pub use reminder::*;
pub use retention::*;
pub use settings::*;
pub use video::*;
