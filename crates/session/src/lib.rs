#![forbid(unsafe_code)]

pub mod channel;
pub mod commands;
pub mod editor;
pub mod output;
pub mod server;
pub mod session;

pub use channel::{ChannelError, LineChannel, MAX_LINE_BYTES};
pub use commands::{Command, CommandError, Flow, dispatch, validate_id};
pub use output::Style;
pub use server::serve;
pub use session::{PROMPT, SessionEnd, run_session};
