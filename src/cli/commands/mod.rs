mod command_result;
pub mod extract;
pub mod init;
pub mod lookup;

pub use command_result::*;
