// Author: Dustin Pilgrim
// License: MIT

pub mod command;
pub mod host;
pub mod run;
pub mod simulate;
