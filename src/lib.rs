pub mod cli;
pub mod io;
pub mod manager;
pub mod model;
pub mod remote;
pub mod tui;
pub mod util;
