//! Core process state shared across the codebase.

mod state;

pub use state::{
    bump_generation, generation, is_shutdown, register_server, setup_shutdown_handler,
};
