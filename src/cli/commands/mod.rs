mod clear_cache;
mod register;
mod saved;

pub use clear_cache::cmd_clear_cache;
pub use register::cmd_register;
pub use saved::cmd_saved;
