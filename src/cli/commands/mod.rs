mod init_config;
mod is_saved;
mod record_search;
mod remove;
mod save;
mod saved;
mod trending;

pub use init_config::cmd_init_config;
pub use is_saved::cmd_is_saved;
pub use record_search::cmd_record_search;
pub use remove::cmd_remove;
pub use save::{cmd_save, details_from_args};
pub use saved::cmd_saved;
pub use trending::cmd_trending;
