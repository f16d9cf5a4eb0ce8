mod trim_app;
mod trim_app_error;
mod trim_operation;

pub use trim_app::TrimApp;
pub use trim_app_error::TrimAppError;
pub use trim_operation::TrimOperation;
