//! Command handlers for CLI operations
//!
//! Each handler wraps the shared `NotifierDescriptor`, keeping command
//! execution apart from parsing.

pub mod configure;
pub mod publish;
pub mod show;
pub mod test_connection;

pub use configure::ConfigureCommandHandler;
pub use publish::PublishCommandHandler;
pub use show::ShowCommandHandler;
pub use test_connection::TestConnectionCommandHandler;
