//! Test-connection command handler

use std::sync::Arc;

use crate::cli::parser::ConnectionArgs;
use crate::services::NotifierDescriptor;
use crate::services::notifications::ConnectionCheck;

pub struct TestConnectionCommandHandler {
    descriptor: Arc<NotifierDescriptor>,
}

impl TestConnectionCommandHandler {
    pub fn new(descriptor: Arc<NotifierDescriptor>) -> Self {
        Self { descriptor }
    }

    /// Run the check with the stored configuration overlaid by `args`
    pub async fn execute(&self, args: &ConnectionArgs) -> ConnectionCheck {
        let params = args
            .to_form()
            .connection_params(&self.descriptor.snapshot());
        let check = self.descriptor.test_connection(&params).await;

        match &check {
            Ok(message) => println!("{}", message),
            Err(failure) => eprintln!("{}", failure),
        }
        check
    }
}
