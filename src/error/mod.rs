mod notifier_error;

pub use notifier_error::{NotifierError, NotifierResult};
