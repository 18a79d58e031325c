pub mod coordinator;
pub mod executor;
pub mod http;
pub mod notify;
pub mod port;
pub mod run_state;
pub mod template;

pub use coordinator::{SubmissionCoordinator, SubmitAttempt};
pub use executor::{SubmitCompletion, SubmitExecutor, SubmitInvocation};
pub use http::HttpSubmitPort;
pub use notify::{LogNotifier, Notification, NotificationLevel, Notifier, RecordingNotifier};
pub use port::{Ack, DelaySubmitPort, SubmitError, SubmitPort, SubmitRequest};
pub use run_state::SubmitRunState;
