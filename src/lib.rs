pub mod config;
pub mod core;
pub mod donation;
pub mod forms;
pub mod input;
pub mod submit;
pub mod visibility;

pub use core::field;
pub use core::form_event;
pub use core::form_state;
pub use core::schema;
pub use core::validation;
pub use core::value;

pub use input::validators;

pub use config::Config;
pub use core::{FieldErrors, FieldId, FormSchema, FormState, validate};
pub use submit::{SubmissionCoordinator, SubmitAttempt, SubmitPort};
