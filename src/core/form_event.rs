use crate::core::FieldId;

#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    ValueChanged { id: FieldId },
    ErrorCleared { id: FieldId },
    SubmitSucceeded { run_id: u64 },
    SubmitFailed { run_id: u64, error: String },
}
