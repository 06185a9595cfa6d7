//! Submission as seen by the sentiment pipeline.

use serde_json::Value;

use crate::domain::foundation::{FormId, SubmissionId, TenantId};

/// A form submission awaiting sentiment analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub id: SubmissionId,
    pub tenant_id: TenantId,
    pub form_id: FormId,
    /// Raw answer map, keyed by question name.
    pub data: Value,
    /// Form definition, used only for question titles.
    pub form_definition: Option<Value>,
}

impl Submission {
    pub fn new(tenant_id: TenantId, form_id: FormId, data: Value) -> Self {
        Self {
            id: SubmissionId::new(),
            tenant_id,
            form_id,
            data,
            form_definition: None,
        }
    }

    pub fn with_form_definition(mut self, definition: Value) -> Self {
        self.form_definition = Some(definition);
        self
    }
}
