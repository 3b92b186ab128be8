use std::fmt::Display;

use error_stack::{Context, Report};

#[derive(Debug)]
pub enum KernelError {
    Validation,
    NotFound,
    Conflict,
    Timeout,
    Internal,
}

impl Display for KernelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelError::Validation => write!(f, "Invalid input"),
            KernelError::NotFound => write!(f, "Resource not found"),
            KernelError::Conflict => write!(f, "Operation conflicts with current state"),
            KernelError::Timeout => write!(f, "Process timed out"),
            KernelError::Internal => write!(f, "Internal kernel error"),
        }
    }
}

impl Context for KernelError {}

/// A single rejected input field, attached to a [`KernelError::Validation`] report.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: String,
}

impl Display for FieldViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[derive(Debug, Default)]
pub struct Violations(Vec<FieldViolation>);

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldViolation {
            field,
            message: message.into(),
        });
    }

    pub fn check(&mut self, condition: bool, field: &'static str, message: impl Into<String>) {
        if !condition {
            self.push(field, message);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_result(self) -> error_stack::Result<(), KernelError> {
        if self.0.is_empty() {
            return Ok(());
        }
        let mut report = Report::new(KernelError::Validation);
        for violation in self.0 {
            report = report.attach(violation);
        }
        Err(report)
    }
}

/// Collects every [`FieldViolation`] attached to a report, in attachment order.
pub fn field_violations(report: &Report<KernelError>) -> Vec<FieldViolation> {
    let mut found = report
        .frames()
        .filter_map(|frame| frame.downcast_ref::<FieldViolation>())
        .cloned()
        .collect::<Vec<_>>();
    // frames are walked newest first
    found.reverse();
    found
}
