use std::fmt;

use enum_dispatch::enum_dispatch;
use thiserror::Error;

pub mod clock;
pub mod entries;
pub mod insights;
pub mod ledger;
pub mod money;
pub mod notification;
pub mod submissions;


pub use clock::{Clock, FixedClock, SystemClock};
pub use entries::{ExpenseCategory, ExpenseEntry, SalesEntry};
pub use insights::{Insights, TodaySummary};
pub use ledger::Ledger;
pub use notification::{Notification, NotificationKind};
pub use submissions::{ExpenseSubmission, QuickExpense, SalesSubmission, Submission, QUICK_EXPENSES};

/// Form fields a submission can be rejected for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    CashSales,
    OnlineSales,
    Category,
    Item,
    Amount,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::CashSales => "cash sales",
            Field::OnlineSales => "online sales",
            Field::Category => "category",
            Field::Item => "item",
            Field::Amount => "amount",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldProblem {
    #[error("is required")]
    Missing,
    #[error("is not a number")]
    NotANumber,
    #[error("must be greater than zero")]
    NotPositive,
    #[error("cannot be negative")]
    Negative,
    #[error("is too large")]
    TooLarge,
    #[error("is not a known category")]
    UnknownCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub problem: FieldProblem,
}

/// Every field a submission failed on. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn new(errors: Vec<FieldError>) -> ValidationError {
        debug_assert!(!errors.is_empty());
        ValidationError { errors }
    }

    pub fn single(field: Field, problem: FieldProblem) -> ValidationError {
        ValidationError::new(vec![FieldError { field, problem }])
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.errors.iter().map(|err| err.field)
    }

    pub fn only_missing(&self) -> bool {
        self.errors.iter().all(|err| err.problem == FieldProblem::Missing)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.only_missing() {
            let fields: Vec<String> = self.fields().map(|field| field.to_string()).collect();
            return write!(f, "Please fill in all required fields: {}", fields.join(", "));
        }

        let problems: Vec<String> = self
            .errors
            .iter()
            .map(|err| format!("{} {}", err.field, err.problem))
            .collect();
        write!(f, "Please check: {}", problems.join(", "))
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("{0}")]
    Validation(#[from] ValidationError),
    #[error("invalid entry: {0}")]
    InvalidEntry(&'static str),
}

#[enum_dispatch]
pub trait ExecutableSubmission {
    /// Validates the submission and, only if it is valid, records it.
    fn execute(&self, ledger: &mut Ledger) -> Result<Notification, LedgerError>;
}
