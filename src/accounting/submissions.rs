use enum_dispatch::enum_dispatch;
use rust_decimal::Decimal;

use super::entries::ExpenseCategory;
use super::ledger::Ledger;
use super::{money, ExecutableSubmission, Field, FieldError, FieldProblem, LedgerError, Notification, ValidationError};

/// Raw form input, not yet validated.
#[enum_dispatch(ExecutableSubmission)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    SalesSubmission,
    ExpenseSubmission,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SalesSubmission {
    pub cash_sales: String,
    pub online_sales: String,
}

impl SalesSubmission {
    pub fn new(cash_sales: impl Into<String>, online_sales: impl Into<String>) -> SalesSubmission {
        SalesSubmission {
            cash_sales: cash_sales.into(),
            online_sales: online_sales.into(),
        }
    }

    /// Blank or unreadable amounts count as zero. Negative amounts and
    /// amounts above `money::MAX_AMOUNT` are rejected.
    pub fn parse(&self) -> Result<(Decimal, Decimal), ValidationError> {
        let cash = money::parse_lenient(&self.cash_sales).unwrap_or(Decimal::ZERO);
        let online = money::parse_lenient(&self.online_sales).unwrap_or(Decimal::ZERO);

        let errors: Vec<FieldError> = [(Field::CashSales, cash), (Field::OnlineSales, online)]
            .into_iter()
            .filter_map(|(field, amount)| {
                let problem = if amount < Decimal::ZERO {
                    FieldProblem::Negative
                } else if amount > money::MAX_AMOUNT {
                    FieldProblem::TooLarge
                } else {
                    return None;
                };
                Some(FieldError { field, problem })
            })
            .collect();

        if errors.is_empty() {
            Ok((cash, online))
        } else {
            Err(ValidationError::new(errors))
        }
    }
}

impl ExecutableSubmission for SalesSubmission {
    fn execute(&self, ledger: &mut Ledger) -> Result<Notification, LedgerError> {
        let (cash, online) = self.parse()?;
        Ok(ledger.push_sales(cash, online))
    }
}

/// A validated expense, ready to be stamped with a date and id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseDraft {
    pub category: ExpenseCategory,
    pub item: String,
    pub amount: Decimal,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseSubmission {
    pub category: String,
    pub item: String,
    pub amount: String,
    pub description: String,
}

impl ExpenseSubmission {
    pub fn new(
        category: impl Into<String>,
        item: impl Into<String>,
        amount: impl Into<String>,
        description: impl Into<String>,
    ) -> ExpenseSubmission {
        ExpenseSubmission {
            category: category.into(),
            item: item.into(),
            amount: amount.into(),
            description: description.into(),
        }
    }

    /// Prefills the expense form from one of the quick-add buttons.
    pub fn quick_add(preset: &QuickExpense) -> ExpenseSubmission {
        ExpenseSubmission::new(
            preset.category.name(),
            preset.name,
            preset.amount.to_string(),
            format!("Quick add: {}", preset.name),
        )
    }

    /// Collects every problem instead of stopping at the first one.
    pub fn parse(&self) -> Result<ExpenseDraft, ValidationError> {
        let mut errors = Vec::new();
        let mut reject = |field, problem| errors.push(FieldError { field, problem });

        let category = self.category.parse::<ExpenseCategory>().unwrap_or_else(|problem| {
            reject(Field::Category, problem);
            ExpenseCategory::default()
        });

        let item = self.item.trim();
        if item.is_empty() {
            reject(Field::Item, FieldProblem::Missing);
        }

        let amount = if self.amount.trim().is_empty() {
            reject(Field::Amount, FieldProblem::Missing);
            Decimal::ZERO
        } else {
            match money::parse_lenient(&self.amount).map(money::round) {
                Some(amount) if amount > money::MAX_AMOUNT => {
                    reject(Field::Amount, FieldProblem::TooLarge);
                    Decimal::ZERO
                },
                Some(amount) if amount > Decimal::ZERO => amount,
                Some(_) => {
                    reject(Field::Amount, FieldProblem::NotPositive);
                    Decimal::ZERO
                },
                None => {
                    reject(Field::Amount, FieldProblem::NotANumber);
                    Decimal::ZERO
                },
            }
        };

        if !errors.is_empty() {
            return Err(ValidationError::new(errors));
        }

        Ok(ExpenseDraft {
            category,
            item: item.to_string(),
            amount,
            description: self.description.trim().to_string(),
        })
    }
}

impl ExecutableSubmission for ExpenseSubmission {
    fn execute(&self, ledger: &mut Ledger) -> Result<Notification, LedgerError> {
        let draft = self.parse()?;
        Ok(ledger.push_expense(draft))
    }
}

/// One of the common purchases offered as a one-tap shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickExpense {
    pub name: &'static str,
    pub amount: u32,
    pub category: ExpenseCategory,
}

pub const QUICK_EXPENSES: [QuickExpense; 4] = [
    QuickExpense {
        name: "Paneer",
        amount: 1200,
        category: ExpenseCategory::Ingredients,
    },
    QuickExpense {
        name: "Vegetables",
        amount: 800,
        category: ExpenseCategory::Ingredients,
    },
    QuickExpense {
        name: "Gas Cylinder",
        amount: 950,
        category: ExpenseCategory::Other,
    },
    QuickExpense {
        name: "Spices",
        amount: 550,
        category: ExpenseCategory::Ingredients,
    },
];
