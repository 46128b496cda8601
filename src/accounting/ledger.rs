use chrono::NaiveDate;
use log::{debug, info};
use rust_decimal::Decimal;

use super::clock::{Clock, SystemClock};
use super::entries::{ExpenseCategory, ExpenseEntry, SalesEntry};
use super::submissions::{ExpenseDraft, ExpenseSubmission, SalesSubmission, Submission};
use super::{money, ExecutableSubmission, LedgerError, Notification};
use crate::config::{LedgerConfig, SameDayPolicy};

/// A vendor's sales and expense logs for one session.
///
/// Both logs are ordered newest first. Entries are never edited once
/// recorded.
pub struct Ledger {
    config: LedgerConfig,
    clock: Box<dyn Clock>,
    sales: Vec<SalesEntry>,
    expenses: Vec<ExpenseEntry>,
    next_id: u32,
}

impl Default for Ledger {
    fn default() -> Self {
        Ledger::new()
    }
}

impl Ledger {
    pub fn new() -> Ledger {
        Ledger::with_config(LedgerConfig::default())
    }

    pub fn with_config(config: LedgerConfig) -> Ledger {
        Ledger::with_clock(config, SystemClock)
    }

    pub fn with_clock(config: LedgerConfig, clock: impl Clock + 'static) -> Ledger {
        Ledger {
            config,
            clock: Box::new(clock),
            sales: Vec::new(),
            expenses: Vec::new(),
            next_id: 1,
        }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Records today's cash and online takings from raw form input.
    pub fn record_sales(&mut self, cash_sales: &str, online_sales: &str) -> Result<Notification, LedgerError> {
        SalesSubmission::new(cash_sales, online_sales).execute(self)
    }

    /// Records one purchase for today from raw form input.
    pub fn record_expense(
        &mut self,
        category: &str,
        item: &str,
        amount: &str,
        description: &str,
    ) -> Result<Notification, LedgerError> {
        ExpenseSubmission::new(category, item, amount, description).execute(self)
    }

    /// Executes a submission and reports the outcome either way. A rejected
    /// submission leaves the ledger untouched.
    pub fn submit(&mut self, submission: &Submission) -> Notification {
        match submission.execute(self) {
            Ok(notification) => notification,
            Err(err) => {
                debug!("submission rejected, err={}", err);
                Notification::from(&err)
            },
        }
    }

    pub(crate) fn push_sales(&mut self, cash: Decimal, online: Decimal) -> Notification {
        let today = self.today();
        let entry = SalesEntry::new(
            self.take_id(),
            today,
            cash,
            online,
            self.expense_total_on(today),
            self.config.peak_hours.clone(),
        );

        if self.config.same_day == SameDayPolicy::Replace {
            let before = self.sales.len();
            self.sales.retain(|sale| sale.date() != today);
            if self.sales.len() < before {
                info!("replaced {} earlier sales entries for {}", before - self.sales.len(), today);
            }
        }

        let notification = Notification::success(
            "Sales recorded!",
            format!("Total sales: {}", self.format_amount(entry.total_sales())),
        );
        info!(
            "sales recorded, id={}, date={}, total={}, profit={}",
            entry.id(),
            entry.date(),
            entry.total_sales(),
            entry.profit()
        );
        self.sales.insert(0, entry);

        notification
    }

    pub(crate) fn push_expense(&mut self, draft: ExpenseDraft) -> Notification {
        let entry = ExpenseEntry::new(
            self.take_id(),
            self.today(),
            draft.category,
            draft.item,
            draft.amount,
            draft.description,
        );

        let notification = Notification::success(
            "Expense recorded!",
            format!(
                "{}{} added for {}",
                self.config.currency_symbol,
                entry.amount().normalize(),
                entry.item()
            ),
        );
        info!(
            "expense recorded, id={}, date={}, category={}, amount={}",
            entry.id(),
            entry.date(),
            entry.category(),
            entry.amount()
        );
        self.expenses.insert(0, entry);

        notification
    }

    /// Loads a historical sales entry behind the existing ones, keeping the
    /// recorded expense snapshot as given.
    pub fn import_sales_entry(
        &mut self,
        date: NaiveDate,
        cash: Decimal,
        online: Decimal,
        expenses: Decimal,
    ) -> Result<&SalesEntry, LedgerError> {
        if cash < Decimal::ZERO || online < Decimal::ZERO {
            return Err(LedgerError::InvalidEntry("sales amounts cannot be negative"));
        }
        if cash > money::MAX_AMOUNT || online > money::MAX_AMOUNT || expenses.abs() > money::MAX_AMOUNT {
            return Err(LedgerError::InvalidEntry("sales amounts are too large"));
        }

        let entry = SalesEntry::new(self.take_id(), date, cash, online, expenses, self.config.peak_hours.clone());
        self.sales.push(entry);

        Ok(&self.sales[self.sales.len() - 1])
    }

    /// Loads a historical expense behind the existing ones.
    pub fn import_expense_entry(
        &mut self,
        date: NaiveDate,
        category: ExpenseCategory,
        item: &str,
        amount: Decimal,
        description: &str,
    ) -> Result<&ExpenseEntry, LedgerError> {
        if item.trim().is_empty() {
            return Err(LedgerError::InvalidEntry("expense item is required"));
        }
        if money::round(amount) <= Decimal::ZERO {
            return Err(LedgerError::InvalidEntry("expense amount must be positive"));
        }
        if amount > money::MAX_AMOUNT {
            return Err(LedgerError::InvalidEntry("expense amount is too large"));
        }

        let entry = ExpenseEntry::new(
            self.take_id(),
            date,
            category,
            item.trim().to_string(),
            amount,
            description.trim().to_string(),
        );
        self.expenses.push(entry);

        Ok(&self.expenses[self.expenses.len() - 1])
    }

    /// Newest first.
    pub fn sales(&self) -> &[SalesEntry] {
        &self.sales
    }

    /// Newest first.
    pub fn expenses(&self) -> &[ExpenseEntry] {
        &self.expenses
    }

    pub fn sales_on(&self, date: NaiveDate) -> impl Iterator<Item = &SalesEntry> {
        self.sales.iter().filter(move |sale| sale.date() == date)
    }

    pub fn expenses_on(&self, date: NaiveDate) -> impl Iterator<Item = &ExpenseEntry> {
        self.expenses.iter().filter(move |expense| expense.date() == date)
    }

    pub fn todays_expenses(&self) -> impl Iterator<Item = &ExpenseEntry> {
        self.expenses_on(self.today())
    }

    /// The figure that counts for `date`: the most recent recording.
    pub fn latest_sales_on(&self, date: NaiveDate) -> Option<&SalesEntry> {
        self.sales_on(date).next()
    }

    pub fn expense_total_on(&self, date: NaiveDate) -> Decimal {
        self.expenses_on(date).map(|expense| expense.amount()).sum()
    }

    pub fn format_amount(&self, amount: Decimal) -> String {
        money::format_amount(&self.config.currency_symbol, amount)
    }

    fn take_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}
