use std::fs::File;
use std::io;

use anyhow::Result;
use chrono::{Days, NaiveDate};
use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::accounting::ledger::Ledger;
use crate::accounting::{
    entries::{ExpenseCategory, ExpenseEntry, SalesEntry},
    submissions::{ExpenseSubmission, SalesSubmission, Submission},
    LedgerError, Notification,
};

#[derive(Debug, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionKind {
    #[serde(alias = "sales")]
    Sale,
    #[serde(alias = "expenses")]
    Expense,
}

/// One row of a submissions file. Columns a kind does not use may be blank.
#[derive(Debug, Deserialize)]
pub struct SubmissionRecord {
    pub kind: SubmissionKind,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub item: String,
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cash: String,
    #[serde(default)]
    pub online: String,
}

impl From<SubmissionRecord> for Submission {
    fn from(record: SubmissionRecord) -> Self {
        match record.kind {
            SubmissionKind::Sale => SalesSubmission::new(record.cash, record.online).into(),
            SubmissionKind::Expense => {
                ExpenseSubmission::new(record.category, record.item, record.amount, record.description).into()
            },
        }
    }
}

#[derive(Debug, Default)]
pub struct ReplayReport {
    pub notifications: Vec<Notification>,
    /// Rows that could not be read as a submission at all.
    pub malformed: usize,
}

impl ReplayReport {
    pub fn applied(&self) -> usize {
        self.notifications.iter().filter(|n| !n.is_error()).count()
    }

    pub fn rejected(&self) -> usize {
        self.notifications.iter().filter(|n| n.is_error()).count()
    }
}

#[derive(Debug, Serialize)]
pub struct SalesRecord {
    pub id: u32,
    pub date: NaiveDate,
    pub cash: Decimal,
    pub online: Decimal,
    pub total: Decimal,
    pub expenses: Decimal,
    pub profit: Decimal,
    pub peak_hours: String,
}

impl From<&SalesEntry> for SalesRecord {
    fn from(sale: &SalesEntry) -> Self {
        SalesRecord {
            id: sale.id(),
            date: sale.date(),
            cash: sale.cash_sales(),
            online: sale.online_sales(),
            total: sale.total_sales(),
            expenses: sale.expenses(),
            profit: sale.profit(),
            peak_hours: sale.peak_hours().join("; "),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ExpenseRecord {
    pub id: u32,
    pub date: NaiveDate,
    pub category: ExpenseCategory,
    pub item: String,
    pub amount: Decimal,
    pub description: String,
}

impl From<&ExpenseEntry> for ExpenseRecord {
    fn from(expense: &ExpenseEntry) -> Self {
        ExpenseRecord {
            id: expense.id(),
            date: expense.date(),
            category: expense.category(),
            item: expense.item().clone(),
            amount: expense.amount(),
            description: expense.description().clone(),
        }
    }
}

pub fn process_csv(file_path: &str, ledger: &mut Ledger) -> Result<ReplayReport> {
    let file = File::open(file_path)?;
    process_reader(file, ledger)
}

/// Replays every row in order. Unreadable rows are skipped; rejected
/// submissions leave the ledger untouched and show up as error notifications.
pub fn process_reader<R: io::Read>(reader: R, ledger: &mut Ledger) -> Result<ReplayReport> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let mut report = ReplayReport::default();

    for record in csv_reader.deserialize::<SubmissionRecord>() {
        match record {
            Ok(record) => {
                let notification = ledger.submit(&record.into());
                if notification.is_error() {
                    debug!("rejected submission, {}", notification);
                }
                report.notifications.push(notification);
            },
            Err(err) => {
                debug!("failed to deserialize record, err={}", err);
                report.malformed += 1;
            },
        }
    }

    Ok(report)
}

/// Sales history, newest first.
pub fn export_sales_csv<W: io::Write>(ledger: &Ledger, writer: W) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new().from_writer(writer);
    for sale in ledger.sales() {
        let record: SalesRecord = sale.into();
        csv_writer.serialize(record)?;
    }

    csv_writer.flush()?;

    Ok(())
}

/// Expense log, newest first.
pub fn export_expenses_csv<W: io::Write>(ledger: &Ledger, writer: W) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new().from_writer(writer);
    for expense in ledger.expenses() {
        let record: ExpenseRecord = expense.into();
        csv_writer.serialize(record)?;
    }

    csv_writer.flush()?;

    Ok(())
}

/// Loads the two-day demo log the tracker opens with: today's and yesterday's
/// takings and purchases. Each day's sales snapshot is the total of the
/// purchases logged for it, so receipts and live figures agree.
pub fn seed_sample(ledger: &mut Ledger) -> Result<(), LedgerError> {
    let today = ledger.today();
    let yesterday = today
        .checked_sub_days(Days::new(1))
        .ok_or(LedgerError::InvalidEntry("no calendar day before today"))?;

    let purchases = [
        (today, ExpenseCategory::Ingredients, "Paneer", dec!(1200), "20 kg fresh paneer"),
        (today, ExpenseCategory::Ingredients, "Vegetables", dec!(800), "Mixed vegetables"),
        (today, ExpenseCategory::Other, "Gas Cylinder", dec!(950), "LPG refill"),
        (today, ExpenseCategory::Ingredients, "Spices", dec!(550), "Various spices"),
        (yesterday, ExpenseCategory::Ingredients, "Paneer", dec!(1800), "30 kg fresh paneer"),
        (yesterday, ExpenseCategory::Ingredients, "Vegetables", dec!(900), "Mixed vegetables"),
        (yesterday, ExpenseCategory::Other, "Gas Cylinder", dec!(950), "LPG refill"),
        (yesterday, ExpenseCategory::Ingredients, "Spices", dec!(650), "Various spices"),
        (yesterday, ExpenseCategory::Other, "Packaging", dec!(500), "Takeaway boxes"),
    ];
    for (date, category, item, amount, description) in purchases {
        ledger.import_expense_entry(date, category, item, amount, description)?;
    }

    for (date, cash, online) in [(today, dec!(8500), dec!(3200)), (yesterday, dec!(9200), dec!(2800))] {
        let expenses = ledger.expense_total_on(date);
        ledger.import_sales_entry(date, cash, online, expenses)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::accounting::FixedClock;
    use crate::config::LedgerConfig;

    fn ledger() -> Ledger {
        let today = NaiveDate::from_ymd_opt(2024, 11, 5).unwrap();
        Ledger::with_clock(LedgerConfig::default(), FixedClock(today))
    }

    #[test]
    fn test_process_reader() -> Result<()> {
        let input = "\
kind,category,item,amount,description,cash,online
expense,Ingredients,Paneer,1200,20 kg,,
expense,Rent,,500,,,
expense,Other,Gas Cylinder,950,LPG refill,,
sale,,,,,8500,3200
refund,,,,,,
";
        let mut ledger = ledger();
        let report = process_reader(input.as_bytes(), &mut ledger)?;

        assert_eq!(report.applied(), 3);
        assert_eq!(report.rejected(), 1);
        assert_eq!(report.malformed, 1);
        assert_eq!(ledger.expenses().len(), 2);
        assert_eq!(ledger.sales().len(), 1);
        assert_eq!(ledger.sales()[0].expenses(), dec!(2150));
        assert_eq!(ledger.sales()[0].profit(), dec!(9550));

        Ok(())
    }

    #[test]
    fn test_export_sales_csv() -> Result<()> {
        let mut ledger = ledger();
        ledger.record_expense("Ingredients", "Paneer", "1200", "")?;
        ledger.record_sales("8500", "3200")?;

        let mut out = Vec::new();
        export_sales_csv(&ledger, &mut out)?;

        assert_eq!(
            String::from_utf8(out)?,
            "id,date,cash,online,total,expenses,profit,peak_hours\n\
             2,2024-11-05,8500,3200,11700,1200,10500,12:00-14:00; 19:00-21:00\n"
        );

        Ok(())
    }

    #[test]
    fn test_export_expenses_csv() -> Result<()> {
        let mut ledger = ledger();
        ledger.record_expense("Rent", "Stall rent", "3000", "November")?;
        ledger.record_expense("", "Onions", "240.5", "")?;

        let mut out = Vec::new();
        export_expenses_csv(&ledger, &mut out)?;

        assert_eq!(
            String::from_utf8(out)?,
            "id,date,category,item,amount,description\n\
             2,2024-11-05,Ingredients,Onions,240.5,\n\
             1,2024-11-05,Rent,Stall rent,3000,November\n"
        );

        Ok(())
    }

    #[test]
    fn test_seed_sample() -> Result<()> {
        let mut ledger = ledger();
        seed_sample(&mut ledger)?;

        assert_eq!(ledger.sales().len(), 2);
        assert_eq!(ledger.sales()[0].date(), ledger.today());
        assert_eq!(ledger.sales()[1].total_sales(), dec!(12000));
        assert_eq!(ledger.expenses().len(), 9);
        assert_eq!(ledger.expenses()[0].item(), "Paneer");
        assert_eq!(ledger.expenses_on(ledger.today()).count(), 4);

        let summary = ledger.today_summary();
        assert_eq!(summary.total_sales, dec!(11700));
        assert_eq!(summary.total_expenses, dec!(3500));
        assert_eq!(summary.profit, dec!(8200));

        assert_eq!(ledger.sales()[0].expenses(), dec!(3500));
        assert_eq!(ledger.sales()[1].expenses(), dec!(4800));
        assert_eq!(ledger.sales()[1].profit(), dec!(7200));

        let insights = ledger.insights();
        assert_eq!(insights.avg_daily_sales, dec!(11850));
        // (8200 + 7200) / 2, and the stored receipts agree with it.
        assert_eq!(insights.avg_daily_profit, dec!(7700));
        let receipts: Decimal = ledger.sales().iter().map(|sale| sale.profit()).sum();
        assert_eq!(insights.avg_daily_profit, receipts / dec!(2));
        assert!(insights.rising_costs);

        Ok(())
    }
}
