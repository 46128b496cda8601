use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use getset::{CopyGetters, Getters};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::money;
use super::FieldProblem;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpenseCategory {
    #[default]
    Ingredients,
    Equipment,
    Rent,
    Other,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 4] = [
        ExpenseCategory::Ingredients,
        ExpenseCategory::Equipment,
        ExpenseCategory::Rent,
        ExpenseCategory::Other,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ExpenseCategory::Ingredients => "Ingredients",
            ExpenseCategory::Equipment => "Equipment",
            ExpenseCategory::Rent => "Rent",
            ExpenseCategory::Other => "Other",
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExpenseCategory {
    type Err = FieldProblem;

    /// Case-insensitive; an empty selection means the default category.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(ExpenseCategory::default());
        }

        ExpenseCategory::ALL
            .into_iter()
            .find(|category| category.name().eq_ignore_ascii_case(s))
            .ok_or(FieldProblem::UnknownCategory)
    }
}

/// One recording of a day's takings.
///
/// `expenses` and `profit` are a receipt of the day's expenses at the moment
/// the sales were recorded; expenses logged later for the same date do not
/// change them.
#[derive(Debug, Clone, PartialEq, Eq, Getters, CopyGetters)]
pub struct SalesEntry {
    #[getset(get_copy = "pub")]
    id: u32,
    #[getset(get_copy = "pub")]
    date: NaiveDate,
    #[getset(get_copy = "pub")]
    cash_sales: Decimal,
    #[getset(get_copy = "pub")]
    online_sales: Decimal,
    #[getset(get_copy = "pub")]
    total_sales: Decimal,
    #[getset(get_copy = "pub")]
    expenses: Decimal,
    #[getset(get_copy = "pub")]
    profit: Decimal,
    #[getset(get = "pub")]
    peak_hours: Vec<String>,
}

impl SalesEntry {
    pub(crate) fn new(
        id: u32,
        date: NaiveDate,
        cash_sales: Decimal,
        online_sales: Decimal,
        expenses: Decimal,
        peak_hours: Vec<String>,
    ) -> SalesEntry {
        let cash_sales = money::round(cash_sales);
        let online_sales = money::round(online_sales);
        let expenses = money::round(expenses);
        let total_sales = cash_sales + online_sales;

        SalesEntry {
            id,
            date,
            cash_sales,
            online_sales,
            total_sales,
            expenses,
            profit: total_sales - expenses,
            peak_hours,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Getters, CopyGetters)]
pub struct ExpenseEntry {
    #[getset(get_copy = "pub")]
    id: u32,
    #[getset(get_copy = "pub")]
    date: NaiveDate,
    #[getset(get_copy = "pub")]
    category: ExpenseCategory,
    #[getset(get = "pub")]
    item: String,
    #[getset(get_copy = "pub")]
    amount: Decimal,
    #[getset(get = "pub")]
    description: String,
}

impl ExpenseEntry {
    pub(crate) fn new(
        id: u32,
        date: NaiveDate,
        category: ExpenseCategory,
        item: String,
        amount: Decimal,
        description: String,
    ) -> ExpenseEntry {
        ExpenseEntry {
            id,
            date,
            category,
            item,
            amount: money::round(amount),
            description,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_category_from_str() {
        assert_eq!("Rent".parse::<ExpenseCategory>(), Ok(ExpenseCategory::Rent));
        assert_eq!(" equipment ".parse::<ExpenseCategory>(), Ok(ExpenseCategory::Equipment));
        assert_eq!("".parse::<ExpenseCategory>(), Ok(ExpenseCategory::Ingredients));
        assert_eq!("Fuel".parse::<ExpenseCategory>(), Err(FieldProblem::UnknownCategory));
    }

    #[test]
    fn test_sales_entry_derives_totals() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let entry = SalesEntry::new(7, date, dec!(8500), dec!(3200.004), dec!(1200), vec![]);

        assert_eq!(entry.total_sales(), dec!(11700));
        assert_eq!(entry.total_sales(), entry.cash_sales() + entry.online_sales());
        assert_eq!(entry.profit(), dec!(10500));
        assert_eq!(entry.profit(), entry.total_sales() - entry.expenses());
    }
}
