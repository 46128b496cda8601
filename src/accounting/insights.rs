use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use super::entries::{ExpenseCategory, SalesEntry};
use super::ledger::Ledger;
use super::money;

/// Today's figures as shown at the top of the tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TodaySummary {
    pub date: NaiveDate,
    pub total_sales: Decimal,
    pub total_expenses: Decimal,
    pub profit: Decimal,
    pub expense_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Insights {
    pub avg_daily_sales: Decimal,
    pub avg_daily_profit: Decimal,
    pub rising_costs: bool,
    pub peak_hours: Vec<String>,
    /// Ingredient spend in the current window, today included.
    pub ingredient_spend_recent: Decimal,
    /// Ingredient spend in the window just before it.
    pub ingredient_spend_previous: Decimal,
}

impl Ledger {
    /// Profit is always recomputed from the expenses logged so far, so it
    /// can differ from the receipt stored on the sales entry.
    pub fn today_summary(&self) -> TodaySummary {
        let today = self.today();
        let total_expenses = self.expense_total_on(today);
        let total_sales = self
            .latest_sales_on(today)
            .map(|sale| sale.total_sales())
            .unwrap_or(Decimal::ZERO);

        TodaySummary {
            date: today,
            total_sales,
            total_expenses,
            profit: total_sales - total_expenses,
            expense_count: self.todays_expenses().count(),
        }
    }

    /// Live profit of a sales entry against its date's current expenses.
    pub fn profit_of(&self, sale: &SalesEntry) -> Decimal {
        sale.total_sales() - self.expense_total_on(sale.date())
    }

    pub fn insights(&self) -> Insights {
        let avg_daily_sales = mean(self.sales().iter().map(|sale| sale.total_sales()));
        let avg_daily_profit = mean(self.sales().iter().map(|sale| self.profit_of(sale)));

        let window = u64::from(self.config().rising_cost_window_days.max(1));
        let today = self.today();
        let recent_start = days_before(today, window - 1);
        let previous_start = days_before(today, 2 * window - 1);

        let ingredient_spend_recent = self.ingredient_spend_between(recent_start, today);
        let ingredient_spend_previous = match days_before_checked(recent_start, 1) {
            Some(previous_end) => self.ingredient_spend_between(previous_start, previous_end),
            None => Decimal::ZERO,
        };

        Insights {
            avg_daily_sales,
            avg_daily_profit,
            rising_costs: ingredient_spend_recent > ingredient_spend_previous,
            peak_hours: self.config().peak_hours.clone(),
            ingredient_spend_recent,
            ingredient_spend_previous,
        }
    }

    fn ingredient_spend_between(&self, first: NaiveDate, last: NaiveDate) -> Decimal {
        self.expenses()
            .iter()
            .filter(|expense| expense.category() == ExpenseCategory::Ingredients)
            .filter(|expense| expense.date() >= first && expense.date() <= last)
            .map(|expense| expense.amount())
            .sum()
    }
}

fn mean(values: impl Iterator<Item = Decimal>) -> Decimal {
    let (sum, count) = values.fold((Decimal::ZERO, 0u32), |(sum, count), value| (sum + value, count + 1));
    if count == 0 {
        return Decimal::ZERO;
    }

    money::round(sum / Decimal::from(count))
}

fn days_before_checked(date: NaiveDate, days: u64) -> Option<NaiveDate> {
    date.checked_sub_days(Days::new(days))
}

fn days_before(date: NaiveDate, days: u64) -> NaiveDate {
    days_before_checked(date, days).unwrap_or(NaiveDate::MIN)
}
