use anyhow::Result;
use log::info;
use std::env;

use stallbook::accounting::ledger::Ledger;
use stallbook::config::LedgerConfig;
use stallbook::data;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let (with_sample, input) = match args.as_slice() {
        [flag, input] if flag == "--sample" => (true, input),
        [input] => (false, input),
        _ => {
            eprintln!("Usage: cargo run -- [--sample] <input_file>");
            std::process::exit(1);
        },
    };

    let mut ledger = Ledger::with_config(LedgerConfig::from_env());
    if with_sample {
        data::seed_sample(&mut ledger)?;
    }

    let report = data::process_csv(input, &mut ledger)?;
    for notification in &report.notifications {
        info!("{}", notification);
    }
    info!(
        "replayed {} submissions, rejected {}, skipped {} malformed rows",
        report.applied(),
        report.rejected(),
        report.malformed
    );

    let summary = ledger.today_summary();
    eprintln!(
        "{}: sales {}, expenses {} ({} entries), profit {}",
        summary.date,
        ledger.format_amount(summary.total_sales),
        ledger.format_amount(summary.total_expenses),
        summary.expense_count,
        ledger.format_amount(summary.profit)
    );

    let insights = ledger.insights();
    eprintln!(
        "average daily sales {}, average daily profit {}, peak hours {}",
        ledger.format_amount(insights.avg_daily_sales),
        ledger.format_amount(insights.avg_daily_profit),
        insights.peak_hours.join(", ")
    );
    if insights.rising_costs {
        eprintln!(
            "ingredient costs are rising: {} this period against {} before",
            ledger.format_amount(insights.ingredient_spend_recent),
            ledger.format_amount(insights.ingredient_spend_previous)
        );
    }

    data::export_sales_csv(&ledger, std::io::stdout())?;

    Ok(())
}
