use std::io::{self, BufRead};
use std::path::PathBuf;

use chrono::{Local, NaiveDate, Utc};
use clap::Parser;
use tracing_subscriber::filter::LevelFilter;
use uuid::Uuid;

use bookly::logging::setup_logging;
use bookly::operations::export::write_report;
use bookly::operations::import::import_report;
use bookly::operations::period::{Period, available_years};
use bookly::operations::report::{Report, build_report, dashboard};
use bookly::operations::search::{SortField, SortOrder, TransactionFilter, filter_transactions, sort_transactions};
use bookly::{Transaction, TransactionInput, TransactionStore};

/// Track income and expenses from the terminal.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Start with no transactions instead of the sample data.
    #[arg(long)]
    empty: bool,

    /// Directory that exported reports are written to.
    #[arg(long, default_value = ".")]
    export_dir: PathBuf,

    /// Minimum level of log events printed to stderr.
    #[arg(long, default_value_t = LevelFilter::WARN)]
    log_level: LevelFilter,
}

pub enum UserCommands {
    Add,
    Remove,
    List,
    Search,
    Dashboard,
    Report,
    Export,
    Import,
    Categories,
    Exit,
    Unknown,
}

fn main() {
    let args = Args::parse();
    setup_logging(args.log_level);

    let mut store = if args.empty {
        TransactionStore::default()
    } else {
        TransactionStore::with_demo_data()
    };

    println!("Welcome to bookly!");

    loop {
        println!(
            "Please enter a command (add, remove, list, search, dashboard, report, export, import, categories, exit):"
        );

        let input = match read_user_input() {
            Ok(Some(cmd)) => cmd,
            Ok(None) => {
                println!("Exiting the application.");
                break;
            }
            Err(e) => {
                println!("Error reading input: {}", e);
                continue;
            }
        };
        let parts: Vec<&str> = input.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        // The date is read once per command so every view agrees on "today".
        let today = Local::now().date_naive();

        match check_for_command(parts[0]) {
            UserCommands::Add => {
                println!(
                    "Please enter transaction details in the format:\ntitle, amount, date(YYYY-MM-DD), category, type(income/expense)[, description]"
                );
                let Some(details) = prompt() else { continue };
                match TransactionInput::parse_line(&details).and_then(|input| store.add(input)) {
                    Ok(transaction) => println!("Transaction added successfully! ID: {}", transaction.id),
                    Err(e) => {
                        println!("Error adding transaction: {}", e);
                        println!("Please try again.");
                    }
                }
            }
            UserCommands::Remove => {
                println!("Provide the transaction ID to remove:");
                let Some(id_input) = prompt() else { continue };
                let id = match Uuid::parse_str(&id_input) {
                    Ok(id) => id,
                    Err(_) => {
                        println!("Invalid transaction ID format. Please provide a valid UUID.");
                        continue;
                    }
                };
                if store.remove(id) {
                    println!("Transaction removed successfully.");
                } else {
                    println!("No transaction with ID {} found, nothing removed.", id);
                }
            }
            UserCommands::List => {
                println!("Current Transactions:");
                print_transactions(store.list());
            }
            UserCommands::Search => {
                println!("Provide: search term, category (or all), type (income/expense/all)[, sort field (date/amount/title), order (asc/desc)]");
                let Some(line) = prompt() else { continue };
                match run_search(&store, &line) {
                    Ok(()) => {}
                    Err(e) => println!("Error searching transactions: {}", e),
                }
            }
            UserCommands::Dashboard => print_dashboard(&store, today),
            UserCommands::Report => {
                let Some(period) = prompt_period(&store) else { continue };
                let report = build_report(store.list(), store.categories(), period, today);
                print_report(&report);
            }
            UserCommands::Export => {
                let Some(period) = prompt_period(&store) else { continue };
                let report = build_report(store.list(), store.categories(), period, today);
                match write_report(&args.export_dir, period, report.transactions, Utc::now()) {
                    Ok(path) => println!("Your report has been written to {}", path.display()),
                    Err(e) => println!("Error exporting report: {}", e),
                }
            }
            UserCommands::Import => {
                println!("Please enter the path of a bookly CSV report to import:");
                let Some(path) = prompt() else { continue };
                match import_report(&mut store, &PathBuf::from(path)) {
                    Ok(count) => println!("Successfully imported {} transactions.", count),
                    Err(e) => println!("Error importing transactions: {}", e),
                }
            }
            UserCommands::Categories => {
                for category in store.categories() {
                    println!("{:<16} {:<8} {}", category.name, category.category_type, category.color);
                }
            }
            UserCommands::Exit => {
                println!("Exiting the application.");
                break;
            }
            UserCommands::Unknown => println!("Unknown command '{}'.", parts[0]),
        }
    }
}

fn read_user_input() -> Result<Option<String>, String> {
    read_line_from(&mut io::stdin().lock())
}

/// Read one trimmed line, `None` once the input is closed.
fn read_line_from<R: BufRead>(reader: &mut R) -> Result<Option<String>, String> {
    let mut input = String::new();
    let read = reader
        .read_line(&mut input)
        .map_err(|_| "Failed to read line".to_string())?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim().to_string()))
}

fn prompt() -> Option<String> {
    match read_user_input() {
        Ok(details) => details,
        Err(e) => {
            println!("Error reading input: {}", e);
            None
        }
    }
}

fn prompt_period(store: &TransactionStore) -> Option<Period> {
    let years: Vec<String> = available_years(store.list())
        .iter()
        .map(|y| y.to_string())
        .collect();
    println!(
        "Select a period (all, current-month, current-year or a year; years with data: {}):",
        years.join(", ")
    );

    let input = prompt()?;
    match input.parse::<Period>() {
        Ok(period) => Some(period),
        Err(e) => {
            println!("{}", e);
            None
        }
    }
}

fn check_for_command(input: &str) -> UserCommands {
    match input {
        "add" => UserCommands::Add,
        "remove" => UserCommands::Remove,
        "list" | "print" => UserCommands::List,
        "search" => UserCommands::Search,
        "dashboard" => UserCommands::Dashboard,
        "report" => UserCommands::Report,
        "export" => UserCommands::Export,
        "import" => UserCommands::Import,
        "categories" => UserCommands::Categories,
        "exit" | "quit" => UserCommands::Exit,
        _ => UserCommands::Unknown,
    }
}

fn run_search(store: &TransactionStore, line: &str) -> bookly::Result<()> {
    let parts: Vec<&str> = line.split(',').map(|s| s.trim()).collect();
    let field = |i: usize| parts.get(i).copied().unwrap_or("");

    let filter = TransactionFilter::from_fields(field(0), field(1), field(2))?;
    let sort_field: SortField = match field(3) {
        "" => SortField::Date,
        text => text.parse()?,
    };
    let sort_order: SortOrder = match field(4) {
        "" => SortOrder::default(),
        text => text.parse()?,
    };

    let mut matches = filter_transactions(store.list(), &filter);
    sort_transactions(&mut matches, sort_field, sort_order);

    if matches.is_empty() {
        println!("No transactions found.");
    } else {
        println!("Found {} transactions:", matches.len());
        print_transactions(matches);
    }
    Ok(())
}

fn print_transactions<'a, I>(transactions: I)
where
    I: IntoIterator<Item = &'a Transaction>,
{
    for t in transactions {
        let sign = if t.signed_amount().is_sign_negative() { "-" } else { "+" };
        println!(
            "{}  {}  {}{:>10}  {:<16} {}{}",
            t.id,
            t.date,
            sign,
            t.amount.normalize(),
            t.category,
            t.title,
            t.description
                .as_deref()
                .map(|d| format!(" ({})", d))
                .unwrap_or_default()
        );
    }
}

fn print_dashboard(store: &TransactionStore, today: NaiveDate) {
    let view = dashboard(store.list(), today);

    println!("Total income:   {}", view.totals.total_income);
    println!("Total expenses: {}", view.totals.total_expenses);
    println!("Balance:        {}", view.totals.balance);
    println!(
        "This month:     +{} / -{}",
        view.this_month.income, view.this_month.expense
    );

    println!("\nRecent transactions:");
    print_transactions(view.recent);

    println!("\nBy category:");
    for row in &view.breakdown {
        let label = match store.category(&row.category) {
            Some(_) => row.category.clone(),
            None => format!("{} (uncategorized)", row.category),
        };
        println!("{:<28} +{:>10} -{:>10}", label, row.income, row.expense);
    }
}

fn print_report(report: &Report<'_>) {
    let summary = &report.summary;
    println!("Report for {}", report.period);
    println!("Transactions:   {}", summary.transaction_count);
    println!("Total income:   {}", summary.total_income);
    println!("Total expenses: {}", summary.total_expenses);
    println!("Net income:     {}", summary.net_income);

    println!("\nBy category:");
    for row in &report.categories {
        println!(
            "{:<16} {:<12} total {:>10}",
            row.breakdown.category,
            row.color.as_deref().unwrap_or("uncategorized"),
            row.breakdown.total
        );
    }

    if let Some(monthly) = &report.monthly {
        println!("\nMonth   income    expense   net");
        for point in monthly {
            println!(
                "{:<6} {:>9} {:>9} {:>9}",
                point.label, point.income, point.expense, point.net
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_line_from_closed_input() {
        let mut reader: &[u8] = b"";
        assert_eq!(read_line_from(&mut reader), Ok(None));
    }

    #[test]
    fn test_read_line_from_trims_and_stops_at_end() {
        let mut reader: &[u8] = b"  add \n\nlist";
        assert_eq!(read_line_from(&mut reader), Ok(Some("add".to_string())));
        assert_eq!(read_line_from(&mut reader), Ok(Some(String::new())));
        assert_eq!(read_line_from(&mut reader), Ok(Some("list".to_string())));
        assert_eq!(read_line_from(&mut reader), Ok(None));
    }
}
