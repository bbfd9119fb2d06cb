use saldo::{LedgerStore, Transaction, TransactionId, TransactionType,
    backend::{Storage, JsonStore, MemoryStore},
    config::AppConfig,
    form::{EntryForm, Submitted},
    format::{format_balance, format_date, format_signed, round_cents}};

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use anyhow::{Context, bail};
use colored::Colorize;
use clap::{Args, Parser, Subcommand};
use log::debug;

#[derive(Parser, Debug)]
#[clap(version, about, propagate_version = true)]
struct Cli {
    /// Path to a TOML configuration file
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Directory holding the ledger, overrides the configuration
    #[clap(long, value_parser)]
    data_dir: Option<PathBuf>,

    /// Keep the ledger in memory only, nothing is written to disk
    #[clap(long)]
    ephemeral: bool,

    /// More log output, repeat for more detail
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Action to perform
    #[clap(subcommand)]
    action: Subcommands,
}

#[derive(Debug, Subcommand)]
enum Subcommands {
    /// Display the current balance
    Balance,
    /// List all transactions, newest first
    List,
    /// Record a new transaction
    Add(AddEntry),
    /// Change an existing transaction
    Update(UpdateEntry),
    /// Delete a transaction
    Remove(RemoveEntry)
}

#[derive(Args, Debug)]
struct AddEntry {
    /// What the money was for
    #[clap(short, long, value_parser)]
    description: String,

    /// Amount, without sign
    #[clap(short, long, value_parser)]
    amount: String,

    /// income or expense
    #[clap(short='t', long="type", value_parser, default_value_t = TransactionType::Expense)]
    kind: TransactionType
}

#[derive(Args, Debug)]
struct UpdateEntry {
    /// Id of the transaction to change
    #[clap(value_parser)]
    id: TransactionId,

    #[clap(short, long, value_parser)]
    description: Option<String>,

    #[clap(short, long, value_parser)]
    amount: Option<String>,

    #[clap(short='t', long="type", value_parser)]
    kind: Option<TransactionType>
}

#[derive(Args, Debug)]
struct RemoveEntry {
    /// Id of the transaction to delete
    #[clap(value_parser)]
    id: TransactionId,

    /// Do not ask for confirmation
    #[clap(short, long)]
    yes: bool
}

fn fill_amount(form: &mut EntryForm, amount: &str) -> anyhow::Result<()> {
    if !form.set_amount_input(amount.trim()) {
        bail!("amount must be a positive number, got {:?}", amount);
    }
    Ok(())
}

impl AddEntry {
    fn add<S: Storage>(&self, store: &mut LedgerStore<S>) -> anyhow::Result<Submitted> {
        let mut form = EntryForm::new();
        form.description = self.description.clone();
        fill_amount(&mut form, &self.amount)?;
        form.kind = self.kind;

        let submitted = form.submit(store)
            .with_context(|| "transaction not added")?;
        return Ok(submitted);
    }
}

impl UpdateEntry {
    fn update<S: Storage>(&self, store: &mut LedgerStore<S>) -> anyhow::Result<Submitted> {
        let existing = store.get(self.id)
            .with_context(|| format!("no such transaction id: {}", self.id))?
            .clone();

        let mut form = EntryForm::new();
        form.begin_edit(&existing);
        if let Some(description) = &self.description {
            form.description = description.clone();
        }
        if let Some(amount) = &self.amount {
            fill_amount(&mut form, amount)?;
        }
        if let Some(kind) = self.kind {
            form.kind = kind;
        }
        debug!("submitting {:?}", form);

        let submitted = form.submit(store)
            .with_context(|| format!("transaction {} not updated", self.id))?;
        return Ok(submitted);
    }
}

impl RemoveEntry {
    fn remove<S: Storage>(&self, store: &mut LedgerStore<S>) -> anyhow::Result<()> {
        let existing = store.get(self.id)
            .with_context(|| format!("no such transaction id: {}", self.id))?;

        if !self.yes && !confirm(&format!("Delete \"{}\"?", existing.description()))? {
            println!("Nothing deleted");
            return Ok(());
        }
        if !store.remove(self.id) {
            bail!("no such transaction id: {}", self.id);
        }
        println!("Deleted {}", self.id);
        return Ok(());
    }
}

fn confirm(question: &str) -> anyhow::Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)
        .with_context(|| "failed to read confirmation")?;
    let answer = answer.trim().to_lowercase();
    return Ok(answer == "y" || answer == "yes");
}

fn print_balance<S: Storage>(store: &LedgerStore<S>, currency: &str) {
    let balance = store.balance();
    let fmt_balance = format_balance(balance, currency);
    let rounded = round_cents(balance);
    let colored = if rounded.is_zero() {
        fmt_balance.normal()
    } else if rounded.is_sign_negative() {
        fmt_balance.bright_red()
    } else {
        fmt_balance.green()
    };
    println!("{}: {}", "Balance".bold(), colored);
}

fn print_transaction(transaction: &Transaction, currency: &str) {
    let amount = format_signed(transaction, currency);
    let amount = if transaction.is_income() { amount.green() } else { amount.red() };
    println!("{:>14}  {}  {}  {}",
        transaction.id(), format_date(transaction), transaction.description(), amount);
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run<S: Storage>(mut store: LedgerStore<S>, action: Subcommands, currency: &str) -> anyhow::Result<()> {
    match action {
        Subcommands::Balance => {
            print_balance(&store, currency);
        },
        Subcommands::List => {
            if store.transactions().is_empty() {
                println!("No transactions yet");
            }
            for t in store.transactions() {
                print_transaction(t, currency);
            }
        },
        Subcommands::Add(add) => {
            let submitted = add.add(&mut store)?;
            print_transaction(submitted.transaction(), currency);
            print_balance(&store, currency);
        },
        Subcommands::Update(update) => {
            let submitted = update.update(&mut store)?;
            print_transaction(submitted.transaction(), currency);
            print_balance(&store, currency);
        },
        Subcommands::Remove(remove) => {
            remove.remove(&mut store)?;
            print_balance(&store, currency);
        }
    }
    return Ok(());
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    init_logging(args.verbose);

    let mut config = AppConfig::locate(args.config.as_deref())?;
    if let Some(data_dir) = args.data_dir {
        config.storage.data_dir = data_dir;
    }
    debug!("using {:?}", config);

    let currency = config.display.currency.as_str();
    if args.ephemeral {
        let store = LedgerStore::load_slot(MemoryStore::new(), &config.storage.key);
        return run(store, args.action, currency);
    }
    let store = LedgerStore::load_slot(JsonStore::new(&config.storage.data_dir), &config.storage.key);
    return run(store, args.action, currency);
}
