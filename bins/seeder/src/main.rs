//! Database seeder for SOLVY development and testing.
//!
//! Seeds a demo NGO with a chart of accounts and one quarter of donations,
//! grants and spending, so the transparency report has data to show.
//!
//! Usage: cargo run --bin seeder

use anyhow::Context;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use solvy_core::ledger::{Account, AccountCategory, AccountType, EntryType};
use solvy_db::repositories::{
    AccountRepository, CreateAccountInput, CreateLedgerEntryInput, CreateTransactionInput,
    OrganizationRepository, TransactionRepository,
};
use solvy_shared::types::Currency;

const DEMO_ORG_SLUG: &str = "solvy-demo-ngo";

/// Matches `reporting.default_organization` in `config/default.toml`.
const DEMO_ORG_ID: Uuid = Uuid::from_u128(1);

/// Demo chart of accounts: number, name, type, explicit category.
const ACCOUNTS: &[(&str, &str, AccountType, Option<AccountCategory>)] = &[
    ("1000", "Operating Cash", AccountType::Asset, None),
    ("4100", "Grant Income", AccountType::Revenue, None),
    ("4200", "Individual Donations", AccountType::Revenue, None),
    ("5100", "Program Services", AccountType::Expense, None),
    ("5200", "Grant Disbursements", AccountType::Expense, None),
    ("6100", "Administrative Overhead", AccountType::Expense, None),
    (
        "6200",
        "Office Rent",
        AccountType::Expense,
        Some(AccountCategory::Administrative),
    ),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;

    println!("Connecting to database...");
    let db = solvy_db::connect(&database_url).await?;

    let orgs = OrganizationRepository::new(db.clone());
    if orgs.find_by_slug(DEMO_ORG_SLUG).await?.is_some() {
        println!("  Demo organization already exists, skipping...");
        return Ok(());
    }

    println!("Seeding demo organization...");
    let org = orgs
        .create_with_id(
            DEMO_ORG_ID,
            "SOLVY Demo Foundation",
            DEMO_ORG_SLUG,
            "NGO",
            Currency::Usd,
        )
        .await?;
    println!("  Organization id: {}", org.id);

    println!("Seeding chart of accounts...");
    let accounts = seed_accounts(&db, org.id).await?;

    println!("Seeding transactions...");
    let count = seed_transactions(&db, org.id, &accounts).await?;
    println!("  {count} transactions recorded");

    println!("Seeding complete!");
    Ok(())
}

async fn seed_accounts(db: &DatabaseConnection, org_id: Uuid) -> anyhow::Result<Vec<Account>> {
    let repo = AccountRepository::new(db.clone());
    let mut accounts = Vec::with_capacity(ACCOUNTS.len());

    for (number, name, account_type, category) in ACCOUNTS {
        let account = repo
            .create_account(
                org_id,
                CreateAccountInput {
                    account_number: (*number).to_string(),
                    name: (*name).to_string(),
                    account_type: *account_type,
                    category: *category,
                },
            )
            .await?;
        println!("  {} {} -> {:?}", account.account_number, account.name, account.category);
        accounts.push(account);
    }

    Ok(accounts)
}

async fn seed_transactions(
    db: &DatabaseConnection,
    org_id: Uuid,
    accounts: &[Account],
) -> anyhow::Result<usize> {
    let id_of = |number: &str| -> anyhow::Result<Uuid> {
        accounts
            .iter()
            .find(|a| a.account_number == number)
            .map(|a| a.id.into_inner())
            .with_context(|| format!("account {number} missing"))
    };
    let cash = id_of("1000")?;

    // (date, description, debit account, credit account, amount)
    let postings: Vec<(NaiveDate, &str, Uuid, Uuid, Decimal)> = vec![
        (date(2026, 1, 8)?, "Foundation grant", cash, id_of("4100")?, dec!(50000)),
        (date(2026, 1, 20)?, "Donation drive", cash, id_of("4200")?, dec!(12500.50)),
        (date(2026, 2, 3)?, "School supplies program", id_of("5100")?, cash, dec!(18000)),
        (date(2026, 2, 17)?, "Partner grant payout", id_of("5200")?, cash, dec!(10000)),
        (date(2026, 2, 28)?, "Staff and accounting", id_of("6100")?, cash, dec!(4200)),
        (date(2026, 3, 1)?, "March rent", id_of("6200")?, cash, dec!(1800)),
        (date(2026, 3, 15)?, "Clean water program", id_of("5100")?, cash, dec!(9750.25)),
    ];

    let repo = TransactionRepository::new(db.clone());
    for (transaction_date, description, debit, credit, amount) in &postings {
        repo.create_transaction(
            org_id,
            CreateTransactionInput {
                transaction_date: *transaction_date,
                description: (*description).to_string(),
                reference: None,
                entries: vec![
                    CreateLedgerEntryInput {
                        account_id: *debit,
                        entry_type: EntryType::Debit,
                        amount: *amount,
                        memo: None,
                    },
                    CreateLedgerEntryInput {
                        account_id: *credit,
                        entry_type: EntryType::Credit,
                        amount: *amount,
                        memo: None,
                    },
                ],
            },
        )
        .await?;
    }

    Ok(postings.len())
}

fn date(year: i32, month: u32, day: u32) -> anyhow::Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .with_context(|| format!("invalid date {year}-{month}-{day}"))
}
