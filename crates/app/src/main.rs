use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use larder_core::InventoryStore;
use larder_import::{parse_for_store, ItemAction, ReconcileSession, StoreFormat};
use larder_storage::SqliteInventoryStore;

struct Args {
    store_id: String,
    receipt_path: PathBuf,
    commit: bool,
    db_path: Option<PathBuf>,
}

fn parse_args() -> Result<Args> {
    let mut positional = Vec::new();
    let mut commit = false;
    let mut db_path = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--commit" => commit = true,
            "--db" => {
                let value = args.next().context("--db requires a path")?;
                db_path = Some(PathBuf::from(value));
            }
            _ => positional.push(arg),
        }
    }

    if positional.len() != 2 {
        bail!("usage: larder <store-id> <receipt-file> [--commit] [--db <path>]");
    }
    let receipt_path = PathBuf::from(positional.pop().unwrap_or_default());
    let store_id = positional.pop().unwrap_or_default();

    Ok(Args { store_id, receipt_path, commit, db_path })
}

fn default_db_path() -> Result<PathBuf> {
    let dirs = directories::ProjectDirs::from("com", "larder", "Larder")
        .context("could not determine the platform data directory")?;
    let data_dir = dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("creating {}", data_dir.display()))?;
    Ok(data_dir.join("inventory.db"))
}

fn print_entries(session: &ReconcileSession) {
    for (i, entry) in session.entries().iter().enumerate() {
        let action = match entry.action {
            ItemAction::Add => "add",
            ItemAction::Replace => "replace",
            ItemAction::Skip => "skip",
        };
        print!(
            "[{i}] {action:<7} {} — qty {} {} @ ${}",
            entry.item.name, entry.item.quantity_available, entry.item.unit, entry.item.cost
        );
        if let Some(upc) = &entry.item.upc {
            print!("  UPC {upc}");
        }
        if let Some(matched) = &entry.matched {
            print!("  (matches #{} {})", matched.id, matched.name);
        }
        if let Some(conflict) = &entry.conflict {
            print!("  !! {conflict}");
        }
        println!();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = parse_args()?;
    let text = std::fs::read_to_string(&args.receipt_path)
        .with_context(|| format!("reading {}", args.receipt_path.display()))?;

    let Ok(format) = args.store_id.parse::<StoreFormat>() else {
        // Preserve the original graceful degradation: an unknown selector
        // parses to nothing instead of failing.
        let items = parse_for_store(&text, &args.store_id);
        println!("Parsed {} items.", items.len());
        return Ok(());
    };

    let db_path = match args.db_path {
        Some(path) => path,
        None => default_db_path()?,
    };
    tracing::info!(db = %db_path.display(), "opening inventory database");
    let pool = larder_storage::create_db(&db_path)
        .await
        .with_context(|| format!("opening database at {}", db_path.display()))?;
    let store = SqliteInventoryStore::new(pool, "local");

    let inventory = store.get_inventory().await?;
    let mut session = ReconcileSession::from_receipt(&text, format, &inventory);
    println!("Parsed {} items from {} receipt:", session.len(), format);
    print_entries(&session);

    if !args.commit {
        if !session.is_empty() {
            println!("\nDry run — pass --commit to apply the default actions.");
        }
        return Ok(());
    }

    let report = session.commit(&store).await;
    println!(
        "\nCommitted {} item(s), skipped {}.",
        report.committed, report.skipped
    );
    for failure in &report.failures {
        eprintln!("failed: {} — {}", failure.name, failure.error);
    }
    if !report.all_succeeded() {
        bail!("{} item(s) failed to commit and remain pending", report.failures.len());
    }

    Ok(())
}
