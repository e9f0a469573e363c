//! Extraction integration tests
//!
//! Runs the public API over realistic C# and Python files and checks the
//! records that come out: signatures, bodies, comments and batch behaviour.

use reposcraper::formats::to_aggregated_json;
use reposcraper::{
    discover_files, extract_from_text, scrape_directory, successful_records, summarize,
    BatchExtractor,
    ExtractedRecord, LocalSource, MethodExtractor, RepositoryInfo, ScraperConfig, SourceUnit,
};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

const BANK_ACCOUNT_CS: &str = r#"using System;

namespace Bank
{
    /// <summary>
    /// A simple bank account.
    /// </summary>
    public class BankAccount
    {
        private decimal balance;

        public BankAccount(decimal opening) : base()
        {
            balance = opening;
        }

        // Current balance
        public decimal Balance => balance;

        /// <summary>Deposits money.</summary>
        public void Deposit(decimal amount)
        {
            if (amount <= 0)
            {
                throw new ArgumentException("Amount must be positive {0}");
            }
            balance += amount;
        }

        public bool TryWithdraw(decimal amount)
        {
            if (amount > balance) { return false; } // no "}" here
            balance -= amount;
            return true;
        }

        public override string ToString() => $"Balance: {balance}";
    }
}
"#;

const INVENTORY_PY: &str = r#""""Inventory helpers."""

import json


# Loads inventory from disk
def load(path):
    with open(path) as handle:
        data = json.load(handle)

    return data


class Inventory:
    """Tracks stock levels."""

    def __init__(self, items=None):
        self.items = items or {}

    # Adds stock for a SKU
    def add(self, sku: str, count: int) -> int:
        current = self.items.get(sku, 0)
        self.items[sku] = current + count
        return self.items[sku]

    async def sync(self,
                   remote):
        await remote.push(self.items)


def main():
    inv = Inventory()
    return inv.add("apple", 3)


if __name__ == "__main__":
    main()
"#;

fn repo() -> Arc<RepositoryInfo> {
    Arc::new(RepositoryInfo::new("bank-app", "acme"))
}

#[test]
fn test_csharp_bank_account() {
    let outcome = extract_from_text(repo(), "src/BankAccount.cs", BANK_ACCOUNT_CS);
    assert!(outcome.is_successful());

    let names: Vec<&str> = outcome
        .records()
        .iter()
        .filter_map(|r| r.name.as_deref())
        .collect();
    assert_eq!(names, vec!["BankAccount", "Deposit", "TryWithdraw", "ToString"]);

    let ctor = &outcome.records()[0];
    assert_eq!(ctor.signature, "public BankAccount(decimal opening) : base()");
    assert_eq!(ctor.body, "{\n            balance = opening;\n        }");
    assert_eq!(ctor.comments, "");

    let deposit = &outcome.records()[1];
    assert_eq!(deposit.signature, "public void Deposit(decimal amount)");
    assert_eq!(deposit.comments, "        /// <summary>Deposits money.</summary>");
    assert!(deposit.body.starts_with("{\n            if (amount <= 0)"));
    assert!(deposit.body.contains("\"Amount must be positive {0}\""));
    assert!(deposit.body.ends_with("balance += amount;\n        }"));

    let withdraw = &outcome.records()[2];
    assert!(withdraw.body.ends_with("return true;\n        }"));

    let to_string = &outcome.records()[3];
    assert_eq!(to_string.signature, "public override string ToString()");
    assert_eq!(to_string.body, "=> $\"Balance: {balance}\";");
}

#[test]
fn test_csharp_records_point_at_their_lines() {
    let outcome = extract_from_text(repo(), "BankAccount.cs", BANK_ACCOUNT_CS);
    let lines: Vec<&str> = BANK_ACCOUNT_CS.lines().collect();

    for record in outcome.records() {
        assert_eq!(lines[record.line - 1].trim(), record.signature.lines().next().unwrap());
        assert!(BANK_ACCOUNT_CS.contains(&record.body));
    }
}

#[test]
fn test_python_inventory() {
    let outcome = extract_from_text(repo(), "inventory.py", INVENTORY_PY);
    assert!(outcome.is_successful());

    let names: Vec<&str> = outcome
        .records()
        .iter()
        .filter_map(|r| r.name.as_deref())
        .collect();
    assert_eq!(names, vec!["load", "__init__", "add", "sync", "main"]);

    let load = &outcome.records()[0];
    assert_eq!(load.signature, "def load(path):");
    assert_eq!(load.comments, "# Loads inventory from disk");
    assert!(load.body.starts_with("    with open(path) as handle:\n        data = json.load(handle)\n\n    return data"));
    assert!(!load.body.contains("class Inventory"));

    let add = &outcome.records()[2];
    assert_eq!(add.signature, "def add(self, sku: str, count: int) -> int:");
    assert_eq!(add.comments, "    # Adds stock for a SKU");
    assert_eq!(
        add.body,
        "        current = self.items.get(sku, 0)\n        self.items[sku] = current + count\n        return self.items[sku]\n"
    );

    let sync = &outcome.records()[3];
    assert_eq!(sync.signature, "async def sync(self,\n                   remote):");
    assert!(sync.body.starts_with("        await remote.push(self.items)"));
    assert!(!sync.body.contains("remote):"));

    let main = &outcome.records()[4];
    assert!(!main.body.contains("__main__"));
}

#[test]
fn test_local_checkout_batch() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("src/Models")).unwrap();
    fs::create_dir_all(dir.path().join("obj")).unwrap();
    fs::write(dir.path().join("src/Models/BankAccount.cs"), BANK_ACCOUNT_CS).unwrap();
    fs::write(dir.path().join("src/Empty.cs"), "\n\n").unwrap();
    fs::write(dir.path().join("obj/Generated.cs"), "void G() {}").unwrap();
    fs::write(dir.path().join("src/inventory.py"), INVENTORY_PY).unwrap();

    let units: Vec<Arc<SourceUnit>> =
        discover_files(dir.path(), repo(), ".cs", &ScraperConfig::default())
            .unwrap()
            .into_iter()
            .map(Arc::new)
            .collect();
    assert_eq!(units.len(), 2);

    let extractor = MethodExtractor::for_language("csharp").unwrap();
    let outcomes = BatchExtractor::new(extractor)
        .with_workers(2)
        .run(&units, &LocalSource)
        .unwrap();

    let paths: Vec<&str> = outcomes.iter().map(|o| o.source().path.as_str()).collect();
    assert_eq!(paths, vec!["src/Empty.cs", "src/Models/BankAccount.cs"]);
    assert!(outcomes.iter().all(|o| o.is_successful()));

    let summary = summarize(&outcomes);
    assert_eq!(summary.total_methods, 4);
    assert_eq!(summary.degraded_methods, 0);

    let records: Vec<ExtractedRecord> = successful_records(&outcomes)
        .into_iter()
        .map(ExtractedRecord::from)
        .collect();
    let json: serde_json::Value = serde_json::from_str(&to_aggregated_json(&records).unwrap()).unwrap();
    assert_eq!(json["totalItems"], 4);
    assert_eq!(
        json["results"][0]["code"]["sourceFile"]["path"],
        "src/Models/BankAccount.cs"
    );
    assert_eq!(json["results"][0]["code"]["sourceFile"]["repository"], "bank-app");
}

#[test]
fn test_windows_encoded_checkout() {
    let dir = TempDir::new().unwrap();
    let windows = format!("\u{FEFF}{}", BANK_ACCOUNT_CS.replace('\n', "\r\n"));
    fs::write(dir.path().join("BankAccount.cs"), windows).unwrap();

    let outcomes =
        scrape_directory(dir.path(), "csharp", repo(), &ScraperConfig::default()).unwrap();
    let windows_records = outcomes[0].records();
    let unix = extract_from_text(repo(), "BankAccount.cs", BANK_ACCOUNT_CS);

    assert_eq!(windows_records.len(), unix.records().len());
    for (win, lf) in windows_records.iter().zip(unix.records()) {
        assert_eq!(win.signature, lf.signature);
        assert_eq!(win.body, lf.body);
        assert_eq!(win.comments, lf.comments);
        assert!(!win.body.contains('\r'));
    }
}

#[test]
fn test_wrong_language_files_fail_individually() {
    let extractor = MethodExtractor::for_language("python").unwrap();
    let good = Arc::new(SourceUnit::inline(repo(), "a.py", "def a():\n    pass\n"));
    let bad = Arc::new(SourceUnit::inline(repo(), "B.cs", "void B() {}"));

    let outcomes = BatchExtractor::new(extractor)
        .run(&[good, bad], &reposcraper::InlineSource)
        .unwrap();
    assert!(outcomes[0].is_successful());
    assert_eq!(
        outcomes[1].error(),
        Some("Cannot handle files with extension: .cs")
    );
}
