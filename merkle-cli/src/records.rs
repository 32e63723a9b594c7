//! Transaction records
//!
//! Records are read from a JSON array:
//!
//! ```json
//! [
//!   { "id": "tx1", "from": "Alice", "to": "Bob", "amount": 10000 },
//!   { "id": "tx2", "from": "Bob", "to": "Charlie", "amount": 5000 }
//! ]
//! ```
//!
//! `amount` is in minor units (cents), so `10000` is `100.00`.

use std::fmt;
use std::path::Path;

use merkle_core::{encode_field, hash_records, Digest, LeafEncode, LeafHasher, Sha256Leaf};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CliError, Result};

/// A transfer between two parties.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub from: String,
    pub to: String,
    /// Minor units
    pub amount: u64,
}

impl Transaction {
    pub fn new(
        id: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
        amount: u64,
    ) -> Self {
        Self {
            id: id.into(),
            from: from.into(),
            to: to.into(),
            amount,
        }
    }

    /// Leaf digest of this transaction
    pub fn digest(&self) -> Digest {
        Sha256Leaf.hash(self)
    }
}

/// Leaf encoding: `id`, `from` and `to` length-prefixed, then `amount` as
/// 8 big-endian bytes.
impl LeafEncode for Transaction {
    fn encode_leaf(&self, out: &mut Vec<u8>) {
        encode_field(out, self.id.as_bytes());
        encode_field(out, self.from.as_bytes());
        encode_field(out, self.to.as_bytes());
        out.extend_from_slice(&self.amount.to_be_bytes());
    }
}

/// `tx1:Alice->Bob:100.00`
impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}->{}:{}.{:02}",
            self.id,
            self.from,
            self.to,
            self.amount / 100,
            self.amount % 100
        )
    }
}

/// Read transactions from a JSON file.
///
/// # Errors
/// - `Io` if the file cannot be read
/// - `Serialization` if it is not a JSON array of transactions
/// - `InvalidInput` if it holds more than `max_leaves` records
pub fn load_transactions<P: AsRef<Path>>(path: P, max_leaves: usize) -> Result<Vec<Transaction>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let transactions: Vec<Transaction> = serde_json::from_str(&text)?;

    if transactions.len() > max_leaves {
        return Err(CliError::InvalidInput(format!(
            "{} holds {} records, limit is {}",
            path.display(),
            transactions.len(),
            max_leaves
        )));
    }

    debug!("Loaded {} transactions from {}", transactions.len(), path.display());
    Ok(transactions)
}

/// Leaf digests in file order
pub fn leaf_digests(transactions: &[Transaction]) -> Vec<Digest> {
    hash_records(&Sha256Leaf, transactions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_display_fixed_precision() {
        let tx = Transaction::new("tx1", "Alice", "Bob", 10050);
        assert_eq!(tx.to_string(), "tx1:Alice->Bob:100.50");

        let small = Transaction::new("tx2", "Bob", "Eve", 7);
        assert_eq!(small.to_string(), "tx2:Bob->Eve:0.07");
    }

    #[test]
    fn test_digest_covers_every_field() {
        let base = Transaction::new("tx1", "Alice", "Bob", 100);
        let variants = [
            Transaction::new("tx2", "Alice", "Bob", 100),
            Transaction::new("tx1", "Alicf", "Bob", 100),
            Transaction::new("tx1", "Alice", "Bot", 100),
            Transaction::new("tx1", "Alice", "Bob", 101),
        ];
        for v in &variants {
            assert_ne!(base.digest(), v.digest(), "{}", v);
        }
    }

    #[test]
    fn test_field_boundaries_do_not_collide() {
        // same concatenated text, different field split
        let a = Transaction::new("tx1", "Al", "iceBob", 1);
        let b = Transaction::new("tx1", "Alice", "Bob", 1);
        assert_ne!(a.digest(), b.digest());
    }

    #[test]
    fn test_digest_is_deterministic() {
        let tx = Transaction::new("tx1", "Alice", "Bob", 10000);
        assert_eq!(tx.digest(), tx.clone().digest());
    }

    #[test]
    fn test_load_transactions() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id":"tx1","from":"Alice","to":"Bob","amount":10000}},
                {{"id":"tx2","from":"Bob","to":"Charlie","amount":5000}}]"#
        )
        .unwrap();

        let txs = load_transactions(file.path(), 10).unwrap();
        assert_eq!(txs.len(), 2);
        assert_eq!(txs[1], Transaction::new("tx2", "Bob", "Charlie", 5000));

        let digests = leaf_digests(&txs);
        assert_eq!(digests, vec![txs[0].digest(), txs[1].digest()]);
    }

    #[test]
    fn test_load_transactions_over_limit() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id":"a","from":"x","to":"y","amount":1}},{{"id":"b","from":"x","to":"y","amount":2}}]"#
        )
        .unwrap();

        assert!(matches!(
            load_transactions(file.path(), 1),
            Err(CliError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_load_transactions_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        assert!(matches!(
            load_transactions(file.path(), 10),
            Err(CliError::Serialization(_))
        ));
    }
}
