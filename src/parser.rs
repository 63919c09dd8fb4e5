use crate::record::Transaction;

/// Parses cleaned, pipe-delimited lines into transactions, preserving input
/// order.
///
/// Rows that do not carry the eight expected fields fail to deserialize and
/// are skipped; the run never aborts over a malformed row. Skips are only
/// surfaced through the log.
pub fn parse_transactions(raw_lines: &[String]) -> Vec<Transaction> {
    let joined = raw_lines.join("\n");

    // Quoting is disabled so a row parses exactly as a split on `|` would;
    // the source format has no quoting convention.
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'|')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(csv::Trim::All)
        .from_reader(joined.as_bytes());

    let mut transactions = Vec::new();
    let mut dropped = 0u64;
    for result in reader.deserialize::<Transaction>() {
        match result {
            Ok(transaction) => transactions.push(transaction),
            Err(e) => {
                log::debug!("Skipping malformed row: {:?}", e);
                dropped += 1;
            }
        }
    }
    if dropped > 0 {
        log::warn!("Dropped {} malformed rows", dropped);
    }

    transactions
}
