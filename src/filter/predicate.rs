use tracing::debug;

use crate::upstream::Record;

/// Keeps the records matching `predicate`, preserving their relative order.
pub fn filter_records<P>(records: Vec<Record>, predicate: P) -> Vec<Record>
where
    P: Fn(&Record) -> bool,
{
    let before = records.len();
    let kept: Vec<Record> = records.into_iter().filter(|r| predicate(r)).collect();

    debug!("Filter kept {} of {} record(s)", kept.len(), before);
    kept
}

/// Inclusion predicate matching a record's address against district terms.
///
/// A record is kept when its address contains at least one configured term.
/// An empty term list matches nothing, so a worker deployed without
/// `DISTRICT_TERMS` publishes empty batches rather than everything.
#[derive(Debug, Clone)]
pub struct AddressFilter {
    terms: Vec<String>,
}

impl AddressFilter {
    pub fn new(terms: Vec<String>) -> Self {
        Self { terms }
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.terms.iter().any(|term| record.address.contains(term))
    }
}
