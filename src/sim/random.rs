//! Random content selection for the next bill

use rand::Rng;
use rand::seq::IndexedRandom;

use super::catalog::{Catalog, CurrencyRecord};
use crate::consts::FALLBACK_DENOMINATION;

/// Pick a currency uniformly from the catalog, never the current one.
///
/// A single-entry catalog has nothing else to offer, so the first entry is
/// returned in that case.
pub fn pick_random_currency<'a, R: Rng + ?Sized>(
    current_code: &str,
    catalog: &'a Catalog,
    rng: &mut R,
) -> &'a CurrencyRecord {
    let candidates: Vec<&CurrencyRecord> = catalog
        .records()
        .iter()
        .filter(|r| r.code != current_code)
        .collect();
    candidates
        .choose(rng)
        .copied()
        .unwrap_or_else(|| catalog.first())
}

/// Pick a printable value for the given currency, or the fallback on a miss
pub fn pick_random_denomination<R: Rng + ?Sized>(
    code: &str,
    catalog: &Catalog,
    rng: &mut R,
) -> u32 {
    catalog
        .get(code)
        .and_then(|currency| currency.denominations.choose(rng).copied())
        .unwrap_or(FALLBACK_DENOMINATION)
}

/// Pick any currency, used for the opening bill
pub fn pick_initial_currency<'a, R: Rng + ?Sized>(
    catalog: &'a Catalog,
    rng: &mut R,
) -> &'a CurrencyRecord {
    catalog.records().choose(rng).unwrap_or_else(|| catalog.first())
}
