//! Filter predicate

use crate::models::laptop::{Filter, Laptop};

/// Whether `laptop` satisfies every bound of `filter`.
///
/// A laptop without a CPU or without RAM never matches.
pub fn matches(laptop: &Laptop, filter: &Filter) -> bool {
    if laptop.price_usd > filter.max_price_usd {
        return false;
    }

    let Some(cpu) = &laptop.cpu else {
        return false;
    };
    if cpu.number_cores < filter.min_cpu_cores || cpu.min_ghz < filter.min_cpu_ghz {
        return false;
    }

    let Some(ram) = &laptop.ram else {
        return false;
    };
    match &filter.min_ram {
        Some(min_ram) => ram.to_bits() >= min_ram.to_bits(),
        None => true,
    }
}
