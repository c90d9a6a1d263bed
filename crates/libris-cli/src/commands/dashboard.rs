//! Dashboard and profile command handlers

use anyhow::Result;

use libris_core::Library;

use crate::output::Output;

/// Show library statistics and new arrivals
pub fn stats(library: &Library, output: &Output) -> Result<()> {
    let stats = library.stats()?;
    let arrivals = library.new_arrivals()?;

    output.print_stats(&stats, &arrivals);
    Ok(())
}

pub fn profile(library: &Library, output: &Output) -> Result<()> {
    let profile = library.profile()?;
    output.print_profile(&profile);
    Ok(())
}
