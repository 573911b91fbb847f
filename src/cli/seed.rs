use anyhow::Result;

use haven::config::HavenConfig;
use haven::seed::{data, FileVersionStore, SeedVersionStore};
use haven::service::Haven;

/// Open the store (which seeds it) and report the applied release.
pub fn seed(config: &HavenConfig) -> Result<()> {
    let path = config.resolved_seed_state_path();
    let before = FileVersionStore::new(&path).load()?;

    let haven = Haven::open(config.clone())?;
    let after = FileVersionStore::new(&path).load()?;

    println!("Seed state:        {}", path.display());
    println!("Bundled release:   v{}", data::VERSION);
    if before == after {
        println!("Applied release:   v{after} (up to date)");
    } else {
        println!("Applied release:   v{before} -> v{after}");
    }
    println!("Enabled types:     {}", haven.subscribe_entry_types().borrow().len());
    Ok(())
}
