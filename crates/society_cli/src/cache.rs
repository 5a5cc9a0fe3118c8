//! Cache maintenance commands: `society status`, `society prune` and
//! `society clear`.

use society_cache::FileCache;

use crate::settings::Settings;
use crate::{GlobalArgs, PathsArgs};

/// Runs `society status`: lists each file as `cached` or `stale`.
pub fn status(args: &PathsArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let settings = Settings::resolve(global)?;
    let cache = FileCache::new(&settings.cache_dir, &args.paths, &settings.extensions)?;
    let partition = cache.partition()?;

    for path in &partition.unchanged {
        println!("cached  {}", path.display());
    }
    for path in &partition.updated {
        println!("stale   {}", path.display());
    }
    if !global.quiet {
        eprintln!(
            "   {} cached, {} to analyze",
            partition.unchanged.len(),
            partition.updated.len()
        );
    }
    Ok(0)
}

/// Runs `society prune`: removes superseded slots of the given files.
pub fn prune(args: &PathsArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let settings = Settings::resolve(global)?;
    let cache = FileCache::new(&settings.cache_dir, &args.paths, &settings.extensions)?;
    let removed = cache.prune()?;
    if !global.quiet {
        eprintln!("   Pruned {removed} superseded slot(s)");
    }
    Ok(0)
}

/// Runs `society clear`: deletes the cache directory.
pub fn clear(global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let settings = Settings::resolve(global)?;
    let removed = FileCache::clear(&settings.cache_dir)?;
    if !global.quiet {
        if removed {
            eprintln!("   Removed {}", settings.cache_dir.display());
        } else {
            eprintln!("   Nothing to remove at {}", settings.cache_dir.display());
        }
    }
    Ok(0)
}
