//! Validate every roster under data/rosters: each file must parse and pass roster validation.
//! Run: cargo run --bin validate_roster

use std::path::Path;

use dogfight::data::load_roster;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let roster_dir = Path::new(&manifest_dir).join("data").join("rosters");

    if !roster_dir.exists() {
        eprintln!("Roster directory not found: {}", roster_dir.display());
        std::process::exit(1);
    }

    let mut paths: Vec<_> = std::fs::read_dir(&roster_dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            matches!(
                path.extension().and_then(|ext| ext.to_str()),
                Some("yaml" | "yml" | "json")
            )
        })
        .collect();
    paths.sort();

    let mut ok = 0;
    let mut err = 0;
    for path in &paths {
        match load_roster(path) {
            Ok(roster) => {
                println!("[{}] ok: {} ships", path.display(), roster.ship_count());
                ok += 1;
            }
            Err(e) => {
                eprintln!("[{}] {}", path.display(), e);
                err += 1;
            }
        }
    }

    println!("Validated {} rosters, {} ok, {} errors", paths.len(), ok, err);
    if err > 0 {
        std::process::exit(1);
    }
    Ok(())
}
