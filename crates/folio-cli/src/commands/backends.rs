use folio_core::error::FolioError;
use folio_core::extraction::{backend_by_name, BACKENDS};
use std::time::Duration;

pub fn list() -> Result<(), FolioError> {
    println!("Extraction backends, in default priority order:\n");
    for (rank, name) in BACKENDS.iter().enumerate() {
        let backend = backend_by_name(name, Duration::from_secs(1))?;
        let status = if backend.is_available() {
            "available"
        } else {
            "not installed"
        };
        println!("  {}. {:<12} {}", rank + 1, name, status);
    }
    println!();
    Ok(())
}
