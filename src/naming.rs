//! Collision-free destination names.

use std::path::Path;

/// Decides the final on-disk name for `desired` inside `folder`.
///
/// If `folder/desired` is free the name is returned unchanged. Otherwise an
/// incrementing suffix is inserted before the extension (`report_1.txt`,
/// `report_2.txt`, ...) until a free name is found. The extension is taken at
/// the last dot, ignoring a dot in the first position, so `archive.tar.gz`
/// becomes `archive.tar_1.gz` and `.bashrc` becomes `.bashrc_1`.
///
/// Only existence is inspected; no other I/O is performed. Lookups use the
/// platform's native case sensitivity, so on case-insensitive filesystems a
/// name differing only in case counts as taken.
pub fn resolve_unique_name(folder: &Path, desired: &str) -> String {
    if !folder.join(desired).exists() {
        return desired.to_string();
    }

    let (base, ext) = split_extension(desired);
    let mut counter = 1usize;
    loop {
        let candidate = format!("{}_{}{}", base, counter, ext);
        if !folder.join(&candidate).exists() {
            return candidate;
        }
        counter += 1;
    }
}

/// Splits a filename into base and extension at the last dot, keeping the dot
/// with the extension. A leading dot is part of the base.
fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(pos) if pos > 0 => name.split_at(pos),
        _ => (name, ""),
    }
}
