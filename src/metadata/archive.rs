//! `.zip` artwork bundles: files stored flat under their own names.
use super::MetadataError;
use std::fs::File;
use std::io;
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

pub const ARCHIVE_EXTENSION: &str = "zip";

/// Write `files` into a new archive at `zip_path`, each under its file name.
pub fn write_bundle(zip_path: &Path, files: &[&Path]) -> Result<(), MetadataError> {
    let io_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source| MetadataError::Io { path, source }
    };
    let zip_err = |source| MetadataError::Archive {
        path: zip_path.to_path_buf(),
        source,
    };

    let out = File::create(zip_path).map_err(io_err(zip_path))?;
    let mut zip = ZipWriter::new(out);
    let options = SimpleFileOptions::default();
    for &file in files {
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        zip.start_file(name, options).map_err(zip_err)?;
        let mut src = File::open(file).map_err(io_err(file))?;
        io::copy(&mut src, &mut zip).map_err(io_err(file))?;
    }
    zip.finish().map_err(zip_err)?;
    Ok(())
}
