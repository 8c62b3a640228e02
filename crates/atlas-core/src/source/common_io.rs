// crates/atlas-core/src/source/common_io.rs
use crate::error::{AtlasError, Result};
use crate::model::Country;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

#[cfg(feature = "compact")]
use flate2::{read::GzDecoder, write::GzEncoder, Compression};

fn is_gzip(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
}

/// Opens a dump, transparently un-gzipping `.gz` files.
pub fn open_stream(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path).map_err(|e| {
        AtlasError::NotFound(format!("Dataset not found at {}: {}", path.display(), e))
    })?;

    let reader = BufReader::new(file);

    if is_gzip(path) {
        #[cfg(feature = "compact")]
        {
            return Ok(Box::new(GzDecoder::new(reader)));
        }
        #[cfg(not(feature = "compact"))]
        {
            return Err(AtlasError::InvalidData(format!(
                "{} is gzipped but 'compact' is disabled",
                path.display()
            )));
        }
    }

    Ok(Box::new(reader))
}

/// Writes `countries` as a JSON array, gzipped when the path ends in `.gz`.
pub fn write_dump(path: &Path, countries: &[Country]) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    if is_gzip(path) {
        #[cfg(feature = "compact")]
        {
            let mut encoder = GzEncoder::new(writer, Compression::default());
            serde_json::to_writer(&mut encoder, countries)?;
            encoder.finish()?.flush()?;
            return Ok(());
        }
        #[cfg(not(feature = "compact"))]
        {
            return Err(AtlasError::InvalidData(
                "Gzip requested but 'compact' disabled".into(),
            ));
        }
    }

    serde_json::to_writer(&mut writer, countries)?;
    writer.flush()?;
    Ok(())
}
