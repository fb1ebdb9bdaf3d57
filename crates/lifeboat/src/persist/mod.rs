//! Model artifact persistence.
//!
//! Two encodings of the same model are supported:
//!
//! - **JSON**: a versioned envelope around the [`schema`] types, readable and
//!   diffable. Selected for paths ending in `.json`.
//! - **Binary**: the magic bytes `LFBT`, one format version byte, then a
//!   Postcard-encoded [`payload::Payload`]. Selected for every other path.
//!
//! Every load is validated structurally before a [`GbdtModel`] is returned,
//! so a model obtained from this module is always safe to traverse.

mod convert;
mod error;
pub mod payload;
pub mod schema;

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

pub use error::{LoadError, WriteError};

use crate::model::GbdtModel;
use payload::Payload;
use schema::{ArtifactSchema, GbdtModelSchema};

/// Magic bytes at the start of every binary artifact.
pub const MAGIC: [u8; 4] = *b"LFBT";

/// Artifact format version written by this crate.
pub const FORMAT_VERSION: u32 = 1;

const BUNDLED_MODEL: &str = include_str!("../../assets/titanic.model.json");

// =============================================================================
// JSON
// =============================================================================

/// Read a JSON artifact.
pub fn read_json<R: Read>(reader: R) -> Result<GbdtModel, LoadError> {
    let artifact: ArtifactSchema = serde_json::from_reader(reader)?;
    from_artifact(artifact)
}

/// Parse a JSON artifact from a string.
pub fn from_json_str(json: &str) -> Result<GbdtModel, LoadError> {
    let artifact: ArtifactSchema = serde_json::from_str(json)?;
    from_artifact(artifact)
}

fn from_artifact(artifact: ArtifactSchema) -> Result<GbdtModel, LoadError> {
    if artifact.format_version != FORMAT_VERSION {
        return Err(LoadError::UnsupportedVersion(artifact.format_version));
    }
    Ok(GbdtModel::try_from(artifact.model)?)
}

/// Write a JSON artifact.
pub fn write_json<W: Write>(model: &GbdtModel, writer: W, pretty: bool) -> Result<(), WriteError> {
    let artifact = ArtifactSchema {
        format_version: FORMAT_VERSION,
        model: GbdtModelSchema::from(model),
    };
    if pretty {
        serde_json::to_writer_pretty(writer, &artifact)?;
    } else {
        serde_json::to_writer(writer, &artifact)?;
    }
    Ok(())
}

// =============================================================================
// Binary
// =============================================================================

/// Decode a binary artifact.
pub fn from_binary_bytes(bytes: &[u8]) -> Result<GbdtModel, LoadError> {
    let header_len = MAGIC.len() + 1;
    if bytes.len() < header_len || bytes[..MAGIC.len()] != MAGIC {
        return Err(LoadError::BadMagic);
    }

    let version = u32::from(bytes[MAGIC.len()]);
    if version != FORMAT_VERSION {
        return Err(LoadError::UnsupportedVersion(version));
    }

    let (Payload::V1(payload), rest) = postcard::take_from_bytes::<Payload>(&bytes[header_len..])?;
    if !rest.is_empty() {
        return Err(LoadError::TrailingBytes(rest.len()));
    }
    Ok(GbdtModel::try_from(payload)?)
}

/// Read a binary artifact.
pub fn read_binary<R: Read>(mut reader: R) -> Result<GbdtModel, LoadError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    from_binary_bytes(&bytes)
}

/// Encode a model as a binary artifact.
pub fn to_binary_bytes(model: &GbdtModel) -> Result<Vec<u8>, WriteError> {
    let payload = Payload::V1(model.into());
    let body = postcard::to_allocvec(&payload)?;

    let mut bytes = Vec::with_capacity(MAGIC.len() + 1 + body.len());
    bytes.extend_from_slice(&MAGIC);
    bytes.push(FORMAT_VERSION as u8);
    bytes.extend_from_slice(&body);
    Ok(bytes)
}

/// Write a binary artifact.
pub fn write_binary<W: Write>(model: &GbdtModel, mut writer: W) -> Result<(), WriteError> {
    writer.write_all(&to_binary_bytes(model)?)?;
    Ok(())
}

// =============================================================================
// Paths
// =============================================================================

fn is_json_path(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Load a model from disk, picking the encoding from the file extension.
pub fn load_path(path: impl AsRef<Path>) -> Result<GbdtModel, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    let model = if is_json_path(path) {
        read_json(reader)?
    } else {
        read_binary(reader)?
    };

    tracing::debug!(
        path = %path.display(),
        n_trees = model.forest().n_trees(),
        n_features = model.n_features(),
        "loaded model artifact"
    );
    Ok(model)
}

/// Save a model to disk, picking the encoding from the file extension.
pub fn save_path(model: &GbdtModel, path: impl AsRef<Path>) -> Result<(), WriteError> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    if is_json_path(path) {
        write_json(model, &mut writer, true)?;
    } else {
        write_binary(model, &mut writer)?;
    }
    writer.flush()?;
    tracing::debug!(path = %path.display(), "saved model artifact");
    Ok(())
}

/// The demonstration model compiled into the crate.
pub fn bundled_model() -> Result<GbdtModel, LoadError> {
    from_json_str(BUNDLED_MODEL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::golden_model;

    #[test]
    fn bundled_model_loads() {
        let model = bundled_model().unwrap();
        assert_eq!(model.n_features(), 11);
        assert_eq!(model.forest().n_trees(), 3);
        assert!(model.output_transform().is_probability());
    }

    #[test]
    fn json_bytes_roundtrip() {
        let model = golden_model();
        let mut buf = Vec::new();
        write_json(&model, &mut buf, false).unwrap();

        let restored = read_json(buf.as_slice()).unwrap();
        assert_eq!(restored, model);
    }

    #[test]
    fn binary_header_layout() {
        let bytes = to_binary_bytes(&golden_model()).unwrap();
        assert_eq!(&bytes[..4], b"LFBT");
        assert_eq!(bytes[4], 1);
        assert_eq!(from_binary_bytes(&bytes).unwrap(), golden_model());
    }

    #[test]
    fn binary_rejects_bad_magic() {
        let mut bytes = to_binary_bytes(&golden_model()).unwrap();
        bytes[0] = b'X';
        assert!(matches!(from_binary_bytes(&bytes), Err(LoadError::BadMagic)));
        assert!(matches!(from_binary_bytes(b"LF"), Err(LoadError::BadMagic)));
    }

    #[test]
    fn binary_rejects_future_version() {
        let mut bytes = to_binary_bytes(&golden_model()).unwrap();
        bytes[4] = 7;
        assert!(matches!(
            from_binary_bytes(&bytes),
            Err(LoadError::UnsupportedVersion(7))
        ));
    }

    #[test]
    fn binary_rejects_truncated_payload() {
        let bytes = to_binary_bytes(&golden_model()).unwrap();
        let truncated = &bytes[..bytes.len() / 2];
        assert!(matches!(
            from_binary_bytes(truncated),
            Err(LoadError::Binary(_))
        ));
    }

    #[test]
    fn binary_rejects_trailing_bytes() {
        let mut bytes = to_binary_bytes(&golden_model()).unwrap();
        bytes.extend_from_slice(b"GARBAGE-TRAILER");
        assert!(matches!(
            from_binary_bytes(&bytes),
            Err(LoadError::TrailingBytes(15))
        ));
    }

    #[test]
    fn json_rejects_unknown_version() {
        let mut buf = Vec::new();
        write_json(&golden_model(), &mut buf, false).unwrap();
        let json = String::from_utf8(buf).unwrap().replacen(
            "\"format_version\":1",
            "\"format_version\":2",
            1,
        );
        assert!(matches!(
            from_json_str(&json),
            Err(LoadError::UnsupportedVersion(2))
        ));
    }

    #[test]
    fn extension_selects_encoding() {
        assert!(is_json_path(Path::new("model.json")));
        assert!(is_json_path(Path::new("dir/Model.JSON")));
        assert!(!is_json_path(Path::new("model.lfbt")));
        assert!(!is_json_path(Path::new("model")));
    }
}
