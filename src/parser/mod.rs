//! Record parsing for OBJ, MTL, and binary STL assets

mod mtl;
mod obj;
mod stl;

pub use mtl::{parse_materials, parse_materials_with_config};
pub use obj::{parse_obj_model, parse_obj_model_with_config};
pub use stl::{parse_stl_bytes, parse_stl_model};

use crate::error::{Error, Result};
use crate::model::{LoadedModel, LoaderConfig};
use crate::source::TextSource;

/// Split one record line into whitespace-separated tokens
///
/// Lines arrive pre-trimmed and non-empty; the first token is the
/// record keyword.
pub(crate) fn tokenize(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}

/// Iterate over the meaningful record lines of a text asset
///
/// Lines are trimmed, blank lines are discarded. Comment lines (`#`)
/// survive here and fall through each parser's unrecognized-record arm.
pub(crate) fn record_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim).filter(|line| !line.is_empty())
}

/// Parse exactly `N` floats from record fields
pub(crate) fn parse_floats<const N: usize>(record: &str, parts: &[&str]) -> Result<[f32; N]> {
    if parts.len() < N {
        return Err(Error::malformed_record(
            record,
            &format!("expected {} components, got {}", N, parts.len()),
        ));
    }
    let mut values = [0.0f32; N];
    for (value, part) in values.iter_mut().zip(parts) {
        *value = part
            .parse()
            .map_err(|_| Error::bad_field(record, part, "floating-point number"))?;
    }
    Ok(values)
}

/// Load a model by file extension
///
/// Dispatches to the OBJ or STL parser based on the (case-insensitive)
/// extension of `path`. Any other extension, or a path without one, is
/// an [`Error::UnsupportedFileType`].
pub async fn load_model<S>(source: &S, path: &str) -> Result<LoadedModel>
where
    S: TextSource + ?Sized,
{
    load_model_with_config(source, path, &LoaderConfig::default()).await
}

/// Load a model by file extension with custom configuration
pub async fn load_model_with_config<S>(
    source: &S,
    path: &str,
    config: &LoaderConfig,
) -> Result<LoadedModel>
where
    S: TextSource + ?Sized,
{
    let extension = path
        .rsplit(['/', '\\'])
        .next()
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("obj") => Ok(LoadedModel::Obj(
            parse_obj_model_with_config(source, path, config).await?,
        )),
        Some("stl") => Ok(LoadedModel::Stl(parse_stl_model(source, path).await?)),
        _ => Err(Error::UnsupportedFileType(path.to_string())),
    }
}
