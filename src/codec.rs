//! Load and save [`ArgbImage`]s through the `image` crate.
//!
//! Decoding accepts whatever formats the enabled `image` features recognise
//! and always converts to RGBA8 first. Saving unpacks back to RGBA8.

use std::path::{Path, PathBuf};

use image::{ExtendedColorType, ImageFormat};
use thiserror::Error;

use crate::img::ArgbImage;
use crate::{SizeError, typed_rgb};

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to encode {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("image dimensions {width}x{height} do not fit the encoder")]
    Dimensions { width: usize, height: usize },

    #[error("decoded image is unusable: {0}")]
    Size(#[from] SizeError),
}

/// Decode the file at `path` into an [`ArgbImage`].
pub fn load_argb(path: impl AsRef<Path>) -> Result<ArgbImage, CodecError> {
    let path = path.as_ref();
    let decoded = image::open(path)
        .map_err(|source| CodecError::Decode {
            path: path.to_path_buf(),
            source,
        })?
        .to_rgba8();
    let (width, height) = (decoded.width() as usize, decoded.height() as usize);
    let raw = decoded.into_raw();
    let pixels = typed_rgb::rgba_to_argb_vec(bytemuck::cast_slice(&raw));
    tracing::debug!(path = %path.display(), width, height, "loaded image");
    Ok(ArgbImage::new(width, height, pixels)?)
}

/// Encode `img` to `path` as `format`.
pub fn save(img: &ArgbImage, path: impl AsRef<Path>, format: ImageFormat) -> Result<(), CodecError> {
    let path = path.as_ref();
    let dims = || CodecError::Dimensions {
        width: img.width(),
        height: img.height(),
    };
    let width = u32::try_from(img.width()).map_err(|_| dims())?;
    let height = u32::try_from(img.height()).map_err(|_| dims())?;

    let rgba = typed_rgb::argb_to_rgba_vec(img.pixels());
    image::save_buffer_with_format(
        path,
        bytemuck::cast_slice(&rgba),
        width,
        height,
        ExtendedColorType::Rgba8,
        format,
    )
    .map_err(|source| CodecError::Encode {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), width, height, ?format, "saved image");
    Ok(())
}

pub fn save_png(img: &ArgbImage, path: impl AsRef<Path>) -> Result<(), CodecError> {
    save(img, path, ImageFormat::Png)
}
