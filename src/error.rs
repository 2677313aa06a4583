use thiserror::Error;

#[derive(Debug, Error)]
pub enum SegZoomError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Image load error: {0}")]
    ImageLoadError(String),

    #[error("Resample error: {0}")]
    ResampleError(String),

    #[error("Image encode error: {0}")]
    ImageEncodeError(String),

    #[error("Output error: {0}")]
    OutputError(String),

    #[error("Manifest error: {0}")]
    ManifestError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Generates factory methods for [`SegZoomError`] variants that wrap a `String`.
macro_rules! error_constructors {
    ($(
        $(#[doc = $doc:expr])*
        $method:ident => $variant:ident
    ),* $(,)?) => {
        impl SegZoomError {
            $(
                $(#[doc = $doc])*
                pub fn $method(msg: impl Into<String>) -> Self {
                    Self::$variant(msg.into())
                }
            )*
        }
    };
}

error_constructors! {
    /// Create a configuration error.
    config => ConfigError,
    /// Create an image load error.
    image_load => ImageLoadError,
    /// Create a resample error.
    resample => ResampleError,
    /// Create an image encode error.
    image_encode => ImageEncodeError,
    /// Create an output error.
    output => OutputError,
    /// Create a manifest error.
    manifest => ManifestError,
}

impl From<serde_json::Error> for SegZoomError {
    fn from(e: serde_json::Error) -> Self {
        Self::ManifestError(e.to_string())
    }
}

impl From<serde_yml::Error> for SegZoomError {
    fn from(e: serde_yml::Error) -> Self {
        Self::ConfigError(e.to_string())
    }
}

/// Decoding failures are mapped explicitly at the load site, so any
/// `image::ImageError` reaching `?` comes from encoding.
impl From<image::ImageError> for SegZoomError {
    fn from(e: image::ImageError) -> Self {
        Self::ImageEncodeError(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SegZoomError>;
