use serde::{Deserialize, Serialize};

/// ズーム前にページを領域へ分割する方法。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentMode {
    /// 水平射影プロファイルで行ごとに分割する。
    #[default]
    Line,
    /// 外側輪郭を上端の近さでまとめる。
    Phrase,
    /// 分割せず、ページ全体を1セグメントとして拡大する。
    Whole,
}

impl SegmentMode {
    /// このモードで出力するファイル名の接頭辞。
    pub fn file_prefix(self) -> &'static str {
        match self {
            SegmentMode::Line => "line",
            SegmentMode::Phrase => "phrase",
            SegmentMode::Whole => "image",
        }
    }
}

/// 拡大時のリサンプリングフィルタ。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resample {
    /// 最近傍。画素の境界をそのまま残す。
    #[default]
    Nearest,
    /// Catmull-Rom 3次補間。
    Cubic,
    /// Lanczos (窓幅3)。
    Lanczos,
}

/// 出力ファイルの形式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Jpeg,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpg",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct JobFile {
    pub jobs: Vec<Job>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Job {
    pub input: String,
    pub output: String,
    pub mode: Option<SegmentMode>,
    pub padding: Option<u32>,
    #[serde(default, deserialize_with = "deserialize_optional_zoom")]
    pub zoom: Option<f64>,
    pub resample: Option<Resample>,
    pub threshold: Option<u8>,
    pub merge_proximity: Option<u32>,
    pub format: Option<OutputFormat>,
    pub jpeg_quality: Option<u8>,
    pub manifest: Option<bool>,
}

/// ズーム倍率文字列をパースする。
///
/// 形式:
/// - 数値: `"20"`, `"2.5"`
/// - 倍率表記: `"3x"`, `"0.5X"`
///
/// 有限かつ正の値のみ受け付ける。
pub fn parse_zoom_factor(s: &str) -> crate::error::Result<f64> {
    let trimmed = s.trim();
    let number = trimmed
        .strip_suffix('x')
        .or_else(|| trimmed.strip_suffix('X'))
        .unwrap_or(trimmed)
        .trim();

    if number.is_empty() {
        return Err(crate::error::SegZoomError::config(
            "Zoom factor cannot be empty",
        ));
    }

    let value: f64 = number.parse().map_err(|_| {
        crate::error::SegZoomError::config(format!("Invalid zoom factor: '{trimmed}'"))
    })?;
    validate_zoom_factor(value)
}

/// 倍率が有限かつ正であることを検証する。
pub fn validate_zoom_factor(value: f64) -> crate::error::Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(crate::error::SegZoomError::config(format!(
            "Zoom factor must be a positive finite number, got {value}"
        )))
    }
}

/// YAML上では数値と文字列のどちらでも倍率を書ける。
#[derive(Deserialize)]
#[serde(untagged)]
enum ZoomRepr {
    Number(f64),
    Text(String),
}

impl ZoomRepr {
    fn resolve(self) -> crate::error::Result<f64> {
        match self {
            ZoomRepr::Number(n) => validate_zoom_factor(n),
            ZoomRepr::Text(s) => parse_zoom_factor(&s),
        }
    }
}

/// serdeのdeserialize_withで使用する倍率デシリアライザ
pub(crate) fn deserialize_zoom<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    ZoomRepr::deserialize(deserializer)?
        .resolve()
        .map_err(serde::de::Error::custom)
}

fn deserialize_optional_zoom<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<ZoomRepr>::deserialize(deserializer)?
        .map(ZoomRepr::resolve)
        .transpose()
        .map_err(serde::de::Error::custom)
}
