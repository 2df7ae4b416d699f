// 该文件是 Xunai （寻癌） 项目的一部分。
// src/source/directory.rs - 目录样本源
//
// 本文件根据 Apache 许可证第 2.0 版（以下简称“许可证”）授权使用；
// 除非遵守该许可证条款，否则您不得使用本文件。
// 您可通过以下网址获取许可证副本：
// http://www.apache.org/licenses/LICENSE-2.0
// 除非适用法律要求或书面同意，根据本许可协议分发的软件均按“原样”提供，
// 不附带任何形式的明示或暗示的保证或条件。
// 有关许可权限与限制的具体条款，请参阅本许可协议。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, Wareless Group

use std::path::{Path, PathBuf};

use image::{ImageReader, imageops};
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::{
  FromUrl, FromUrlWithScheme,
  mask::{BinaryMask, GRAY_THRESHOLD},
  source::{Sample, SampleSource, TARGET_HEIGHT, TARGET_WIDTH},
};

#[derive(Error, Debug)]
pub enum DirectorySourceError {
  #[error("URI 方案不匹配: {0}")]
  SchemeMismatch(String),
  #[error("样本 {0} 缺少底图或标注掩码")]
  SampleNotFound(String),
  #[error("I/O 错误: {0}")]
  IoError(#[from] std::io::Error),
  #[error("图像错误: {0}")]
  ImageError(#[from] image::ImageError),
}

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "webp"];

/// 目录样本源
///
/// 底图与标注掩码放在两个平行目录里，按相同文件名配对。
pub struct DirectorySource {
  images: PathBuf,
  masks: PathBuf,
}

impl FromUrlWithScheme for DirectorySource {
  const SCHEME: &'static str = "sample";
}

impl FromUrl for DirectorySource {
  type Error = DirectorySourceError;

  /// 形如 `sample:///data/images?masks=/data/masks`；
  /// 不带 `masks` 参数时默认用底图目录旁的 `masks` 目录。
  fn from_url(url: &Url) -> Result<Self, Self::Error> {
    if url.scheme() != Self::SCHEME {
      return Err(DirectorySourceError::SchemeMismatch(
        url.scheme().to_string(),
      ));
    }

    let images = PathBuf::from(url.path());
    let masks = url
      .query_pairs()
      .find(|(k, _)| k == "masks")
      .map(|(_, v)| PathBuf::from(v.as_ref()))
      .unwrap_or_else(|| {
        images
          .parent()
          .unwrap_or(Path::new("."))
          .join("masks")
      });

    Ok(Self::new(images, masks))
  }
}

impl DirectorySource {
  pub fn new(images: impl Into<PathBuf>, masks: impl Into<PathBuf>) -> Self {
    Self {
      images: images.into(),
      masks: masks.into(),
    }
  }

  /// 底图原始文件路径（上传远端接口时用原始字节）
  pub fn image_path(&self, name: &str) -> PathBuf {
    self.images.join(name)
  }

  fn mask_path(&self, name: &str) -> PathBuf {
    self.masks.join(name)
  }
}

fn is_image_file(path: &Path) -> bool {
  path
    .extension()
    .and_then(|ext| ext.to_str())
    .map(|ext| {
      let lower = ext.to_lowercase();
      IMAGE_EXTENSIONS.contains(&lower.as_str())
    })
    .unwrap_or(false)
}

impl SampleSource for DirectorySource {
  type Error = DirectorySourceError;

  fn list(&self) -> Result<Vec<String>, Self::Error> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(&self.images)? {
      let path = entry?.path();
      if path.is_file() && is_image_file(&path) {
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
          names.push(name.to_string());
        }
      }
    }
    names.sort();
    Ok(names)
  }

  fn load(&self, name: &str) -> Result<Sample, Self::Error> {
    let image_path = self.image_path(name);
    let mask_path = self.mask_path(name);
    if !image_path.is_file() || !mask_path.is_file() {
      return Err(DirectorySourceError::SampleNotFound(name.to_string()));
    }

    debug!("加载样本: {} / {}", image_path.display(), mask_path.display());

    // 底图与掩码都缩放到统一比较尺寸，掩码缩放后再按阈值二值化
    let image = ImageReader::open(&image_path)?.decode()?;
    let image = imageops::resize(
      &image.to_rgb8(),
      TARGET_WIDTH,
      TARGET_HEIGHT,
      imageops::FilterType::CatmullRom,
    );

    let truth = ImageReader::open(&mask_path)?.decode()?;
    let truth = imageops::resize(
      &truth.to_luma8(),
      TARGET_WIDTH,
      TARGET_HEIGHT,
      imageops::FilterType::Nearest,
    );
    let truth = BinaryMask::from_gray(&truth, GRAY_THRESHOLD);

    Ok(Sample {
      name: name.to_string(),
      image,
      truth,
    })
  }
}
