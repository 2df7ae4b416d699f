// 该文件是 Xunai （寻癌） 项目的一部分。
// src/source/stroke.rs - 手绘笔迹图层
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

use std::path::Path;

use image::{ImageReader, RgbaImage, imageops};
use thiserror::Error;
use url::Url;

use crate::{
  FromUrl, FromUrlWithScheme,
  mask::BinaryMask,
  source::{TARGET_HEIGHT, TARGET_WIDTH},
};

#[derive(Error, Debug)]
pub enum StrokeLayerError {
  #[error("URI 方案不匹配: {0}")]
  SchemeMismatch(String),
  #[error("I/O 错误: {0}")]
  IoError(#[from] std::io::Error),
  #[error("图像错误: {0}")]
  ImageError(#[from] image::ImageError),
}

/// 手绘笔迹图层
///
/// 画布导出的 RGBA 栅格，笔迹信息只在 alpha 通道里。
pub struct StrokeLayer {
  layer: RgbaImage,
}

impl FromUrlWithScheme for StrokeLayer {
  const SCHEME: &'static str = "stroke";
}

impl FromUrl for StrokeLayer {
  type Error = StrokeLayerError;

  fn from_url(url: &Url) -> Result<Self, Self::Error> {
    if url.scheme() != Self::SCHEME {
      return Err(StrokeLayerError::SchemeMismatch(url.scheme().to_string()));
    }
    Self::from_path(Path::new(url.path()))
  }
}

impl StrokeLayer {
  /// 从 RGBA 图像文件加载笔迹图层
  ///
  /// 画布尺寸与比较尺寸不一致时用最近邻缩放，避免重采样凭空
  /// 造出微小的 alpha 值。
  pub fn from_path(path: &Path) -> Result<Self, StrokeLayerError> {
    let layer = ImageReader::open(path)?.decode()?.to_rgba8();
    Ok(Self::from_layer(layer))
  }

  pub fn from_layer(layer: RgbaImage) -> Self {
    let layer = if layer.dimensions() == (TARGET_WIDTH, TARGET_HEIGHT) {
      layer
    } else {
      imageops::resize(
        &layer,
        TARGET_WIDTH,
        TARGET_HEIGHT,
        imageops::FilterType::Nearest,
      )
    };
    Self { layer }
  }

  /// 是否一笔未画
  pub fn is_blank(&self) -> bool {
    !self.layer.pixels().any(|p| p[3] > 0)
  }

  /// 从 alpha 通道得到用户掩码
  pub fn mask(&self) -> BinaryMask {
    BinaryMask::from_alpha(&self.layer)
  }
}
