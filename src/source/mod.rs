// 该文件是 Xunai （寻癌） 项目的一部分。
// src/source/mod.rs - 样本输入模块
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

mod directory;
mod stroke;

use image::RgbImage;

pub use directory::{DirectorySource, DirectorySourceError};
pub use stroke::{StrokeLayer, StrokeLayerError};

use crate::mask::BinaryMask;

/// 统一比较尺寸（宽）
pub const TARGET_WIDTH: u32 = 512;
/// 统一比较尺寸（高）
pub const TARGET_HEIGHT: u32 = 512;

/// 影像样本
///
/// 底图与对应的标注掩码，二者已缩放到统一比较尺寸。
pub struct Sample {
  /// 样本名（文件名键）
  pub name: String,
  /// 底图（RGB）
  pub image: RgbImage,
  /// 标注掩码（已二值化）
  pub truth: BinaryMask,
}

/// 样本源 trait
///
/// 把"底图 + 标注掩码"的来源抽象出来，评分核心不关心样本来自
/// 目录、上传还是别的输入机制。
pub trait SampleSource {
  type Error;

  /// 列出可用样本名（已排序）
  fn list(&self) -> Result<Vec<String>, Self::Error>;

  /// 按名称加载样本
  fn load(&self, name: &str) -> Result<Sample, Self::Error>;
}
