// 该文件是 Xunai （寻癌） 项目的一部分。
// src/mask.rs - 二值掩码定义与二值化
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

use image::{GrayImage, RgbaImage};
use thiserror::Error;

/// 灰度二值化阈值（8 位中点，严格大于才算标记）
pub const GRAY_THRESHOLD: u8 = 127;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MaskError {
  #[error("尺寸不匹配: 期望 {expected_width}x{expected_height}, 实际 {found_width}x{found_height}")]
  DimensionMismatch {
    expected_width: u32,
    expected_height: u32,
    found_width: u32,
    found_height: u32,
  },
}

/// 二值掩码
///
/// 与其来源图像同尺寸的布尔网格，`true` 表示标记区域（疑似/确认病灶），
/// `false` 表示背景。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryMask {
  width: u32,
  height: u32,
  data: Box<[bool]>,
}

impl BinaryMask {
  /// 创建全 `false` 掩码
  pub fn new(width: u32, height: u32) -> Self {
    let data = vec![false; (width as usize) * (height as usize)].into_boxed_slice();
    Self {
      width,
      height,
      data,
    }
  }

  /// 按坐标函数逐像素构造掩码
  pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> bool) -> Self {
    let mut mask = Self::new(width, height);
    for y in 0..height {
      for x in 0..width {
        let index = mask.index(x, y);
        mask.data[index] = f(x, y);
      }
    }
    mask
  }

  /// 从 RGBA 笔迹图层的 alpha 通道二值化
  ///
  /// 只要有墨迹（alpha > 0）就算标记，不论笔触深浅。
  pub fn from_alpha(layer: &RgbaImage) -> Self {
    let (width, height) = layer.dimensions();
    Self::from_fn(width, height, |x, y| layer.get_pixel(x, y)[3] > 0)
  }

  /// 从灰度图按阈值二值化（严格大于 `threshold` 才算标记）
  pub fn from_gray(image: &GrayImage, threshold: u8) -> Self {
    let (width, height) = image.dimensions();
    Self::from_fn(width, height, |x, y| image.get_pixel(x, y)[0] > threshold)
  }

  pub fn width(&self) -> u32 {
    self.width
  }

  pub fn height(&self) -> u32 {
    self.height
  }

  pub fn dimensions(&self) -> (u32, u32) {
    (self.width, self.height)
  }

  fn index(&self, x: u32, y: u32) -> usize {
    (y as usize) * (self.width as usize) + (x as usize)
  }

  pub fn get(&self, x: u32, y: u32) -> bool {
    self.data[self.index(x, y)]
  }

  pub fn set(&mut self, x: u32, y: u32, value: bool) {
    let index = self.index(x, y);
    self.data[index] = value;
  }

  pub fn as_slice(&self) -> &[bool] {
    &self.data
  }

  /// 标记像素数
  pub fn marked(&self) -> u64 {
    self.data.iter().filter(|&&p| p).count() as u64
  }

  /// 是否没有任何标记像素
  pub fn is_empty(&self) -> bool {
    !self.data.iter().any(|&p| p)
  }

  /// 校验与另一掩码尺寸一致
  pub fn ensure_same_dimensions(&self, other: &BinaryMask) -> Result<(), MaskError> {
    self.ensure_dimensions(other.width, other.height)
  }

  /// 校验掩码为给定尺寸
  pub fn ensure_dimensions(&self, width: u32, height: u32) -> Result<(), MaskError> {
    if self.width != width || self.height != height {
      return Err(MaskError::DimensionMismatch {
        expected_width: width,
        expected_height: height,
        found_width: self.width,
        found_height: self.height,
      });
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use image::{Luma, Rgba};

  #[test]
  fn gray_threshold_is_exclusive_at_127() {
    let mut image = GrayImage::new(2, 1);
    image.put_pixel(0, 0, Luma([127]));
    image.put_pixel(1, 0, Luma([128]));

    let mask = BinaryMask::from_gray(&image, GRAY_THRESHOLD);
    assert!(!mask.get(0, 0));
    assert!(mask.get(1, 0));
  }

  #[test]
  fn any_ink_marks_the_pixel() {
    let mut layer = RgbaImage::new(3, 1);
    layer.put_pixel(0, 0, Rgba([255, 0, 0, 0]));
    layer.put_pixel(1, 0, Rgba([255, 0, 0, 1]));
    layer.put_pixel(2, 0, Rgba([255, 0, 0, 255]));

    let mask = BinaryMask::from_alpha(&layer);
    assert!(!mask.get(0, 0));
    assert!(mask.get(1, 0));
    assert!(mask.get(2, 0));
  }

  #[test]
  fn blank_layer_yields_empty_mask() {
    // 全零输入不是错误，得到全 false 掩码
    let layer = RgbaImage::new(4, 4);
    let mask = BinaryMask::from_alpha(&layer);
    assert!(mask.is_empty());
    assert_eq!(mask.marked(), 0);
    assert_eq!(mask.dimensions(), (4, 4));
  }

  #[test]
  fn dimension_check_reports_both_sizes() {
    let a = BinaryMask::new(4, 4);
    let b = BinaryMask::new(4, 3);
    let err = a.ensure_same_dimensions(&b).unwrap_err();
    assert_eq!(
      err,
      MaskError::DimensionMismatch {
        expected_width: 4,
        expected_height: 3,
        found_width: 4,
        found_height: 4,
      }
    );
  }

  #[test]
  fn set_and_get_round_trip() {
    let mut mask = BinaryMask::new(2, 2);
    mask.set(1, 0, true);
    assert!(mask.get(1, 0));
    assert!(!mask.get(0, 1));
    assert_eq!(mask.marked(), 1);
  }
}
