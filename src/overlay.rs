// 该文件是 Xunai （寻癌） 项目的一部分。
// src/overlay.rs - 掩码叠加渲染
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

use image::{Rgb, RgbImage};

use crate::mask::{BinaryMask, MaskError};

// 叠加渲染常量
const OVERLAY_COLOR: [u8; 3] = [255, 0, 0]; // 红色
const OVERLAY_ALPHA: u8 = 100; // 约 39% 不透明度

/// 整数 alpha 混合（四舍五入）
fn blend(dst: u8, src: u8, alpha: u8) -> u8 {
  let a = alpha as u32;
  (((src as u32) * a + (dst as u32) * (255 - a) + 127) / 255) as u8
}

/// 把掩码以半透明颜色叠加到底图上
///
/// 掩码标记处按 `alpha` 混入 `color`，其余像素逐字节保留原样。
/// 不修改底图，返回同尺寸的新图像；掩码与底图尺寸不一致时返回
/// [`MaskError::DimensionMismatch`]。
pub fn overlay_mask(
  base: &RgbImage,
  mask: &BinaryMask,
  color: [u8; 3],
  alpha: u8,
) -> Result<RgbImage, MaskError> {
  mask.ensure_dimensions(base.width(), base.height())?;

  let mut output = base.clone();
  for y in 0..output.height() {
    for x in 0..output.width() {
      if mask.get(x, y) {
        let pixel = output.get_pixel_mut(x, y);
        *pixel = Rgb([
          blend(pixel[0], color[0], alpha),
          blend(pixel[1], color[1], alpha),
          blend(pixel[2], color[2], alpha),
        ]);
      }
    }
  }

  Ok(output)
}

/// 按默认配色（半透明红色）叠加掩码
pub fn overlay_default(base: &RgbImage, mask: &BinaryMask) -> Result<RgbImage, MaskError> {
  overlay_mask(base, mask, OVERLAY_COLOR, OVERLAY_ALPHA)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn gray_base(width: u32, height: u32, level: u8) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb([level, level, level]))
  }

  #[test]
  fn unmasked_pixels_are_byte_identical() {
    let base = gray_base(4, 4, 80);
    let mut mask = BinaryMask::new(4, 4);
    mask.set(1, 2, true);

    let output = overlay_mask(&base, &mask, OVERLAY_COLOR, OVERLAY_ALPHA).unwrap();
    for y in 0..4 {
      for x in 0..4 {
        if (x, y) != (1, 2) {
          assert_eq!(output.get_pixel(x, y), base.get_pixel(x, y));
        }
      }
    }
    assert_ne!(output.get_pixel(1, 2), base.get_pixel(1, 2));
  }

  #[test]
  fn masked_pixel_blends_color() {
    // 黑底混入 alpha=100 的纯红: 255*100/255 四舍五入后为 100
    let base = gray_base(1, 1, 0);
    let mut mask = BinaryMask::new(1, 1);
    mask.set(0, 0, true);

    let output = overlay_mask(&base, &mask, [255, 0, 0], 100).unwrap();
    assert_eq!(output.get_pixel(0, 0), &Rgb([100, 0, 0]));
  }

  #[test]
  fn base_image_is_not_mutated() {
    let base = gray_base(2, 2, 30);
    let untouched = base.clone();
    let mut mask = BinaryMask::new(2, 2);
    mask.set(0, 0, true);

    let _ = overlay_default(&base, &mask).unwrap();
    assert_eq!(base, untouched);
  }

  #[test]
  fn mismatched_mask_fails() {
    let base = gray_base(4, 4, 10);
    let mask = BinaryMask::new(3, 4);
    assert!(matches!(
      overlay_default(&base, &mask),
      Err(MaskError::DimensionMismatch { .. })
    ));
  }

  #[test]
  fn full_alpha_replaces_pixel() {
    let base = gray_base(1, 1, 200);
    let mut mask = BinaryMask::new(1, 1);
    mask.set(0, 0, true);

    let output = overlay_mask(&base, &mask, [255, 0, 0], 255).unwrap();
    assert_eq!(output.get_pixel(0, 0), &Rgb([255, 0, 0]));
  }
}
