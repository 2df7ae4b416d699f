// 该文件是 Xunai （寻癌） 项目的一部分。
// src/score.rs - 掩码比较与交并比计算
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

use crate::mask::{BinaryMask, MaskError};

/// 掩码比较结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Comparison {
  /// 两个掩码同时标记的像素数
  pub intersection: u64,
  /// 至少一个掩码标记的像素数
  pub union: u64,
}

impl Comparison {
  /// 交并比
  ///
  /// 约定 `union == 0`（两个掩码都为空）时返回 0.0，而不是 NaN。
  pub fn iou(&self) -> f64 {
    if self.union == 0 {
      0.0
    } else {
      (self.intersection as f64) / (self.union as f64)
    }
  }
}

/// 逐像素比较两个同尺寸掩码，统计交集与并集
///
/// 对整个网格做精确整数计数，不抽样、不近似。尺寸不一致时返回
/// [`MaskError::DimensionMismatch`]，不做截断或填充。
pub fn compare(a: &BinaryMask, b: &BinaryMask) -> Result<Comparison, MaskError> {
  a.ensure_same_dimensions(b)?;

  let mut intersection = 0u64;
  let mut union = 0u64;
  for (&p, &q) in a.as_slice().iter().zip(b.as_slice()) {
    if p && q {
      intersection += 1;
    }
    if p || q {
      union += 1;
    }
  }

  Ok(Comparison {
    intersection,
    union,
  })
}

/// 计算交并比得分
pub fn compute_iou(a: &BinaryMask, b: &BinaryMask) -> Result<f64, MaskError> {
  Ok(compare(a, b)?.iou())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn mask_with(width: u32, height: u32, marked: &[(u32, u32)]) -> BinaryMask {
    let mut mask = BinaryMask::new(width, height);
    for &(x, y) in marked {
      mask.set(x, y, true);
    }
    mask
  }

  #[test]
  fn iou_is_symmetric() {
    let a = mask_with(4, 4, &[(0, 0), (1, 1), (2, 3)]);
    let b = mask_with(4, 4, &[(1, 1), (3, 3)]);
    assert_eq!(compute_iou(&a, &b).unwrap(), compute_iou(&b, &a).unwrap());
  }

  #[test]
  fn identical_nonempty_mask_scores_one() {
    let a = mask_with(4, 4, &[(0, 0), (2, 2)]);
    let comparison = compare(&a, &a).unwrap();
    assert_eq!(comparison.intersection, 2);
    assert_eq!(comparison.union, 2);
    assert_eq!(comparison.iou(), 1.0);
  }

  #[test]
  fn empty_pair_scores_zero_not_nan() {
    let a = BinaryMask::new(4, 4);
    let comparison = compare(&a, &a).unwrap();
    assert_eq!(comparison.union, 0);
    assert_eq!(comparison.iou(), 0.0);
  }

  #[test]
  fn mismatched_dimensions_fail() {
    let a = BinaryMask::new(4, 4);
    let b = BinaryMask::new(5, 4);
    assert!(matches!(
      compute_iou(&a, &b),
      Err(MaskError::DimensionMismatch { .. })
    ));
  }

  #[test]
  fn empty_reference_single_marked_pixel() {
    let reference = BinaryMask::new(4, 4);
    let user = mask_with(4, 4, &[(0, 0)]);
    let comparison = compare(&user, &reference).unwrap();
    assert_eq!(comparison.intersection, 0);
    assert_eq!(comparison.union, 1);
    assert_eq!(comparison.iou(), 0.0);
  }

  #[test]
  fn partial_overlap_scores_one_third() {
    let a = mask_with(4, 4, &[(0, 0), (0, 1)]);
    let b = mask_with(4, 4, &[(0, 1), (0, 2)]);
    let comparison = compare(&a, &b).unwrap();
    assert_eq!(comparison.intersection, 1);
    assert_eq!(comparison.union, 3);
    assert!((comparison.iou() - 1.0 / 3.0).abs() < 1e-12);
  }

  #[test]
  fn score_stays_in_unit_interval() {
    let a = mask_with(8, 8, &[(0, 0), (1, 0), (2, 0), (7, 7)]);
    let b = mask_with(8, 8, &[(1, 0), (3, 3)]);
    let score = compute_iou(&a, &b).unwrap();
    assert!((0.0..=1.0).contains(&score));
  }
}
