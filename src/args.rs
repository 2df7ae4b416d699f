// 该文件是 Xunai （寻癌） 项目的一部分。
// src/args.rs - 项目参数配置
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

use std::path::PathBuf;

use clap::Parser;
use url::Url;

/// Xunai 项目参数配置
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
  /// 样本来源
  /// 格式: sample:///path/to/images?masks=/path/to/masks
  /// 不带 masks 参数时默认用底图目录旁的 masks 目录
  #[arg(long, value_name = "SOURCE")]
  pub source: Url,

  /// 手绘笔迹图层（画布导出的 RGBA PNG）
  /// 格式: stroke:///path/to/stroke.png
  #[arg(long, value_name = "STROKE")]
  pub stroke: Url,

  /// 样本名称（images 目录下的文件名，如 case001.png）
  #[arg(long, value_name = "NAME")]
  pub sample: String,

  /// 叠加图输出目录
  #[arg(long, value_name = "DIR")]
  pub output: PathBuf,

  /// 远端推理服务基地址（可选）
  /// 格式: http://host:port/ 或 https://host/api/
  #[cfg(feature = "remote_model")]
  #[arg(long, value_name = "URI")]
  pub api: Option<Url>,
}
