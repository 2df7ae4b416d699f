// 该文件是 Xunai （寻癌） 项目的一部分。
// src/main.rs - 项目主程序
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

mod args;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};

use xunai::{
  FromUrl, overlay, score,
  source::{DirectorySource, SampleSource, StrokeLayer},
};

fn main() -> Result<()> {
  tracing_subscriber::fmt::init();

  let args = args::Args::parse();

  info!("样本来源: {}", args.source);
  info!("笔迹图层: {}", args.stroke);
  info!("样本名称: {}", args.sample);
  info!("输出目录: {}", args.output.display());

  let source = DirectorySource::from_url(&args.source)?;
  let sample = source.load(&args.sample)?;
  info!(
    "样本加载完成: {} ({}x{}), 标注 {} 像素",
    sample.name,
    sample.image.width(),
    sample.image.height(),
    sample.truth.marked()
  );

  let stroke = StrokeLayer::from_url(&args.stroke)?;
  if stroke.is_blank() {
    warn!("未检测到任何笔迹，得分记为 0");
  }
  let user_mask = stroke.mask();

  // 评分
  let comparison = score::compare(&user_mask, &sample.truth)?;
  info!(
    "交集 {} 像素, 并集 {} 像素",
    comparison.intersection, comparison.union
  );
  info!("IOU 得分: {:.2}", comparison.iou());

  // 叠加图输出
  std::fs::create_dir_all(&args.output)?;
  let user_overlay = overlay::overlay_default(&sample.image, &user_mask)?;
  let user_path = args.output.join("user.png");
  user_overlay.save(&user_path)?;
  info!("用户掩码叠加图: {}", user_path.display());

  let truth_overlay = overlay::overlay_default(&sample.image, &sample.truth)?;
  let truth_path = args.output.join("truth.png");
  truth_overlay.save(&truth_path)?;
  info!("标注掩码叠加图: {}", truth_path.display());

  // 远端推理（可选；失败只告警，不影响评分结果）
  #[cfg(feature = "remote_model")]
  if let Some(api) = &args.api {
    use xunai::service::InferenceClient;

    let client = InferenceClient::from_url(api)?;
    let bytes = std::fs::read(source.image_path(&args.sample))?;

    match client.classification(bytes.clone()) {
      Ok(probability) => info!("模型恶性概率: {:.2}%", probability * 100.0),
      Err(err) => warn!("分类接口调用失败: {}", err),
    }

    match client.segmentation(bytes) {
      Ok(prediction) => {
        let model_path = args.output.join("model.png");
        prediction.save(&model_path)?;
        info!("模型分割结果: {}", model_path.display());
      }
      Err(err) => warn!("分割接口调用失败: {}", err),
    }
  }

  info!("处理完成");
  Ok(())
}
