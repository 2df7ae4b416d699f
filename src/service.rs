// 该文件是 Xunai （寻癌） 项目的一部分。
// src/service.rs - 远端推理服务客户端
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

use image::RgbImage;
use reqwest::blocking::{Client, Response, multipart};
use thiserror::Error;
use tracing::{error, info};
use url::Url;

use crate::{FromUrl, FromUrlWithScheme};

/// 分类接口返回 JSON 里的概率字段名
const PROBABILITY_FIELD: &str = "probability";
/// 图像上传表单字段名
const UPLOAD_FIELD: &str = "img";

#[derive(Error, Debug)]
pub enum ServiceError {
  #[error("URI 方案不匹配: {0}")]
  SchemeMismatch(String),
  #[error("接口地址无效: {0}")]
  Endpoint(#[from] url::ParseError),
  #[error("请求失败: {0}")]
  Request(#[from] reqwest::Error),
  #[error("服务返回错误状态 {status}: {body}")]
  Status { status: u16, body: String },
  #[error("响应解析失败: {0}")]
  Json(#[from] serde_json::Error),
  #[error("响应缺少 {PROBABILITY_FIELD} 字段")]
  MissingProbability,
  #[error("图像错误: {0}")]
  ImageError(#[from] image::ImageError),
}

/// 远端推理服务客户端
///
/// 单次同步的请求/响应交互，不重试、不批处理。评分核心不依赖本模块。
pub struct InferenceClient {
  base: Url,
  client: Client,
}

impl FromUrlWithScheme for InferenceClient {
  const SCHEME: &'static str = "http";
}

impl FromUrl for InferenceClient {
  type Error = ServiceError;

  fn from_url(url: &Url) -> Result<Self, Self::Error> {
    if url.scheme() != Self::SCHEME && url.scheme() != "https" {
      return Err(ServiceError::SchemeMismatch(url.scheme().to_string()));
    }
    Ok(Self::new(url.clone()))
  }
}

impl InferenceClient {
  pub fn new(mut base: Url) -> Self {
    // 基地址统一补上末尾斜杠，保证 join 时路径不被吞掉
    if !base.path().ends_with('/') {
      base.set_path(&format!("{}/", base.path()));
    }

    Self {
      base,
      client: Client::new(),
    }
  }

  fn endpoint(&self, name: &str) -> Result<Url, url::ParseError> {
    self.base.join(name)
  }

  fn upload(&self, endpoint: &str, img: Vec<u8>) -> Result<Response, ServiceError> {
    let url = self.endpoint(endpoint)?;
    info!("上传图像到 {}", url);

    let part = multipart::Part::bytes(img)
      .file_name("upload.png")
      .mime_str("image/png")?;
    let form = multipart::Form::new().part(UPLOAD_FIELD, part);

    let response = self.client.post(url).multipart(form).send()?;
    let status = response.status();
    if !status.is_success() {
      let body = response.text().unwrap_or_default();
      error!("服务返回错误状态 {}: {}", status, body);
      return Err(ServiceError::Status {
        status: status.as_u16(),
        body,
      });
    }

    Ok(response)
  }

  /// 调用分类接口，返回恶性概率（0.0 - 1.0）
  pub fn classification(&self, img: Vec<u8>) -> Result<f64, ServiceError> {
    let body = self.upload("classification", img)?.text()?;
    let value: serde_json::Value = serde_json::from_str(&body)?;
    value
      .get(PROBABILITY_FIELD)
      .and_then(serde_json::Value::as_f64)
      .ok_or(ServiceError::MissingProbability)
  }

  /// 调用分割接口，返回模型预测的掩码图
  pub fn segmentation(&self, img: Vec<u8>) -> Result<RgbImage, ServiceError> {
    let bytes = self.upload("segmentation", img)?.bytes()?;
    let image = image::load_from_memory(&bytes)?;
    Ok(image.to_rgb8())
  }
}
