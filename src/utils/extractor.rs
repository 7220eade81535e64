//! 路径参数安全提取器
//!
//! 把路径中的 ID 解析为 i64，非法或非正数时直接返回 400，
//! 避免每个处理函数重复解析逻辑。

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest, HttpResponse, error};
use std::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

macro_rules! safe_path_id {
    ($name:ident, $param:literal) => {
        pub struct $name(pub i64);

        impl FromRequest for $name {
            type Error = actix_web::Error;
            type Future = Ready<Result<Self, Self::Error>>;

            fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
                let parsed = req
                    .match_info()
                    .get($param)
                    .and_then(|raw| raw.parse::<i64>().ok())
                    .filter(|id| *id > 0);

                ready(match parsed {
                    Some(id) => Ok($name(id)),
                    None => Err(error::InternalError::from_response(
                        concat!("invalid path parameter: ", $param),
                        HttpResponse::BadRequest().json(ApiResponse::error_empty(
                            ErrorCode::BadRequest,
                            concat!("无效的路径参数: ", $param),
                        )),
                    )
                    .into()),
                })
            }
        }
    };
}

safe_path_id!(SafeIDI64, "id");
safe_path_id!(SafeHackathonIdI64, "hackathon_id");
safe_path_id!(SafeTeamIdI64, "team_id");
safe_path_id!(SafeSubmissionIdI64, "submission_id");
safe_path_id!(SafeIdeaIdI64, "idea_id");
