//! 路径参数提取器
//!
//! 路径中的 ID 必须是正整数，否则在进入处理程序前直接返回 400。

use actix_web::{
    FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError,
};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

fn parse_positive_id(req: &HttpRequest, name: &str) -> Result<i64, actix_web::Error> {
    let raw = req.match_info().get(name).unwrap_or_default();

    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => {
            let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::BadRequest,
                format!("Invalid path parameter '{name}': {raw}"),
            ));
            Err(InternalError::from_response(format!("invalid {name}"), response).into())
        }
    }
}

macro_rules! define_safe_id_extractor {
    ($name:ident, $param:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name(pub i64);

        impl FromRequest for $name {
            type Error = actix_web::Error;
            type Future = Ready<Result<Self, Self::Error>>;

            fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
                ready(parse_positive_id(req, $param).map($name))
            }
        }
    };
}

define_safe_id_extractor!(SafeClassIdI64, "class_id");
define_safe_id_extractor!(SafeScheduleIdI64, "schedule_id");
define_safe_id_extractor!(SafeEnrollmentIdI64, "enrollment_id");

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_parse_positive_id() {
        let req = TestRequest::default()
            .param("class_id", "42")
            .to_http_request();
        assert_eq!(parse_positive_id(&req, "class_id").ok(), Some(42));

        let req = TestRequest::default()
            .param("class_id", "0")
            .to_http_request();
        assert!(parse_positive_id(&req, "class_id").is_err());

        let req = TestRequest::default()
            .param("class_id", "abc")
            .to_http_request();
        assert!(parse_positive_id(&req, "class_id").is_err());

        let req = TestRequest::default().to_http_request();
        assert!(parse_positive_id(&req, "class_id").is_err());
    }
}
