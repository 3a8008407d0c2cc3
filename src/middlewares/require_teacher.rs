/*!
 * 教师身份中间件
 *
 * 从 `X-Teacher-Identity` 请求头读取 `"<teacherId>:<displayName>"` 形式的身份声明，
 * 确认教师 ID 存在于教师表后，将解析出的 `TeacherIdentity` 存入请求扩展。
 *
 * 该声明没有任何密码学保证，只是一个未经验证的自述。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * use actix_web::{web, App};
 * use crate::middlewares::RequireTeacher;
 *
 * App::new()
 *     .service(
 *         web::scope("/api/v1/classes")
 *             .wrap(RequireTeacher)
 *             .route("", web::get().to(list_classes))
 *     )
 * ```
 *
 * 处理程序中提取身份：
 *
 * ```rust,ignore
 * if let Some(identity) = RequireTeacher::extract_identity(&req) {
 *     // identity.teacher_id / identity.display_name
 * }
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, error, info};

use super::create_error_response;
use crate::errors::RosterError;
use crate::models::{ApiResponse, ErrorCode};
use crate::models::teachers::entities::TeacherIdentity;
use crate::services::teachers::verify_teacher;
use crate::storage::RecordStore;

pub const TEACHER_IDENTITY_HEADER: &str = "X-Teacher-Identity";

#[derive(Clone)]
pub struct RequireTeacher;

// 身份校验失败的原因：声明本身无效，或读取教师表出错
enum Rejection {
    Claim(ErrorCode, String),
    Store(RosterError),
}

// 辅助函数：解析并校验教师身份声明
async fn extract_and_verify_identity(req: &ServiceRequest) -> Result<TeacherIdentity, Rejection> {
    let claim = req
        .headers()
        .get(TEACHER_IDENTITY_HEADER)
        .and_then(|h| std::str::from_utf8(h.as_bytes()).ok())
        .ok_or_else(|| {
            Rejection::Claim(
                ErrorCode::TeacherIdentityInvalid,
                "Missing or invalid X-Teacher-Identity header".to_string(),
            )
        })?;

    let identity: TeacherIdentity = claim.parse().map_err(|e: RosterError| {
        Rejection::Claim(ErrorCode::TeacherIdentityInvalid, e.message().to_string())
    })?;

    let storage = req
        .app_data::<actix_web::web::Data<Arc<dyn RecordStore>>>()
        .expect("Storage not found in app data")
        .get_ref()
        .clone();

    verify_teacher(storage.as_ref(), &identity)
        .await
        .map_err(|e| match e {
            RosterError::Unauthorized(msg) => Rejection::Claim(ErrorCode::TeacherNotFound, msg),
            other => Rejection::Store(other),
        })?;

    Ok(identity)
}

impl<S, B> Transform<S, ServiceRequest> for RequireTeacher
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireTeacherMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireTeacherMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireTeacherMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireTeacherMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // 处理 OPTIONS 请求
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(
                    create_error_response(StatusCode::NO_CONTENT, ErrorCode::Success, "")
                        .map_into_right_body(),
                ));
            }

            match extract_and_verify_identity(&req).await {
                Ok(identity) => {
                    debug!("Teacher identity accepted: {}", identity);
                    req.extensions_mut().insert(identity);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(Rejection::Claim(code, err)) => {
                    info!(
                        "Teacher identity rejected for request to {}: {}",
                        req.path(),
                        err
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            code,
                            &format!("Unauthorized: {err}"),
                        )
                        .map_into_right_body(),
                    ))
                }
                Err(Rejection::Store(e)) => {
                    error!("Failed to verify teacher identity: {}", e);
                    Ok(req.into_response(ApiResponse::from_error(&e).map_into_right_body()))
                }
            }
        })
    }
}

// 辅助函数：从请求中提取教师身份
impl RequireTeacher {
    /// 从请求扩展中提取教师身份
    /// 此函数应该在应用了RequireTeacher中间件的路由处理程序中使用
    pub fn extract_identity(req: &actix_web::HttpRequest) -> Option<TeacherIdentity> {
        req.extensions().get::<TeacherIdentity>().cloned()
    }
}
