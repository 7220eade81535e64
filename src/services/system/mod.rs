pub mod status;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

pub struct SystemService;

impl SystemService {
    pub fn new_lazy() -> Self {
        Self
    }

    // 系统运行状态
    pub async fn get_status(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        status::get_status(self, request).await
    }
}
