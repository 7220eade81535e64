/// 业务错误码
///
/// 放入 ApiResponse.code 字段，前端据此分支处理。
/// 0 表示成功，4xxx 为客户端错误，5xxx 为服务端错误。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success = 0,

    // 请求/参数错误
    BadRequest = 4000,
    Validation = 4001,

    // 认证与授权
    Unauthorized = 4010,
    AuthFailed = 4011,
    Forbidden = 4030,
    PermissionDenied = 4031,

    // 资源不存在
    NotFound = 4040,
    UserNotFound = 4041,
    HackathonNotFound = 4042,
    TeamNotFound = 4043,
    SubmissionNotFound = 4044,
    IdeaNotFound = 4045,

    // 状态冲突
    UserAlreadyExists = 4090,
    TeamMemberExists = 4091,
    SubmissionExists = 4092,
    InvalidStageForAction = 4093,

    // 服务端错误
    InternalServerError = 5000,
}
