pub mod error_dto;
pub mod mail_dto;
pub mod reservation_dto;
pub mod stats_dto;

pub use error_dto::ErrorResponse;
pub use mail_dto::{TestEmailRequest, TestEmailResponse};
pub use reservation_dto::{
    PhotoPayload, ReservationView, ReserveRequest, ReserveResponse, VerifyCodeRequest,
    VerifyCodeResponse,
};
pub use stats_dto::{CountryCountView, CronInitResponse, SendStatsResponse, StatsResponse, StatsView};
