//! Business services containing domain logic and use cases.

pub mod clock;
pub mod mail;
pub mod reservation;
pub mod stats;
pub mod verification;

// Re-export commonly used types
pub use clock::{Clock, ManualClock, SystemClock};
pub use mail::{EmailContent, MailDiagnostics, MailServiceTrait, SampleEmail};
pub use reservation::{
    PhotoUpload, ReservationReceipt, ReservationService, ReservationServiceConfig, SubmitReservation,
};
pub use stats::{
    ReportDelivery, ReportScheduler, SchedulerState, StatsAggregator, StatsReporter,
};
pub use verification::{
    AttemptCleanupConfig, AttemptCleanupService, AttemptLedger, VerificationService,
    VerificationServiceConfig, VerifyRequest,
};
