pub mod dashboard;
pub mod domain;
pub mod flows;
pub mod ports;
pub mod validation;

pub use dashboard::DashboardState;
pub use domain::{Credentials, Entry, Identity, SessionCookie, SESSION_COOKIE};
pub use flows::{FlowError, PLACEHOLDER_SUMMARY};
pub use ports::{AuthService, LogoutReply, PortError, PortResult, SummarizationService};
