mod health_check;
mod waitlist;

pub use health_check::health_check;
pub use waitlist::{register, RegisterBody, RegisterError, RegisterResponse};
