mod http_waitlist_client;

pub use http_waitlist_client::HttpWaitlistClient;
