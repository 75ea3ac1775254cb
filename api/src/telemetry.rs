use actix_web::body::MessageBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::Error;
use tracing::Span;
use tracing_actix_web::{DefaultRootSpanBuilder, Level, RootSpanBuilder};

const WAITLIST_PATH: &str = "/waitlist";

/// Root span builder that demotes health checks to `TRACE` and records how
/// each waitlist registration ended as `waitlist.outcome`.
pub struct CustomLevelRootSpanBuilder;

impl RootSpanBuilder for CustomLevelRootSpanBuilder {
    fn on_request_start(request: &ServiceRequest) -> Span {
        let level = if request.path() == "/health_check" {
            Level::TRACE
        } else {
            Level::INFO
        };
        tracing_actix_web::root_span!(
            level = level,
            request,
            "waitlist.outcome" = tracing::field::Empty
        )
    }

    fn on_request_end<B: MessageBody>(span: Span, outcome: &Result<ServiceResponse<B>, Error>) {
        if let Ok(response) = outcome {
            if let Some(label) = registration_outcome(response.request().path(), response.status())
            {
                span.record("waitlist.outcome", label);
            }
        }
        DefaultRootSpanBuilder::on_request_end(span, outcome);
    }
}

fn registration_outcome(path: &str, status: StatusCode) -> Option<&'static str> {
    if path != WAITLIST_PATH {
        return None;
    }
    let label = match status {
        StatusCode::CREATED => "created",
        StatusCode::OK => "already-exists",
        StatusCode::BAD_REQUEST => "invalid-email",
        _ => "failed",
    };
    Some(label)
}
