use crate::adapters::InMemoryWaitlistRepository;
use crate::configuration::Settings;
use crate::domain::WaitlistRepository;
use crate::routes::{health_check, register};
use crate::telemetry::CustomLevelRootSpanBuilder;
use actix_web::dev::{Server, Service};
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::web::Data;
use actix_web::{web, App, HttpMessage, HttpServer};
use std::net::TcpListener;
use std::sync::Arc;
use tracing_actix_web::{RequestId, TracingLogger};

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(configuration: Settings) -> Result<Self, anyhow::Error> {
        Self::build_with_repository(configuration, Arc::new(InMemoryWaitlistRepository::new()))
            .await
    }

    pub async fn build_with_repository(
        configuration: Settings,
        repository: Arc<dyn WaitlistRepository>,
    ) -> Result<Self, anyhow::Error> {
        let listener = TcpListener::bind(format!(
            "{}:{}",
            configuration.application.host_name, configuration.application.application_port
        ))?;

        let port = listener.local_addr()?.port();
        let server = run(listener, repository)?;

        tracing::info!(port, "Waitlist service listening");

        Ok(Self { server, port })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn run(
    listener: TcpListener,
    repository: Arc<dyn WaitlistRepository>,
) -> Result<Server, std::io::Error> {
    let store_data: Data<dyn WaitlistRepository> = Data::from(repository);

    let server = HttpServer::new(move || {
        App::new()
            .wrap_fn(|req, srv| {
                let request_id = req.extensions().get::<RequestId>().copied();
                let res = srv.call(req);
                async move {
                    let mut res = res.await?;
                    if let Some(request_id) = request_id {
                        if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
                            res.headers_mut()
                                .insert(HeaderName::from_static("x-request-id"), value);
                        }
                    }
                    Ok(res)
                }
            })
            .wrap(TracingLogger::<CustomLevelRootSpanBuilder>::new())
            .route("/health_check", web::get().to(health_check))
            .route("/waitlist", web::post().to(register))
            .app_data(store_data.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
