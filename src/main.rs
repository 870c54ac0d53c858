use std::{error::Error, sync::Arc};

use gramika_backend::{
    cms::{CmsClient, MemoryCms, SanityClient},
    routes::{init_tracing, make_app},
    utils::{
        config::{CmsBackend, Config},
        hash_password::hash_password,
        state::AppState,
    },
};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();

    let mut args = std::env::args().skip(1);
    if let Some(command) = args.next() {
        return match (command.as_str(), args.next()) {
            ("hash-password", Some(password)) => {
                println!("{}", hash_password(&password)?);
                Ok(())
            }
            _ => Err("usage: gramika-backend [hash-password <password>]".into()),
        };
    }

    init_tracing();
    info!("Initializing application...");
    let config = Config::init()?;
    info!("Configuration loaded successfully");

    let http_client = reqwest::Client::new();
    let cms: Arc<dyn CmsClient> = match config.cms_backend {
        CmsBackend::Sanity => Arc::new(SanityClient::new(http_client.clone(), config.sanity.clone())),
        CmsBackend::Memory => {
            info!("Using the in-memory CMS; content is lost on restart");
            Arc::new(MemoryCms::new(config.cdn()))
        }
    };
    info!("External clients initialized successfully");

    let addr = format!("{}:{}", config.host, config.port);
    let state = AppState::init(config, cms, http_client);
    let app = make_app(state);

    let listener = TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
