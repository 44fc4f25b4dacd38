pub mod api;

use self::api::{ router, AppState };
use log::info;
use std::error::Error;
use tokio::net::TcpListener;

pub struct Server {
    addr: String,
    state: AppState,
}

impl Server {
    pub fn new(addr: String, state: AppState) -> Self {
        Self { addr, state }
    }

    pub async fn run(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let listener = TcpListener::bind(&self.addr).await.map_err(|e|
            format!("Failed to bind HTTP server to {}: {}. Try a different port.", self.addr, e)
        )?;
        info!("HTTP server listening on: http://{}", listener.local_addr()?);
        info!("Chat endpoint: POST /chat, web UI: GET /");

        axum::serve(listener, router(self.state.clone())).await?;
        Ok(())
    }
}
