use anyhow::Context;
use log::info;
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use warp::Filter;

fn preview_bind_address(port: u16) -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], port))
}

/// Static file routes over the generated site.
pub fn routes(
    root: PathBuf,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::get()
        .and(warp::fs::dir(root))
        .with(warp::log("sitegen::preview"))
}

/// Serves the generated site locally until Ctrl+C.
pub struct PreviewServer {
    root: PathBuf,
    port: u16,
}

impl PreviewServer {
    pub fn new(root: PathBuf, port: u16) -> Self {
        Self { root, port }
    }

    pub fn address(&self) -> SocketAddr {
        preview_bind_address(self.port)
    }

    pub fn serve_until_ctrl_c(&self) -> anyhow::Result<()> {
        let runtime = TokioBuilder::new_current_thread()
            .enable_all()
            .build()
            .context("creating runtime for preview server")?;
        let address = self.address();
        let root = self.root.clone();

        runtime.block_on(async move {
            let (bound, server) = warp::serve(routes(root))
                .try_bind_with_graceful_shutdown(address, async {
                    let _ = signal::ctrl_c().await;
                })
                .with_context(|| format!("binding preview server to {}", address))?;
            info!("Serving site at http://{} (Ctrl+C to stop)", bound);
            server.await;
            Ok::<(), anyhow::Error>(())
        })?;

        info!("Preview server stopped");
        Ok(())
    }
}
