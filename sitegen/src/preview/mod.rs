pub mod server;

pub use server::PreviewServer;
