pub mod server;

pub use server::VeilServer;
