pub mod client;

pub use client::StoreClient;

#[cfg(test)]
pub mod mock;
