// Adapters layer: concrete implementations of the domain ports.

pub mod xmlmc;

pub use xmlmc::HttpXmlmcClient;
