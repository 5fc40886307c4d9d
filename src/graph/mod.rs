//! The connection graph between element groups.

pub use self::connection::Connection;
pub use self::connection_graph::{build_connections, ConnectionGraph};

mod connection;
mod connection_graph;
