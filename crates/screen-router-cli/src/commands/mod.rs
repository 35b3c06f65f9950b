pub mod replay;
pub mod routes;
pub mod url;
