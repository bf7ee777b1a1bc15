//! Wire envelopes exchanged with desktop hosts: request, session state, response.

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
