//! HTTP gateway for the verification engine.
//!
//! The platform binding delivers exactly two user events: "identifier
//! submitted" and "code submitted." This adapter maps them onto
//! `POST /verify/start` and `POST /verify/submit`, plus `GET /stats` for
//! operator reporting. The engine's typed outcomes become
//! user-presentable JSON here; the engine itself stays transport-free.

pub mod handlers;
pub mod server;

pub use server::GatewayServer;
