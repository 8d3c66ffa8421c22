//! # keyseal-server
//!
//! HTTP boundary for keyseal.
//!
//! | Route | Auth | Response |
//! |-------|------|----------|
//! | `GET /generate-token` | none | 200 token as `text/plain`, or 500 |
//! | `POST /tokens` | none | same as `/generate-token` |
//! | `GET /hello` | identity token | 200 `Hello, user!`, or 401 |
//! | `GET /healthz` | none | 200 JSON liveness |

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ServerError;
pub use routes::create_router;
pub use server::KeysealServer;
pub use state::AppState;
