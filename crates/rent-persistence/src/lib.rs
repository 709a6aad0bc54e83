//! rent-persistence
//!
//! Backend durable de sesiones del asistente. Objetivo: proveer una
//! implementación en disco de `SessionStore` con paridad 1:1 respecto al
//! backend en memoria del core, más utilidades de configuración.
//!
//! Módulos:
//! - `fs`: store de sesiones sobre archivos JSON (un documento por clave).
//! - `config`: carga de configuración desde .env / variables de entorno.
//! - `error`: mapeo de errores de IO/serde a variantes semánticas.

pub mod config;
pub mod error;
pub mod fs;

pub use config::{init_dotenv, SessionsConfig};
pub use error::PersistenceError;
pub use fs::FileSessionStore;
