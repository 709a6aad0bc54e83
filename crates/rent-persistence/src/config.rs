//! Carga de configuración del store de sesiones desde variables de entorno.
//! Usa convención `SESSIONS_DIR` con default relativo al directorio de
//! trabajo.

use std::env;
use std::path::PathBuf;

use dotenvy::dotenv;
use once_cell::sync::Lazy;

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

#[derive(Debug, Clone)]
pub struct SessionsConfig {
    /// Directorio donde se escriben los documentos de sesión.
    pub dir: PathBuf,
}

impl SessionsConfig {
    pub fn from_env() -> Self {
        // asegura que .env se haya cargado
        Lazy::force(&DOTENV_LOADED);
        let dir = env::var("SESSIONS_DIR").map(PathBuf::from).unwrap_or_else(|_| PathBuf::from("sessions"));
        Self { dir }
    }
}

/// Forzar carga temprana de .env desde aplicaciones externas si se desea.
pub fn init_dotenv() {
    Lazy::force(&DOTENV_LOADED);
}
