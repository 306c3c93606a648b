// Biblioteca raíz del crate `mallamap`.
// Reexporta los módulos principales y la función de conveniencia
// `run_server` que levanta la API de la malla interactiva.
pub mod models;
pub mod malla;
pub mod estado;
pub mod vista;
pub mod api_json;
pub mod server;

/// Ejecuta el servidor HTTP (reexport para facilitar uso desde `main`)
pub use server::run_server;
