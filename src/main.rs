// --- Malla Curricular Interactiva - Archivo principal ---

use mallamap::run_server;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    println!("=== Malla Curricular Interactiva (API) ===");
    let bind = "127.0.0.1:8080";
    println!("Iniciando servidor en http://{}", bind);
    run_server(bind).await
}
