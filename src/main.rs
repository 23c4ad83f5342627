#[actix_web::main]
async fn main() -> std::io::Result<()> {
    consultancy_server::run().await
}
