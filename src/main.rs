#[actix_web::main]
async fn main() -> std::io::Result<()> {
    letter_portal::run().await
}
