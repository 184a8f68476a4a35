#[tokio::main]
async fn main() {
    phonebook_server::start_server().await;
}
