use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Base URL of the contact service.
    #[arg(long, default_value = "http://localhost:3001")]
    server: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    phonebook::ui::run(&args.server).await;
}
